//! `@luaenum` collection: turns an X-macro table into a documented enum group.
//!
//! ```text
//! /**
//!  * @luaenum Weapon(2[,d[,f]])
//!  * The Weapon enum can be used to represent a weapon in some functions.
//!  */
//! #define WEAPON_ITEM_TABLE \
//!   WEAPON_ITEM(WeaponPhaser, "Phaser", "Phaser", 100, ...) \
//! ```
//!
//! becomes a `@defgroup WeaponEnum` block with one bullet per item. Column
//! numbers are 0-based positions inside the item's parentheses: the symbol,
//! an optional description and an optional "share with scripts" flag.

use super::patterns::*;

/// Column layout announced by a `@luaenum` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub name: String,
    pub symbol_col: usize,
    pub descr_col: Option<usize>,
    pub flag_col: Option<usize>,
}

/// Where we are in an enum table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnumMode {
    #[default]
    Idle,
    /// Tag seen, waiting for the `#define` that starts the table
    Header(EnumSpec),
    /// Inside the table body
    Body(EnumSpec),
}

impl EnumMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, EnumMode::Idle)
    }
}

/// Parse a `@luaenum Name(c[,c[,c]])` tag.
pub fn parse_header(line: &str) -> Option<EnumSpec> {
    let caps = RE_LUAENUM.captures(line)?;
    let col = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<usize>().ok());
    Some(EnumSpec {
        name: caps[1].to_string(),
        symbol_col: col(2)?,
        descr_col: col(3),
        flag_col: col(4),
    })
}

/// Opening lines of the group, emitted when the tag is seen.
pub fn open_group(spec: &EnumSpec) -> String {
    format!("/**\n * @defgroup {0}Enum {0}\n", spec.name)
}

/// Feed one source line (without its line terminator) to an active enum.
///
/// Lines are handled only outside long comments; the caller guarantees the
/// mode is not `Idle`.
pub fn collect_line(mode: &mut EnumMode, line: &str, enums: &mut Vec<String>) {
    match mode {
        EnumMode::Idle => {}
        EnumMode::Header(spec) => {
            if RE_DEFINE.is_match(line) {
                enums.push("@{\n".to_string());
                enums.push(format!("# {}\n", spec.name));
                *mode = EnumMode::Body(spec.clone());
            }
        }
        EnumMode::Body(spec) => {
            // Examine the raw line before the comment stripping below
            let continues = line.ends_with('\\');

            if let Some(item) = extract_item(spec, line) {
                enums.push(item);
            }

            if !continues {
                enums.push("@}\n".to_string());
                enums.push("*/\n\n".to_string());
                *mode = EnumMode::Idle;
            }
        }
    }
}

/// Build the bullet for one table row, or `None` when the row carries no
/// item that should be documented.
fn extract_item(spec: &EnumSpec, line: &str) -> Option<String> {
    let line = RE_INLINE_COMMENT.replace_all(line, "");

    if RE_NO_WORD_CONTINUATION.is_match(&line)
        || RE_BLANK.is_match(&line)
        || RE_LINE_COMMENT.is_match(&line)
        || RE_BLOCK_COMMENT_START.is_match(&line)
    {
        return None;
    }

    let caps = RE_ITEM.captures(&line)?;
    let words = split_items(&caps[1])?;

    if let Some(flag_col) = spec.flag_col {
        if words.get(flag_col)?.trim_matches(',') != "true" {
            return None;
        }
    }

    let descr = match spec.descr_col {
        Some(col) => escape_description(words.get(col)?),
        None => String::new(),
    };
    let symbol = words.get(spec.symbol_col)?.replace(',', "");

    Some(format!(
        " * * `%{}.%{}`<br>\n{}<br>\n",
        spec.name, symbol, descr
    ))
}

/// `shell_words` reads an unquoted `#` as the start of a comment; rows like
/// `KEY_ITEM(Hash, #, "Hash key")` need it as a plain token.
const HASH_STANDIN: &str = "\u{0}";

/// Split a macro argument list, keeping quoted strings (commas included)
/// as single tokens.
fn split_items(args: &str) -> Option<Vec<String>> {
    // MODULE_ITEM(ModuleEngineer,"Engineer", ...) needs a space to split
    let spaced = args.replace(',', ", ").replace('#', HASH_STANDIN);
    let words = shell_words::split(&spaced).ok()?;
    Some(words.into_iter().map(|w| w.replace(HASH_STANDIN, "#")).collect())
}

/// Prefix every word with `%` so the generator does not auto-link it, then
/// undo the prefix where it breaks markup.
pub fn escape_description(descr: &str) -> String {
    let words: Vec<String> = descr.split_whitespace().map(|w| format!("%{}", w)).collect();
    let joined = words.join(" ");

    let escaped = joined
        .trim_matches(',')
        .replace("%`", "`")
        .replace("\\link %", "\\link ")
        .replace("%(", "(")
        .replace("%->", "->");

    unsuppress_arg_types(&escaped)
}

/// Only the event signatures need this: in `%onShipKilled(Ship %ship, %BfObject %by)`
/// argument types must stay linkable, so the first token of every argument
/// loses its `%`.
fn unsuppress_arg_types(descr: &str) -> String {
    let Some(caps) = RE_ARGLIST.captures(descr) else {
        return descr.to_string();
    };

    let args: Vec<String> = caps[2]
        .split(',')
        .map(|arg| {
            let mut tokens = arg.split_whitespace();
            let mut out = tokens.next().unwrap_or_default().replace('%', "");
            for token in tokens {
                out.push(' ');
                out.push_str(token);
            }
            out
        })
        .collect();

    format!("{}({}){}", &caps[1], args.join(", "), &caps[3])
}
