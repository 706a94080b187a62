//! Tags recognized inside a long comment (`/** ... */` or `--[[ ... --]]`).

use super::enums;
use super::patterns::*;
use super::scanner::{CommentBlock, Page, Scanner};
use crate::model::*;
use anyhow::{anyhow, bail, Result};

/// Handle one line inside an open long comment.
///
/// Returns `Ok(false)` once the closing token is seen.
pub(super) fn handle_line(sc: &mut Scanner, block: &mut CommentBlock, text: &str) -> Result<bool> {
    if comment_close(sc.dialect).is_match(text) {
        sc.doc.comments.push("*/\n".to_string());
        return Ok(false);
    }

    if RE_MAINPAGE.is_match(text) {
        sc.acc.mainpage.push(format!("{}\n", text));
        block.page = Page::Main;
        block.directive = true;
        return Ok(true);
    }

    if RE_PAGE.is_match(text) {
        sc.acc.otherpage.push(format!("{}\n", text));
        block.page = Page::Other;
        block.directive = true;
        return Ok(true);
    }

    if RE_PAR.is_match(text) {
        block.directive = true;
        return Ok(true);
    }

    if let Some(spec) = enums::parse_header(text) {
        sc.acc.enums.push(enums::open_group(&spec));
        sc.enum_mode = enums::EnumMode::Header(spec);
        block.directive = true;
        return Ok(true);
    }

    if let Some(caps) = RE_GEOM.captures(text) {
        sc.doc
            .comments
            .push(format!("\\par Geometry\n{}\n", optional(&caps, 1)));
        return Ok(true);
    }

    // The generator cannot place free text above a function list, so hang
    // the text on a dummy method; the HTML pass moves it into place.
    if let Some(caps) = RE_FUNCSHEADER.captures(text) {
        let class = cleanup_classname(&caps[1]);
        sc.doc.class_mut(&class).members.push(Member::Sentinel);
        sc.doc
            .comments
            .push(format!("\\fn {}::{}\n", class, FUNCS_HEADER_MARKER));
        block.directive = true;
        return Ok(true);
    }

    if RE_LUACONST_TAG.is_match(text) {
        if let Some(caps) = luaconst(sc.dialect).captures(text) {
            let class = caps
                .get(1)
                .map(|m| cleanup_classname(m.as_str()))
                .unwrap_or_else(|| GLOBAL_SCOPE.to_string());
            sc.doc
                .comments
                .push(format!(" \\fn {}::{}\n", class, &caps[2]));
        }
        block.directive = true;
        return Ok(true);
    }

    if RE_LUAFUNC_TAG.is_match(text) {
        let decl = parse_function_decl(sc.dialect, text)?;
        add_function(sc, decl);
        block.directive = true;
        return Ok(true);
    }

    // @classbrief and @classdescr are local extensions feeding the class
    // descriptions of the next registration header
    if let Some(caps) = RE_CLASSBRIEF.captures(text) {
        sc.descr.short = caps[1].to_string();
        block.directive = true;
        return Ok(true);
    }

    if let Some(caps) = RE_CLASSDESCR.captures(text) {
        sc.descr.long = caps[1].to_string();
        block.directive = true;
        return Ok(true);
    }

    // Class defined in C++ and registered elsewhere
    if let Some(caps) = RE_LUACLASS.captures(text) {
        sc.doc
            .comments
            .push(format!(" \\class {}\n", cleanup_classname(&caps[1])));
        block.directive = true;
        return Ok(true);
    }

    // Documentation-only class
    if let Some(caps) = RE_LUAVCLASS.captures(text) {
        let class = cleanup_classname(&caps[1]);
        sc.doc.comments.push(format!(" \\class {}\n", class));
        sc.doc.class_mut(&class).set_header(Header::Virtual);
        block.directive = true;
        return Ok(true);
    }

    if let Some(caps) = RE_DESCR.captures(text) {
        sc.doc
            .comments
            .push(format!("\n {}\n", cleanup_classname(optional(&caps, 1))));
        block.directive = true;
        return Ok(true);
    }

    let line = format!("{}\n", text);
    match block.page {
        Page::Main => sc.acc.mainpage.push(line),
        Page::Other => sc.acc.otherpage.push(line),
        Page::None if !sc.enum_mode.is_idle() => sc.acc.enums.push(line),
        // @code blocks and prose following a directive end up here
        Page::None if block.directive => sc.doc.comments.push(line),
        Page::None => {}
    }

    Ok(true)
}

/// Text of an optional capture group, empty when the tag had no argument.
fn optional<'t>(caps: &regex::Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map_or("", |m| m.as_str())
}

/// Parse `@luafunc [static] [rettype] [Class::]method(args)`.
///
/// Lua sources separate class and method with `.` or `:` instead of `::`.
pub fn parse_function_decl(dialect: Dialect, text: &str) -> Result<FunctionDecl> {
    let caps = luafunc(dialect)
        .captures(text)
        .ok_or_else(|| anyhow!("couldn't get method name from `{}`", text.trim()))?;

    let method = caps[4].trim();
    if method.is_empty() {
        bail!("couldn't get method name from `{}`", text.trim());
    }

    Ok(FunctionDecl {
        is_static: caps.get(1).is_some(),
        retval: caps.get(2).map(|m| m.as_str().trim().to_string()),
        class: caps.get(3).map(|m| cleanup_classname(m.as_str())),
        method: method.to_string(),
        args: caps[5].to_string(),
        source: text.trim().to_string(),
    })
}

/// Emit the signature marker and record the declaration on its owner.
fn add_function(sc: &mut Scanner, decl: FunctionDecl) {
    let retval = decl
        .retval
        .as_deref()
        .map(|r| format!("{} ", r))
        .unwrap_or_default();
    sc.doc.comments.push(format!(
        " \\fn {}{}::{}({})\n",
        retval,
        decl.owner(),
        decl.method,
        decl.args
    ));

    if decl.is_constructor() {
        sc.doc.comments.push(constructor_example(&decl));
    } else if let Some(class) = sc.doc.classes.iter_mut().find(|c| c.name == decl.owner()) {
        class.remove_placeholder(&decl.method);
    }

    // Free functions join a `global` class when the file declares one
    if decl.class.is_some() || sc.doc.class(GLOBAL_SCOPE).is_some() {
        let owner = decl.owner().to_string();
        sc.doc.class_mut(&owner).members.push(Member::Detailed(decl));
    } else {
        sc.doc.globals.push(decl);
    }
}

/// Canned usage example for a constructor.
fn constructor_example(decl: &FunctionDecl) -> String {
    let class = decl.owner();

    // `point` is lower case already, so the generic example would shadow it
    if class == "point" {
        return "\\brief Constructor.\n\nExample:\n@code\npt = point.new(100, 300)\ntestitem = TestItem.new(pt)\nlevelgen:addItem(testitem)\n@endcode\n\n".to_string();
    }

    let var = class.to_lowercase();
    format!(
        "\\brief Constructor.\n\nExample:\n@code\n{var} = {class}.new({args})\n...\nlevelgen:addItem({var})\n@endcode\n\n",
        var = var,
        class = class,
        args = decl.args
    )
}
