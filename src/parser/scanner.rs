//! Line scanner: per-file state machine over binding macros, long comments
//! and enum tables.
//!
//! Rules are tried in a fixed order and the first one that consumes a line
//! wins: class registration, methods tables, long comment open, then the
//! in-comment tags (see `comment.rs`) and finally enum table rows.

use super::comment;
use super::enums::{self, EnumMode};
use super::patterns::*;
use crate::model::*;
use anyhow::Result;
use std::borrow::Cow;

/// Which binding-macro block we are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeMode {
    Normal,
    CollectingMethods,
    CollectingStaticMethods,
}

/// Where untagged comment lines are routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) enum Page {
    #[default]
    None,
    Main,
    Other,
}

/// State of the currently open long comment.
#[derive(Debug, Default)]
pub(super) struct CommentBlock {
    pub page: Page,
    /// Set once any directive was recognized; later prose rides along
    pub directive: bool,
}

pub struct Scanner<'a> {
    pub(super) dialect: Dialect,
    pub(super) acc: &'a mut Accumulators,
    pub(super) doc: FileDoc,
    pub(super) enum_mode: EnumMode,
    /// Applied to the next registered header
    pub(super) descr: ClassDescr,
    code: CodeMode,
    comment: Option<CommentBlock>,
    pending_methods: Vec<String>,
    pending_static: Vec<String>,
}

impl<'a> Scanner<'a> {
    pub fn new(dialect: Dialect, acc: &'a mut Accumulators) -> Self {
        Scanner {
            dialect,
            acc,
            doc: FileDoc::default(),
            enum_mode: EnumMode::Idle,
            descr: ClassDescr::default(),
            code: CodeMode::Normal,
            comment: None,
            pending_methods: Vec::new(),
            pending_static: Vec::new(),
        }
    }

    /// Feed one line; the only error is an unparseable `@luafunc`.
    pub fn process_line(&mut self, raw: &str) -> Result<()> {
        let text = raw.trim_end_matches(|c: char| c == '\r' || c == '\n');

        // Classes documented from Lua never have C++ behind them
        let text: Cow<str> = if self.dialect == Dialect::Lua {
            Cow::Owned(text.replace("@luaclass", "@luavclass"))
        } else {
            Cow::Borrowed(text)
        };

        if self.binding_macro(&text) {
            return Ok(());
        }

        if comment_open(self.dialect).is_match(&text) {
            self.comment = Some(CommentBlock::default());
            self.doc.comments.push("/*!\n".to_string());
            return Ok(());
        }

        if let Some(mut block) = self.comment.take() {
            if comment::handle_line(self, &mut block, &text)? {
                self.comment = Some(block);
            }
            return Ok(());
        }

        if !self.enum_mode.is_idle() {
            enums::collect_line(&mut self.enum_mode, &text, &mut self.acc.enums);
        }

        Ok(())
    }

    pub fn in_comment(&self) -> bool {
        self.comment.is_some()
    }

    pub fn in_enum(&self) -> bool {
        !self.enum_mode.is_idle()
    }

    pub fn finish(self) -> FileDoc {
        self.doc
    }

    /// Class registration and methods tables. Returns true if consumed.
    fn binding_macro(&mut self, text: &str) -> bool {
        if let Some(caps) = RE_REGISTER_CLASS.captures(text) {
            let name = cleanup_classname(&caps[1]);
            let header = Header::Registered {
                descr: self.descr.clone(),
                parent: None,
            };
            self.doc.class_mut(&name).set_header(header);
            return true;
        }

        if let Some(caps) = RE_REGISTER_SUBCLASS.captures(text) {
            let name = cleanup_classname(&caps[1]);
            let header = Header::Registered {
                descr: self.descr.clone(),
                parent: Some(cleanup_classname(&caps[2])),
            };
            self.doc.class_mut(&name).set_header(header);
            self.descr.clear();
            return true;
        }

        if RE_METHODS_OPEN.is_match(text) {
            self.code = CodeMode::CollectingMethods;
            return true;
        }

        if self.code == CodeMode::CollectingMethods {
            if let Some(caps) = RE_METHOD_ITEM.captures(text) {
                self.pending_methods.push(caps[1].to_string());
                return true;
            }

            if let Some(caps) = RE_METHODS_CLOSE.captures(text) {
                let name = cleanup_classname(&caps[1]);
                let methods = std::mem::take(&mut self.pending_methods);
                if !methods.is_empty() {
                    add_placeholders(self.doc.class_mut(&name), methods, false);
                }
                self.code = CodeMode::Normal;
                return true;
            }
        }

        if RE_STATIC_OPEN.is_match(text) {
            self.code = CodeMode::CollectingStaticMethods;
            return true;
        }

        if self.code == CodeMode::CollectingStaticMethods {
            if let Some(caps) = RE_STATIC_ITEM.captures(text) {
                self.pending_static.push(caps[1].to_string());
                return true;
            }

            if let Some(caps) = RE_STATIC_CLOSE.captures(text) {
                let name = cleanup_classname(&caps[1]);
                let methods = std::mem::take(&mut self.pending_static);
                let class = self.doc.class_mut(&name);
                class.set_header(Header::StaticTable {
                    descr: self.descr.clone(),
                });
                add_placeholders(class, methods, true);
                self.code = CodeMode::Normal;
                return true;
            }
        }

        false
    }
}

/// Append table placeholders, skipping methods the class already documents.
fn add_placeholders(class: &mut ClassRecord, methods: Vec<String>, is_static: bool) {
    for name in methods {
        if !class.has_member(&name) {
            class.members.push(Member::Placeholder { name, is_static });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(dialect: Dialect, input: &str) -> (FileDoc, Accumulators) {
        let mut acc = Accumulators::default();
        let mut scanner = Scanner::new(dialect, &mut acc);
        for line in input.split_inclusive('\n') {
            scanner.process_line(line).unwrap();
        }
        let doc = scanner.finish();
        (doc, acc)
    }

    fn placeholder(name: &str, is_static: bool) -> Member {
        Member::Placeholder {
            name: name.to_string(),
            is_static,
        }
    }

    #[test]
    fn base_class_registration() {
        let (doc, _) = scan(Dialect::Cpp, "REGISTER_LUA_CLASS(LuaPlayerInfo);\n");
        let class = doc.class("PlayerInfo").unwrap();
        assert!(matches!(
            class.header,
            Some(Header::Registered { parent: None, .. })
        ));
    }

    #[test]
    fn header_stays_first_after_methods() {
        let input = "\
#define LUA_METHODS(CLASS, METHOD) \\
   METHOD(CLASS, getIndex, ARRAYDEF({{ END }}), 1 ) \\

GENERATE_LUA_METHODS_TABLE(Team, LUA_METHODS);
REGISTER_LUA_CLASS(Team);
";
        let (doc, _) = scan(Dialect::Cpp, input);
        let class = doc.class("Team").unwrap();
        assert!(class.header.is_some());
        assert_eq!(class.members, vec![placeholder("getIndex", false)]);
    }

    #[test]
    fn subclass_records_parent_and_consumes_description() {
        let input = "\
/**
 * @classbrief Walls block ships.
 * @classdescr A wall segment.
 */
REGISTER_LUA_SUBCLASS(WallItem, LuaBfObject);
REGISTER_LUA_SUBCLASS(Turret, BfObject);
";
        let (doc, _) = scan(Dialect::Cpp, input);
        let wall = doc.class("WallItem").unwrap();
        assert_eq!(wall.parent(), Some("BfObject"));
        match &wall.header {
            Some(Header::Registered { descr, .. }) => {
                assert_eq!(descr.short, "Walls block ships.");
                assert_eq!(descr.long, "A wall segment.");
            }
            other => panic!("unexpected header: {:?}", other),
        }
        match &doc.class("Turret").unwrap().header {
            Some(Header::Registered { descr, parent }) => {
                assert_eq!(descr, &ClassDescr::default());
                assert_eq!(parent.as_deref(), Some("BfObject"));
            }
            other => panic!("unexpected header: {:?}", other),
        }
    }

    #[test]
    fn methods_table_placeholders_in_order() {
        let input = "\
#define LUA_METHODS(CLASS, METHOD) \\
   METHOD(CLASS, getIndex,          ARRAYDEF({{ END }}), 1 ) \\
   METHOD(CLASS, getName,           ARRAYDEF({{ END }}), 1 ) \\
   METHOD(CLASS, getScore,          ARRAYDEF({{ END }}), 1 ) \\

GENERATE_LUA_FUNARGS_TABLE(Team, LUA_METHODS);
GENERATE_LUA_METHODS_TABLE(LuaTeam, LUA_METHODS);

#define LUA_METHODS(CLASS, METHOD) \\
   METHOD(CLASS, isAlive,           ARRAYDEF({{ END }}), 1 ) \\

GENERATE_LUA_METHODS_TABLE(Ship, LUA_METHODS);
";
        let (doc, _) = scan(Dialect::Cpp, input);
        assert_eq!(
            doc.class("Team").unwrap().members,
            vec![
                placeholder("getIndex", false),
                placeholder("getName", false),
                placeholder("getScore", false),
            ]
        );
        assert_eq!(
            doc.class("Ship").unwrap().members,
            vec![placeholder("isAlive", false)]
        );
    }

    #[test]
    fn static_table_sets_header_and_static_placeholders() {
        let input = "\
#define LUA_STATIC_METHODS(METHOD) \\
   METHOD(polyganize,  ARRAYDEF({{ TABLE, END }}), 1 ) \\
   METHOD(triangulate, ARRAYDEF({{ TABLE, END }}), 1 ) \\

GENERATE_LUA_STATIC_METHODS_TABLE(Geom, LUA_STATIC_METHODS);
";
        let (doc, _) = scan(Dialect::Cpp, input);
        let geom = doc.class("Geom").unwrap();
        assert!(matches!(geom.header, Some(Header::StaticTable { .. })));
        assert_eq!(
            geom.members,
            vec![placeholder("polyganize", true), placeholder("triangulate", true)]
        );
    }

    #[test]
    fn detailed_tag_supersedes_placeholder() {
        let input = "\
REGISTER_LUA_CLASS(Foo);
#define LUA_STATIC_METHODS(METHOD) \\
   METHOD(bar, ARRAYDEF({{ END }}), 1 ) \\
   METHOD(baz, ARRAYDEF({{ END }}), 1 ) \\

GENERATE_LUA_STATIC_METHODS_TABLE(Foo, LUA_STATIC_METHODS);

/**
 * @luafunc table Foo::bar(int count)
 * @brief Does bar.
 */
";
        let (doc, _) = scan(Dialect::Cpp, input);
        let foo = doc.class("Foo").unwrap();
        assert!(matches!(foo.header, Some(Header::Registered { .. })));
        assert_eq!(foo.members.len(), 2);
        assert_eq!(foo.members[0], placeholder("baz", true));
        match &foo.members[1] {
            Member::Detailed(decl) => {
                assert_eq!(decl.method, "bar");
                assert_eq!(decl.retval.as_deref(), Some("table"));
                assert_eq!(decl.args, "int count");
            }
            other => panic!("expected detailed member, got {:?}", other),
        }
    }

    #[test]
    fn table_after_detailed_tag_does_not_duplicate() {
        let input = "\
/**
 * @luafunc Ship::isAlive()
 */
#define LUA_METHODS(CLASS, METHOD) \\
   METHOD(CLASS, isAlive, ARRAYDEF({{ END }}), 1 ) \\
   METHOD(CLASS, getLoc,  ARRAYDEF({{ END }}), 1 ) \\

GENERATE_LUA_METHODS_TABLE(Ship, LUA_METHODS);
";
        let (doc, _) = scan(Dialect::Cpp, input);
        let ship = doc.class("Ship").unwrap();
        assert_eq!(ship.members.len(), 2);
        assert!(matches!(&ship.members[0], Member::Detailed(d) if d.method == "isAlive"));
        assert_eq!(ship.members[1], placeholder("getLoc", false));
    }

    #[test]
    fn comment_lines_need_a_directive() {
        let input = "\
/**
 * Plain prose is dropped.
 */
/**
 * @luaclass Team
 * @code
 * t = Team()
 * @endcode
 */
";
        let (doc, _) = scan(Dialect::Cpp, input);
        let text = doc.comments.concat();
        assert!(!text.contains("Plain prose"));
        assert!(text.contains(" \\class Team\n"));
        assert!(text.contains(" * t = Team()\n"));
    }

    #[test]
    fn lua_dialect_comments_and_virtual_classes() {
        let input = "\
--[[
@luaclass Timer
Schedules callbacks.
@luafunc Timer:scheduleOnce(function fn, num delay)
--]]
";
        let (doc, _) = scan(Dialect::Lua, input);
        let timer = doc.class("Timer").unwrap();
        assert_eq!(timer.header, Some(Header::Virtual));
        assert!(matches!(&timer.members[0], Member::Detailed(d) if d.method == "scheduleOnce"));
        assert_eq!(doc.comments.first().map(String::as_str), Some("/*!\n"));
        assert_eq!(doc.comments.last().map(String::as_str), Some("*/\n"));
    }

    #[test]
    fn enum_survives_comment_close() {
        let input = "\
/**
 * @luaenum ClipType(0)
 * Supported clip operations.
 */
#define CLIP_TYPE_TABLE \\
   CLIP_TYPE_ITEM( Intersection, ClipperLib::ctIntersection ) \\
   CLIP_TYPE_ITEM( Union,        ClipperLib::ctUnion) \\

int after;
";
        let (doc, acc) = scan(Dialect::Cpp, input);
        let enums = acc.enums.concat();
        assert!(enums.starts_with("/**\n * @defgroup ClipTypeEnum ClipType\n"));
        assert!(enums.contains(" * Supported clip operations.\n"));
        assert!(enums.contains("`%ClipType.%Intersection`"));
        assert!(enums.contains("`%ClipType.%Union`"));
        assert!(enums.ends_with("@}\n*/\n\n"));
        assert_eq!(doc.comments, vec!["/*!\n".to_string(), "*/\n".to_string()]);
    }

    #[test]
    fn unterminated_blocks_are_reported_not_fatal() {
        let mut acc = Accumulators::default();
        let mut scanner = Scanner::new(Dialect::Cpp, &mut acc);
        for line in ["/**\n", " * @luaclass Ship\n"] {
            scanner.process_line(line).unwrap();
        }
        assert!(scanner.in_comment());
        assert!(!scanner.in_enum());
    }

    #[test]
    fn crlf_lines_are_normalized() {
        let (doc, _) = scan(Dialect::Cpp, "/**\r\n * @luaclass Team\r\n */\r\n");
        assert_eq!(doc.comments.concat(), "/*!\n \\class Team\n*/\n");
    }
}
