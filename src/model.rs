//! Data model for extracted annotations, independent of the output format.

use std::path::{Path, PathBuf};

/// Name of the anchor method injected for `@luafuncsheader`. The HTML pass
/// downstream looks for it and replaces it with the header text.
pub const FUNCS_HEADER_MARKER: &str = "DummyConstructor";

/// Owner used for functions and constants declared without a class.
pub const GLOBAL_SCOPE: &str = "global";

/// Comment syntax of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `/** ... */` blocks, `Class::member`
    Cpp,
    /// `--[[ ... --]]` blocks, `Class.member` or `Class:member`
    Lua,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("lua") => Dialect::Lua,
            _ => Dialect::Cpp,
        }
    }
}

/// An input file queued for scanning.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub dialect: Dialect,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dialect = Dialect::from_path(&path);
        SourceFile { path, dialect }
    }
}

/// Pending class descriptions placed in front of the next registered header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassDescr {
    pub short: String,
    pub long: String,
}

impl ClassDescr {
    pub fn clear(&mut self) {
        self.short.clear();
        self.long.clear();
    }
}

/// Opening fragment of a synthetic class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// `REGISTER_LUA_CLASS` / `REGISTER_LUA_SUBCLASS`
    Registered {
        descr: ClassDescr,
        parent: Option<String>,
    },
    /// `GENERATE_LUA_STATIC_METHODS_TABLE`
    StaticTable { descr: ClassDescr },
    /// `@luavclass`: documented only, no code behind it
    Virtual,
}

impl Header {
    fn rank(&self) -> u8 {
        match self {
            Header::Virtual => 0,
            Header::StaticTable { .. } => 1,
            Header::Registered { .. } => 2,
        }
    }
}

/// A member declaration inside a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Untyped stand-in generated from a methods table.
    Placeholder { name: String, is_static: bool },
    /// Full declaration parsed from a `@luafunc` tag.
    Detailed(FunctionDecl),
    /// The `@luafuncsheader` anchor.
    Sentinel,
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Placeholder { name, .. } => name.as_str(),
            Member::Detailed(decl) => decl.method.as_str(),
            Member::Sentinel => FUNCS_HEADER_MARKER,
        }
    }
}

/// Parsed `@luafunc` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub is_static: bool,
    /// Declared return type, `None` when omitted
    pub retval: Option<String>,
    /// Owning class, `None` for free functions
    pub class: Option<String>,
    pub method: String,
    pub args: String,
    /// Trimmed source line, echoed into the generated body
    pub source: String,
}

impl FunctionDecl {
    pub fn owner(&self) -> &str {
        self.class.as_deref().unwrap_or(GLOBAL_SCOPE)
    }

    pub fn is_constructor(&self) -> bool {
        self.owner() == self.method
    }
}

/// Synthetic class built up while scanning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    pub header: Option<Header>,
    pub members: Vec<Member>,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>) -> Self {
        ClassRecord {
            name: name.into(),
            header: None,
            members: Vec::new(),
        }
    }

    /// Install `header` unless the current one outranks it.
    pub fn set_header(&mut self, header: Header) {
        let outranked = matches!(&self.header, Some(current) if current.rank() > header.rank());
        if !outranked {
            self.header = Some(header);
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match &self.header {
            Some(Header::Registered { parent, .. }) => parent.as_deref(),
            _ => None,
        }
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name() == name)
    }

    /// Drop the table placeholder for `method`, if there is one.
    pub fn remove_placeholder(&mut self, method: &str) -> bool {
        let before = self.members.len();
        self.members
            .retain(|m| !matches!(m, Member::Placeholder { name, .. } if name == method));
        self.members.len() != before
    }
}

/// Everything extracted from a single source file.
#[derive(Debug, Default)]
pub struct FileDoc {
    /// Classes in first-seen order
    pub classes: Vec<ClassRecord>,
    pub globals: Vec<FunctionDecl>,
    pub comments: Vec<String>,
}

impl FileDoc {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.globals.is_empty() && self.comments.is_empty()
    }

    pub fn class(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Look up a class, creating it at the end of the list on first reference.
    pub fn class_mut(&mut self, name: &str) -> &mut ClassRecord {
        let idx = match self.classes.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.classes.push(ClassRecord::new(name));
                self.classes.len() - 1
            }
        };
        &mut self.classes[idx]
    }
}

/// Buffers shared by every file of a run, written once at the end.
#[derive(Debug, Default)]
pub struct Accumulators {
    pub mainpage: Vec<String>,
    pub otherpage: Vec<String>,
    pub enums: Vec<String>,
}

/// Strip the `Lua` prefix from binding class names (`LuaPlayerInfo` → `PlayerInfo`).
pub fn cleanup_classname(name: &str) -> String {
    name.strip_prefix("Lua").unwrap_or(name).to_string()
}
