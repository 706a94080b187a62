//! Regex patterns for binding macros and comment tags.

use crate::model::Dialect;
use regex::Regex;
use std::sync::LazyLock;

// -- Binding macros -----------------------------------------------------------

// REGISTER_LUA_CLASS(LuaPlayerInfo);
pub static RE_REGISTER_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"REGISTER_LUA_CLASS *\( *(.+?) *\)").unwrap());

// REGISTER_LUA_SUBCLASS(WallItem, BfObject);
pub static RE_REGISTER_SUBCLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"REGISTER_LUA_SUBCLASS *\( *(.+?) *, *(.+?) *\)").unwrap());

pub static RE_METHODS_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"define +LUA_METHODS *\(CLASS, *METHOD\)").unwrap());

// METHOD(CLASS, getIndex, ARRAYDEF({{ END }}), 1 ) \
pub static RE_METHOD_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"METHOD *\( *CLASS, *(.+?) *,").unwrap());

// GENERATE_LUA_METHODS_TABLE(LuaPlayerInfo, LUA_METHODS);
pub static RE_METHODS_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GENERATE_LUA_METHODS_TABLE *\( *(.+?) *,").unwrap());

pub static RE_STATIC_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"define +LUA_STATIC_METHODS *\( *METHOD *\)").unwrap());

// METHOD(triangulate, ARRAYDEF({{ TABLE, END }}), 1 ) \
pub static RE_STATIC_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"METHOD *\( *(.+?) *,").unwrap());

// GENERATE_LUA_STATIC_METHODS_TABLE(Geom, LUA_STATIC_METHODS);
pub static RE_STATIC_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GENERATE_LUA_STATIC_METHODS_TABLE *\( *(.+?) *,").unwrap());

// -- Long comment boundaries --------------------------------------------------

static RE_CPP_COMMENT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\*\*").unwrap());
static RE_CPP_COMMENT_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*/").unwrap());
static RE_LUA_COMMENT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--\[\[").unwrap());
static RE_LUA_COMMENT_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--\]\]").unwrap());

pub fn comment_open(dialect: Dialect) -> &'static Regex {
    match dialect {
        Dialect::Cpp => &RE_CPP_COMMENT_OPEN,
        Dialect::Lua => &RE_LUA_COMMENT_OPEN,
    }
}

pub fn comment_close(dialect: Dialect) -> &'static Regex {
    match dialect {
        Dialect::Cpp => &RE_CPP_COMMENT_CLOSE,
        Dialect::Lua => &RE_LUA_COMMENT_CLOSE,
    }
}

// -- Comment tags -------------------------------------------------------------

// Lines arrive without their newline, so a bare tag ends the line
pub static RE_MAINPAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@mainpage(?:\s|$)").unwrap());

pub static RE_PAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@page(?:\s|$)").unwrap());

pub static RE_PAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\s+\\par").unwrap());

// @luaenum ObjType(2) / @luaenum ObjType(2,3,1)
pub static RE_LUAENUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@luaenum\s+(\w+)\s*\((\d+)\s*(?:,\s*(\d+)\s*(?:,\s*(\d+))?)?\s*\)").unwrap()
});

pub static RE_GEOM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@geom(?:\s+(.*))?$").unwrap());

pub static RE_FUNCSHEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\s*@luafuncsheader\s+(\w+)").unwrap());

pub static RE_LUACONST_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*?\s*@luaconst\s+\S").unwrap());

static RE_CPP_LUACONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@luaconst\s+(?:(\w+)(?:::|\.))?(\S.*?)\s*$").unwrap());

static RE_LUA_LUACONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@luaconst\s+(?:(\w+)[.:])?(\S.*?)\s*$").unwrap());

pub fn luaconst(dialect: Dialect) -> &'static Regex {
    match dialect {
        Dialect::Cpp => &RE_CPP_LUACONST,
        Dialect::Lua => &RE_LUA_LUACONST,
    }
}

pub static RE_LUAFUNC_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*?\s*@luafunc\s+(.*)$").unwrap());

// @luafunc static table Geom::triangulate(mixed polygons)
//          $1     $2    $3    $4          $5
static RE_CPP_LUAFUNC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@luafunc\s+(static\s+)?(\w+\s+)?(?:(\w+)::)?(.+?)\((.*)\)").unwrap()
});

static RE_LUA_LUAFUNC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@luafunc\s+(static\s+)?(\w+\s+)?(?:(\w+)[.:])?(.+?)\((.*)\)").unwrap()
});

pub fn luafunc(dialect: Dialect) -> &'static Regex {
    match dialect {
        Dialect::Cpp => &RE_CPP_LUAFUNC,
        Dialect::Lua => &RE_LUA_LUAFUNC,
    }
}

// Extension tags, not part of the historical annotation set: they fill the
// class descriptions that registration headers carry.
pub static RE_CLASSBRIEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@classbrief\s+(.*?)\s*$").unwrap());

pub static RE_CLASSDESCR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@classdescr\s+(.*?)\s*$").unwrap());

pub static RE_LUACLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@luaclass\s+(\w+)\s*$").unwrap());

pub static RE_LUAVCLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@luavclass\s+(\w+)\s*$").unwrap());

pub static RE_DESCR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@descr(?:\s+(.*))?$").unwrap());

// -- Enum tables --------------------------------------------------------------

pub static RE_DEFINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\s*define").unwrap());

pub static RE_INLINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").unwrap());

pub static RE_NO_WORD_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*\\$").unwrap());

pub static RE_BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());

pub static RE_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//").unwrap());

pub static RE_BLOCK_COMMENT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*").unwrap());

// WEAPON_ITEM(WeaponPhaser, "Phaser", ...) \
pub static RE_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^(]+\((.+)\)").unwrap());

// %onShipKilled(Ship %ship, %BfObject %damagingObject)
pub static RE_ARGLIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\((.+?)\)(.*)$").unwrap());
