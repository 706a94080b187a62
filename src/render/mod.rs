//! Output writer: synthetic headers for the documentation generator.

pub mod header;
pub mod mainpage;

use std::path::Path;

/// Name of the aggregate file holding overview pages and enum groups.
pub const MAIN_PAGE_FILE: &str = "main_page_content.h";

const BANNER: &str =
    "// This file was generated automatically from the C++ source to feed doxygen.  It will be overwritten.\n\n";

/// Derive the synthetic header name from a source path.
/// "zap/ship.cpp" → "ship__cpp.h", "static/intro.txt" → "intro__txt.h"
pub fn output_file_name(path: &Path) -> String {
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{}__{}.h", base, ext)
}
