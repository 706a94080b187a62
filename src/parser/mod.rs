//! Parser module: scans one source file into a `FileDoc`.

mod comment;
pub mod enums;
mod patterns;
pub mod scanner;

use crate::model::{Accumulators, FileDoc, SourceFile};
use anyhow::{Context, Result};
use log::debug;
use scanner::Scanner;

/// Scan `content` line by line. Cross-file material (overview pages, enum
/// groups) is appended to `acc`; everything else lands in the returned doc.
pub fn parse_file(source: &SourceFile, content: &str, acc: &mut Accumulators) -> Result<FileDoc> {
    let mut scanner = Scanner::new(source.dialect, acc);

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        scanner
            .process_line(line)
            .with_context(|| format!("{}:{}", source.path.display(), idx + 1))?;
    }

    // Unterminated blocks are dropped as-is
    if scanner.in_comment() {
        debug!("{}: long comment not closed at end of file", source.path.display());
    }
    if scanner.in_enum() {
        debug!("{}: enum table not closed at end of file", source.path.display());
    }

    Ok(scanner.finish())
}
