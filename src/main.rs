//! luadoc: turn scripting-API annotations in C++/Lua sources into synthetic
//! headers for doxygen.
//!
//! Every input file is scanned for binding macros (`REGISTER_LUA_CLASS`,
//! `LUA_METHODS` tables, ...) and `@lua*` comment tags. Each file that yields
//! something becomes `<base>__<ext>.h` in the output directory; overview pages
//! and enum groups from all files are collected into `main_page_content.h`.
//!
//! ```text
//! luadoc -o doc/temp-doxygen zap/*.cpp zap/*.h resource/scripts/*.lua doc/static/*.txt
//! ```

mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "luadoc",
    about = "Extract Lua scripting documentation from C++/Lua sources into doxygen input"
)]
struct Cli {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Directory receiving the generated headers
    #[arg(short = 'o', long, env = "LUADOC_OUTPUT")]
    output: PathBuf,

    /// File extensions picked up when scanning a directory
    #[arg(long = "ext", value_delimiter = ',', default_values = ["cpp", "h", "c", "lua", "txt"])]
    extensions: Vec<String>,

    /// Do not write main_page_content.h
    #[arg(long)]
    skip_mainpage: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;

    let input_files = expand_globs(&cli.inputs, &cli.extensions)?;
    if input_files.is_empty() {
        warn!("no input files found");
    }

    let mut acc = model::Accumulators::default();
    let mut written: HashSet<String> = HashSet::new();
    let total = input_files.len();

    for (idx, path) in input_files.iter().enumerate() {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        info!("[{}/{}] {}", idx + 1, total, display_name);

        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);

        let source = model::SourceFile::new(path.clone());
        let doc = parser::parse_file(&source, &content, &mut acc)?;

        // Skip files with nothing to document
        if doc.is_empty() {
            debug!("{}: nothing to document", path.display());
            continue;
        }

        let name = render::output_file_name(path);
        if !written.insert(name.clone()) {
            warn!("{} overwrites an earlier {}", path.display(), name);
        }

        let out_path = cli.output.join(&name);
        fs::write(&out_path, render::header::render(&doc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    if !cli.skip_mainpage {
        let out_path = cli.output.join(render::MAIN_PAGE_FILE);
        fs::write(&out_path, render::mainpage::render(&acc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    info!(
        "processed {} files, wrote {} headers to {}",
        total,
        written.len(),
        cli.output.display()
    );

    Ok(())
}

/// Expand glob patterns into a list of real file paths.
/// Bare directories are scanned (non-recursively) for `extensions`.
fn expand_globs(patterns: &[String], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_extension(&p, extensions) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x == ext))
}
