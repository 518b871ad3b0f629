//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use quill_syntax::lexer::LexOptions;
use quill_syntax::source::SourceUnit;

use crate::report;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during compilation.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file, enforcing the size cap.
fn read_source(path: &Path) -> CliResult<String> {
    let meta = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot read '{}': {}", path.display(), e)))?;
    if meta.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "'{}' is larger than the {} MB source limit",
            path.display(),
            MAX_SOURCE_SIZE / (1024 * 1024)
        )));
    }
    fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Cannot read '{}': {}", path.display(), e)))
}

fn compile(path: &Path, options: LexOptions) -> CliResult<SourceUnit> {
    let text = read_source(path)?;
    Ok(SourceUnit::compile(path.to_string_lossy(), text, options))
}

/// `quill check <file>`: lex and parse, print every blame against the
/// source, exit nonzero when any error was recorded.
pub fn check_file(path: &Path, options: LexOptions) -> CliResult<ExitCode> {
    let unit = compile(path, options)?;

    if unit.blames.is_empty() {
        tracing::info!(file = %path.display(), "no problems");
        return Ok(ExitCode::SUCCESS);
    }

    eprint!("{}", report::render(&unit));
    eprintln!("{}: {}", path.display(), report::summary(&unit.blames));

    if unit.blames.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// `quill tokens <file>`: one token per line with its span.
pub fn tokens_file(path: &Path, options: LexOptions) -> CliResult<ExitCode> {
    let unit = compile(path, options)?;

    for token in &unit.tokens {
        println!("{:<12} {} {:?}", token.span.to_string(), token.kind.describe(), token.text);
    }

    if unit.blames.has_errors() {
        eprint!("{}", report::render(&unit));
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// `quill ast <file>`: pretty-printed parse tree.
pub fn ast_file(path: &Path, options: LexOptions) -> CliResult<ExitCode> {
    let unit = compile(path, options)?;

    println!("{:#?}", unit.module);

    if unit.blames.has_errors() {
        eprint!("{}", report::render(&unit));
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// `quill print <file>`: canonical re-emission. Refuses when the file has
/// errors, since the tree would contain recovery placeholders.
pub fn print_file(path: &Path, options: LexOptions) -> CliResult<ExitCode> {
    let unit = compile(path, options)?;

    if unit.blames.has_errors() {
        eprint!("{}", report::render(&unit));
        return Err(CliError::failure(format!(
            "'{}' has errors; fix them before reprinting",
            path.display()
        )));
    }

    print!("{}", unit.print());
    Ok(ExitCode::SUCCESS)
}
