//! CLI module for the Quill frontend
//!
//! This module provides the command-line interface for the frontend.
//!
//! ## Commands
//!
//! - `check <file>` - Lex and parse, report blames (default action)
//! - `tokens <file>` - Dump the token stream
//! - `ast <file>` - Dump the parse tree
//! - `print <file>` - Re-emit the file in canonical form
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quill_syntax::lexer::LexOptions;

use crate::version::QUILL_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Quill programming language frontend
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version = QUILL_VERSION)]
#[command(about = "The Quill programming language frontend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Skip indentation style checks (mixed tabs/spaces)
    #[arg(long = "no-indent-check", global = true)]
    pub no_indent_check: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lex and parse a file, reporting every blame
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Dump the token stream (debug)
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Dump the parse tree (debug)
    Ast {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Re-emit a file in canonical form
    Print {
        /// Source file to reprint
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = LexOptions {
        check_indentation: !cli.no_indent_check,
    };

    match cli.command {
        Some(Command::Check { file }) => commands::check_file(&file, options),
        Some(Command::Tokens { file }) => commands::tokens_file(&file, options),
        Some(Command::Ast { file }) => commands::ast_file(&file, options),
        Some(Command::Print { file }) => commands::print_file(&file, options),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file, options)
            } else {
                // No command and no file - show usage
                Err(CliError::failure("usage: quill [check|tokens|ast|print] <FILE>"))
            }
        }
    }
}
