//! Shellweld CLI - Compiles base scripts into deployable artifacts
//!
//! This binary expands `source` inclusions recursively, appends a license
//! footer, writes a SHA-512 checksum sidecar, and produces a detached
//! signature for every compiled script.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

// Use modules from the library crate
use shellweld_cli::compile;

/// Shellweld - Shell Script Compiler
#[derive(Parser)]
#[command(name = "shellweld")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scripts to compile; use `input:output` to name an explicit destination
    targets: Vec<String>,

    /// Suppress inclusion markers; repeat to also drop comment-only lines
    #[arg(long, action = clap::ArgAction::Count)]
    clean: u8,

    /// Fail inclusions nested deeper than N levels (unbounded when absent)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Holder name for the copyright line in the license footer
    #[arg(long, value_name = "NAME")]
    copyright: Option<String>,

    /// Path to the gpg executable used for detached signatures
    #[arg(long, value_name = "PATH")]
    gpg: Option<PathBuf>,

    /// Skip the detached-signature step
    #[arg(long)]
    no_sign: bool,

    /// Output a machine-readable JSON run summary (no colored output)
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = compile::run(
        &cli.targets,
        cli.clean,
        cli.max_depth,
        cli.copyright.as_deref(),
        cli.gpg.as_deref(),
        cli.no_sign,
        cli.json,
    );

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
