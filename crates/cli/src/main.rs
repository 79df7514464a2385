// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vsopen - open a file at a line in Visual Studio, launching it if needed

// Only the Windows backend consumes the environment overrides.
#[cfg_attr(not(windows), allow(dead_code))]
mod env;

use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use vsopen_core::{RequestError, TargetRequest};

const USAGE: &str = "Usage: vsopen installationPath solutionPath [fileName lineNumber]";

#[derive(Parser, Debug)]
#[command(
    name = "vsopen",
    version,
    about = "Open a file at a line in Visual Studio, launching it if needed"
)]
struct Cli {
    /// Visual Studio executable (devenv.exe); empty accepts any installation
    installation_path: String,

    /// Solution the file belongs to
    solution_path: String,

    /// File to open; empty only brings Visual Studio to the front
    #[arg(requires = "line_number")]
    file_name: Option<String>,

    /// Line to put the caret on; 0 or less leaves the caret alone
    #[arg(allow_negative_numbers = true)]
    line_number: Option<i32>,
}

impl Cli {
    fn request(&self) -> Result<TargetRequest, RequestError> {
        TargetRequest::resolve(
            Path::new(&self.installation_path),
            Path::new(&self.solution_path),
            self.file_name
                .as_deref()
                .map(Path::new)
                .zip(self.line_number),
        )
    }
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("{}", usage_error(e.kind(), &args));
            return ExitCode::FAILURE;
        }
    };

    setup_logging();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", format_error(&e));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Report for a rejected command line: what went wrong, the usage line, then
/// every argument received (program name included), one per line.
fn usage_error(kind: ErrorKind, args: &[OsString]) -> String {
    let mut report = match kind {
        ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
            "invalid line number\n".to_string()
        }
        _ => format!("{}: wrong number of arguments\n", args.len()),
    };
    report.push_str(USAGE);
    report.push('\n');
    for arg in args {
        report.push_str(&arg.to_string_lossy());
        report.push('\n');
    }
    report
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Human-readable progress lines on stdout, filtered by `RUST_LOG`.
fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let request = cli.request().context("invalid arguments")?;
    info!(
        solution = %request.solution.display(),
        file = ?request.file.as_ref().map(|f| f.path.display().to_string()),
        "opening"
    );
    open(&request)
}

/// Drive Visual Studio through COM. An unsuccessful open is logged and still exits 0.
#[cfg(windows)]
fn open(request: &TargetRequest) -> Result<()> {
    use vsopen_adapters::{ComAutomation, ProcessLauncher, StdoutProgress, TracedLauncher};
    use vsopen_core::SystemClock;
    use vsopen_engine::Opener;

    let automation = ComAutomation::initialize().context("CoInitialize failed")?;
    let launcher = TracedLauncher::new(ProcessLauncher::new());
    let progress = StdoutProgress::new();
    let clock = SystemClock;

    let opener = Opener::new(&automation, &launcher, &clock, &progress, env::timeouts())
        .with_extra_args(env::extra_args());
    if let Err(e) = opener.open(request) {
        tracing::debug!(error = %e, "open unsuccessful");
    }
    Ok(())
}

#[cfg(not(windows))]
fn open(_request: &TargetRequest) -> Result<()> {
    anyhow::bail!("Visual Studio automation is only available on Windows")
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
