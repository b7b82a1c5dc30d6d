use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use nillint::check::check;
use nillint::config::{ArgsConfig, build_config};
use nillint::diagnostic::Diagnostic;
use nillint::output_format::{
    ConciseEmitter, Emitter, FullEmitter, GithubEmitter, JsonEmitter, OutputFormat,
};

/// Lint Go files for slice-to-nil comparisons.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files or directories to check. Directories are searched recursively
    /// for `.go` files.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Apply the suggested fixes in place.
    #[arg(long)]
    fix: bool,

    /// Comma-separated list of rules to run (default: all).
    #[arg(long)]
    rules: Option<String>,

    /// How diagnostics are displayed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Full)]
    output_format: OutputFormat,

    /// Report how long the check took.
    #[arg(long)]
    with_timing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitStatus {
    /// Checking ran and no diagnostics were reported.
    Success,
    /// Checking ran and diagnostics were reported.
    Failure,
    /// Checking failed to run at all, or some files could not be processed.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            use std::io::Write;

            // Use `writeln` instead of `eprintln` to avoid panicking when the stderr pipe is broken.
            let mut stderr = std::io::stderr().lock();

            writeln!(stderr, "nillint failed").ok();

            for cause in err.chain() {
                writeln!(stderr, "  Cause: {cause}").ok();
            }

            ExitStatus::Error.into()
        }
    }
}

fn run(args: Args) -> Result<ExitStatus> {
    let start = if args.with_timing {
        Some(Instant::now())
    } else {
        None
    };

    let paths = discover_go_files(&args.paths);

    if paths.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No Go files found under the given path(s).".white().bold()
        );
        return Ok(ExitStatus::Success);
    }

    let args_config = ArgsConfig {
        rules: args.rules.clone(),
        fix: args.fix,
    };
    let config = build_config(paths, args_config)?;

    let file_results = check(config);

    let mut all_errors = Vec::new();
    let mut all_diagnostics = Vec::new();

    for (path, result) in file_results {
        match result {
            Ok(diagnostics) => {
                if !diagnostics.is_empty() {
                    all_diagnostics.push((path, diagnostics));
                }
            }
            Err(e) => {
                all_errors.push((path, e));
            }
        }
    }

    // Flatten all diagnostics into a single vector and sort globally
    let mut all_diagnostics_flat: Vec<&Diagnostic> = all_diagnostics
        .iter()
        .flat_map(|(_path, diagnostics)| diagnostics.iter())
        .collect();

    all_diagnostics_flat.sort();

    let mut stdout = std::io::stdout();

    match args.output_format {
        OutputFormat::Full => {
            FullEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Concise => {
            ConciseEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Github => {
            GithubEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Json => {
            JsonEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
    }

    // Skip timing output for structured formats to avoid corrupting them
    let is_structured_format = matches!(
        args.output_format,
        OutputFormat::Json | OutputFormat::Github
    );

    if !is_structured_format && let Some(start) = start {
        let duration = start.elapsed();
        println!("\nChecked files in: {duration:?}");
    }

    if !all_errors.is_empty() {
        return Ok(ExitStatus::Error);
    }

    if all_diagnostics.is_empty() {
        return Ok(ExitStatus::Success);
    }

    Ok(ExitStatus::Failure)
}

fn discover_go_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .flat_map(|path| {
            WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension() == Some(std::ffi::OsStr::new("go")))
                .map(|e| e.path().to_path_buf())
        })
        .collect()
}
