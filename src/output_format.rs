use annotate_snippets::{Level, Renderer, Snippet};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};

use crate::diagnostic::Diagnostic;
use crate::utils::relativize_path;

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonError {
    file: String,
    error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    /// Print diagnostics with full context using annotated code snippets
    Full,
    /// Print diagnostics in a concise format, one per line
    Concise,
    /// Print diagnostics as GitHub format
    Github,
    /// Print diagnostics as JSON
    Json,
}

/// Takes the diagnostics and parsing errors in each file and then displays
/// them in different ways depending on the `--output-format` provided by the
/// user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()>;
}

fn print_errors(errors: &[(String, anyhow::Error)]) {
    for (_path, err) in errors {
        let root_cause = err.chain().last().unwrap();
        if root_cause.is::<crate::error::ParseError>() {
            eprintln!("{}: {}", "Error".red().bold(), root_cause);
        } else {
            eprintln!("{}: {}", "Error".red().bold(), err);
        }
    }
}

fn print_summary(total_diagnostics: usize, n_fixable: usize, n_errors: usize) {
    if total_diagnostics > 0 {
        if total_diagnostics > 1 {
            println!("\nFound {total_diagnostics} errors.");
        } else {
            println!("\nFound 1 error.");
        }

        if n_fixable > 0 {
            println!("{n_fixable} fixable with the `--fix` option.");
        }
    } else if n_errors == 0 {
        println!("All checks passed!");
    }
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        let mut total_diagnostics = 0;
        let mut n_fixable = 0usize;

        // First, print all parsing errors
        if !errors.is_empty() {
            writer.flush()?; // Flush before writing to stderr
            print_errors(errors);
        }

        // Cache relativized paths to avoid repeated filesystem operations
        let mut path_cache = std::collections::HashMap::new();

        // Then, print the diagnostics.
        for diagnostic in diagnostics {
            let (row, col) = match diagnostic.location {
                Some(loc) => (loc.row(), loc.column() + 1), // Convert to 1-based for display
                None => {
                    unreachable!("Row/col locations must have been parsed successfully before.")
                }
            };

            // Get or compute relativized path
            let relative_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(&diagnostic.filename));

            let message = if let Some(suggestion) = &diagnostic.message.suggestion {
                format!("{} {}", diagnostic.message.body, suggestion)
            } else {
                diagnostic.message.body.clone()
            };
            writeln!(
                writer,
                "{} [{}:{}] {} {}",
                relative_path.white(),
                row,
                col,
                diagnostic.message.name.red(),
                message
            )?;

            if diagnostic.has_safe_fix() {
                n_fixable += 1;
            }
            total_diagnostics += 1;
        }

        writer.flush()?; // Ensure all diagnostics are written before summary

        print_summary(total_diagnostics, n_fixable, errors.len());

        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        // Convert errors to a serializable format
        let json_errors: Vec<JsonError> = errors
            .iter()
            .map(|(path, err)| JsonError { file: path.clone(), error: format!("{:#}", err) })
            .collect();

        let output = JsonOutput {
            diagnostics: diagnostics.to_vec(),
            errors: json_errors,
        };

        serde_json::to_writer_pretty(&mut writer, &output)?;
        writer.flush()?;
        Ok(())
    }
}

pub struct GithubEmitter;

impl Emitter for GithubEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        _errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        for diagnostic in diagnostics {
            let (row, col) = match diagnostic.location {
                Some(loc) => (loc.row(), loc.column() + 1), // Convert to 1-based for display
                None => {
                    unreachable!("Row/col locations must have been parsed successfully before.")
                }
            };

            // The location appears twice:
            // - one between the "::" markers: this is for the annotation to
            //   appear when we browse changed files in Github PR;
            // - one after the "::" marker: this is so that the workflow shows
            //   the location of diagnostics when we inspect the workflow itself,
            //   without the Github annotations.
            write!(
                writer,
                "::warning title=Nillint ({}),file={file},line={row},col={col}::{file}:{row}:{col} ",
                diagnostic.message.name,
                file = diagnostic.filename.to_string_lossy()
            )?;

            let message = if let Some(suggestion) = &diagnostic.message.suggestion {
                format!("{} {}", diagnostic.message.body, suggestion)
            } else {
                diagnostic.message.body.clone()
            };
            writeln!(writer, "[{}] {}", diagnostic.message.name, message)?;
        }

        writer.flush()?;
        Ok(())
    }
}

pub struct FullEmitter;

impl Emitter for FullEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        // Use plain renderer when NO_COLOR is set or in snapshots
        let use_colors = std::env::var("NO_COLOR").is_err();
        let renderer = if use_colors {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        let mut total_diagnostics = 0;
        let mut n_fixable = 0usize;

        // First, print all parsing errors
        if !errors.is_empty() {
            writer.flush()?; // Flush before writing to stderr
            print_errors(errors);
            if !diagnostics.is_empty() {
                eprintln!(); // Add separator between errors and diagnostics
            }
        }

        // Cache file contents and relativized paths
        let mut file_cache: std::collections::HashMap<&std::path::Path, String> =
            std::collections::HashMap::new();
        let mut path_cache = std::collections::HashMap::new();

        for diagnostic in diagnostics {
            if !file_cache.contains_key(diagnostic.filename.as_path()) {
                match fs::read_to_string(&diagnostic.filename) {
                    Ok(content) => {
                        file_cache.insert(diagnostic.filename.as_path(), content);
                    }
                    Err(err) => {
                        writer.flush()?; // Flush before writing to stderr
                        eprintln!(
                            "Warning: Could not read source file {}: {}",
                            diagnostic.filename.display(),
                            err
                        );
                    }
                }
            }
        }

        for diagnostic in diagnostics {
            // Get the source file from cache
            let Some(source) = file_cache.get(diagnostic.filename.as_path()) else {
                continue; // Skip if file couldn't be read
            };

            let start_offset = diagnostic.range.start();
            let end_offset = diagnostic.range.end();

            // Get or compute relativized path
            let file_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(&diagnostic.filename));

            let snippet = Snippet::source(source)
                .origin(file_path)
                .fold(true)
                .annotation(
                    Level::Warning
                        .span(start_offset..end_offset)
                        .label(&diagnostic.message.body),
                );

            let mut message = Level::Warning.title(&diagnostic.message.name).snippet(snippet);

            // Add suggestion as a footer message if present
            if let Some(suggestion_text) = &diagnostic.message.suggestion {
                message = message.footer(Level::Help.title(suggestion_text));
            }

            let rendered = renderer.render(message);
            writeln!(writer, "{rendered}\n")?;

            if diagnostic.has_safe_fix() {
                n_fixable += 1;
            }
            total_diagnostics += 1;
        }

        writer.flush()?; // Ensure all diagnostics are written before summary

        print_summary(total_diagnostics, n_fixable, errors.len());

        Ok(())
    }
}
