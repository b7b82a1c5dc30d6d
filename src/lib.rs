//! Core functionality for the nillint Go linter
//!
//! This crate provides the core linting functionality including:
//! - Syntax tree analysis and rule checking
//! - Best-effort static type resolution for Go expressions
//! - Diagnostic generation and reporting
//! - Comment-based suppression directives

pub mod analyze;
pub mod check;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod fix;
pub mod lints;
pub mod location;
pub mod output_format;
pub mod parse;
pub mod plugin;
pub mod suppression;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod utils_test;
