use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tree_sitter::Node;

use crate::analyze;
use crate::config::Config;
use crate::diagnostic::*;
use crate::error::ParseError;
use crate::fix::apply_fixes;
use crate::parse;
use crate::plugin;
use crate::suppression::SuppressionManager;
use crate::types::TypeTable;
use crate::utils::{compute_lints_location, find_new_lines, relativize_path};

pub fn check(config: Config) -> Vec<(String, Result<Vec<Diagnostic>, anyhow::Error>)> {
    // Wrap config in Arc to avoid expensive clones in parallel execution
    let config = Arc::new(config);

    config
        .paths
        .par_iter()
        .map(|file| {
            let res = check_path(file, Arc::clone(&config));
            (relativize_path(file), res)
        })
        .collect()
}

pub fn check_path(path: &PathBuf, config: Arc<Config>) -> Result<Vec<Diagnostic>, anyhow::Error> {
    if config.should_fix {
        lint_fix(path, config)
    } else {
        lint_only(path, config)
    }
}

pub fn lint_only(path: &PathBuf, config: Arc<Config>) -> Result<Vec<Diagnostic>, anyhow::Error> {
    let contents = fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let checks = get_checks(&contents, path, &config)
        .with_context(|| format!("Failed to get checks for file: {}", path.display()))?;

    Ok(checks)
}

pub fn lint_fix(path: &PathBuf, config: Arc<Config>) -> Result<Vec<Diagnostic>, anyhow::Error> {
    let mut has_skipped_fixes = true;
    let mut checks: Vec<Diagnostic>;

    loop {
        let contents = fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        checks = get_checks(&contents, path, &config)
            .with_context(|| format!("Failed to get checks for file: {}", path.display()))?;

        if !has_skipped_fixes {
            break;
        }

        let (new_has_skipped_fixes, fixed_text) = apply_fixes(&checks, &contents);
        has_skipped_fixes = new_has_skipped_fixes;

        fs::write(path, fixed_text)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    Ok(checks)
}

#[derive(Debug)]
// The object that collects diagnostics while walking one file's tree.
pub struct Checker<'a> {
    // The diagnostics to report (possibly empty).
    pub diagnostics: Vec<Diagnostic>,
    // Names of the rules to apply.
    pub rules: Vec<&'static str>,
    // The analyzed file's source text, for rendering operands verbatim.
    pub source: &'a str,
    // Best-effort static types for the file's expressions.
    pub types: TypeTable,
    // Tracks comment-based suppression directives like `//nillinter:ignore`.
    pub suppression: SuppressionManager,
}

impl<'a> Checker<'a> {
    fn new(source: &'a str, types: TypeTable, suppression: SuppressionManager) -> Self {
        Self {
            diagnostics: vec![],
            rules: vec![],
            source,
            types,
            suppression,
        }
    }

    // This takes an Option<Diagnostic> because each lint rule reports a
    // Some(Diagnostic) or None.
    pub(crate) fn report_diagnostic(&mut self, diagnostic: Option<Diagnostic>) {
        if let Some(diagnostic) = diagnostic {
            self.diagnostics.push(diagnostic);
        }
    }

    pub(crate) fn is_rule_enabled(&self, rule: &str) -> bool {
        self.rules.contains(&rule)
    }

    /// Check if a rule should be skipped for the given node due to
    /// suppression comments.
    pub(crate) fn should_skip_rule(&self, node: &Node<'_>) -> bool {
        self.suppression.should_skip(node)
    }
}

// Takes one file's Go code as a string, parses it, and obtains a (possibly
// empty) vector of `Diagnostic`s.
//
// If there are diagnostics to report, this is also where their range in the
// string is converted to their location (row, column).
pub fn get_checks(contents: &str, file: &Path, config: &Config) -> Result<Vec<Diagnostic>> {
    let parsed = parse::parse(contents)?;

    if parsed.has_errors() {
        return Err(ParseError { filename: file.to_path_buf() }.into());
    }

    let root = parsed.root_node();
    let types = TypeTable::from_tree(&root, contents);
    let suppression = SuppressionManager::from_tree(&root, contents);

    let mut checker = Checker::new(contents, types, suppression);
    checker.rules = config.rules_to_apply.clone();

    // Every analyzer registered with the plugin entrypoint runs over the
    // file; an analyzer whose rule is disabled is skipped wholesale.
    for analyzer in plugin::new(None)? {
        if checker.is_rule_enabled(analyzer.name) {
            (analyzer.run)(&parsed, &mut checker)?;
        }
    }

    let nofix_rules = crate::lints::all_nofix_rules();

    let diagnostics: Vec<Diagnostic> = checker
        .diagnostics
        .into_iter()
        .map(|mut x| {
            x.filename = file.to_path_buf();
            if nofix_rules.contains(&x.message.name) {
                x.fix = Fix::empty();
            }
            x
        })
        .collect();

    let loc_new_lines = find_new_lines(contents);
    let diagnostics = compute_lints_location(diagnostics, &loc_new_lines);

    Ok(diagnostics)
}

// Visits every node of the tree in preorder and dispatches each node kind to
// its set of rules. Preorder keeps the collected diagnostics sorted by start
// offset, which `apply_fixes` relies on.
pub fn walk_node(node: &Node<'_>, checker: &mut Checker) -> Result<()> {
    if node.kind() == "binary_expression" {
        analyze::binary_expression::binary_expression(node, checker)?;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    drop(cursor);
    for child in children {
        walk_node(&child, checker)?;
    }

    Ok(())
}
