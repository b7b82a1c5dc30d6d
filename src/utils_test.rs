use crate::check::check;
use crate::config::{ArgsConfig, build_config};
use crate::diagnostic::Diagnostic;
use std::fs;
use tempfile::Builder;

fn check_file(text: &str, rule: &str, fix: bool) -> (Vec<Diagnostic>, String) {
    let temp_file = Builder::new()
        .prefix("test-nillint")
        .suffix(".go")
        .tempfile()
        .unwrap();

    fs::write(&temp_file, text).expect("Failed to write initial content");

    let args = ArgsConfig { rules: Some(rule.to_string()), fix };
    let config = build_config(vec![temp_file.path().to_path_buf()], args)
        .expect("Failed to build config");

    let results = check(config);

    let mut diagnostics = Vec::new();
    for (_, result) in results {
        diagnostics.extend(result.expect("Failed to check file"));
    }

    let contents = fs::read_to_string(&temp_file).expect("Failed to read fixed content");
    (diagnostics, contents)
}

/// Run the linter on a snippet and return its diagnostics.
pub fn check_code(text: &str, rule: &str) -> Vec<Diagnostic> {
    check_file(text, rule, false).0
}

/// Test utility function to check if a given Go snippet contains a specific lint
pub fn has_lint(text: &str, msg: &str, rule: &str) -> bool {
    check_code(text, rule).iter().any(|diagnostic| {
        let message = if let Some(suggestion) = &diagnostic.message.suggestion {
            format!("{} {}", diagnostic.message.body, suggestion)
        } else {
            diagnostic.message.body.clone()
        };
        message.contains(msg)
    })
}

/// Convenience function to assert that code has a specific lint
pub fn expect_lint(text: &str, msg: &str, rule: &str) {
    assert!(has_lint(text, msg, rule));
}

/// Convenience function to assert that code has no lint
pub fn expect_no_lint(text: &str, rule: &str) {
    assert!(check_code(text, rule).is_empty());
}

/// Test utility to apply fixes to Go code and return the fixed version
pub fn apply_fixes(text: &str, rule: &str) -> String {
    check_file(text, rule, true).1
}

/// Get fixed text for a series of code snippets
pub fn get_fixed_text(text: Vec<&str>, rule: &str) -> String {
    let mut output: String = String::new();

    for txt in text.iter() {
        let original_content = txt;
        let modified_content = apply_fixes(txt, rule);

        output.push_str(
            format!("OLD:\n====\n{original_content}\nNEW:\n====\n{modified_content}\n\n").as_str(),
        );
    }

    output.trim_end().to_string()
}
