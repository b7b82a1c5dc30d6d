use anyhow::{Result, bail};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::lints::all_rules_and_safety;

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    // Maps each known rule name to whether its fix is safe to apply.
    pub rules: HashMap<&'static str, bool>,
    // The subset of rule names actually selected for this run.
    pub rules_to_apply: Vec<&'static str>,
    pub should_fix: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ArgsConfig {
    pub rules: Option<String>,
    pub fix: bool,
}

pub fn build_config(paths: Vec<PathBuf>, args: ArgsConfig) -> Result<Config> {
    let rules = all_rules_and_safety();

    let rules_to_apply = match &args.rules {
        Some(selection) => parse_rules_cli(selection, &rules)?,
        None => rules.keys().copied().collect(),
    };

    Ok(Config {
        paths,
        rules,
        rules_to_apply,
        should_fix: args.fix,
    })
}

// Parses the comma-separated `--rules` selection against the known rules.
fn parse_rules_cli(
    selection: &str,
    rules: &HashMap<&'static str, bool>,
) -> Result<Vec<&'static str>> {
    let mut out: Vec<&'static str> = Vec::new();

    for name in selection.split(',').map(str::trim).filter(|x| !x.is_empty()) {
        match rules.get_key_value(name) {
            Some((key, _)) => {
                if !out.contains(key) {
                    out.push(*key);
                }
            }
            None => bail!("Unknown rule: `{name}`"),
        }
    }

    if out.is_empty() {
        bail!("No rules selected: `--rules {selection}`");
    }

    Ok(out)
}
