use std::collections::HashMap;

pub mod nil_comparison;

// The complete rule set, with a boolean indicating whether the rule's fix is
// safe to apply automatically.
pub fn all_rules_and_safety() -> HashMap<&'static str, bool> {
    HashMap::from([("nil_slice_comparison", true)])
}

pub fn all_safe_rules() -> Vec<String> {
    all_rules_and_safety()
        .iter()
        .filter(|(_, safe)| **safe)
        .map(|(name, _)| name.to_string())
        .collect()
}

pub fn all_unsafe_rules() -> Vec<String> {
    all_rules_and_safety()
        .iter()
        .filter(|(_, safe)| !**safe)
        .map(|(name, _)| name.to_string())
        .collect()
}

pub fn all_nofix_rules() -> Vec<String> {
    Vec::new()
}
