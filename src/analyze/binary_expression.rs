use crate::check::Checker;
use crate::lints::nil_comparison::nil_comparison::nil_comparison;
use tree_sitter::Node;

pub fn binary_expression(node: &Node<'_>, checker: &mut Checker) -> anyhow::Result<()> {
    if checker.is_rule_enabled("nil_slice_comparison")
        && !checker.should_skip_rule(node)
    {
        let diagnostic = nil_comparison(node, checker.source, &checker.types)?;
        checker.report_diagnostic(diagnostic);
    }
    Ok(())
}
