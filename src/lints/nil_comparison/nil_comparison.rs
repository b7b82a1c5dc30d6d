use crate::diagnostic::*;
use crate::types::TypeTable;
use anyhow::Result;
use tree_sitter::Node;

pub struct NilSliceComparison;

/// ## What it does
///
/// Checks for comparisons of a slice value to `nil` with `==` or `!=`, and
/// replaces them with an explicit length check.
///
/// ## Why is this bad?
///
/// A nil slice and an empty non-nil slice behave identically under `len`,
/// `cap`, `append` and `range`, so code branching on `s == nil` almost
/// always means "is the slice empty" and is clearer as `len(s) == 0`.
/// Distinguishing nil from empty on purpose is rare; such comparisons can be
/// kept with a `nillinter:ignore` comment on the same line or the line
/// directly above.
///
/// Nil comparisons of pointers, maps and channels are legitimate and are
/// never flagged.
///
/// ## Example
///
/// ```go
/// if s == nil {
///     return
/// }
/// ```
///
/// Use instead:
///
/// ```go
/// if len(s) == 0 {
///     return
/// }
/// ```
impl Violation for NilSliceComparison {
    fn name(&self) -> String {
        "nil_slice_comparison".to_string()
    }
    fn body(&self) -> String {
        "slice compared to nil; use an emptiness check".to_string()
    }
    fn suggestion(&self) -> Option<String> {
        Some("Replace the nil comparison with a `len(...)` check.".to_string())
    }
}

pub fn nil_comparison(
    node: &Node<'_>,
    source: &str,
    types: &TypeTable,
) -> Result<Option<Diagnostic>> {
    let (Some(left), Some(operator), Some(right)) = (
        node.child_by_field_name("left"),
        node.child_by_field_name("operator"),
        node.child_by_field_name("right"),
    ) else {
        return Ok(None);
    };

    let operator = &source[operator.byte_range()];
    if operator != "==" && operator != "!=" {
        return Ok(None);
    }

    let left_is_nil = left.kind() == "nil";
    let right_is_nil = right.kind() == "nil";

    // Exactly one side must be the nil literal and the other must resolve to
    // a slice. An unresolved type never matches.
    let slice_operand = if right_is_nil && !left_is_nil && types.is_slice(&left, source) {
        left
    } else if left_is_nil && !right_is_nil && types.is_slice(&right, source) {
        right
    } else {
        return Ok(None);
    };

    // The operand is re-serialized verbatim so that selectors, indexing and
    // calls survive untouched.
    let operand = &source[slice_operand.byte_range()];
    let range = TextRange::new(node.start_byte(), node.end_byte());

    let content = if operator == "==" {
        format!("len({operand}) == 0")
    } else {
        format!("len({operand}) != 0")
    };

    Ok(Some(Diagnostic::new(
        NilSliceComparison,
        range,
        Fix {
            content,
            start: range.start(),
            end: range.end(),
        },
    )))
}
