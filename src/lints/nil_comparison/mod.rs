pub(crate) mod nil_comparison;

#[cfg(test)]
mod tests {
    use crate::utils_test::*;

    const RULE: &str = "nil_slice_comparison";
    const MSG: &str = "slice compared to nil";

    #[test]
    fn test_lint_nil_comparison() {
        expect_lint(
            "package main\n\nfunc f(s []int) bool {\n    return s == nil\n}",
            MSG,
            RULE,
        );
        expect_lint(
            "package main\n\nfunc f(s []int) bool {\n    return s != nil\n}",
            MSG,
            RULE,
        );
        // The nil literal can sit on either side.
        expect_lint(
            "package main\n\nfunc f(s []string) bool {\n    return nil == s\n}",
            MSG,
            RULE,
        );
        expect_lint(
            "package main\n\nfunc f(s []string) bool {\n    return nil != s\n}",
            MSG,
            RULE,
        );
    }

    #[test]
    fn test_lint_declared_and_inferred_slices() {
        // Package-level var with an explicit slice type.
        expect_lint(
            "package main\n\nvar s []byte\n\nfunc f() bool {\n    return s == nil\n}",
            MSG,
            RULE,
        );
        // Short variable declaration inferred from a composite literal.
        expect_lint(
            "package main\n\nfunc f() bool {\n    s := []int{}\n    return s == nil\n}",
            MSG,
            RULE,
        );
        // Named type whose underlying type is a slice.
        expect_lint(
            "package main\n\ntype Names []string\n\nfunc f(n Names) bool {\n    return n == nil\n}",
            MSG,
            RULE,
        );
        // A variadic parameter is a slice inside the body.
        expect_lint(
            "package main\n\nfunc f(xs ...int) bool {\n    return xs == nil\n}",
            MSG,
            RULE,
        );
        // Result of a single-result function.
        expect_lint(
            "package main\n\nfunc g() []int { return nil }\n\nfunc f() bool {\n    return g() == nil\n}",
            MSG,
            RULE,
        );
        // make() produces a slice.
        expect_lint(
            "package main\n\nfunc f() bool {\n    s := make([]int, 0)\n    return s == nil\n}",
            MSG,
            RULE,
        );
    }

    #[test]
    fn test_no_lint_non_slice_types() {
        // Maps, channels and pointers compare to nil legitimately.
        expect_no_lint(
            "package main\n\nfunc f(m map[string]int) bool {\n    return m == nil\n}",
            RULE,
        );
        expect_no_lint(
            "package main\n\nfunc f(c chan int) bool {\n    return c == nil\n}",
            RULE,
        );
        expect_no_lint(
            "package main\n\nfunc f(p *int) bool {\n    return p == nil\n}",
            RULE,
        );
        // Arrays are not slices.
        expect_no_lint(
            "package main\n\nfunc f(a [4]int) bool {\n    return a == nil\n}",
            RULE,
        );
        // Named type whose underlying type is a map.
        expect_no_lint(
            "package main\n\ntype Index map[string]int\n\nfunc f(i Index) bool {\n    return i == nil\n}",
            RULE,
        );
        // error values are interfaces.
        expect_no_lint(
            "package main\n\nfunc f(err error) bool {\n    return err == nil\n}",
            RULE,
        );
    }

    #[test]
    fn test_no_lint_unresolved_or_non_comparison() {
        // Unknown identifier: the type cannot be determined so nothing is
        // reported.
        expect_no_lint(
            "package main\n\nfunc f() bool {\n    return mystery == nil\n}",
            RULE,
        );
        // Call to a function declared in another file.
        expect_no_lint(
            "package main\n\nfunc f() bool {\n    return lookup() == nil\n}",
            RULE,
        );
        // Both sides nil, or neither side nil.
        expect_no_lint(
            "package main\n\nfunc f(a []int, b []int) bool {\n    return len(a) == len(b)\n}",
            RULE,
        );
        // Other comparison operators are left alone.
        expect_no_lint(
            "package main\n\nfunc f(a int) bool {\n    return a < 3\n}",
            RULE,
        );
        // Assignment of nil is not a comparison.
        expect_no_lint(
            "package main\n\nfunc f() {\n    var s []int\n    s = nil\n    _ = s\n}",
            RULE,
        );
    }

    #[test]
    fn test_two_diagnostics_in_one_expression() {
        let diagnostics = check_code(
            "package main\n\nfunc f(a []int, b []byte) bool {\n    return a == nil && b != nil\n}",
            RULE,
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_suppression_directive() {
        // Same line, positioned before the comparison.
        expect_no_lint(
            "package main\n\nfunc f(s []int) bool {\n    ok := /* nillinter:ignore */ s == nil\n    return ok\n}",
            RULE,
        );
        // Line directly above.
        expect_no_lint(
            "package main\n\nfunc f(s []int) bool {\n    // nillinter:ignore\n    return s == nil\n}",
            RULE,
        );
        // Substring match inside a longer comment.
        expect_no_lint(
            "package main\n\nfunc f(s []int) bool {\n    // keep: nillinter:ignore, nil and empty differ here\n    return s == nil\n}",
            RULE,
        );
        // A directive two lines above does not suppress.
        expect_lint(
            "package main\n\nfunc f(s []int) bool {\n    // nillinter:ignore\n\n    return s == nil\n}",
            MSG,
            RULE,
        );
        // A trailing comment starts after the comparison, so it is not the
        // closest preceding comment group and does not suppress.
        expect_lint(
            "package main\n\nfunc f(s []int) bool {\n    return s == nil // nillinter:ignore\n}",
            MSG,
            RULE,
        );
        // An unrelated comment does not suppress.
        expect_lint(
            "package main\n\nfunc f(s []int) bool {\n    // compare against nil\n    return s == nil\n}",
            MSG,
            RULE,
        );
    }

    #[test]
    fn test_fix_output() {
        use insta::assert_snapshot;

        assert_snapshot!(
            get_fixed_text(
                vec![
                    "package main\n\nfunc f(s []int) bool {\n    return s == nil\n}",
                    "package main\n\nfunc f(s []int) bool {\n    return s != nil\n}",
                    "package main\n\nfunc f(s []int) bool {\n    return nil == s\n}",
                ],
                RULE,
            ),
            @r"
        OLD:
        ====
        package main

        func f(s []int) bool {
            return s == nil
        }
        NEW:
        ====
        package main

        func f(s []int) bool {
            return len(s) == 0
        }

        OLD:
        ====
        package main

        func f(s []int) bool {
            return s != nil
        }
        NEW:
        ====
        package main

        func f(s []int) bool {
            return len(s) != 0
        }

        OLD:
        ====
        package main

        func f(s []int) bool {
            return nil == s
        }
        NEW:
        ====
        package main

        func f(s []int) bool {
            return len(s) == 0
        }
        "
        );
    }

    #[test]
    fn test_fix_preserves_operand_verbatim() {
        use insta::assert_snapshot;

        assert_snapshot!(
            get_fixed_text(
                vec![
                    "package main\n\ntype T struct {\n    xs []int\n}\n\nfunc f(t T) bool {\n    return t.xs == nil\n}",
                    "package main\n\nfunc f(m [][]int) bool {\n    return m[0] != nil\n}",
                    "package main\n\nfunc g() []int { return nil }\n\nfunc f() bool {\n    return g() == nil\n}",
                ],
                RULE,
            ),
            @r"
        OLD:
        ====
        package main

        type T struct {
            xs []int
        }

        func f(t T) bool {
            return t.xs == nil
        }
        NEW:
        ====
        package main

        type T struct {
            xs []int
        }

        func f(t T) bool {
            return len(t.xs) == 0
        }

        OLD:
        ====
        package main

        func f(m [][]int) bool {
            return m[0] != nil
        }
        NEW:
        ====
        package main

        func f(m [][]int) bool {
            return len(m[0]) != 0
        }

        OLD:
        ====
        package main

        func g() []int { return nil }

        func f() bool {
            return g() == nil
        }
        NEW:
        ====
        package main

        func g() []int { return nil }

        func f() bool {
            return len(g()) == 0
        }
        "
        );
    }

    #[test]
    fn test_fix_both_sides_of_logical_expression() {
        let fixed = apply_fixes(
            "package main\n\nfunc f(a []int, b []byte) bool {\n    return a == nil && b != nil\n}",
            RULE,
        );
        assert!(fixed.contains("len(a) == 0 && len(b) != 0"));
    }

    #[test]
    fn test_fix_is_idempotent() {
        let once = apply_fixes(
            "package main\n\nfunc f(s []int) bool {\n    return s == nil\n}",
            RULE,
        );
        let twice = apply_fixes(&once, RULE);
        assert_eq!(once, twice);
    }
}
