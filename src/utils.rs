use crate::diagnostic::Diagnostic;
use crate::location::Location;
use std::path::Path;

pub fn find_new_lines(source: &str) -> Vec<usize> {
    source.match_indices('\n').map(|x| x.0).collect::<Vec<usize>>()
}

// Converts a byte offset into a (row, column) pair. Rows are 1-based,
// columns are 0-based.
pub fn find_row_col(start: usize, loc_new_lines: &[usize]) -> (usize, usize) {
    let n_new_lines_before = loc_new_lines.iter().take_while(|x| **x < start).count();

    let row = n_new_lines_before + 1;
    let col = match n_new_lines_before {
        0 => start,
        n => start - (loc_new_lines[n - 1] + 1),
    };
    (row, col)
}

pub fn compute_lints_location(
    diagnostics: Vec<Diagnostic>,
    loc_new_lines: &[usize],
) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .map(|mut diagnostic| {
            let (row, col) = find_row_col(diagnostic.range.start(), loc_new_lines);
            diagnostic.location = Some(Location::new(row, col));
            diagnostic
        })
        .collect()
}

// Paths are reported relative to the working directory when possible, so that
// output stays stable across machines.
pub fn relativize_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Ok(cwd) = std::env::current_dir()
        && let Ok(stripped) = path.strip_prefix(&cwd)
    {
        return stripped.display().to_string();
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_on_first_line() {
        let newlines = find_new_lines("ab\ncd\nef");
        assert_eq!(find_row_col(0, &newlines), (1, 0));
        assert_eq!(find_row_col(1, &newlines), (1, 1));
    }

    #[test]
    fn row_col_after_newlines() {
        let newlines = find_new_lines("ab\ncd\nef");
        // "c" is at byte 3, first column of row 2
        assert_eq!(find_row_col(3, &newlines), (2, 0));
        // "f" is at byte 7
        assert_eq!(find_row_col(7, &newlines), (3, 1));
    }

    #[test]
    fn no_newlines() {
        assert_eq!(find_row_col(4, &[]), (1, 4));
    }
}
