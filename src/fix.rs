use crate::diagnostic::Diagnostic;

// Applies each fix in ascending order of its start offset, shifting later
// offsets by the length difference accumulated so far. A fix that would land
// inside an already-modified region is skipped; the caller re-lints and
// applies the remainder on the next round.
pub fn apply_fixes(fixes: &[Diagnostic], contents: &str) -> (bool, String) {
    let fixes = fixes
        .iter()
        .map(|diagnostic| &diagnostic.fix)
        .collect::<Vec<_>>();
    let old_content = contents;
    let mut new_content = old_content.to_string();
    let mut last_modified_pos = 0;
    let mut has_skipped_fixes = false;

    let old_length = old_content.len() as i64;
    let mut new_length = old_length;

    for fix in fixes {
        if fix.is_empty() {
            continue;
        }

        let mut start = fix.start as i64;
        let mut end = fix.end as i64;

        let diff_length = new_length - old_length;

        start += diff_length;
        end += diff_length;

        if start < last_modified_pos {
            has_skipped_fixes = true;
            continue;
        }

        new_content.replace_range(start as usize..end as usize, &fix.content);
        new_length = new_content.len() as i64;
        last_modified_pos = start + fix.content.len() as i64;
    }

    (has_skipped_fixes, new_content)
}
