//! Tracks comment-based suppression directives (`nillinter:ignore`).

use tree_sitter::Node;

/// The marker recognized inside a comment. This is a substring match, not a
/// structured tag: a comment embedding the marker in a longer sentence still
/// counts. Tightening this would be a behavior change.
pub const IGNORE_DIRECTIVE: &str = "nillinter:ignore";

#[derive(Debug, Clone)]
struct Comment {
    start: usize,
    line: usize,
    text: String,
}

/// The file's comments, grouped the way Go groups them: a run of comments on
/// consecutive lines with nothing but whitespace between them forms one
/// group. Built once per analyzed file.
#[derive(Debug, Default)]
pub struct SuppressionManager {
    groups: Vec<Vec<Comment>>,
}

impl SuppressionManager {
    pub fn from_tree(root: &Node<'_>, source: &str) -> Self {
        let mut comments = Vec::new();
        collect_comments(root, source, &mut comments);

        let mut groups: Vec<Vec<Comment>> = Vec::new();
        for comment in comments {
            match groups.last_mut() {
                Some(group)
                    if comment.line <= group.last().map(|c| c.line).unwrap_or(0) + 1 =>
                {
                    group.push(comment);
                }
                _ => groups.push(vec![comment]),
            }
        }

        Self { groups }
    }

    /// Whether a diagnostic at `node` is suppressed by a directive comment.
    ///
    /// Only the comment group most recently preceding the node in source
    /// order is considered. Within it, a comment containing the directive
    /// suppresses the node when it sits on the node's line or the line
    /// directly above.
    pub fn should_skip(&self, node: &Node<'_>) -> bool {
        let node_start = node.start_byte();
        let node_line = node.start_position().row;

        let mut closest = None;
        for group in &self.groups {
            if group[0].start > node_start {
                break;
            }
            closest = Some(group);
        }

        let Some(closest) = closest else {
            return false;
        };

        closest.iter().any(|comment| {
            comment.text.contains(IGNORE_DIRECTIVE)
                && (comment.line == node_line || comment.line + 1 == node_line)
        })
    }
}

fn collect_comments(node: &Node<'_>, source: &str, out: &mut Vec<Comment>) {
    if node.kind() == "comment" {
        out.push(Comment {
            start: node.start_byte(),
            line: node.start_position().row,
            text: source[node.byte_range()].to_string(),
        });
        return;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    drop(cursor);
    for child in children {
        collect_comments(&child, source, out);
    }
}
