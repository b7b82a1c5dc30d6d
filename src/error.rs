use std::path::PathBuf;

#[derive(Debug)]
// Returned when tree-sitter reports error nodes in a file. We refuse to lint
// such files: type resolution and fix spans are unreliable on broken trees.
pub struct ParseError {
    pub filename: PathBuf,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse {}: the file contains Go syntax errors.",
            self.filename.display()
        )
    }
}

impl std::error::Error for ParseError {}
