//! Go source parsing via tree-sitter-go.

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser, Tree};

/// A parsed Go source file. Owns the source so that nodes can be rendered
/// back to their exact written form.
#[derive(Debug)]
pub struct ParsedFile {
    pub tree: Tree,
    pub source: String,
}

impl ParsedFile {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether the parse tree contains any error nodes.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// The exact source text covered by `node`.
    pub fn node_text(&self, node: &Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }
}

fn create_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_go::LANGUAGE.into();
    parser
        .set_language(&language)
        .context("Failed to load the Go grammar")?;
    Ok(parser)
}

pub fn parse(source: &str) -> Result<ParsedFile> {
    let mut parser = create_parser()?;
    let tree = parser
        .parse(source, None)
        .context("The Go parser returned no tree")?;
    Ok(ParsedFile { tree, source: source.to_string() })
}
