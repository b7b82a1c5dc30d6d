use anyhow::Result;

use crate::check::{Checker, walk_node};
use crate::parse::ParsedFile;

/// How much information an analyzer needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// The syntax tree alone is enough.
    Syntax,
    /// The analyzer also consults the file's type information.
    TypesInfo,
}

/// A single named analysis pass over one parsed file.
pub struct Analyzer {
    pub name: &'static str,
    pub doc: &'static str,
    pub load_mode: LoadMode,
    pub run: fn(&ParsedFile, &mut Checker<'_>) -> Result<()>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("load_mode", &self.load_mode)
            .finish()
    }
}

/// Entry point for embedding hosts. The settings value is accepted for
/// forward compatibility and is currently ignored.
pub fn new(_settings: Option<serde_json::Value>) -> Result<Vec<Analyzer>> {
    Ok(vec![Analyzer {
        name: "nil_slice_comparison",
        doc: "flag slice comparisons to nil; prefer len(s) == 0 when checking emptiness",
        load_mode: LoadMode::TypesInfo,
        run: run_nil_comparison,
    }])
}

fn run_nil_comparison(parsed: &ParsedFile, checker: &mut Checker<'_>) -> Result<()> {
    walk_node(&parsed.root_node(), checker)
}
