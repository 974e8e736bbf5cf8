// Structural facts extracted from parsed Python code
//
// These types carry what the graph builder and report need from a file:
// import statements, top-level definitions, and the module docstring.
// They are serializable for caching and debugging.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The structure extracted from a single Python file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedModule {
    /// File path as given to the parser
    pub path: PathBuf,
    /// Module-level docstring
    pub docstring: Option<String>,
    /// All import statements, in source order
    pub imports: Vec<ImportStmt>,
    /// Top-level class names, in source order
    pub classes: Vec<String>,
    /// Top-level function names, in source order
    pub functions: Vec<String>,
    /// Whether the file contains at least one try/except block
    pub has_error_handling: bool,
    /// Lines holding import statements the parser could not make sense of
    pub bad_import_lines: Vec<usize>,
}

impl ParsedModule {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            docstring: None,
            imports: Vec::new(),
            classes: Vec::new(),
            functions: Vec::new(),
            has_error_handling: false,
            bad_import_lines: Vec::new(),
        }
    }

    /// Check if the file has any extracted content
    pub fn is_empty(&self) -> bool {
        self.docstring.is_none()
            && self.imports.is_empty()
            && self.classes.is_empty()
            && self.functions.is_empty()
    }
}

/// A single import statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportStmt {
    /// Dotted module path; empty for `from . import x`
    pub module: String,
    /// Relative level: 0 = absolute, N = ascend N package levels
    pub level: usize,
    /// Line number (1-based)
    pub line: usize,
}

impl ImportStmt {
    /// Create an absolute import: `import a.b` or `from a.b import c`
    pub fn absolute(module: &str, line: usize) -> Self {
        Self {
            module: module.to_string(),
            level: 0,
            line,
        }
    }

    /// Create a relative import: `from ..a import c` has level 2, module "a"
    pub fn relative(module: &str, level: usize, line: usize) -> Self {
        Self {
            module: module.to_string(),
            level,
            line,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.level > 0
    }

    /// The first dotted segment, used to name external dependencies
    pub fn top_level(&self) -> &str {
        self.module.split('.').next().unwrap_or(&self.module)
    }
}
