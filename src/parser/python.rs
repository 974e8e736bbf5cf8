// Python parser using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse Python source code into its structural facts
    ///
    /// A source whose syntax tree contains errors is rejected wholesale;
    /// the caller records the file as unparseable and moves on.
    pub fn parse_source(&mut self, source: &str, path: &Path) -> Result<ParsedModule> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse source"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parse(path, "invalid syntax"));
        }

        let mut module = ParsedModule::new(path.to_path_buf());
        let bytes = source.as_bytes();

        if let Some(docstring) = extract_module_docstring(&root, bytes) {
            module.docstring = Some(docstring);
        }

        // Top-level definitions, in source order
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "class_definition" => {
                    if let Some(name) = definition_name(&child, bytes) {
                        module.classes.push(name);
                    }
                }
                "function_definition" => {
                    if let Some(name) = definition_name(&child, bytes) {
                        module.functions.push(name);
                    }
                }
                "decorated_definition" => {
                    let mut inner_cursor = child.walk();
                    for inner in child.children(&mut inner_cursor) {
                        match inner.kind() {
                            "class_definition" => {
                                if let Some(name) = definition_name(&inner, bytes) {
                                    module.classes.push(name);
                                }
                            }
                            "function_definition" => {
                                if let Some(name) = definition_name(&inner, bytes) {
                                    module.functions.push(name);
                                }
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        // Imports and try/except can appear at any nesting depth
        visit_all(&root, &mut |node| match node.kind() {
            "import_statement" => {
                let line = node.start_position().row + 1;
                let found = parse_import(node, bytes);
                if found.is_empty() {
                    module.bad_import_lines.push(line);
                } else {
                    module.imports.extend(found);
                }
            }
            "import_from_statement" => {
                let line = node.start_position().row + 1;
                match parse_import_from(node, bytes) {
                    Some(import) => module.imports.push(import),
                    None => module.bad_import_lines.push(line),
                }
            }
            "future_import_statement" => {
                let line = node.start_position().row + 1;
                module.imports.push(ImportStmt::absolute("__future__", line));
            }
            "try_statement" => {
                module.has_error_handling = true;
            }
            _ => {}
        });

        Ok(module)
    }
}

/// Depth-first visit of every node in the tree, explicit stack
fn visit_all<'a>(root: &Node<'a>, f: &mut impl FnMut(&Node<'a>)) {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        f(&node);
        let mut cursor = node.walk();
        // Reverse so children are visited in source order
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
}

/// Extract module docstring from root node
fn extract_module_docstring(root: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "expression_statement" {
            let mut inner_cursor = child.walk();
            for inner in child.children(&mut inner_cursor) {
                if inner.kind() == "string" {
                    return extract_string_content(&inner, source);
                }
            }
            return None;
        } else if child.kind() != "comment" {
            // First non-comment statement is not a docstring
            return None;
        }
    }
    None
}

/// Extract string content, handling triple-quoted strings
fn extract_string_content(node: &Node, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;

    let s = if text.starts_with("\"\"\"") || text.starts_with("'''") {
        &text[3..text.len().saturating_sub(3)]
    } else if text.starts_with('"') || text.starts_with('\'') {
        &text[1..text.len().saturating_sub(1)]
    } else {
        text
    };

    Some(s.trim().to_string())
}

/// Name of a class_definition or function_definition node
fn definition_name(node: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "identifier" {
            return child.utf8_text(source).ok().map(|s| s.to_string());
        }
    }
    None
}

/// Parse `import x` / `import x.y as z, w`: one entry per imported module
fn parse_import(node: &Node, source: &[u8]) -> Vec<ImportStmt> {
    let line = node.start_position().row + 1;
    let mut imports = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                if let Ok(text) = child.utf8_text(source) {
                    imports.push(ImportStmt::absolute(text, line));
                }
            }
            "aliased_import" => {
                let mut inner_cursor = child.walk();
                for inner in child.children(&mut inner_cursor) {
                    if inner.kind() == "dotted_name" {
                        if let Ok(text) = inner.utf8_text(source) {
                            imports.push(ImportStmt::absolute(text, line));
                        }
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    imports
}

/// Parse `from x import y` / `from ..x import y`: one entry per statement
fn parse_import_from(node: &Node, source: &[u8]) -> Option<ImportStmt> {
    let line = node.start_position().row + 1;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "relative_import" => {
                let mut level = 0;
                let mut module = String::new();
                let mut inner_cursor = child.walk();
                for inner in child.children(&mut inner_cursor) {
                    match inner.kind() {
                        "import_prefix" => {
                            level = inner
                                .utf8_text(source)
                                .ok()?
                                .chars()
                                .filter(|c| *c == '.')
                                .count();
                        }
                        "dotted_name" => {
                            module = inner.utf8_text(source).ok()?.to_string();
                        }
                        _ => {}
                    }
                }
                if level == 0 {
                    return None;
                }
                return Some(ImportStmt::relative(&module, level, line));
            }
            "dotted_name" => {
                // The first dotted_name is the module being imported from
                let module = child.utf8_text(source).ok()?;
                return Some(ImportStmt::absolute(module, line));
            }
            _ => {}
        }
    }

    None
}
