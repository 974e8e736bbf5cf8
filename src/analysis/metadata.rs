// Per-file metadata extraction
//
// Turns a parsed module plus its raw source into the metadata record the
// report shows. The TODO-tag scan works on raw text so it still runs for
// files whose structural parse failed.

use crate::analysis::classify::{RiskLevel, Role};
use crate::parser::ParsedModule;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Comment tags recognized by the TODO scan, checked in this order
pub const TODO_TAGS: [&str; 4] = ["TODO", "FIXME", "HACK", "DEPRECATED"];

/// One tagged comment found in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTag {
    /// Line number (1-based)
    pub line: usize,
    /// The matched tag, e.g. "TODO"
    pub tag: String,
    /// Comment text after the tag
    pub text: String,
}

/// Metadata extracted from one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// First non-empty line of the module docstring
    pub business_purpose: Option<String>,
    /// Top-level class names, in source order
    pub classes: Vec<String>,
    /// Top-level function names, in source order
    pub functions: Vec<String>,
    /// Top-level names of external imports, deduplicated, insertion order
    pub external_dependencies: Vec<String>,
    pub has_error_handling: bool,
    pub todo_tags: Vec<TodoTag>,
    pub is_test_file: bool,
    /// Extended mode only
    pub risk_level: Option<RiskLevel>,
    /// Extended mode only
    pub architectural_role: Option<Role>,
}

impl Metadata {
    /// Record an external dependency, keeping first-seen order
    pub fn add_external(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        if !self.external_dependencies.iter().any(|d| d == name) {
            self.external_dependencies.push(name.to_string());
        }
    }
}

/// Extracts metadata records from parsed files
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Full extraction for a successfully parsed file
    pub fn extract(parsed: &ParsedModule, source: &str, path: &Path) -> Metadata {
        Metadata {
            business_purpose: parsed.docstring.as_deref().and_then(business_purpose),
            classes: parsed.classes.clone(),
            functions: parsed.functions.clone(),
            external_dependencies: Vec::new(),
            has_error_handling: parsed.has_error_handling,
            todo_tags: scan_todo_tags(source),
            is_test_file: is_test_file(path),
            risk_level: None,
            architectural_role: None,
        }
    }

    /// Partial extraction for a file whose structural parse failed:
    /// only what the raw text and the filename can still provide
    pub fn extract_unparsed(source: &str, path: &Path) -> Metadata {
        Metadata {
            todo_tags: scan_todo_tags(source),
            is_test_file: is_test_file(path),
            ..Metadata::default()
        }
    }
}

/// First non-empty line of a docstring
fn business_purpose(docstring: &str) -> Option<String> {
    docstring
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Line-level scan for tagged comments; one tag per line, first tag wins
pub fn scan_todo_tags(source: &str) -> Vec<TodoTag> {
    let mut tags = Vec::new();

    for (i, line) in source.lines().enumerate() {
        let Some(hash) = line.find('#') else { continue };
        let comment = &line[hash + 1..];

        for tag in TODO_TAGS {
            if let Some(pos) = comment.find(tag) {
                let rest = comment[pos + tag.len()..]
                    .trim_start_matches(':')
                    .trim()
                    .to_string();
                tags.push(TodoTag {
                    line: i + 1,
                    tag: tag.to_string(),
                    text: rest,
                });
                break;
            }
        }
    }

    tags
}

/// Filename-based test detection, independent of content
pub fn is_test_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with("test_") || name.ends_with("_test.py")
}
