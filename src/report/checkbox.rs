// Checkbox state carried across report runs
//
// The previous output file is read as an anchor -> checked store and
// nothing else; its content is never otherwise interpreted. Anchors
// that survive a re-run keep their checked state, new ones start
// unchecked.

use std::collections::HashSet;
use std::path::Path;

/// Checked anchors recovered from a previous report
#[derive(Debug, Clone, Default)]
pub struct CheckboxState {
    checked: HashSet<String>,
}

impl CheckboxState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load state from a previous output file; a missing or unreadable
    /// file yields the empty state
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_markdown(&text),
            Err(_) => Self::new(),
        }
    }

    /// Collect every checked checkbox line that links to an anchor
    pub fn from_markdown(text: &str) -> Self {
        let mut checked = HashSet::new();

        for line in text.lines() {
            let trimmed = line.trim_start();
            let rest = trimmed
                .strip_prefix("- [x]")
                .or_else(|| trimmed.strip_prefix("- [X]"));
            if let Some(rest) = rest {
                if let Some(anchor) = extract_anchor(rest) {
                    checked.insert(anchor);
                }
            }
        }

        Self { checked }
    }

    pub fn is_checked(&self, anchor: &str) -> bool {
        self.checked.contains(anchor)
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }
}

/// Pull the anchor out of `... [label](#anchor) ...`
fn extract_anchor(s: &str) -> Option<String> {
    let start = s.find("](#")?;
    let rest = &s[start + 3..];
    let end = rest.find(')')?;
    Some(rest[..end].to_string())
}
