// Deterministic Markdown rendering of a dependency graph
//
// Same graph and options always produce byte-identical output, so diffs
// between runs reflect real changes in the analyzed project.

use crate::analysis::{DependencyGraph, Mode, NodeId, NodeStatus, RiskLevel};
use crate::config::Lang;
use crate::report::checkbox::CheckboxState;
use crate::report::strings::Strings;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

const MAX_LISTED_NAMES: usize = 5;
const MAX_LISTED_DEPS: usize = 10;
const MAX_LISTED_TODOS: usize = 10;

/// Marker shown in extended mode for nodes without a risk level
const UNKNOWN_RISK_MARKER: &str = "⚪";

/// Inputs that shape a render besides the graph itself
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: Mode,
    pub lang: Lang,
    /// Project root shown in the header
    pub root: PathBuf,
    pub max_depth: Option<usize>,
    /// Checked anchors recovered from the previous output file
    pub previous: CheckboxState,
}

/// Renders a dependency graph as Markdown
pub struct ReportRenderer {
    options: RenderOptions,
}

impl ReportRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the full report
    pub fn render(&self, graph: &DependencyGraph) -> String {
        let s = Strings::for_lang(self.options.lang);
        let extended = self.options.mode.is_extended();
        let mut lines: Vec<String> = Vec::new();

        self.render_header(graph, s, extended, &mut lines);
        self.render_tree(graph, s, &mut lines);
        self.render_toc(graph, s, extended, &mut lines);
        self.render_details(graph, s, extended, &mut lines);
        self.render_errors(graph, s, &mut lines);
        if extended {
            self.render_summary(graph, s, &mut lines);
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn render_header(
        &self,
        graph: &DependencyGraph,
        s: &Strings,
        extended: bool,
        lines: &mut Vec<String>,
    ) {
        let title = if extended { s.title_extended } else { s.title };
        let entry = graph
            .entry()
            .map(|id| graph.node(id).path.clone())
            .unwrap_or_default();
        let entry = entry.display();
        let depth = match self.options.max_depth {
            Some(d) => d.to_string(),
            None => s.unbounded.to_string(),
        };

        lines.push(format!("# {}", title));
        lines.push(String::new());
        lines.push(format!("**{}:** [{}]({})", s.entry_point, entry, entry));
        lines.push(format!(
            "**{}:** `{}`",
            s.root_directory,
            self.options.root.display()
        ));
        lines.push(format!("**{}:** {}", s.max_depth, depth));
        lines.push(format!("**{}:** {}", s.files_analyzed, graph.len()));
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    /// Depth-first tree from the entry node, reproducing per-file import
    /// order. A node already shown is a leaf reference, which keeps the
    /// walk finite on cyclic graphs.
    fn render_tree(&self, graph: &DependencyGraph, s: &Strings, lines: &mut Vec<String>) {
        lines.push(format!("## {}", s.tree));
        lines.push(String::new());
        lines.push("```".to_string());

        if let Some(entry) = graph.entry() {
            let cutoffs: HashSet<NodeId> = graph.cut_off_nodes().into_iter().collect();
            let mut shown: HashSet<NodeId> = HashSet::new();
            let mut stack: Vec<(NodeId, String, bool)> = vec![(entry, String::new(), true)];

            while let Some((id, prefix, is_last)) = stack.pop() {
                let node = graph.node(id);
                let branch = if is_last { "└── " } else { "├── " };
                let first_visit = shown.insert(id);

                let suffix = if !first_visit {
                    Some(s.tree_ref)
                } else if node.status == NodeStatus::ParseError {
                    Some(s.tree_parse_error)
                } else if node.status == NodeStatus::UnresolvedExternal {
                    Some(s.tree_external)
                } else if cutoffs.contains(&id) {
                    Some(s.tree_cutoff)
                } else {
                    None
                };

                let mut label = node.path.display().to_string();
                if let Some(suffix) = suffix {
                    label.push(' ');
                    label.push_str(suffix);
                }
                lines.push(format!("{}{}{}", prefix, branch, label));

                if first_visit {
                    let child_prefix =
                        format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                    let children = graph.imports_of(id);
                    for (i, (child, _)) in children.iter().enumerate().rev() {
                        stack.push((*child, child_prefix.clone(), i == children.len() - 1));
                    }
                }
            }
        }

        lines.push("```".to_string());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    fn render_toc(
        &self,
        graph: &DependencyGraph,
        s: &Strings,
        extended: bool,
        lines: &mut Vec<String>,
    ) {
        lines.push(format!("## {}", s.toc));
        lines.push(String::new());

        for (_, node) in graph.iter() {
            let anchor = anchor(&node.path);
            let checkbox = self.checkbox(&anchor);
            let marker = if extended {
                format!("{} ", risk_marker(node.metadata.as_ref().and_then(|m| m.risk_level)))
            } else {
                String::new()
            };
            lines.push(format!(
                "- {} {}[{}](#{})",
                checkbox,
                marker,
                node.path.display(),
                anchor
            ));
        }

        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    fn render_details(
        &self,
        graph: &DependencyGraph,
        s: &Strings,
        extended: bool,
        lines: &mut Vec<String>,
    ) {
        lines.push(format!("## {}", s.details));
        lines.push(String::new());

        for (id, node) in graph.iter() {
            let node_anchor = anchor(&node.path);
            let display = node.path.display();

            lines.push(format!("### {} {{#{}}}", display, node_anchor));
            lines.push(String::new());
            lines.push(format!("**{}:** [{}]({})", s.path_label, display, display));
            lines.push(String::new());

            match node.status {
                NodeStatus::ParseError => {
                    lines.push(s.parse_error_note.to_string());
                    lines.push(String::new());
                }
                NodeStatus::UnresolvedExternal => {
                    lines.push(s.external_note.to_string());
                    lines.push(String::new());
                }
                NodeStatus::Ok if !node.expanded => {
                    lines.push(s.not_expanded_note.to_string());
                    lines.push(String::new());
                }
                NodeStatus::Ok => {}
            }

            if let Some(meta) = &node.metadata {
                if let Some(purpose) = &meta.business_purpose {
                    lines.push(format!("**{}:** {}", s.business_purpose, purpose));
                    lines.push(String::new());
                }

                if extended {
                    if let Some(role) = meta.architectural_role {
                        lines.push(format!("**{}:** {}", s.architectural_role, role.as_str()));
                        lines.push(String::new());
                    }
                    if let Some(risk) = meta.risk_level {
                        lines.push(format!(
                            "**{}:** {} {}",
                            s.risk_level,
                            risk.marker(),
                            risk.as_str()
                        ));
                        if meta.has_error_handling {
                            lines.push(format!("*({})*", s.error_handling_note));
                        }
                        lines.push(String::new());
                    }
                }

                if meta.is_test_file {
                    lines.push(format!("*({})*", s.test_file_note));
                    lines.push(String::new());
                }

                if !meta.external_dependencies.is_empty() {
                    lines.push(format!(
                        "**{}:** {}",
                        s.external_dependencies,
                        capped_code_list(&meta.external_dependencies, MAX_LISTED_DEPS, s.more)
                    ));
                    lines.push(String::new());
                }

                if !meta.classes.is_empty() {
                    lines.push(format!(
                        "**{}:** {}",
                        s.classes,
                        capped_code_list(&meta.classes, MAX_LISTED_NAMES, s.more)
                    ));
                    lines.push(String::new());
                }

                if !meta.functions.is_empty() {
                    let with_parens: Vec<String> =
                        meta.functions.iter().map(|f| format!("{}()", f)).collect();
                    lines.push(format!(
                        "**{}:** {}",
                        s.functions,
                        capped_code_list(&with_parens, MAX_LISTED_NAMES, s.more)
                    ));
                    lines.push(String::new());
                }

                if !meta.todo_tags.is_empty() {
                    lines.push(format!("**{}:**", s.todos));
                    for tag in meta.todo_tags.iter().take(MAX_LISTED_TODOS) {
                        lines.push(format!(
                            "- {} {}: {}: {}",
                            s.line_word, tag.line, tag.tag, tag.text
                        ));
                    }
                    if meta.todo_tags.len() > MAX_LISTED_TODOS {
                        lines.push(format!(
                            "- ... +{} {}",
                            meta.todo_tags.len() - MAX_LISTED_TODOS,
                            s.more
                        ));
                    }
                    lines.push(String::new());
                }
            }

            let imports = graph.imports_of(id);
            if !imports.is_empty() {
                lines.push(format!("**{}:**", s.imports));
                for (target, _) in &imports {
                    let target_node = graph.node(*target);
                    let target_anchor = anchor(&target_node.path);
                    let marker = if extended {
                        format!(
                            "{} ",
                            risk_marker(target_node.metadata.as_ref().and_then(|m| m.risk_level))
                        )
                    } else {
                        String::new()
                    };
                    lines.push(format!(
                        "- {} {}[{}](#{})",
                        self.checkbox(&target_anchor),
                        marker,
                        target_node.path.display(),
                        target_anchor
                    ));
                }
                lines.push(String::new());
            }

            let importers = graph.imported_by(id);
            if !importers.is_empty() {
                lines.push(format!("**{}:**", s.imported_by));
                for importer in &importers {
                    let importer_node = graph.node(*importer);
                    let importer_anchor = anchor(&importer_node.path);
                    lines.push(format!(
                        "- {} [{}](#{})",
                        self.checkbox(&importer_anchor),
                        importer_node.path.display(),
                        importer_anchor
                    ));
                }
                lines.push(String::new());
            }

            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    fn render_errors(&self, graph: &DependencyGraph, s: &Strings, lines: &mut Vec<String>) {
        if graph.issues().is_empty() {
            return;
        }

        lines.push(format!("## {}", s.import_errors));
        lines.push(String::new());
        for issue in graph.issues() {
            match issue.line {
                Some(line) => lines.push(format!(
                    "- {}:{}: {}",
                    issue.file.display(),
                    line,
                    issue.message
                )),
                None => lines.push(format!("- {}: {}", issue.file.display(), issue.message)),
            }
        }
        lines.push(String::new());
    }

    fn render_summary(&self, graph: &DependencyGraph, s: &Strings, lines: &mut Vec<String>) {
        lines.push(format!("## {}", s.summary));
        lines.push(String::new());

        let mut high = 0;
        let mut medium = 0;
        let mut low = 0;
        let mut roles: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut external: BTreeSet<&str> = BTreeSet::new();

        for (_, node) in graph.iter() {
            if let Some(meta) = &node.metadata {
                match meta.risk_level {
                    Some(RiskLevel::High) => high += 1,
                    Some(RiskLevel::Medium) => medium += 1,
                    Some(RiskLevel::Low) => low += 1,
                    None => {}
                }
                if let Some(role) = meta.architectural_role {
                    *roles.entry(role.as_str()).or_insert(0) += 1;
                }
                for dep in &meta.external_dependencies {
                    external.insert(dep);
                }
            }
        }

        lines.push(format!("**{}:**", s.risk_distribution));
        lines.push(format!("- 🔴 HIGH: {} {}", high, s.files_word));
        lines.push(format!("- 🟡 MEDIUM: {} {}", medium, s.files_word));
        lines.push(format!("- 🟢 LOW: {} {}", low, s.files_word));
        lines.push(String::new());

        if !roles.is_empty() {
            // Most common first; ties break on the name for stable output
            let mut ordered: Vec<(&str, usize)> = roles.into_iter().collect();
            ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

            lines.push(format!("**{}:**", s.arch_distribution));
            for (role, count) in ordered {
                lines.push(format!("- {}: {} {}", role, count, s.files_word));
            }
            lines.push(String::new());
        }

        if !external.is_empty() {
            let list: Vec<String> = external.iter().map(|d| format!("`{}`", d)).collect();
            lines.push(format!("**{}:** {}", s.all_external, list.join(", ")));
            lines.push(String::new());
        }
    }

    fn checkbox(&self, anchor: &str) -> &'static str {
        if self.options.previous.is_checked(anchor) {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

/// Slugified anchor for a project-relative path
///
/// Lowercases and maps path separators and dots to hyphens. Underscores
/// are kept, so `a_b.py` and `a/b.py` cannot collide.
pub fn anchor(path: &Path) -> String {
    path.display()
        .to_string()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' => '-',
            other => other,
        })
        .collect()
}

fn risk_marker(risk: Option<RiskLevel>) -> &'static str {
    match risk {
        Some(level) => level.marker(),
        None => UNKNOWN_RISK_MARKER,
    }
}

/// `` `a`, `b` ... +N more `` with at most `cap` entries listed
fn capped_code_list(items: &[String], cap: usize, more: &str) -> String {
    let mut list = items
        .iter()
        .take(cap)
        .map(|i| format!("`{}`", i))
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > cap {
        list.push_str(&format!(" ... +{} {}", items.len() - cap, more));
    }
    list
}
