// Analysis module: traversal, resolution, metadata, classification

pub mod classify;
pub mod graph;
pub mod locator;
pub mod metadata;

pub use classify::{RiskLevel, Role};
pub use graph::{DependencyGraph, Edge, EdgeKind, ImportIssue, ModuleNode, NodeId, NodeStatus};
pub use locator::{ResolvedTarget, SourceLocator};
pub use metadata::{Metadata, MetadataExtractor, TodoTag};

use crate::error::{Error, Result};
use crate::parser::PythonParser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Report mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Basic,
    Extended,
}

impl Mode {
    pub fn is_extended(&self) -> bool {
        matches!(self, Mode::Extended)
    }
}

/// Builds the dependency graph from an entry file
///
/// Drives an explicit worklist over `(path, depth)` pairs. Each file is
/// parsed and expanded at most once, at the depth of first discovery, so
/// cyclic imports cannot recurse. The depth limit is checked at enqueue
/// time; targets past it are recorded as cut off but still get a node.
pub struct GraphBuilder {
    root: PathBuf,
    max_depth: Option<usize>,
    mode: Mode,
    parser: PythonParser,
    verbose: bool,
}

impl GraphBuilder {
    /// Create a builder rooted at the given project directory
    pub fn new(root: &Path, mode: Mode) -> Result<Self> {
        let root = root.canonicalize()?;
        Ok(Self {
            root,
            max_depth: None,
            mode,
            parser: PythonParser::new()?,
            verbose: false,
        })
    }

    /// Limit traversal depth; `None` runs the worklist to exhaustion
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the graph reachable from the entry file
    ///
    /// Only an unreadable entry file is fatal; every other failure is
    /// absorbed into the graph as a node status or a recorded issue.
    pub fn build(&mut self, entry: &Path) -> Result<DependencyGraph> {
        let entry_canonical = entry
            .canonicalize()
            .map_err(|_| Error::EntryNotFound(entry.to_path_buf()))?;
        if !entry_canonical.is_file() {
            return Err(Error::EntryNotFound(entry.to_path_buf()));
        }

        let locator = SourceLocator::new(self.root.clone());
        let mut graph = DependencyGraph::new();
        let mut worklist: VecDeque<(PathBuf, usize)> = VecDeque::new();

        let progress = if self.verbose {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {pos} files {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            Some(pb)
        } else {
            None
        };

        graph.intern(&entry_canonical, self.display(&entry_canonical), 0);
        worklist.push_back((entry_canonical.clone(), 0));

        while let Some((path, depth)) = worklist.pop_front() {
            let display = self.display(&path);
            let id = graph.intern(&path, display.clone(), depth);

            // The visited gate: a file expands at most once, ever
            if graph.node(id).expanded {
                continue;
            }
            graph.node_mut(id).expanded = true;

            if let Some(pb) = &progress {
                pb.set_message(display.display().to_string());
                pb.inc(1);
            }

            let source = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    if graph.entry() == Some(id) {
                        return Err(Error::EntryNotFound(path));
                    }
                    graph.node_mut(id).status = NodeStatus::ParseError;
                    graph.add_issue(display, None, format!("cannot read file: {}", e));
                    continue;
                }
            };

            let parsed = match self.parser.parse_source(&source, &display) {
                Ok(p) => p,
                Err(e) => {
                    graph.node_mut(id).status = NodeStatus::ParseError;
                    graph.node_mut(id).metadata =
                        Some(MetadataExtractor::extract_unparsed(&source, &display));
                    graph.add_issue(display, None, e.to_string());
                    continue;
                }
            };

            let mut metadata = MetadataExtractor::extract(&parsed, &source, &display);

            for line in &parsed.bad_import_lines {
                graph.add_issue(display.clone(), Some(*line), "unparseable import statement");
            }

            for import in &parsed.imports {
                let kind = if import.is_relative() {
                    EdgeKind::Relative
                } else {
                    EdgeKind::Absolute
                };

                match locator.resolve(&path, import) {
                    ResolvedTarget::InProject(target) => {
                        let canonical = target.canonicalize().unwrap_or(target);
                        let target_display = self.display(&canonical);
                        let target_id = graph.intern(&canonical, target_display, depth + 1);
                        graph.add_edge(id, target_id, kind);

                        if graph.node(target_id).expanded {
                            continue;
                        }
                        let within = self.max_depth.map_or(true, |limit| depth + 1 <= limit);
                        if within {
                            worklist.push_back((canonical, depth + 1));
                        } else {
                            graph.mark_cutoff(target_id);
                        }
                    }
                    ResolvedTarget::External(name) => {
                        metadata.add_external(&name);
                    }
                    ResolvedTarget::OutsideProject(target) => {
                        let canonical = target.canonicalize().unwrap_or(target);
                        let target_id = graph.intern(&canonical, canonical.clone(), depth + 1);
                        graph.node_mut(target_id).status = NodeStatus::UnresolvedExternal;
                        graph.add_edge(id, target_id, kind);
                    }
                    ResolvedTarget::Invalid(message) => {
                        graph.add_issue(display.clone(), Some(import.line), message);
                    }
                }
            }

            if self.mode.is_extended() {
                metadata.risk_level = Some(classify::risk_level(&source, &metadata));
                metadata.architectural_role = Some(classify::architectural_role(&display));
            }

            graph.node_mut(id).metadata = Some(metadata);
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(graph)
    }

    /// Project-relative display path; files outside the root keep the full path
    fn display(&self, canonical: &Path) -> PathBuf {
        canonical
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| canonical.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn builder(root: &Path) -> GraphBuilder {
        GraphBuilder::new(root, Mode::Basic).unwrap()
    }

    fn node_by_path<'a>(graph: &'a DependencyGraph, name: &str) -> (NodeId, &'a ModuleNode) {
        graph
            .iter()
            .find(|(_, n)| n.path == Path::new(name))
            .unwrap_or_else(|| panic!("no node for {}", name))
    }

    #[test]
    fn test_simple_fanout() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("main.py"),
            "\"\"\"Entry point.\"\"\"\nimport a\nimport b\n",
        )
        .unwrap();
        fs::write(dir.path().join("a.py"), "\"\"\"Module a.\"\"\"\n").unwrap();
        fs::write(dir.path().join("b.py"), "\"\"\"Module b.\"\"\"\n").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.issues().is_empty());

        let (main_id, main) = node_by_path(&graph, "main.py");
        assert_eq!(main.discovery_depth, 0);
        assert_eq!(graph.imports_of(main_id).len(), 2);

        let (_, a) = node_by_path(&graph, "a.py");
        assert_eq!(a.discovery_depth, 1);
        assert_eq!(
            a.metadata.as_ref().unwrap().business_purpose,
            Some("Module a.".to_string())
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        fs::write(dir.path().join("b.py"), "import a\n").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("a.py")).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges().len(), 2);

        let (a_id, a) = node_by_path(&graph, "a.py");
        let (b_id, b) = node_by_path(&graph, "b.py");
        assert!(a.expanded && b.expanded);
        assert_eq!(graph.imported_by(a_id), vec![b_id]);
        assert_eq!(graph.imported_by(b_id), vec![a_id]);
    }

    #[test]
    fn test_no_node_for_external_import() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "import requests\n").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("a.py")).unwrap();

        assert_eq!(graph.len(), 1);
        assert!(graph.edges().is_empty());

        let (_, a) = node_by_path(&graph, "a.py");
        assert_eq!(
            a.metadata.as_ref().unwrap().external_dependencies,
            vec!["requests"]
        );
    }

    #[test]
    fn test_depth_cutoff() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "import a\n").unwrap();
        fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        fs::write(dir.path().join("b.py"), "import c\n").unwrap();
        fs::write(dir.path().join("c.py"), "").unwrap();

        let graph = builder(dir.path())
            .with_max_depth(Some(1))
            .build(&dir.path().join("main.py"))
            .unwrap();

        // main and a expanded; b reached but cut off; c never discovered
        assert_eq!(graph.len(), 3);
        let (_, a) = node_by_path(&graph, "a.py");
        assert!(a.expanded);
        let (b_id, b) = node_by_path(&graph, "b.py");
        assert!(!b.expanded);
        assert_eq!(graph.cut_off_nodes(), vec![b_id]);
        assert!(graph.iter().all(|(_, n)| n.path != Path::new("c.py")));
    }

    #[test]
    fn test_cutoff_node_expanded_via_shorter_path() {
        let dir = TempDir::new().unwrap();
        // main imports deep and shared; deep imports shared again at depth 2
        fs::write(dir.path().join("main.py"), "import deep\nimport shared\n").unwrap();
        fs::write(dir.path().join("deep.py"), "import shared\n").unwrap();
        fs::write(dir.path().join("shared.py"), "").unwrap();

        let graph = builder(dir.path())
            .with_max_depth(Some(1))
            .build(&dir.path().join("main.py"))
            .unwrap();

        let (_, shared) = node_by_path(&graph, "shared.py");
        assert!(shared.expanded);
        assert!(graph.cut_off_nodes().is_empty());
    }

    #[test]
    fn test_parse_error_does_not_stop_siblings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "import broken\nimport fine\n").unwrap();
        fs::write(dir.path().join("broken.py"), "def broken(:\n").unwrap();
        fs::write(dir.path().join("fine.py"), "\"\"\"Works.\"\"\"\n").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        assert_eq!(graph.len(), 3);
        let (_, broken) = node_by_path(&graph, "broken.py");
        assert_eq!(broken.status, NodeStatus::ParseError);
        assert_eq!(graph.issues().len(), 1);
        assert!(graph.issues()[0].file == Path::new("broken.py"));

        let (_, fine) = node_by_path(&graph, "fine.py");
        assert_eq!(fine.status, NodeStatus::Ok);
        assert!(fine.metadata.is_some());
    }

    #[test]
    fn test_parse_error_keeps_todo_scan() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "import broken\n").unwrap();
        fs::write(
            dir.path().join("broken.py"),
            "# TODO: fix the syntax below\ndef broken(:\n",
        )
        .unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        let (_, broken) = node_by_path(&graph, "broken.py");
        let meta = broken.metadata.as_ref().unwrap();
        assert_eq!(meta.todo_tags.len(), 1);
        assert_eq!(meta.todo_tags[0].text, "fix the syntax below");
    }

    #[test]
    fn test_malformed_relative_import_recorded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "from .missing import x\n").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.issues().len(), 1);
        assert_eq!(graph.issues()[0].line, Some(1));
        assert!(graph.issues()[0].message.contains(".missing"));
    }

    #[test]
    fn test_missing_entry_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = builder(dir.path()).build(&dir.path().join("absent.py"));
        assert!(matches!(result, Err(Error::EntryNotFound(_))));
    }

    #[test]
    fn test_shared_import_single_node() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "import a\nimport b\n").unwrap();
        fs::write(dir.path().join("a.py"), "import shared\n").unwrap();
        fs::write(dir.path().join("b.py"), "import shared\n").unwrap();
        fs::write(dir.path().join("shared.py"), "").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        assert_eq!(graph.len(), 4);
        let (shared_id, _) = node_by_path(&graph, "shared.py");
        assert_eq!(graph.imported_by(shared_id).len(), 2);
    }

    #[test]
    fn test_package_import_resolves_init() {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(dir.path().join("main.py"), "import pkg\n").unwrap();
        fs::write(pkg.join("__init__.py"), "from . import core\n").unwrap();
        fs::write(pkg.join("core.py"), "").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        assert_eq!(graph.len(), 3);
        node_by_path(&graph, "pkg/__init__.py");
        node_by_path(&graph, "pkg/core.py");
    }

    #[test]
    fn test_extended_mode_classifies() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("main.py"),
            "\"\"\"Runs queries.\"\"\"\ntry:\n    cursor.execute(q)\nexcept Exception:\n    pass\n",
        )
        .unwrap();

        let mut b = GraphBuilder::new(dir.path(), Mode::Extended).unwrap();
        let graph = b.build(&dir.path().join("main.py")).unwrap();

        let (_, main) = node_by_path(&graph, "main.py");
        let meta = main.metadata.as_ref().unwrap();
        assert_eq!(meta.risk_level, Some(RiskLevel::High));
        assert_eq!(meta.architectural_role, Some(Role::Other));
        assert!(meta.has_error_handling);
    }

    #[test]
    fn test_basic_mode_skips_classification() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "x = 1\n").unwrap();

        let graph = builder(dir.path()).build(&dir.path().join("main.py")).unwrap();

        let (_, main) = node_by_path(&graph, "main.py");
        let meta = main.metadata.as_ref().unwrap();
        assert_eq!(meta.risk_level, None);
        assert_eq!(meta.architectural_role, None);
    }
}
