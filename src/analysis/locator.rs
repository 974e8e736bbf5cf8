// Import resolution against the project tree
//
// Maps one import statement to a project file, an external dependency,
// or a recorded resolution failure. Installed packages are never probed;
// anything that does not resolve under the project root is external.

use crate::parser::ImportStmt;
use std::path::{Path, PathBuf};

/// Where an import statement points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A file under the project root
    InProject(PathBuf),
    /// Not in the project: stdlib or third-party, named by top-level segment
    External(String),
    /// A real file the import reaches outside the project root
    OutsideProject(PathBuf),
    /// Malformed import that cannot be resolved at all
    Invalid(String),
}

/// Resolves import statements relative to a project root
pub struct SourceLocator {
    root: PathBuf,
}

impl SourceLocator {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve an import found in `importer` (an absolute path)
    pub fn resolve(&self, importer: &Path, import: &ImportStmt) -> ResolvedTarget {
        if import.is_relative() {
            self.resolve_relative(importer, import)
        } else {
            self.resolve_absolute(import)
        }
    }

    fn resolve_absolute(&self, import: &ImportStmt) -> ResolvedTarget {
        if import.module.is_empty() {
            return ResolvedTarget::Invalid("empty absolute import".to_string());
        }

        let base = self.root.join(import.module.replace('.', "/"));
        match find_module_file(&base) {
            Some(path) => ResolvedTarget::InProject(path),
            None => ResolvedTarget::External(import.top_level().to_string()),
        }
    }

    fn resolve_relative(&self, importer: &Path, import: &ImportStmt) -> ResolvedTarget {
        let Some(package_dir) = importer.parent() else {
            return ResolvedTarget::Invalid("relative import from a rootless path".to_string());
        };

        // level 1 is the importer's own package; each extra dot ascends once
        let mut base = package_dir.to_path_buf();
        for _ in 1..import.level {
            match base.parent() {
                Some(parent) => base = parent.to_path_buf(),
                None => {
                    return ResolvedTarget::Invalid(format!(
                        "relative import '{}{}' ascends beyond the filesystem root",
                        ".".repeat(import.level),
                        import.module
                    ))
                }
            }
        }

        let target = if import.module.is_empty() {
            base
        } else {
            base.join(import.module.replace('.', "/"))
        };

        match find_module_file(&target) {
            Some(path) if path.starts_with(&self.root) => ResolvedTarget::InProject(path),
            Some(path) => ResolvedTarget::OutsideProject(path),
            None => ResolvedTarget::Invalid(format!(
                "relative import '{}{}' does not resolve to a file",
                ".".repeat(import.level),
                import.module
            )),
        }
    }
}

/// Resolve a module base path to `<base>.py` or `<base>/__init__.py`
fn find_module_file(base: &Path) -> Option<PathBuf> {
    let py_file = base.with_extension("py");
    if py_file.is_file() {
        return Some(py_file);
    }

    let init_file = base.join("__init__.py");
    if init_file.is_file() {
        return Some(init_file);
    }

    None
}
