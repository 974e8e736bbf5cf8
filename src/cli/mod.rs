//! CLI module for depmap

mod args;

pub use args::Args;

use crate::analysis::{GraphBuilder, Mode};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::{CheckboxState, RenderOptions, ReportRenderer, Strings};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    // Load config file if it exists; CLI arguments take precedence
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new("depmap.toml")),
    };
    cfg.merge_cli(args.output, args.max_depth, args.extended, args.lang, args.root);
    cfg.validate()?;

    let s = Strings::for_lang(cfg.report.lang);

    if !args.entry.exists() {
        eprintln!("{}: {}", s.entry_missing, args.entry.display());
        return Err(Error::EntryNotFound(args.entry));
    }

    let root = match &cfg.analysis.root {
        Some(r) => r.clone(),
        None => find_project_root(&args.entry),
    };

    let mode = if cfg.report.extended {
        Mode::Extended
    } else {
        Mode::Basic
    };

    let mapping = if mode.is_extended() {
        s.mapping_from_extended
    } else {
        s.mapping_from
    };
    eprintln!("{}: {}", mapping, args.entry.display());
    eprintln!("{}: {}", s.root_msg, root.display());
    match cfg.analysis.max_depth {
        Some(d) => eprintln!("{}: {}", s.depth_msg, d),
        None => eprintln!("{}: {}", s.depth_msg, s.unbounded),
    }
    eprintln!();

    let mut builder = GraphBuilder::new(&root, mode)?
        .with_max_depth(cfg.analysis.max_depth)
        .with_verbose(args.verbose);
    let graph = builder.build(&args.entry)?;

    let output = cfg.output_path();
    let previous = CheckboxState::load(&output);
    let renderer = ReportRenderer::new(RenderOptions {
        mode,
        lang: cfg.report.lang,
        root: root.canonicalize().unwrap_or(root),
        max_depth: cfg.analysis.max_depth,
        previous,
    });
    let markdown = renderer.render(&graph);
    std::fs::write(&output, markdown)?;

    eprintln!("{}: {}", s.generated, output.display());
    eprintln!();
    eprintln!("{}:", s.stats);
    eprintln!("  - {}: {}", s.stat_files, graph.len());
    eprintln!("  - {}: {}", s.stat_errors, graph.issues().len());

    Ok(())
}

/// Nearest ancestor of the entry file holding .git or pyproject.toml;
/// falls back to the entry file's own directory
fn find_project_root(entry: &Path) -> PathBuf {
    let absolute = entry
        .canonicalize()
        .unwrap_or_else(|_| entry.to_path_buf());

    for ancestor in absolute.ancestors().skip(1) {
        if ancestor.join(".git").exists() || ancestor.join("pyproject.toml").exists() {
            return ancestor.to_path_buf();
        }
    }

    absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_with_git() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("main.py"), "").unwrap();

        let root = find_project_root(&src.join("main.py"));
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_project_root_with_pyproject() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pyproject.toml"), "").unwrap();
        fs::write(dir.path().join("main.py"), "").unwrap();

        let root = find_project_root(&dir.path().join("main.py"));
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_project_root_nearest_wins() {
        let dir = TempDir::new().unwrap();
        let inner = dir.path().join("inner");
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(&inner).unwrap();
        fs::write(inner.join("pyproject.toml"), "").unwrap();
        fs::write(inner.join("main.py"), "").unwrap();

        let root = find_project_root(&inner.join("main.py"));
        assert_eq!(root, inner.canonicalize().unwrap());
    }

    #[test]
    fn test_find_project_root_fallback_to_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "").unwrap();

        let root = find_project_root(&dir.path().join("main.py"));
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }
}
