//! CLI argument parsing

use crate::config::Lang;
use clap::Parser;
use std::path::PathBuf;

/// Map Python import dependencies into a Markdown report
#[derive(Parser, Debug)]
#[command(name = "depmap")]
#[command(about = "Map Python import dependencies into navigable Markdown reports")]
#[command(version)]
pub struct Args {
    /// Entry Python file to start mapping from
    #[arg(default_value = "main.py")]
    pub entry: PathBuf,

    /// Output Markdown file (default: dependencies.md, or dependencies_ext.md with --extended)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum traversal depth (default: unbounded)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Add risk levels, architectural roles, and summary statistics
    #[arg(long)]
    pub extended: bool,

    /// Language for status messages
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,

    /// Project root (default: nearest ancestor with .git or pyproject.toml)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Config file path (default: depmap.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
