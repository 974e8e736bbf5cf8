//! Depmap - Map Python import dependencies into navigable Markdown reports
//!
//! Walks the import graph of a Python project from an entry file and
//! renders it as an interactive Markdown document with bidirectional
//! links and progress-tracking checkboxes.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;

// Re-export main types
pub use analysis::{DependencyGraph, GraphBuilder, Mode};
pub use config::Config;
pub use error::{Error, Result};
pub use report::{RenderOptions, ReportRenderer};
