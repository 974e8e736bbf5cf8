use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
}

/// Traversal settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum traversal depth; absent means the worklist runs to exhaustion
    pub max_depth: Option<usize>,
    /// Project root override; absent means autodetect from the entry file
    pub root: Option<PathBuf>,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file; absent means dependencies.md (dependencies_ext.md in extended mode)
    pub path: Option<PathBuf>,
}

/// Report settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub extended: bool,
    pub lang: Lang,
}

/// Report prose language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Cs,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        max_depth: Option<usize>,
        extended: bool,
        lang: Option<Lang>,
        root: Option<PathBuf>,
    ) {
        if output.is_some() {
            self.output.path = output;
        }

        if max_depth.is_some() {
            self.analysis.max_depth = max_depth;
        }

        if extended {
            self.report.extended = true;
        }

        if let Some(l) = lang {
            self.report.lang = l;
        }

        if root.is_some() {
            self.analysis.root = root;
        }
    }

    /// Resolve the output path, falling back to the mode-specific default
    pub fn output_path(&self) -> PathBuf {
        match &self.output.path {
            Some(p) => p.clone(),
            None if self.report.extended => PathBuf::from("dependencies_ext.md"),
            None => PathBuf::from("dependencies.md"),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.analysis.max_depth == Some(0) {
            return Err(Error::config_validation("max_depth must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.max_depth, None);
        assert!(!config.report.extended);
        assert_eq!(config.report.lang, Lang::En);
        assert_eq!(config.output_path(), PathBuf::from("dependencies.md"));
    }

    #[test]
    fn test_extended_default_output() {
        let mut config = Config::default();
        config.report.extended = true;
        assert_eq!(config.output_path(), PathBuf::from("dependencies_ext.md"));
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[analysis]
max_depth = 3

[output]
path = "deps.md"

[report]
extended = true
lang = "cs"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.analysis.max_depth, Some(3));
        assert_eq!(config.output.path, Some(PathBuf::from("deps.md")));
        assert!(config.report.extended);
        assert_eq!(config.report.lang, Lang::Cs);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/depmap.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/depmap.toml"));
        assert_eq!(config.analysis.max_depth, None);
    }

    #[test]
    fn test_validation_max_depth_zero() {
        let mut config = Config::default();
        config.analysis.max_depth = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli_output() {
        let mut config = Config::default();
        config.merge_cli(Some(PathBuf::from("custom.md")), None, false, None, None);
        assert_eq!(config.output_path(), PathBuf::from("custom.md"));
    }

    #[test]
    fn test_merge_cli_depth() {
        let mut config = Config::default();
        config.merge_cli(None, Some(2), false, None, None);
        assert_eq!(config.analysis.max_depth, Some(2));
    }

    #[test]
    fn test_merge_cli_keeps_file_values() {
        let mut config = Config::default();
        config.analysis.max_depth = Some(7);
        config.report.extended = true;
        config.merge_cli(None, None, false, None, None);
        assert_eq!(config.analysis.max_depth, Some(7));
        assert!(config.report.extended);
    }

    #[test]
    fn test_merge_cli_lang() {
        let mut config = Config::default();
        config.merge_cli(None, None, false, Some(Lang::Cs), None);
        assert_eq!(config.report.lang, Lang::Cs);
    }

    #[test]
    fn test_lang_parsing() {
        let toml_str = r#"lang = "cs""#;
        let report: ReportConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(report.lang, Lang::Cs);
    }
}
