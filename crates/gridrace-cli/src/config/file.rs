use crate::error::{CliError, Result};
use gridrace::engine::config::SearchStrategy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileStrategy {
    Sequential,
    Race,
}

impl FileStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sequential" => Some(Self::Sequential),
            "race" => Some(Self::Race),
            _ => None,
        }
    }
}

impl From<FileStrategy> for SearchStrategy {
    fn from(s: FileStrategy) -> Self {
        match s {
            FileStrategy::Sequential => SearchStrategy::Sequential,
            FileStrategy::Race => SearchStrategy::BranchRace,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDispatchConfig {
    pub workers: Option<usize>,
    pub result_timeout_secs: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRacerConfig {
    pub threads: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLimitsConfig {
    pub time_limit_secs: Option<f64>,
    pub min_clues: Option<usize>,
    pub reject_conflicting_clues: Option<bool>,
}

/// The optional TOML configuration file. Every key may be omitted.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub strategy: Option<FileStrategy>,
    pub dispatch: Option<FileDispatchConfig>,
    pub racer: Option<FileRacerConfig>,
    pub limits: Option<FileLimitsConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_parses_with_kebab_case_keys() {
        let config = FileConfig::from_toml_str(
            r#"
            strategy = "race"

            [dispatch]
            workers = 4
            result-timeout-secs = 60.0

            [racer]
            threads = 2

            [limits]
            time-limit-secs = 5.0
            min-clues = 17
            reject-conflicting-clues = false
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, Some(FileStrategy::Race));
        let dispatch = config.dispatch.unwrap();
        assert_eq!(dispatch.workers, Some(4));
        assert_eq!(dispatch.result_timeout_secs, Some(60.0));
        assert_eq!(config.racer.unwrap().threads, Some(2));
        let limits = config.limits.unwrap();
        assert_eq!(limits.time_limit_secs, Some(5.0));
        assert_eq!(limits.min_clues, Some(17));
        assert_eq!(limits.reject_conflicting_clues, Some(false));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("[dispatch]\nprocesses = 4\n").is_err());
        assert!(FileConfig::from_toml_str("strategy = \"parallel\"\n").is_err());
    }

    #[test]
    fn from_file_reports_the_path_on_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[racer]\nthreads = \"many\"\n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
