use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use services::QuizOptions;

/// Optional TOML file with defaults for every run.
///
/// ```toml
/// lists_dir = "lists"
/// log_level = "info"
///
/// [quiz]
/// policy = "adaptive"
/// provide_choices = true
/// choice_count = 6
///
/// [quiz.scheduler]
/// retire_after_streak = 3
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrillConfig {
    pub lists_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub quiz: QuizOptions,
}

impl DrillConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, or holds invalid
    /// quiz options.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in config {}", path.display()))
    }

    fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.quiz.validate()?;
        Ok(config)
    }
}
