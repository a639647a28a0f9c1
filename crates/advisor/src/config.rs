use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use index::VectorizerConfig;
use ingest::ChunkerConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Write the bundled sample documents into `data_dir` before ingesting.
    pub write_sample_corpus: bool,
    pub top_k: usize,
    pub log_level: LogLevel,
    pub chunker: ChunkerConfig,
    pub vectorizer: VectorizerConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            write_sample_corpus: true,
            top_k: 3,
            log_level: LogLevel::Info,
            chunker: ChunkerConfig::default(),
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config: {:?}", path))?;
        let config = serde_json::from_str(&content)
            .context(format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }

    /// Defaults when the file is absent; a broken file is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "falling back to default configuration");
                Self::default()
            }
        }
    }
}
