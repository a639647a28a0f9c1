use anyhow::{Context, Result};
use std::path::Path;

/// Pulls plain text out of a document on disk.
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String>;
}

pub struct FileReader;

impl FileReader {
    pub fn read_file(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "txt" | "md" => {
                let content = std::fs::read_to_string(path)
                    .context(format!("Failed to read file: {:?}", path))?;
                Ok(content)
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    pub fn is_supported(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("txt") | Some("md")
        )
    }
}

impl TextExtractor for FileReader {
    fn extract_text(&self, path: &Path) -> Result<String> {
        Self::read_file(path)
    }
}
