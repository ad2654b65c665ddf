use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Course root; its immediate subfolders are the sections
    #[serde(default)]
    pub base_folder: PathBuf,

    /// Where the merged text is written
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Suffix of subtitle files (case-sensitive)
    #[serde(default = "default_subtitle_extension")]
    pub subtitle_extension: String,

    /// Suffix of companion documentation files (case-sensitive)
    #[serde(default = "default_documentation_extension")]
    pub documentation_extension: String,

    /// List documentation files at the end of each folder
    #[serde(default = "default_true")]
    pub include_documentation: bool,

    /// Visit subfolders in natural order rather than filesystem order
    #[serde(default = "default_true")]
    pub sort_subdirectories: bool,

    /// Draw a progress bar on stderr
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_output_file() -> PathBuf {
    PathBuf::from("MERGED_SUBTITLES.txt")
}

fn default_subtitle_extension() -> String {
    ".srt".to_string()
}

fn default_documentation_extension() -> String {
    ".html".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Configuration for a course root with every other setting at its default
    pub fn for_base_folder<P: Into<PathBuf>>(base_folder: P) -> Self {
        Config {
            base_folder: base_folder.into(),
            ..Config::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.base_folder.as_os_str().is_empty() {
            return Err(anyhow!("Base folder is not set"));
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(anyhow!("Output file is not set"));
        }

        for (label, ext) in [
            ("Subtitle", &self.subtitle_extension),
            ("Documentation", &self.documentation_extension),
        ] {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(anyhow!("{} extension must look like '.ext', got '{}'", label, ext));
            }
        }

        if self.subtitle_extension == self.documentation_extension {
            return Err(anyhow!(
                "Subtitle and documentation extensions must differ, both are '{}'",
                self.subtitle_extension
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            base_folder: PathBuf::new(),
            output_file: default_output_file(),
            subtitle_extension: default_subtitle_extension(),
            documentation_extension: default_documentation_extension(),
            include_documentation: true,
            sort_subdirectories: true,
            show_progress: true,
            log_level: LogLevel::default(),
        }
    }
}
