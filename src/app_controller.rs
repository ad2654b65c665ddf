use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::MergeError;
use crate::file_utils::FileManager;
use crate::merger::{MergeOptions, MergeStats, MergedDocument, TreeMerger};
use crate::natural_sort::list_sorted;

// @module: Application controller for the merge pipeline

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Where the document was written
    pub output_file: PathBuf,
    /// Size of the written document in bytes
    pub bytes_written: usize,
    pub stats: MergeStats,
    pub elapsed: Duration,
}

impl RunSummary {
    /// The line reported to the operator after a successful run
    pub fn success_line(&self) -> String {
        format!("SUCCESS: Subtitles merged into '{}'", self.output_file.display())
    }
}

/// Main application controller: sorts the course root, merges every section
/// and writes the result
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full paths of the course sections, in natural order
    pub fn section_paths(&self) -> Result<Vec<PathBuf>, MergeError> {
        let base = &self.config.base_folder;
        if !FileManager::dir_exists(base) {
            return Err(MergeError::MissingDirectory { path: base.clone() });
        }

        let sections: Vec<PathBuf> = list_sorted(base)
            .into_iter()
            .map(|name| base.join(name))
            .collect();

        if sections.is_empty() {
            return Err(MergeError::EmptyResult { base_folder: base.clone() });
        }

        debug!("Found {} entries in course root {:?}", sections.len(), base);
        Ok(sections)
    }

    /// Build the merged document without writing it anywhere
    pub fn build_document(&self) -> Result<(MergedDocument, MergeStats), MergeError> {
        let sections = self.section_paths()?;

        let merger = TreeMerger::new(MergeOptions::from(&self.config))
            .with_progress(self.section_progress_bar(sections.len()));
        let (document, stats) = merger.merge(&sections);

        if document.is_empty() {
            return Err(MergeError::EmptyResult {
                base_folder: self.config.base_folder.clone(),
            });
        }

        Ok((document, stats))
    }

    /// Run the whole pipeline and write the output file
    pub fn run(&self) -> Result<RunSummary, MergeError> {
        let start_time = Instant::now();
        let (document, stats) = self.build_document()?;

        let content = document.render();
        if content.is_empty() {
            return Err(MergeError::EmptyResult {
                base_folder: self.config.base_folder.clone(),
            });
        }

        let output_file = self.config.output_file.clone();
        Self::write_output(&output_file, &content)?;

        let elapsed = start_time.elapsed();
        info!("Merged {} in {}", stats, Self::format_duration(elapsed));

        Ok(RunSummary {
            output_file,
            bytes_written: content.len(),
            stats,
            elapsed,
        })
    }

    fn write_output(path: &Path, content: &str) -> Result<(), MergeError> {
        FileManager::write_to_file(path, content).map_err(|e| MergeError::WriteFailure {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn section_progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sections ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
