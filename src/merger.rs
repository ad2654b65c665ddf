/*!
 * Tree merger: walks each course section and lays its subtitles out as one
 * flat sequence of marked blocks.
 *
 * Every visited folder contributes a START marker, one block per non-empty
 * subtitle file (in natural order), an optional block of documentation links,
 * and a STOP marker. Subfolders are visited after their parent has been
 * closed, so the markers never nest inside each other.
 */

use indicatif::ProgressBar;
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{EntryKind, FileManager};
use crate::natural_sort::list_sorted;
use crate::subtitle_processor::clean_subtitle_file;

/// One unit of the merged output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeBlock {
    /// A folder starts
    FolderOpen { name: String },
    /// A subtitle file and its cleaned text
    File { name: String, text: String },
    /// Companion documents found in the current folder
    Documentation { links: Vec<PathBuf> },
    /// A folder ends
    FolderClose { name: String },
}

impl fmt::Display for MergeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeBlock::FolderOpen { name } => write!(f, "--- START Folder: {} ---", name),
            MergeBlock::File { name, text } => write!(f, "--- File: {} ---\n\n{}\n", name, text),
            MergeBlock::Documentation { links } => {
                writeln!(f, "--- Documentation Links ---")?;
                for link in links {
                    writeln!(f, "{}", link.display())?;
                }
                Ok(())
            }
            MergeBlock::FolderClose { name } => write!(f, "--- STOP Folder: {} ---\n\n", name),
        }
    }
}

/// The complete ordered output of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDocument {
    blocks: Vec<MergeBlock>,
}

impl MergedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: MergeBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[MergeBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every STOP closes the most recent unclosed START of the same name,
    /// and nothing is left open at the end
    pub fn is_balanced(&self) -> bool {
        let mut open: Vec<&str> = Vec::new();
        for block in &self.blocks {
            match block {
                MergeBlock::FolderOpen { name } => open.push(name),
                MergeBlock::FolderClose { name } => {
                    if open.pop() != Some(name.as_str()) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        open.is_empty()
    }

    /// Blocks joined by a single newline
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for MergedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Counters collected while merging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub sections: usize,
    pub folders: usize,
    pub subtitles_merged: usize,
    /// Subtitle files that were unreadable or cleaned to nothing
    pub subtitles_skipped: usize,
    pub documentation_links: usize,
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} section(s), {} folder(s), {} subtitle file(s) merged, {} skipped, {} documentation link(s)",
            self.sections, self.folders, self.subtitles_merged, self.subtitles_skipped, self.documentation_links
        )
    }
}

/// Settings the merger needs out of the configuration
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub subtitle_extension: String,
    pub documentation_extension: String,
    pub include_documentation: bool,
    /// Visit subfolders in natural order instead of filesystem order
    pub sort_subdirectories: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for MergeOptions {
    fn from(config: &Config) -> Self {
        Self {
            subtitle_extension: config.subtitle_extension.clone(),
            documentation_extension: config.documentation_extension.clone(),
            include_documentation: config.include_documentation,
            sort_subdirectories: config.sort_subdirectories,
        }
    }
}

// @struct: Section walker producing merge blocks
pub struct TreeMerger {
    options: MergeOptions,
    progress: ProgressBar,
}

impl TreeMerger {
    // @creates: Merger without progress output
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report one tick per finished section on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Merge the given sections, in the order given
    pub fn merge(&self, sections: &[PathBuf]) -> (MergedDocument, MergeStats) {
        let mut document = MergedDocument::new();
        let mut stats = MergeStats::default();

        self.progress.set_length(sections.len() as u64);
        for section in sections {
            self.progress.set_message(FileManager::display_name(section));
            self.merge_section(section, &mut document, &mut stats);
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        debug_assert!(document.is_balanced());
        (document, stats)
    }

    // @processes: One section and everything below it
    fn merge_section(&self, section: &Path, document: &mut MergedDocument, stats: &mut MergeStats) {
        if !section.is_dir() {
            debug!("Skipping non-directory entry at course root: {:?}", section);
            return;
        }

        stats.sections += 1;
        for folder in FileManager::walk_dirs(section, self.options.sort_subdirectories) {
            self.merge_folder(&folder, document, stats);
        }
    }

    // @processes: Files directly inside one folder
    fn merge_folder(&self, folder: &Path, document: &mut MergedDocument, stats: &mut MergeStats) {
        let name = FileManager::display_name(folder);
        stats.folders += 1;
        document.push(MergeBlock::FolderOpen { name: name.clone() });

        let mut links = Vec::new();
        for entry in list_sorted(folder) {
            let kind = EntryKind::classify(
                &entry,
                &self.options.subtitle_extension,
                &self.options.documentation_extension,
            );
            match kind {
                EntryKind::Subtitle => {
                    let text = clean_subtitle_file(folder.join(&entry));
                    if text.is_empty() {
                        debug!("No text left in {:?} after cleaning, skipped", folder.join(&entry));
                        stats.subtitles_skipped += 1;
                    } else {
                        stats.subtitles_merged += 1;
                        document.push(MergeBlock::File { name: entry, text });
                    }
                }
                EntryKind::Documentation if self.options.include_documentation => {
                    links.push(folder.join(&entry));
                }
                EntryKind::Documentation | EntryKind::Other => {}
            }
        }

        if !links.is_empty() {
            stats.documentation_links += links.len();
            document.push(MergeBlock::Documentation { links });
        }

        document.push(MergeBlock::FolderClose { name });
    }
}
