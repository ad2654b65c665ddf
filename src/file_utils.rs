use log::warn;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::natural_sort::natural_cmp;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a whole file as UTF-8 text
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Write a string to a file, creating the parent directory when missing
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content)
    }

    /// Every directory under `root`, `root` included, depth-first and parents
    /// before children.
    ///
    /// With `natural_order` siblings are visited in natural order; otherwise
    /// the order is whatever the filesystem hands back. Entries that cannot be
    /// read are logged and their subtree is skipped.
    pub fn walk_dirs<P: AsRef<Path>>(root: P, natural_order: bool) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(root.as_ref());
        if natural_order {
            walker = walker.sort_by(|a, b| compare_file_names(a.file_name(), b.file_name()));
        }

        let mut dirs = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {:?}: {}", root.as_ref(), e),
            }
        }
        dirs
    }

    /// Last path segment of `path` as text, or the whole path when it has none
    pub fn display_name<P: AsRef<Path>>(path: P) -> String {
        let path = path.as_ref();
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }
}

fn compare_file_names(a: &OsStr, b: &OsStr) -> Ordering {
    natural_cmp(&a.to_string_lossy(), &b.to_string_lossy())
}

/// What a directory entry is, judged by its name alone
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EntryKind {
    /// Subtitle file to clean and merge
    Subtitle,
    /// Companion document to link
    Documentation,
    /// Anything else; ignored
    Other,
}

impl EntryKind {
    /// Classify by suffix. The comparison is case-sensitive.
    pub fn classify(name: &str, subtitle_extension: &str, documentation_extension: &str) -> Self {
        if name.ends_with(subtitle_extension) {
            EntryKind::Subtitle
        } else if name.ends_with(documentation_extension) {
            EntryKind::Documentation
        } else {
            EntryKind::Other
        }
    }
}
