use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

use crate::errors::MergeError;

// @module: Human ("natural") ordering of directory entry names

// @const: Runs of ASCII digits
static DIGIT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// One piece of a split name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameToken {
    /// A run of digits, compared by value
    Number(u128),
    /// Lowercased text between digit runs
    Text(String),
}

/// Comparison key derived from a name.
///
/// The key always alternates text and number tokens, starting and ending with
/// text (possibly empty), so two keys are compared position by position with
/// like kinds facing each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<NameToken>);

impl SortKey {
    // @creates: Key for a single name
    pub fn from_name(name: &str) -> Self {
        let mut tokens = Vec::new();
        let mut last = 0;

        for run in DIGIT_RUN_REGEX.find_iter(name) {
            tokens.push(NameToken::Text(name[last..run.start()].to_lowercase()));
            // Runs longer than u128 stay textual
            tokens.push(match run.as_str().parse::<u128>() {
                Ok(value) => NameToken::Number(value),
                Err(_) => NameToken::Text(run.as_str().to_string()),
            });
            last = run.end();
        }
        tokens.push(NameToken::Text(name[last..].to_lowercase()));

        SortKey(tokens)
    }

    /// Tokens of the key, in order
    pub fn tokens(&self) -> &[NameToken] {
        &self.0
    }
}

/// Compare two names in natural order.
///
/// Names with equal keys ("Intro" and "intro", "01" and "1") fall back to a
/// plain string comparison so the result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    SortKey::from_name(a)
        .cmp(&SortKey::from_name(b))
        .then_with(|| a.cmp(b))
}

/// Sort a batch of names in place
pub fn sort_names<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| (SortKey::from_name(name.as_ref()), name.as_ref().to_string()));
}

/// List the immediate entries of `dir`, files and folders alike, in natural order
pub fn try_list_sorted<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, MergeError> {
    let dir = dir.as_ref();

    let read_dir = fs::read_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MergeError::MissingDirectory { path: dir.to_path_buf() },
        _ => MergeError::ListingFailure { path: dir.to_path_buf(), source: e },
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| MergeError::ListingFailure {
            path: dir.to_path_buf(),
            source: e,
        })?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    sort_names(&mut names);
    Ok(names)
}

/// Like [`try_list_sorted`], but a failure is logged and yields no entries
pub fn list_sorted<P: AsRef<Path>>(dir: P) -> Vec<String> {
    match try_list_sorted(dir) {
        Ok(names) => names,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}
