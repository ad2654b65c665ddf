use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::errors::MergeError;
use crate::file_utils::FileManager;

// @module: Subtitle to plain text cleaning

// @const: CRLF or lone CR line break
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n?").unwrap()
});

// @const: SRT timing line, with any trailing styling, through its newline
static TIMECODE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}[ \t]*-->[ \t]*[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}[^\n]*(?:\n|\z)").unwrap()
});

// @const: Cue sequence number alone on its line
static SEQUENCE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[0-9]+[ \t]*(?:\n|\z)").unwrap()
});

// @const: Two or more newlines in a row
static NEWLINE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n{2,}").unwrap()
});

/// Turn the text of one SRT file into plain prose.
///
/// Timing lines and cue numbers are dropped, blank lines collapse into single
/// line breaks and the result is trimmed. CRLF and lone CR line endings are
/// read as LF. Caption lines are kept verbatim.
/// Cleaning already clean text changes nothing.
pub fn clean_subtitle_text(content: &str) -> String {
    let content = content.trim_start_matches('\u{feff}');
    let content = LINE_BREAK_REGEX.replace_all(content, "\n");

    // Both line filters must run before the collapse: they leave empty lines behind
    let content = TIMECODE_LINE_REGEX.replace_all(&content, "");
    let content = SEQUENCE_LINE_REGEX.replace_all(&content, "");
    let content = NEWLINE_RUN_REGEX.replace_all(&content, "\n");

    content
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// Read and clean a subtitle file
pub fn try_clean_subtitle_file<P: AsRef<Path>>(path: P) -> Result<String, MergeError> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path).map_err(|e| MergeError::FileReadFailure {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(clean_subtitle_text(&content))
}

/// Read and clean a subtitle file; an unreadable file is logged and yields `""`
pub fn clean_subtitle_file<P: AsRef<Path>>(path: P) -> String {
    match try_clean_subtitle_file(path) {
        Ok(text) => text,
        Err(e) => {
            error!("{}", e);
            String::new()
        }
    }
}
