/*!
 * # subsmerge - merge course subtitles into one readable text
 *
 * A course is a folder of sections, each section a tree of folders holding
 * `.srt` subtitle files (and often `.html` notes). This library walks that
 * tree, strips the timing noise out of every subtitle, and writes one text
 * file that keeps the course structure visible through START/STOP markers.
 *
 * ## Architecture
 *
 * - `natural_sort`: human ordering of names ("2. Topic" before "10. Topic")
 * - `subtitle_processor`: SRT to plain text cleaning
 * - `merger`: folder walk and merge blocks
 * - `app_controller`: the pipeline from course root to output file
 * - `app_config`: configuration loading and validation
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod merger;
pub mod natural_sort;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, MergeError};
pub use merger::{MergeBlock, MergeStats, MergedDocument, TreeMerger};
pub use natural_sort::{natural_cmp, sort_names, SortKey};
pub use subtitle_processor::{clean_subtitle_file, clean_subtitle_text};
