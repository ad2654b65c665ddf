/*!
 * Integration tests for full controller runs
 */

use std::fs;
use anyhow::Result;
use subsmerge::{Config, Controller, MergeError};
use crate::common;

#[test]
fn test_controller_run_withValidCourse_shouldWriteOutputFile() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let course = common::create_test_dir(temp_dir.path(), "Course")?;
    common::create_test_subtitle(&course, "01 - Intro/01 - Welcome.srt", &["Welcome!", "Let's start."])?;

    let output = temp_dir.path().join("out").join("merged.txt");
    let mut config = Config::for_base_folder(&course);
    config.output_file = output.clone();
    config.show_progress = false;

    let summary = Controller::with_config(config)?.run()?;

    assert_eq!(summary.output_file, output);
    let written = fs::read_to_string(&output)?;
    assert_eq!(written.len(), summary.bytes_written);
    assert_eq!(
        written,
        "--- START Folder: 01 - Intro ---\n\
         --- File: 01 - Welcome.srt ---\n\nWelcome!\nLet's start.\n\n\
         --- STOP Folder: 01 - Intro ---\n\n"
    );
    assert_eq!(summary.stats.subtitles_merged, 1);
    assert_eq!(
        summary.success_line(),
        format!("SUCCESS: Subtitles merged into '{}'", output.display())
    );

    Ok(())
}

#[test]
fn test_controller_run_withMissingRoot_shouldFailWithoutOutput() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("merged.txt");
    let mut config = Config::for_base_folder(temp_dir.path().join("no-such-course"));
    config.output_file = output.clone();
    config.show_progress = false;

    let result = Controller::with_config(config)?.run();

    assert!(matches!(result, Err(MergeError::MissingDirectory { .. })));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn test_controller_run_withEmptyRoot_shouldReportEmptyResult() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let course = common::create_test_dir(temp_dir.path(), "Course")?;
    let output = temp_dir.path().join("merged.txt");
    let mut config = Config::for_base_folder(&course);
    config.output_file = output.clone();
    config.show_progress = false;

    let result = Controller::with_config(config)?.run();

    assert!(matches!(result, Err(MergeError::EmptyResult { .. })));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn test_controller_run_withOnlyFilesAtRoot_shouldReportEmptyResult() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let course = common::create_test_dir(temp_dir.path(), "Course")?;
    common::create_test_subtitle(&course, "loose.srt", &["Loose"])?;
    let mut config = Config::for_base_folder(&course);
    config.output_file = temp_dir.path().join("merged.txt");
    config.show_progress = false;

    let result = Controller::with_config(config)?.run();

    assert!(matches!(result, Err(MergeError::EmptyResult { .. })));

    Ok(())
}

#[test]
fn test_controller_run_withOutputPathIsDirectory_shouldReportWriteFailure() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let course = common::create_test_dir(temp_dir.path(), "Course")?;
    common::create_test_subtitle(&course, "S/a.srt", &["a"])?;
    let blocked = common::create_test_dir(temp_dir.path(), "already-a-dir")?;

    let mut config = Config::for_base_folder(&course);
    config.output_file = blocked.clone();
    config.show_progress = false;

    match Controller::with_config(config)?.run() {
        Err(MergeError::WriteFailure { path, .. }) => assert_eq!(path, blocked),
        other => panic!("expected WriteFailure, got {:?}", other.map(|s| s.output_file)),
    }

    Ok(())
}

#[test]
fn test_controller_with_config_withInvalidConfig_shouldFail() {
    common::init_logging();
    assert!(Controller::with_config(Config::default()).is_err());
}

#[test]
fn test_controller_section_paths_withMixedEntries_shouldListAllInNaturalOrder() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let course = temp_dir.path();
    common::create_test_dir(course, "10 - Ten")?;
    common::create_test_dir(course, "9 - Nine")?;
    common::create_test_file(course, "readme.txt", "hi")?;

    let controller = Controller::with_config(Config::for_base_folder(course))?;
    let sections = controller.section_paths()?;

    assert_eq!(
        sections,
        vec![course.join("9 - Nine"), course.join("10 - Ten"), course.join("readme.txt")]
    );

    Ok(())
}
