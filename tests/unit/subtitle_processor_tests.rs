/*!
 * Tests for subtitle cleaning
 */

use anyhow::Result;
use subsmerge::subtitle_processor::{clean_subtitle_file, clean_subtitle_text, try_clean_subtitle_file};
use subsmerge::MergeError;
use crate::common;

const TWO_CUES: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";

#[test]
fn test_clean_subtitle_text_withMinimalInput_shouldKeepOnlyCaptions() {
    assert_eq!(clean_subtitle_text(TWO_CUES), "Hello\nWorld");
}

#[test]
fn test_clean_subtitle_text_withCleanedInput_shouldBeIdempotent() {
    let samples = [
        TWO_CUES.to_string(),
        common::srt_content(&["First line", "Second line\nwith a wrap", "Third"]),
        "  3\n00:01:00,000 --> 00:01:02,000 X1:10 X2:20\n  spaced caption  \n\n\n".to_string(),
        "Hello\n5".to_string(),
        "a\r\r\nb".to_string(),
        "\u{feff}\u{feff}hi".to_string(),
        " \u{feff} hi\r".to_string(),
        String::new(),
    ];

    for sample in samples.iter() {
        let once = clean_subtitle_text(sample);
        assert_eq!(clean_subtitle_text(&once), once, "not idempotent for {:?}", sample);
    }
}

#[test]
fn test_clean_subtitle_text_withStylingAfterTimecode_shouldDropWholeLine() {
    let input = "1\n00:00:01,000 --> 00:00:02,000 position:10% align:start\nStyled\n";
    assert_eq!(clean_subtitle_text(input), "Styled");
}

#[test]
fn test_clean_subtitle_text_withCrlfAndBom_shouldNormalize() {
    let input = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nWorld\r\n";
    assert_eq!(clean_subtitle_text(input), "Hello\nWorld");
}

#[test]
fn test_clean_subtitle_text_withCarriageReturnOnlyLineEndings_shouldNormalize() {
    let input = "1\r00:00:01,000 --> 00:00:02,000\rHello\r\r2\r00:00:03,000 --> 00:00:04,000\rWorld\r";
    assert_eq!(clean_subtitle_text(input), "Hello\nWorld");
}

#[test]
fn test_clean_subtitle_text_withMixedLineEndings_shouldBeIdempotent() {
    let once = clean_subtitle_text("a\r\r\nb");
    assert_eq!(once, "a\nb");
    assert_eq!(clean_subtitle_text(&once), once);
}

#[test]
fn test_clean_subtitle_text_withRepeatedByteOrderMarks_shouldStripAllInOnePass() {
    assert_eq!(clean_subtitle_text("\u{feff}\u{feff}hi"), "hi");
    assert_eq!(clean_subtitle_text(" \u{feff}hi"), "hi");
    assert_eq!(clean_subtitle_text("\u{feff}\u{feff}1\n00:00:01,000 --> 00:00:02,000\nhi\n"), "hi");
}

#[test]
fn test_clean_subtitle_text_withTextContainingNumbers_shouldKeepText() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nChapter 2 starts at 10:30\n";
    assert_eq!(clean_subtitle_text(input), "Chapter 2 starts at 10:30");
}

#[test]
fn test_clean_subtitle_text_withOnlyStructure_shouldBeEmpty() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\n\n";
    assert_eq!(clean_subtitle_text(input), "");
}

#[test]
fn test_clean_subtitle_text_withTrailingSequenceWithoutNewline_shouldRemoveIt() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nLast words\n\n2";
    assert_eq!(clean_subtitle_text(input), "Last words");
}

#[test]
fn test_clean_subtitle_file_withValidFile_shouldReturnCleanedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "lesson.srt", &["One", "Two"])?;

    assert_eq!(clean_subtitle_file(&path), "One\nTwo");
    assert_eq!(try_clean_subtitle_file(&path)?, "One\nTwo");

    Ok(())
}

#[test]
fn test_clean_subtitle_file_withMissingFile_shouldReturnEmptyString() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    assert_eq!(clean_subtitle_file(&missing), "");

    match try_clean_subtitle_file(&missing) {
        Err(MergeError::FileReadFailure { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected FileReadFailure, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_clean_subtitle_file_withInvalidUtf8_shouldReturnEmptyString() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.srt");
    std::fs::write(&path, [0x31, 0x0a, 0xff, 0xfe, 0x0a])?;

    assert_eq!(clean_subtitle_file(&path), "");
    assert!(matches!(
        try_clean_subtitle_file(&path),
        Err(MergeError::FileReadFailure { .. })
    ));

    Ok(())
}
