//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for various
//! failure conditions.

use std::path::Path;

use subselect::{
    Heuristics, MediaFile, MediaProbe, ProcessOptions, SubselectError, process_file,
};

const SAMPLE_WITH_SUBS: &str = "tests/fixtures/sample_with_subtitles.mkv";

#[test]
fn open_nonexistent_file() {
    let result = MediaFile::open("this_file_does_not_exist.mkv");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open media file"),
        "Error message should mention file open failure: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    // Create a temporary file with garbage content.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mkv");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = MediaFile::open(&invalid_file_path);
    assert!(matches!(result, Err(SubselectError::FileOpen { .. })));
}

#[test]
fn probe_many_reports_each_file() {
    let results = MediaProbe::probe_many(&["missing-one.mkv", "missing-two.mkv"]);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Result::is_err));
}

#[test]
fn process_missing_file_fails_to_open() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = temporary_directory.path().join("missing.mkv");

    let result = process_file(&input, &ProcessOptions::new().with_clean_only(true));
    assert!(matches!(result, Err(SubselectError::FileOpen { .. })));
}

#[test]
fn existing_clean_output_is_refused() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = temporary_directory.path().join("episode.mkv");
    let cleaned = temporary_directory.path().join("episode-ja.clean.srt");
    std::fs::write(&cleaned, "").expect("Failed to write existing output");

    let result = process_file(&input, &ProcessOptions::new().with_clean_only(true));
    let error = result.unwrap_err();
    assert!(matches!(error, SubselectError::OutputExists(ref path) if *path == cleaned));
    assert!(error.to_string().contains("--overwrite"));
}

#[test]
fn invalid_heuristics_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("heuristics.json");
    std::fs::write(&path, r#"{ "full_bonus": "lots" }"#).expect("Failed to write config");

    let error = Heuristics::from_json_file(&path).unwrap_err();
    assert!(matches!(error, SubselectError::Config { .. }));
    assert!(error.to_string().contains("heuristics.json"));
}

#[test]
fn unknown_stream_index() {
    if !Path::new(SAMPLE_WITH_SUBS).exists() {
        return;
    }

    let mut media = MediaFile::open(SAMPLE_WITH_SUBS).expect("Failed to open test file");
    let result = media.subtitle_stream(999);
    assert!(matches!(result, Err(SubselectError::NoSubtitleStream(999))));
}

#[test]
fn embedding_with_missing_ffmpeg_binary() {
    if !Path::new(SAMPLE_WITH_SUBS).exists() {
        return;
    }

    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = temporary_directory.path().join("sample.mkv");
    std::fs::copy(SAMPLE_WITH_SUBS, &input).expect("Failed to copy fixture");

    let options = ProcessOptions::new()
        .with_ffmpeg_program("definitely-not-an-ffmpeg-binary")
        .with_show_stats(false);
    let result = process_file(&input, &options);
    assert!(matches!(result, Err(SubselectError::Tool { .. })));

    // The cleaned subtitles were still written before embedding failed.
    assert!(temporary_directory.path().join("sample-ja.clean.srt").exists());
}
