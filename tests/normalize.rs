//! Subtitle text cleanup integration tests.

use subselect::{normalize_bytes, normalize_file, normalize_text};

const DIRTY_SRT: &str = "1\n00:00:01,000 --> 00:00:03,000\n&lrm;{\\an8}こんにちは\n\n\
                         2\n00:00:04,000 --> 00:00:06,000\n\u{200E}さようなら&lrm;\n\n";

const CLEAN_SRT: &str = "1\n00:00:01,000 --> 00:00:03,000\nこんにちは\n\n\
                         2\n00:00:04,000 --> 00:00:06,000\nさようなら\n\n";

#[test]
fn strips_marks_and_alignment() {
    assert_eq!(normalize_text("&lrm;{\\an8}Hello"), "Hello");
}

#[test]
fn leaves_other_override_tags_alone() {
    assert_eq!(normalize_text("{\\an0}{\\an10}{\\i1}x"), "{\\an0}{\\an10}{\\i1}x");
}

#[test]
fn cleaning_is_idempotent() {
    let inputs = [
        DIRTY_SRT,
        "&lr&lrm;m;",
        "{\\a{\\an2}n5}text",
        "&\u{200E}lrm;",
        "plain text",
        "",
    ];
    for input in inputs {
        let once = normalize_text(input);
        assert_eq!(normalize_text(&once), once, "input {input:?}");
    }
}

#[test]
fn removal_that_forms_a_new_match_is_cleaned_too() {
    assert_eq!(normalize_text("&lr&lrm;m;x"), "x");
    assert_eq!(normalize_text("{\\a{\\an2}n5}x"), "x");
}

#[test]
fn non_utf8_bytes_survive() {
    // Shift-JIS "こんにちは" followed by a stray entity.
    let shift_jis: &[u8] = &[0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD];
    let mut input = shift_jis.to_vec();
    input.extend_from_slice(b"&lrm;");
    assert_eq!(normalize_bytes(&input), shift_jis);
}

#[test]
fn cleans_file_in_place() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory.path().join("episode-ja.tmp.srt");
    std::fs::write(&path, DIRTY_SRT).expect("Failed to write subtitle file");

    assert!(normalize_file(&path).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), CLEAN_SRT);

    // Second pass finds nothing to do.
    assert!(!normalize_file(&path).unwrap());
}

#[test]
fn missing_file_is_an_io_error() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let result = normalize_file(temporary_directory.path().join("missing.srt"));
    assert!(matches!(result, Err(subselect::SubselectError::IoError(_))));
}
