//! Track selection integration tests.
//!
//! These tests exercise classification, ranking, and the composed
//! `select` decision on hand-built descriptor lists. No media files or
//! FFmpeg binaries are needed.

use subselect::{
    Heuristics, Rejection, SelectionOptions, SubtitleStreamDescriptor, TargetLanguage, classify,
    rank, select,
};

fn japanese_text(index: usize) -> SubtitleStreamDescriptor {
    SubtitleStreamDescriptor::new(index, "subrip").with_language("jpn")
}

#[test]
fn full_track_beats_signs_and_songs() {
    let streams = vec![
        japanese_text(2)
            .with_title("Full Subtitles")
            .with_default(true),
        japanese_text(3)
            .with_title("Signs & Songs")
            .with_forced(true),
    ];

    let selection = select(&streams, &SelectionOptions::new());
    assert_eq!(selection.index(), Some(2));
    assert_eq!(selection.reason(), "Selected Japanese full text subtitles");
    assert_eq!(selection.rejection(), None);
}

#[test]
fn image_only_japanese_is_reported() {
    let streams = vec![SubtitleStreamDescriptor::new(5, "hdmv_pgs_subtitle").with_language("jpn")];

    let selection = select(&streams, &SelectionOptions::new());
    assert_eq!(selection.index(), None);
    assert_eq!(selection.rejection(), Some(Rejection::ImageOnly));
    assert_eq!(
        selection.reason(),
        "Japanese subtitles are image-based only (OCR required, not supported)"
    );
}

#[test]
fn english_only_is_no_language_match() {
    let streams = vec![SubtitleStreamDescriptor::new(1, "ass").with_language("eng")];

    let selection = select(&streams, &SelectionOptions::new());
    assert_eq!(selection.rejection(), Some(Rejection::NoLanguageMatch));
    assert_eq!(selection.reason(), "No Japanese subtitle streams found");
}

#[test]
fn empty_list_is_no_streams() {
    let selection = select(&[], &SelectionOptions::new());
    assert_eq!(selection.rejection(), Some(Rejection::NoStreams));
    assert_eq!(selection.reason(), "No subtitle streams found");
}

#[test]
fn unmatched_languages_never_depend_on_codec() {
    for codec in ["subrip", "ass", "hdmv_pgs_subtitle", "dvd_subtitle", "", "eia_608"] {
        let streams = vec![
            SubtitleStreamDescriptor::new(0, codec).with_language("eng"),
            SubtitleStreamDescriptor::new(1, codec),
        ];
        let classification = classify(&streams, &TargetLanguage::japanese());
        assert_eq!(
            classification.rejection(),
            Some(Rejection::NoLanguageMatch),
            "codec {codec:?}"
        );
    }
}

#[test]
fn text_track_wins_over_image_tracks() {
    let streams = vec![
        SubtitleStreamDescriptor::new(2, "hdmv_pgs_subtitle").with_language("jpn"),
        SubtitleStreamDescriptor::new(3, "dvd_subtitle").with_language("jpn"),
        SubtitleStreamDescriptor::new(4, "ass").with_language("JA"),
    ];
    assert_eq!(select(&streams, &SelectionOptions::new()).index(), Some(4));
}

#[test]
fn all_forced_candidates_still_yield_a_winner() {
    let streams = vec![
        japanese_text(6).with_title("Forced").with_forced(true),
        japanese_text(7).with_title("Signs").with_forced(true),
    ];
    let selection = select(&streams, &SelectionOptions::new());
    assert!(selection.index().is_some());
}

#[test]
fn full_title_outranks_forced_title() {
    // Both are forced so the pool keeps both; only the title differs.
    let heuristics = Heuristics::default();
    let full = japanese_text(9).with_title("Full").with_forced(true);
    let forced = japanese_text(1).with_title("Forced").with_forced(true);

    let winner = rank(&[&forced, &full], &heuristics).unwrap();
    assert_eq!(winner.descriptor.index, 9);
}

#[test]
fn lower_index_wins_a_tie() {
    let streams = vec![japanese_text(8), japanese_text(4), japanese_text(6)];
    assert_eq!(select(&streams, &SelectionOptions::new()).index(), Some(4));
}

#[test]
fn default_disposition_beats_container_order() {
    let streams = vec![japanese_text(2), japanese_text(3).with_default(true)];
    assert_eq!(select(&streams, &SelectionOptions::new()).index(), Some(3));
}

#[test]
fn selection_is_deterministic() {
    let streams = vec![
        japanese_text(3).with_title("SDH"),
        japanese_text(2).with_title("Dialogue"),
        japanese_text(4).with_title("Full").with_default(true),
        japanese_text(5).with_title("Songs/Signs"),
    ];
    let options = SelectionOptions::new();
    let first = select(&streams, &options);
    for _ in 0..10 {
        assert_eq!(select(&streams, &options), first);
    }
    assert_eq!(first.index(), Some(4));
}

#[test]
fn custom_heuristics_change_the_winner() {
    let heuristics = Heuristics::from_json(
        r#"{ "hearing_impaired_bonus": -20, "full_markers": ["complete"] }"#,
    )
    .unwrap();
    let streams = vec![
        japanese_text(2).with_title("SDH"),
        japanese_text(3).with_title("Complete"),
    ];

    let default_pick = select(&streams, &SelectionOptions::new());
    let tuned_pick = select(&streams, &SelectionOptions::new().with_heuristics(heuristics));
    assert_eq!(default_pick.index(), Some(2));
    assert_eq!(tuned_pick.index(), Some(3));
}

#[test]
fn other_target_language() {
    let korean = TargetLanguage {
        name: "Korean".to_string(),
        aliases: vec!["kor".to_string(), "ko".to_string()],
        metadata_code: "kor".to_string(),
        sidecar_tags: vec!["ko".to_string(), "kor".to_string()],
        file_tag: "ko".to_string(),
    };
    let streams = vec![
        japanese_text(2),
        SubtitleStreamDescriptor::new(3, "webvtt").with_language("kor"),
    ];

    let selection = select(&streams, &SelectionOptions::new().with_language(korean.clone()));
    assert_eq!(selection.index(), Some(3));
    assert_eq!(selection.reason(), "Selected Korean full text subtitles");

    let none = select(&streams[..1], &SelectionOptions::new().with_language(korean));
    assert_eq!(none.reason(), "No Korean subtitle streams found");
}
