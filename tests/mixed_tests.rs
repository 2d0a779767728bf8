mod common;

use cipherforge::alphabet::Language;
use cipherforge::api::{analyze, AnalysisKind, AnalyzeOptions};
use cipherforge::config::{RoutingParams, SegmenterParams};
use cipherforge::mixed::{detect_mixed, distinct_keys, join_segments, Segmenter};
use common::*;
use std::collections::HashSet;

fn mixed_cipher() -> String {
    format!(
        "{} {}",
        encrypt(RU_PASSAGE_A, 5, Language::Russian),
        encrypt(RU_PASSAGE_B, 12, Language::Russian)
    )
}

#[test]
fn test_two_keys_recovered() {
    let scorer = passage_scorer();
    let text = mixed_cipher();
    let segments = detect_mixed(&scorer, &text, Language::Russian);

    assert!(segments.len() >= 2);
    let keys: HashSet<usize> = segments.iter().map(|s| s.key()).collect();
    assert!(keys.contains(&5), "keys: {:?}", keys);
    assert!(keys.contains(&12), "keys: {:?}", keys);
}

#[test]
fn test_segments_partition_text() {
    let scorer = passage_scorer();
    let text = mixed_cipher();
    let segments = detect_mixed(&scorer, &text, Language::Russian);

    let mut expected_start = 0;
    for seg in &segments {
        assert_eq!(seg.start, expected_start);
        assert!(seg.end > seg.start);
        assert_eq!(seg.language, Language::Russian);
        expected_start = seg.end;
    }
    assert_eq!(expected_start, text.chars().count());
    assert_eq!(join_segments(&segments).chars().count(), text.chars().count());
}

#[test]
fn test_merged_segments_respect_minimum() {
    let scorer = passage_scorer();
    let text = mixed_cipher();
    let segments = detect_mixed(&scorer, &text, Language::Russian);

    // Only the first segment may be shorter than the merge threshold
    for seg in segments.iter().skip(1) {
        assert!(seg.len() >= 15, "segment {}..{}", seg.start, seg.end);
    }
}

#[test]
fn test_short_text_single_segment() {
    let scorer = scorer_with(&["привет", "мир"], &[]);
    let text = encrypt("Привет, мир!", 4, Language::Russian);
    let segments = detect_mixed(&scorer, &text, Language::Russian);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].start, 0);
    assert_eq!(segments[0].end, text.chars().count());
    assert_eq!(segments[0].key(), 4);
    assert_eq!(segments[0].best.text, "Привет, мир!");
}

#[test]
fn test_empty_text_single_segment() {
    let scorer = scorer_with(&[], &[]);
    let segments = detect_mixed(&scorer, "", Language::English);
    assert_eq!(segments.len(), 1);
    assert_eq!((segments[0].start, segments[0].end), (0, 0));
}

#[test]
fn test_single_key_text_has_one_distinct_key() {
    let scorer = passage_scorer();
    let text = encrypt(&format!("{} {}", RU_PASSAGE_A, RU_PASSAGE_B), 9, Language::Russian);
    let segments = detect_mixed(&scorer, &text, Language::Russian);
    assert_eq!(distinct_keys(&segments), 1);
    assert_eq!(segments[0].key(), 9);
}

#[test]
fn test_shift_map_non_letters_inherit() {
    let scorer = scorer_with(&[], &[]);
    let segmenter = Segmenter::new(&scorer, SegmenterParams::default());
    let chars: Vec<char> = "  ...".chars().collect();
    let map = segmenter.compute_shift_map(scorer.alphabet(Language::English), &chars);
    assert_eq!(map, vec![0, 0, 0, 0, 0]);

    let text = encrypt("the farmer watches from the porch", 6, Language::English);
    let chars: Vec<char> = text.chars().collect();
    let map = segmenter.compute_shift_map(scorer.alphabet(Language::English), &chars);
    assert_eq!(map.len(), chars.len());
    for (i, c) in chars.iter().enumerate().skip(1) {
        if !c.is_alphabetic() {
            assert_eq!(map[i], map[i - 1]);
        }
    }
}

#[test]
fn test_analyze_reports_mixed() {
    let scorer = passage_scorer();
    let options = AnalyzeOptions {
        force_mixed: true,
        ..AnalyzeOptions::default()
    };
    let analysis = analyze(&scorer, &mixed_cipher(), &options);

    assert_eq!(analysis.kind, AnalysisKind::Mixed);
    assert_eq!(analysis.language, Language::Russian);
    assert!(analysis.segments.len() >= 2);
    assert_eq!(analysis.text, join_segments(&analysis.segments));
}

#[test]
fn test_plaintext_skips_segmenter_unless_forced() {
    // Three clear copies outweigh the rotated tail, so the text reads as plaintext
    let tail = encrypt(RU_PASSAGE_B, 12, Language::Russian);
    let text = format!("{a} {a} {a} {}", tail, a = RU_PASSAGE_A);
    let scorer = passage_scorer();
    assert!(scorer.is_plaintext_in(&text, Language::Russian));

    let mut options = AnalyzeOptions {
        routing: RoutingParams {
            low_confidence: 100.0,
            mixed_min_chars: 0,
            ..RoutingParams::default()
        },
        language: Some(Language::Russian),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze(&scorer, &text, &options);
    assert!(analysis.is_plaintext);
    assert_eq!(analysis.kind, AnalysisKind::Single);
    assert!(analysis.segments.is_empty());

    options.force_mixed = true;
    let forced = analyze(&scorer, &text, &options);
    assert_eq!(forced.kind, AnalysisKind::Mixed);
    assert!(forced.segments.iter().any(|s| s.key() == 12));
}
