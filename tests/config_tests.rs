use cipherforge::config::{Config, SegmenterParams, MAX_SEGMENTER_PARAM};
use cipherforge::error::CipherError;
use clap::{CommandFactory, FromArgMatches, Parser};
use rstest::rstest;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let mut argv = vec!["cipherforge"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.segmenter.window_size, 40);
    assert_eq!(config.segmenter.smooth_radius, 7);
    assert_eq!(config.segmenter.min_segment, 15);
    assert_eq!(config.routing.low_confidence, 60.0);
    assert_eq!(config.routing.mixed_min_chars, 60);
    assert_eq!(config.routing.top, 5);
    assert!(config.dictionary.ru_dict.is_none());
    assert!(!config.dictionary.no_dict_search);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (config, _) = parse(&[]);
    let defaults = Config::default();
    assert_eq!(config.segmenter.window_size, defaults.segmenter.window_size);
    assert_eq!(config.routing.top, defaults.routing.top);
    assert_eq!(config.routing.low_confidence, defaults.routing.low_confidence);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, r#"{ "segmenter": { "window_size": 60 } }"#);

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.segmenter.window_size, 60);
    assert_eq!(config.segmenter.smooth_radius, 7);
    assert_eq!(config.routing.top, 5);
}

#[test]
fn test_invalid_window_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, r#"{ "segmenter": { "window_size": 1 } }"#);

    match Config::load_from_file(&path) {
        Err(CipherError::Config(msg)) => assert!(msg.contains("window_size")),
        other => panic!("expected config error, got {:?}", other.map(|_| ())),
    }
}

#[rstest]
#[case(r#"{ "segmenter": { "window_size": 18446744073709551615 } }"#, "window_size")]
#[case(r#"{ "segmenter": { "smooth_radius": 18446744073709551615 } }"#, "smooth_radius")]
#[case(r#"{ "segmenter": { "min_segment": 1000001 } }"#, "min_segment")]
fn test_oversized_segmenter_rejected(#[case] body: &str, #[case] field: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, body);

    match Config::load_from_file(&path) {
        Err(CipherError::Config(msg)) => assert!(msg.contains(field), "{}", msg),
        other => panic!("expected config error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_segmenter_bound_is_inclusive() {
    let mut config = Config::default();
    config.segmenter.smooth_radius = MAX_SEGMENTER_PARAM;
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_confidence_rejected() {
    let mut config = Config::default();
    config.routing.low_confidence = 120.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "{ not json");
    assert!(matches!(
        Config::load_from_file(&path),
        Err(CipherError::Json(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Config::load_from_file("/no/such/config.json"),
        Err(CipherError::Io(_))
    ));
}

#[test]
fn test_merge_only_explicit_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"{ "segmenter": { "window_size": 60, "min_segment": 20 }, "routing": { "top": 3 } }"#,
    );
    let mut file_config = Config::load_from_file(&path).unwrap();

    let (cli_config, matches) = parse(&["--min-segment", "10", "--no-dict-search"]);
    file_config.merge_from_cli(&cli_config, &matches);

    // Explicit flags win
    assert_eq!(file_config.segmenter.min_segment, 10);
    assert!(file_config.dictionary.no_dict_search);
    // Untouched flags keep file values, not CLI defaults
    assert_eq!(file_config.segmenter.window_size, 60);
    assert_eq!(file_config.routing.top, 3);
}

#[test]
fn test_serde_round_trip_segmenter() {
    let params = SegmenterParams {
        window_size: 24,
        smooth_radius: 3,
        min_segment: 9,
    };
    let json = serde_json::to_string(&params).unwrap();
    let back: SegmenterParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back.window_size, 24);
    assert_eq!(back.smooth_radius, 3);
    assert_eq!(back.min_segment, 9);
}
