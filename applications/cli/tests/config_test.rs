//! Configuration file loading

use nocturne_cli::{AppConfig, CliError};
use nocturne_playback::TrackInfo;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn loads_playback_and_track_sections() {
    let file = write_config(
        r#"
[playback]
duration_secs = 240
volume = 0.5
tick_interval_ms = 250

[track]
title = "Outro"
artist = "M83"
"#,
    );

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.playback.duration_secs, 240.0);
    assert_eq!(config.playback.volume, 0.5);
    assert_eq!(config.playback.tick_interval_ms, 250);
    assert_eq!(config.playback.event_capacity, 64);
    assert_eq!(config.track.title, "Outro");
    assert_eq!(config.track.album, TrackInfo::sample().album);
}

#[test]
fn empty_file_gives_defaults() {
    let file = write_config("");
    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    let file = write_config(
        r#"
[playback]
duration_secs = -10
"#,
    );

    assert!(matches!(
        AppConfig::load(Some(file.path())),
        Err(CliError::Config(_))
    ));
}

#[test]
fn malformed_toml_is_rejected() {
    let file = write_config("[playback\nduration_secs = ");
    assert!(matches!(
        AppConfig::load(Some(file.path())),
        Err(CliError::Config(_))
    ));
}
