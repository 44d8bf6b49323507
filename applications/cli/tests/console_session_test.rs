//! Console commands driving a live player

use nocturne_cli::{parse_command, AppConfig, ConsoleCommand, NowPlayingView};
use nocturne_playback::{PlaybackSnapshot, Player};
use std::time::Duration;

async fn run_line(player: &Player, line: &str) -> PlaybackSnapshot {
    match parse_command(line).unwrap() {
        ConsoleCommand::Player(command) => player.send(command).await.unwrap(),
        ConsoleCommand::Status | ConsoleCommand::Quit => player.snapshot(),
    }
}

#[tokio::test(start_paused = true)]
async fn scripted_session() {
    let config = AppConfig::default();
    let player = Player::spawn(config.playback.clone()).unwrap();

    let snapshot = run_line(&player, "seek 1:30").await;
    assert_eq!(snapshot.current_time, 90.0);
    assert!(!snapshot.is_playing);

    run_line(&player, "toggle").await;
    tokio::time::sleep(Duration::from_millis(5500)).await;
    assert_eq!(player.snapshot().current_time, 95.0);

    let snapshot = run_line(&player, "volume 0").await;
    assert!(snapshot.is_muted);

    let snapshot = run_line(&player, "mute").await;
    assert!(!snapshot.is_muted);
    assert_eq!(snapshot.volume, 0.0);

    let snapshot = run_line(&player, "pause").await;
    let view = NowPlayingView::new(&config.track, &snapshot);
    assert_eq!(view.elapsed, "1:35");
    assert!(view.to_string().contains("muted"));

    player.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn invalid_volume_is_reported_not_applied() {
    let player = Player::spawn(AppConfig::default().playback).unwrap();

    let ConsoleCommand::Player(command) = parse_command("volume NaN").unwrap() else {
        panic!("expected a player command");
    };
    assert!(player.send(command).await.is_err());
    assert_eq!(player.snapshot().volume, 0.7);
}
