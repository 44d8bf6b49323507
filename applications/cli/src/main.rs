//! Nocturne - simulated now-playing player for the terminal

use clap::{Parser, Subcommand};
use nocturne_cli::{parse_command, AppConfig, CliError, ConsoleCommand, NowPlayingView};
use nocturne_playback::{PlaybackEvent, PlaybackSnapshot, Player};
use std::path::PathBuf;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nocturne")]
#[command(about = "Simulated now-playing player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the track to the end, printing progress
    Play {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Start position in seconds
        #[arg(long)]
        seek: Option<f64>,
        /// Volume (0.0-1.0)
        #[arg(long)]
        volume: Option<f32>,
        /// Start muted
        #[arg(long)]
        muted: bool,
    },
    /// Control the player with commands read from stdin
    Interactive {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so stdout carries only the view)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nocturne=info,nocturne_cli=info,nocturne_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            seek,
            volume,
            muted,
        } => {
            let config = AppConfig::load(config.as_deref())?;
            play(config, seek, volume, muted).await?;
        }
        Commands::Interactive { config } => {
            let config = AppConfig::load(config.as_deref())?;
            interactive(config).await?;
        }
    }

    Ok(())
}

async fn play(
    config: AppConfig,
    seek: Option<f64>,
    volume: Option<f32>,
    muted: bool,
) -> Result<(), CliError> {
    let player = Player::spawn(config.playback.clone())?;

    if let Some(volume) = volume {
        player.set_volume(volume).await?;
    }
    if muted && !player.snapshot().is_muted {
        player.toggle_mute().await?;
    }
    if let Some(seek) = seek {
        player.seek(seek).await?;
    }

    let mut events = player.subscribe();
    let snapshot = player.play().await?;
    println!("{}", NowPlayingView::new(&config.track, &snapshot));

    loop {
        match events.recv().await {
            Ok(PlaybackEvent::PositionUpdate {
                position_secs,
                duration_secs,
            }) => {
                // The tick that reaches the end is rewound before we read the
                // latest snapshot, so take the position from the event
                let snapshot = PlaybackSnapshot {
                    current_time: position_secs,
                    duration: duration_secs,
                    ..player.snapshot()
                };
                println!("{}", NowPlayingView::new(&config.track, &snapshot));
            }
            Ok(PlaybackEvent::TrackFinished) | Err(RecvError::Closed) => break,
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("View fell behind, skipped {} events", skipped);
            }
        }
    }

    let state = player.shutdown().await?;
    tracing::info!(is_playing = state.is_playing(), "Finished {}", config.track.title);
    Ok(())
}

async fn interactive(config: AppConfig) -> Result<(), CliError> {
    let player = Player::spawn(config.playback.clone())?;
    let mut events = player.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", NowPlayingView::new(&config.track, &player.snapshot()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match parse_command(line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Status) => {
                        println!("{}", NowPlayingView::new(&config.track, &player.snapshot()));
                    }
                    Ok(ConsoleCommand::Player(command)) => match player.send(command).await {
                        Ok(snapshot) => {
                            println!("{}", NowPlayingView::new(&config.track, &snapshot));
                        }
                        Err(e) => eprintln!("error: {e}"),
                    },
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            event = events.recv() => match event {
                Ok(PlaybackEvent::TrackFinished) => {
                    println!("Finished: {} - {}", config.track.title, config.track.artist);
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    }

    player.shutdown().await?;
    Ok(())
}
