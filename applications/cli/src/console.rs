//! Console command parsing for interactive mode
//!
//! One command per line:
//! `play`, `pause`, `toggle`, `seek <secs|m:ss>`, `volume <0..1>`, `mute`,
//! `status`, `quit`.

use crate::error::{CliError, Result};
use nocturne_playback::PlayerCommand;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    /// Forwarded to the player
    Player(PlayerCommand),
    /// Print the current view
    Status,
    Quit,
}

/// Parse one line of console input
pub fn parse_command(line: &str) -> Result<ConsoleCommand> {
    let mut parts = line.split_whitespace();

    let verb = parts
        .next()
        .ok_or_else(|| CliError::Command("empty command".to_string()))?
        .to_ascii_lowercase();
    let argument = parts.next();

    if parts.next().is_some() {
        return Err(CliError::Command(format!("too many arguments: {line}")));
    }

    let command = match (verb.as_str(), argument) {
        ("play", None) => ConsoleCommand::Player(PlayerCommand::Play),
        ("pause", None) => ConsoleCommand::Player(PlayerCommand::Pause),
        ("toggle", None) => ConsoleCommand::Player(PlayerCommand::TogglePlayPause),
        ("mute", None) => ConsoleCommand::Player(PlayerCommand::ToggleMute),
        ("seek", Some(position)) => {
            ConsoleCommand::Player(PlayerCommand::Seek(parse_position(position)?))
        }
        ("volume", Some(level)) => {
            let level = level
                .parse::<f32>()
                .map_err(|_| CliError::Command(format!("invalid volume: {level}")))?;
            ConsoleCommand::Player(PlayerCommand::SetVolume(level))
        }
        ("status", None) => ConsoleCommand::Status,
        ("quit" | "exit" | "q", None) => ConsoleCommand::Quit,
        ("seek" | "volume", None) => {
            return Err(CliError::Command(format!("{verb} needs a value")));
        }
        (_, Some(_)) if is_known(&verb) => {
            return Err(CliError::Command(format!("{verb} takes no value")));
        }
        _ => return Err(CliError::Command(format!("unknown command: {verb}"))),
    };

    Ok(command)
}

fn is_known(verb: &str) -> bool {
    matches!(
        verb,
        "play" | "pause" | "toggle" | "mute" | "status" | "quit" | "exit" | "q"
    )
}

/// Seconds, either plain (`90`, `12.5`) or `m:ss` (`1:30`)
fn parse_position(value: &str) -> Result<f64> {
    let invalid = || CliError::Command(format!("invalid position: {value}"));

    match value.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.parse::<u32>().map_err(|_| invalid())?;
            let seconds = seconds.parse::<f64>().map_err(|_| invalid())?;
            if !(0.0..60.0).contains(&seconds) {
                return Err(invalid());
            }
            Ok(f64::from(minutes) * 60.0 + seconds)
        }
        None => value.parse::<f64>().map_err(|_| invalid()),
    }
}
