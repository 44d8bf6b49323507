//! Player task - owns the playback state and drives the tick timer
//!
//! A single tokio task owns [`PlaybackState`]. User commands arrive over an
//! mpsc channel and ticks come from a `tokio::time::Interval`, both polled in
//! one `select!` loop, so every mutation is applied sequentially.
//!
//! The interval only exists while the state allows ticking. It is rebuilt
//! whenever the playing flag, position or duration change, and dropped as soon
//! as ticking stops. Dropping the [`Player`] handle aborts the task.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    state::{PlaybackSnapshot, PlaybackState, TimerKey},
    types::PlaybackConfig,
};
use std::time::Duration;
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// User-initiated actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    TogglePlayPause,
    Play,
    Pause,
    /// Seek to a position in seconds (clamped to the track)
    Seek(f64),
    /// Set the stored volume (0.0-1.0, clamped)
    SetVolume(f32),
    ToggleMute,
}

enum Message {
    Command {
        command: PlayerCommand,
        reply: oneshot::Sender<Result<PlaybackSnapshot>>,
    },
    Shutdown,
}

enum Wake {
    Message(Option<Message>),
    Tick,
}

/// Handle to a running player task
///
/// Commands are applied in the order they are sent. Each command resolves to
/// the snapshot taken right after it was applied.
pub struct Player {
    commands: mpsc::Sender<Message>,
    events: broadcast::Sender<PlaybackEvent>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
    task: Option<JoinHandle<PlaybackState>>,
}

impl Player {
    /// Spawn the player task on the current tokio runtime
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn spawn(config: PlaybackConfig) -> Result<Self> {
        let state = PlaybackState::new(&config)?;

        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (events_tx, _) = broadcast::channel(config.event_capacity);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let simulator = TimeSimulator {
            state,
            period: config.tick_interval(),
            commands: commands_rx,
            events: events_tx.clone(),
            snapshot: snapshot_tx,
            ticker: None,
        };

        info!(
            duration_secs = config.duration_secs,
            tick_interval_ms = config.tick_interval_ms,
            "Starting player"
        );
        let task = tokio::spawn(simulator.run());

        Ok(Self {
            commands: commands_tx,
            events: events_tx,
            snapshot: snapshot_rx,
            task: Some(task),
        })
    }

    /// Apply a command and return the resulting snapshot
    pub async fn send(&self, command: PlayerCommand) -> Result<PlaybackSnapshot> {
        let (reply, response) = oneshot::channel();

        self.commands
            .send(Message::Command { command, reply })
            .await
            .map_err(|_| PlaybackError::PlayerStopped)?;

        response.await.map_err(|_| PlaybackError::PlayerStopped)?
    }

    pub async fn toggle_play_pause(&self) -> Result<PlaybackSnapshot> {
        self.send(PlayerCommand::TogglePlayPause).await
    }

    pub async fn play(&self) -> Result<PlaybackSnapshot> {
        self.send(PlayerCommand::Play).await
    }

    pub async fn pause(&self) -> Result<PlaybackSnapshot> {
        self.send(PlayerCommand::Pause).await
    }

    pub async fn seek(&self, position_secs: f64) -> Result<PlaybackSnapshot> {
        self.send(PlayerCommand::Seek(position_secs)).await
    }

    pub async fn set_volume(&self, level: f32) -> Result<PlaybackSnapshot> {
        self.send(PlayerCommand::SetVolume(level)).await
    }

    pub async fn toggle_mute(&self) -> Result<PlaybackSnapshot> {
        self.send(PlayerCommand::ToggleMute).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        *self.snapshot.borrow()
    }

    /// Receiver that is notified on every snapshot change
    pub fn watch(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    /// Subscribe to playback events
    ///
    /// Slow subscribers lag (and lose events) once they fall more than
    /// `event_capacity` events behind.
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Stop the task gracefully and return the final state
    pub async fn shutdown(mut self) -> Result<PlaybackState> {
        let task = self.task.take().ok_or(PlaybackError::PlayerStopped)?;

        // The task may already be gone; awaiting it below reports that
        let _ = self.commands.send(Message::Shutdown).await;

        task.await
            .map_err(|e| PlaybackError::TaskFailed(e.to_string()))
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The task side: applies commands and ticks to the owned state
struct TimeSimulator {
    state: PlaybackState,
    period: Duration,
    commands: mpsc::Receiver<Message>,
    events: broadcast::Sender<PlaybackEvent>,
    snapshot: watch::Sender<PlaybackSnapshot>,
    /// Present only while the state allows ticking
    ticker: Option<Interval>,
}

impl TimeSimulator {
    async fn run(mut self) -> PlaybackState {
        loop {
            let wake = tokio::select! {
                message = self.commands.recv() => Wake::Message(message),
                () = next_tick(&mut self.ticker) => Wake::Tick,
            };

            match wake {
                Wake::Message(Some(Message::Command { command, reply })) => {
                    let result = self.apply(command);
                    // Caller may have given up waiting
                    let _ = reply.send(result);
                }
                Wake::Message(Some(Message::Shutdown) | None) => break,
                Wake::Tick => self.on_tick(),
            }
        }

        self.ticker = None;
        info!(position = self.state.current_time(), "Player stopped");
        self.state
    }

    fn apply(&mut self, command: PlayerCommand) -> Result<PlaybackSnapshot> {
        let before = self.state.snapshot();
        let key = self.state.timer_key();

        let result = match command {
            PlayerCommand::TogglePlayPause => {
                self.state.toggle_play_pause();
                Ok(())
            }
            PlayerCommand::Play => {
                self.state.play();
                Ok(())
            }
            PlayerCommand::Pause => {
                self.state.pause();
                Ok(())
            }
            PlayerCommand::Seek(position) => self.state.seek(position),
            PlayerCommand::SetVolume(level) => self.state.set_volume(level),
            PlayerCommand::ToggleMute => {
                self.state.toggle_mute();
                Ok(())
            }
        };

        if let Err(e) = &result {
            warn!("Rejected {:?}: {}", command, e);
        }

        let finished = self.state.reconcile();
        if finished {
            info!("Reached end of track");
        }
        self.publish(&before, finished);
        self.rearm(key);

        result.map(|()| self.state.snapshot())
    }

    fn on_tick(&mut self) {
        let before = self.state.snapshot();
        let key = self.state.timer_key();

        if !self.state.tick() {
            // Stale timer; nothing may advance
            self.ticker = None;
            return;
        }
        debug!(position = self.state.current_time(), "Tick");

        // Observers see the final position before the rewind
        let reached = self.state.snapshot();
        self.publish(&before, false);

        if self.state.reconcile() {
            info!("Reached end of track");
            self.publish(&reached, true);
        }

        self.rearm(key);
    }

    fn publish(&self, before: &PlaybackSnapshot, finished: bool) {
        let after = self.state.snapshot();

        for event in PlaybackEvent::diff(before, &after, finished) {
            if let PlaybackEvent::StateChanged { is_playing } = event {
                info!(is_playing, position = after.current_time, "Playback state changed");
            }
            // No subscribers is fine
            let _ = self.events.send(event);
        }

        self.snapshot.send_replace(after);
    }

    /// Rebuild or drop the interval if the timer inputs changed
    fn rearm(&mut self, previous: TimerKey) {
        if self.state.timer_key() == previous {
            return;
        }

        let period = self.period;
        self.ticker = self.state.should_tick().then(|| {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
