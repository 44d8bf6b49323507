//! Nocturne CLI Library
//!
//! Terminal front end for the simulated player: configuration loading,
//! console command parsing and the text view.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod console;
pub mod error;
pub mod view;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use console::{parse_command, ConsoleCommand};
pub use error::{CliError, Result};
pub use view::NowPlayingView;
