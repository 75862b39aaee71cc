//! vidwall - a synchronized multi-stream video wall.
//!
//! A fixed grid of players, each showing one HLS stream, kept in step by a
//! coordinator that seeks every player to the position of player 0 when it
//! drifts past a tolerance. The main pieces are:
//!
//! - [`services::wall::SyncCoordinator`]: one-shot alignment pass over the
//!   shared handle slots
//! - [`services::wall::PlayerController`]: engine lifecycle, transport
//!   controls and the reactive view of one player
//! - [`services::wall::VideoWall`]: assembles both from configuration
//! - TOML configuration with imports, and a small CLI
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use vidwall::{config::Config, services::wall::VideoWall};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut wall = VideoWall::simulated(&config)?;
//!
//! wall.mount_all();
//! wall.wait_until_ready(Duration::from_secs(5)).await;
//!
//! let report = wall.sync_all();
//! println!("{} players adjusted", report.adjusted());
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface.
pub mod cli;

/// Reactive services: the video wall and its building blocks.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, VidwallError};
