/// Media element and engine implementations
pub mod backend;
/// Per-stream player controller
pub mod controller;
/// Decoding engine abstraction
pub mod engine;
/// Wall error types
pub mod error;
/// Playback handle and media element traits
pub mod handle;
/// Wall assembly and lifecycle
pub mod service;
/// Shared registry of playback handles
pub mod slots;
/// Position alignment across players
pub mod sync;
/// Time and progress formatting
pub mod time;
/// Stream, state and volume types
pub mod types;

pub use controller::{PlayerController, PlayerView};
pub use engine::*;
pub use error::*;
pub use handle::*;
pub use service::*;
pub use slots::*;
pub use sync::*;
pub use time::*;
pub use types::*;
