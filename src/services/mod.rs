/// Reactive property primitives shared by services
pub mod common;
/// Synchronized multi-stream video wall
pub mod wall;

pub use wall::{PlayerController, SyncCoordinator, SyncReport, VideoWall};
