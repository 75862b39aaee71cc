use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{Volume, WallError};

/// Live view of one media element's playback clock.
///
/// This is the only surface the sync coordinator touches. Positions are in
/// seconds; writing one makes the underlying decoder seek.
pub trait PlaybackHandle: Send + Sync {
    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Seek to `seconds`.
    fn set_position(&self, seconds: f64);

    /// Total length in seconds, `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    /// Whether enough data is decoded to start playback.
    fn is_ready(&self) -> bool;
}

/// Notifications fired by a media element, mirroring the standard media
/// element events the player UI listens to.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration and dimensions are known
    LoadedMetadata,
    /// Playback position advanced
    TimeUpdate,
    /// Playback started
    Play,
    /// Playback paused
    Pause,
    /// Playback stalled waiting for data
    Waiting,
    /// Enough data is buffered to resume
    CanPlay,
    /// A seek started
    Seeking,
    /// A seek completed
    Seeked,
    /// The end of the stream was reached
    Ended,
    /// The element hit a decode or network error
    Error(String),
}

/// Information an attached engine hands to its element once the manifest
/// has been parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceInfo {
    /// Stream length in seconds, if the manifest declares one
    pub duration: Option<f64>,
}

/// A media element: the playback handle plus the transport, volume and
/// fullscreen controls the player UI drives.
#[async_trait]
pub trait MediaElement: PlaybackHandle {
    /// Start playback.
    ///
    /// # Errors
    /// Returns `WallError::PlaybackDenied` when a playback policy refuses.
    async fn play(&self) -> Result<(), WallError>;

    /// Pause playback.
    fn pause(&self);

    /// Whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Current volume.
    fn volume(&self) -> Volume;

    /// Change the volume.
    fn set_volume(&self, volume: Volume);

    /// Mute or unmute without touching the volume.
    fn set_muted(&self, muted: bool);

    /// Whether audio is muted.
    fn is_muted(&self) -> bool;

    /// Whether the element can play `mime` without a decoding engine.
    fn can_play_type(&self, mime: &str) -> bool;

    /// Point the element directly at a source (native playback path).
    fn set_source(&self, url: &str);

    /// Drop the current source and reset the clock.
    fn clear_source(&self);

    /// Called by an attached decoding engine once the manifest is parsed.
    fn open_media_source(&self, info: SourceInfo);

    /// Enter fullscreen.
    ///
    /// # Errors
    /// Returns `WallError::FullscreenDenied` when the request is refused.
    async fn request_fullscreen(&self) -> Result<(), WallError>;

    /// Leave fullscreen.
    ///
    /// # Errors
    /// Returns `WallError::FullscreenDenied` when the request is refused.
    async fn exit_fullscreen(&self) -> Result<(), WallError>;

    /// Whether the element is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Subscribe to element events.
    fn events(&self) -> broadcast::Receiver<MediaEvent>;
}
