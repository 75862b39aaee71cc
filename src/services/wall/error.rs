use super::StreamIndex;

/// Errors raised by media elements and decoding engines.
///
/// None of these are fatal: the controller logs them at the call site and
/// keeps its previous UI state.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WallError {
    /// The element refused to start playback (autoplay or permission policy)
    #[error("playback request denied: {0}")]
    PlaybackDenied(String),

    /// The element refused to enter or leave fullscreen
    #[error("fullscreen request denied: {0}")]
    FullscreenDenied(String),

    /// The decoding engine failed to load or decode the stream
    #[error("decoding engine error on {stream}: {details}")]
    Engine {
        /// Slot of the failing player
        stream: StreamIndex,
        /// Engine-provided description
        details: String,
    },

    /// Neither the engine nor the element can play the stream format
    #[error("no playback path for '{url}'")]
    UnsupportedFormat {
        /// Address of the stream
        url: String,
    },

    /// A synchronization tolerance that is negative or not finite
    #[error("invalid sync tolerance {0}: must be a finite, non-negative number of seconds")]
    InvalidTolerance(f64),
}
