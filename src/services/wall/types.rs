use std::fmt;
use std::ops::Deref;

/// MIME type of an HLS manifest, used to probe native element support.
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// Position of a stream in the configured wall, and of its handle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamIndex(usize);

impl StreamIndex {
    /// The synchronization reference slot.
    pub const REFERENCE: StreamIndex = StreamIndex(0);

    /// Wrap a raw slot index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw slot index.
    pub fn get(self) -> usize {
        self.0
    }

    /// Whether this slot is the synchronization reference.
    pub fn is_reference(self) -> bool {
        self == Self::REFERENCE
    }
}

impl fmt::Display for StreamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable address of one adaptive-bitrate source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamDescriptor(String);

impl StreamDescriptor {
    /// Create a descriptor from a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The source address.
    pub fn url(&self) -> &str {
        &self.0
    }

    /// Whether the address names an HLS manifest.
    pub fn is_hls(&self) -> bool {
        let path = self.0.split(['?', '#']).next().unwrap_or_default();
        path.to_ascii_lowercase().ends_with(".m3u8")
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamDescriptor {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for StreamDescriptor {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Lifecycle of a player.
///
/// `Unattached → Loading → Ready → Playing ⇄ Paused → TornDown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No source attached yet
    Unattached,

    /// Source attached, waiting for the manifest or metadata
    Loading,

    /// Enough data decoded to start playback
    Ready,

    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Engine released; the handle must be treated as absent
    TornDown,
}

impl PlaybackState {
    /// Whether the transport controls accept play/pause.
    pub fn accepts_transport(self) -> bool {
        matches!(self, Self::Ready | Self::Playing | Self::Paused)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unattached => "unattached",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::TornDown => "torn down",
        };
        f.write_str(label)
    }
}

/// Volume of a player
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    /// Full volume, the element default.
    pub const FULL: Volume = Volume(1.0);

    /// Create a volume clamped to `[0, 1]`. `NaN` becomes silence.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Whether this volume mutes the element.
    pub fn is_muted(self) -> bool {
        self.0 == 0.0
    }

    /// Coarse level for the volume indicator.
    pub fn level(self) -> VolumeLevel {
        if self.is_muted() {
            VolumeLevel::Muted
        } else if self.0 < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }

    /// Get the volume as a percentage
    pub fn as_percentage(self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Coarse volume indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    /// Volume is exactly zero
    Muted,
    /// Below half volume
    Low,
    /// Half volume or louder
    High,
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Muted => "muted",
            Self::Low => "low",
            Self::High => "high",
        };
        f.write_str(label)
    }
}
