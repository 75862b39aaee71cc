use std::fmt;

use tracing::{debug, info, instrument, trace};

use super::{HandleSlots, StreamIndex, WallError};
use crate::config::SyncConfig;

/// Maximum drift, in seconds, tolerated before a handle is re-seeked.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    /// The stock tolerance of 300 ms.
    pub const DEFAULT: Tolerance = Tolerance(0.3);

    /// Tolerance in seconds.
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Whether `delta` is strictly outside the window.
    pub fn is_exceeded_by(self, delta: f64) -> bool {
        delta.abs() > self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = WallError;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        if seconds.is_finite() && seconds >= 0.0 {
            Ok(Self(seconds))
        } else {
            Err(WallError::InvalidTolerance(seconds))
        }
    }
}

impl TryFrom<&SyncConfig> for Tolerance {
    type Error = WallError;

    fn try_from(config: &SyncConfig) -> Result<Self, Self::Error> {
        Self::try_from(config.tolerance)
    }
}

/// What a synchronization pass did with one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The reference handle, read once
    Reference {
        /// Reference position in seconds
        position: f64,
    },
    /// Slot empty or its handle gone; skipped
    Absent,
    /// Already close enough; left untouched
    WithinTolerance {
        /// Position of the handle
        position: f64,
        /// Signed drift from the reference
        delta: f64,
    },
    /// Seeked to the reference position
    Adjusted {
        /// Position before the seek
        from: f64,
        /// Reference position written
        to: f64,
    },
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference { position } => write!(f, "reference at {position:.3}s"),
            Self::Absent => write!(f, "absent, skipped"),
            Self::WithinTolerance { position, delta } => {
                write!(f, "in sync at {position:.3}s (drift {delta:+.3}s)")
            }
            Self::Adjusted { from, to } => write!(f, "seeked {from:.3}s -> {to:.3}s"),
        }
    }
}

/// Result of one synchronization pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncReport {
    /// Reference position, `None` when the reference slot was absent
    pub reference: Option<f64>,
    /// Per-slot outcome in index order; empty when the pass was skipped
    pub outcomes: Vec<(StreamIndex, SyncOutcome)>,
}

impl SyncReport {
    /// Number of handles that were seeked.
    pub fn adjusted(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Adjusted { .. }))
    }

    /// Number of slots skipped as absent.
    pub fn absent(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Absent))
    }

    /// Whether the pass wrote nothing.
    pub fn is_noop(&self) -> bool {
        self.adjusted() == 0
    }

    /// Outcome recorded for `index`.
    pub fn outcome(&self, index: StreamIndex) -> Option<SyncOutcome> {
        self.outcomes
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, outcome)| *outcome)
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Aligns every tracked playback handle to the reference in slot 0.
///
/// Only positions are touched; rate and play/pause state are left alone.
/// The coordinator holds no handles of its own, just the shared slots.
#[derive(Clone)]
pub struct SyncCoordinator {
    slots: HandleSlots,
    tolerance: Tolerance,
}

impl SyncCoordinator {
    /// Coordinate the given slots with `tolerance`.
    pub fn new(slots: HandleSlots, tolerance: Tolerance) -> Self {
        Self { slots, tolerance }
    }

    /// The slots this coordinator reads.
    pub fn slots(&self) -> &HandleSlots {
        &self.slots
    }

    /// The drift window.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Run one synchronization pass.
    ///
    /// Reads the reference position once, then walks the remaining slots in
    /// index order and seeks every present handle whose drift strictly
    /// exceeds the tolerance. An absent reference makes the pass a no-op;
    /// absent non-reference handles are skipped. Seek success is not
    /// verified.
    #[instrument(skip(self), fields(tolerance = self.tolerance.as_secs()))]
    pub fn synchronize(&self) -> SyncReport {
        let mut handles = self.slots.snapshot().into_iter().enumerate();

        let Some((_, Some(reference))) = handles.next() else {
            info!("reference player absent, nothing to synchronize");
            return SyncReport::default();
        };

        let t0 = reference.position();
        let mut outcomes = vec![(StreamIndex::REFERENCE, SyncOutcome::Reference { position: t0 })];

        for (i, handle) in handles {
            let index = StreamIndex::new(i);

            let Some(handle) = handle else {
                trace!(%index, "absent handle skipped");
                outcomes.push((index, SyncOutcome::Absent));
                continue;
            };

            let position = handle.position();
            let delta = position - t0;

            let outcome = if self.tolerance.is_exceeded_by(delta) {
                handle.set_position(t0);
                debug!(%index, from = position, to = t0, "handle re-aligned");
                SyncOutcome::Adjusted {
                    from: position,
                    to: t0,
                }
            } else {
                SyncOutcome::WithinTolerance { position, delta }
            };

            outcomes.push((index, outcome));
        }

        let report = SyncReport {
            reference: Some(t0),
            outcomes,
        };

        info!(
            reference = t0,
            adjusted = report.adjusted(),
            absent = report.absent(),
            "synchronization pass complete"
        );

        report
    }
}
