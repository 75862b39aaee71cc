//! Integration tests for the sync coordinator over hand-driven handles.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use vidwall::services::wall::{
    HandleSlots, PlaybackHandle, StreamIndex, SyncCoordinator, SyncOutcome, Tolerance,
};

/// A handle whose position only changes when written.
struct ManualHandle {
    position: Mutex<f64>,
    writes: AtomicUsize,
}

impl ManualHandle {
    fn at(position: f64) -> Arc<Self> {
        Arc::new(Self {
            position: Mutex::new(position),
            writes: AtomicUsize::new(0),
        })
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PlaybackHandle for ManualHandle {
    fn position(&self) -> f64 {
        *self.position.lock().unwrap()
    }

    fn set_position(&self, seconds: f64) {
        *self.position.lock().unwrap() = seconds;
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn duration(&self) -> Option<f64> {
        Some(600.0)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

fn wall(positions: &[Option<f64>]) -> (SyncCoordinator, Vec<Option<Arc<ManualHandle>>>) {
    let slots = HandleSlots::with_len(positions.len());
    let handles: Vec<Option<Arc<ManualHandle>>> = positions
        .iter()
        .map(|p| p.map(ManualHandle::at))
        .collect();

    for (i, handle) in handles.iter().enumerate() {
        if let Some(handle) = handle {
            slots.attach(StreamIndex::new(i), handle);
        }
    }

    (SyncCoordinator::new(slots, Tolerance::DEFAULT), handles)
}

fn positions(handles: &[Option<Arc<ManualHandle>>]) -> Vec<Option<f64>> {
    handles
        .iter()
        .map(|h| h.as_ref().map(|h| h.position()))
        .collect()
}

mod alignment {
    use super::*;

    #[test]
    fn drifted_handles_snap_to_reference() {
        let (coordinator, handles) = wall(&[Some(10.0), Some(10.5), Some(8.0)]);

        let report = coordinator.synchronize();

        assert_eq!(positions(&handles), vec![Some(10.0), Some(10.0), Some(10.0)]);
        assert_eq!(report.reference, Some(10.0));
        assert_eq!(report.adjusted(), 2);
        assert_eq!(
            report.outcome(StreamIndex::new(2)),
            Some(SyncOutcome::Adjusted { from: 8.0, to: 10.0 })
        );
    }

    #[test]
    fn handles_within_tolerance_are_untouched() {
        let (coordinator, handles) = wall(&[Some(5.0), Some(5.2)]);

        let report = coordinator.synchronize();

        assert_eq!(positions(&handles), vec![Some(5.0), Some(5.2)]);
        assert!(report.is_noop());
        assert_eq!(handles[1].as_ref().unwrap().writes(), 0);
    }

    #[test]
    fn drift_equal_to_tolerance_is_tolerated() {
        let slots = HandleSlots::with_len(2);
        let reference = ManualHandle::at(4.0);
        let follower = ManualHandle::at(4.5);
        slots.attach(StreamIndex::new(0), &reference);
        slots.attach(StreamIndex::new(1), &follower);

        let coordinator = SyncCoordinator::new(slots, Tolerance::try_from(0.5_f64).unwrap());
        coordinator.synchronize();

        assert_eq!(follower.writes(), 0);
    }

    #[test]
    fn zero_tolerance_aligns_any_difference() {
        let slots = HandleSlots::with_len(2);
        let reference = ManualHandle::at(1.0);
        let follower = ManualHandle::at(1.001);
        slots.attach(StreamIndex::new(0), &reference);
        slots.attach(StreamIndex::new(1), &follower);

        SyncCoordinator::new(slots, Tolerance::try_from(0.0_f64).unwrap()).synchronize();

        assert_eq!(follower.position(), 1.0);
    }

    #[test]
    fn reference_is_never_written() {
        let (coordinator, handles) = wall(&[Some(3.0), Some(30.0), Some(0.0)]);

        coordinator.synchronize();

        assert_eq!(handles[0].as_ref().unwrap().writes(), 0);
    }

    #[test]
    fn second_pass_performs_no_writes() {
        let (coordinator, handles) = wall(&[Some(42.0), Some(12.0), Some(80.0), Some(42.1)]);

        let first = coordinator.synchronize();
        let writes: Vec<usize> = handles.iter().flatten().map(|h| h.writes()).collect();
        let second = coordinator.synchronize();
        let writes_after: Vec<usize> = handles.iter().flatten().map(|h| h.writes()).collect();

        assert_eq!(first.adjusted(), 2);
        assert!(second.is_noop());
        assert_eq!(writes, writes_after);
    }
}

mod absent_handles {
    use super::*;

    #[test]
    fn missing_reference_changes_nothing() {
        let (coordinator, handles) = wall(&[None, Some(10.5), Some(8.0)]);

        let report = coordinator.synchronize();

        assert_eq!(positions(&handles), vec![None, Some(10.5), Some(8.0)]);
        assert_eq!(report.reference, None);
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn missing_follower_is_skipped() {
        let (coordinator, handles) = wall(&[Some(10.0), None, Some(2.0)]);

        let report = coordinator.synchronize();

        assert_eq!(report.outcome(StreamIndex::new(1)), Some(SyncOutcome::Absent));
        assert_eq!(handles[2].as_ref().unwrap().position(), 10.0);
        assert_eq!(report.absent(), 1);
    }

    #[test]
    fn dropped_handle_counts_as_absent() {
        let (coordinator, mut handles) = wall(&[Some(10.0), Some(2.0)]);

        handles[1] = None;
        let report = coordinator.synchronize();

        assert_eq!(report.outcome(StreamIndex::new(1)), Some(SyncOutcome::Absent));
    }

    #[test]
    fn detached_reference_is_absent() {
        let (coordinator, handles) = wall(&[Some(10.0), Some(2.0)]);

        coordinator.slots().detach(StreamIndex::REFERENCE);
        coordinator.synchronize();

        assert_eq!(handles[1].as_ref().unwrap().position(), 2.0);
    }

    #[test]
    fn empty_wall_is_a_noop() {
        let coordinator = SyncCoordinator::new(HandleSlots::with_len(0), Tolerance::DEFAULT);
        assert!(coordinator.synchronize().outcomes.is_empty());
    }
}

mod tolerance {
    use super::*;
    use vidwall::{config::SyncConfig, services::wall::WallError};

    #[test]
    fn rejects_negative_and_non_finite_values() {
        assert_eq!(
            Tolerance::try_from(-0.1_f64),
            Err(WallError::InvalidTolerance(-0.1))
        );
        assert!(Tolerance::try_from(f64::INFINITY).is_err());
        assert!(Tolerance::try_from(f64::NAN).is_err());
    }

    #[test]
    fn defaults_to_three_hundred_milliseconds() {
        assert_eq!(Tolerance::default().as_secs(), 0.3);
        assert_eq!(
            Tolerance::try_from(&SyncConfig::default()),
            Ok(Tolerance::DEFAULT)
        );
    }

    #[test]
    fn exceeded_is_strict_and_symmetric() {
        let tolerance = Tolerance::DEFAULT;
        assert!(!tolerance.is_exceeded_by(0.3));
        assert!(!tolerance.is_exceeded_by(-0.3));
        assert!(tolerance.is_exceeded_by(0.31));
        assert!(tolerance.is_exceeded_by(-0.31));
    }
}
