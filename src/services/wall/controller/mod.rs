pub(crate) mod monitoring;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::{
    EngineFactory, EngineSession, HLS_MIME_TYPE, HandleSlots, MediaElement, PlaybackState,
    StreamDescriptor, StreamIndex, Volume, WallError,
};
use crate::services::common::Property;

use monitoring::{PlayerMonitor, Readiness};

/// Reactive projection of one player's element, for rendering.
///
/// Every field is written by the owning controller or its monitor and can
/// be watched independently.
#[derive(Debug)]
pub struct PlayerView {
    /// Lifecycle state
    pub state: Property<PlaybackState>,
    /// Last observed position in seconds
    pub current_time: Property<f64>,
    /// Stream length, once known
    pub duration: Property<Option<f64>>,
    /// Whether the loading indicator is shown
    pub loading: Property<bool>,
    /// Whether the element is playing
    pub playing: Property<bool>,
    /// Volume slider value
    pub volume: Property<Volume>,
    /// Whether the element is fullscreen
    pub fullscreen: Property<bool>,
}

impl PlayerView {
    fn new() -> Self {
        Self {
            state: Property::new(PlaybackState::Unattached),
            current_time: Property::new(0.0),
            duration: Property::new(None),
            loading: Property::new(true),
            playing: Property::new(false),
            volume: Property::new(Volume::default()),
            fullscreen: Property::new(false),
        }
    }

    /// Move to `next` if the current state allows it.
    pub(crate) fn transition(&self, next: PlaybackState) {
        use PlaybackState::*;

        let current = self.state.get();
        let allowed = match (current, next) {
            (TornDown, _) => false,
            (_, TornDown) | (_, Unattached) => true,
            (Unattached, Loading) => true,
            (Loading, Ready) => true,
            (Ready | Paused, Playing) => true,
            (Playing, Paused) => true,
            _ => false,
        };

        if allowed {
            self.state.set(next);
        } else if current != next {
            debug!(from = %current, to = %next, "state transition ignored");
        }
    }
}

/// Owns one media element and drives it for one stream.
///
/// Mounting acquires a decoding engine (or falls back to native playback),
/// starts the event monitor and registers the element in the shared handle
/// slots. Teardown, a source change or dropping the controller releases all
/// of it again.
pub struct PlayerController<E: MediaElement + 'static> {
    index: StreamIndex,
    descriptor: StreamDescriptor,
    element: Arc<E>,
    factory: Arc<dyn EngineFactory>,
    slots: HandleSlots,
    view: Arc<PlayerView>,
    session: Option<EngineSession>,
    native_source: bool,
    monitor: Option<JoinHandle<()>>,
}

impl<E: MediaElement + 'static> PlayerController<E> {
    /// Create an unattached controller for slot `index`.
    pub fn new(
        index: StreamIndex,
        descriptor: StreamDescriptor,
        element: Arc<E>,
        factory: Arc<dyn EngineFactory>,
        slots: HandleSlots,
    ) -> Self {
        Self {
            index,
            descriptor,
            element,
            factory,
            slots,
            view: Arc::new(PlayerView::new()),
            session: None,
            native_source: false,
            monitor: None,
        }
    }

    /// Slot index of this player.
    pub fn index(&self) -> StreamIndex {
        self.index
    }

    /// Stream this player shows.
    pub fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    /// The owned media element.
    pub fn element(&self) -> &Arc<E> {
        &self.element
    }

    /// Derived UI state.
    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    /// Whether an engine session is currently open.
    pub fn has_engine(&self) -> bool {
        self.session.as_ref().is_some_and(EngineSession::is_open)
    }

    /// Attach the stream and register the element with the coordinator.
    ///
    /// Uses the decoding engine when the factory reports support, otherwise
    /// native element playback when the element can play HLS. With neither,
    /// the player logs a warning and stays loading. Mounting an already
    /// mounted or torn-down player does nothing.
    #[instrument(skip(self), fields(stream = %self.index, src = %self.descriptor))]
    pub fn mount(&mut self) {
        if self.view.state.get() != PlaybackState::Unattached {
            debug!("mount ignored, player not unattached");
            return;
        }

        self.view.transition(PlaybackState::Loading);
        self.view.loading.set(true);

        let media_events = self.element.events();

        let readiness = if self.factory.is_supported() {
            let element: Arc<dyn MediaElement> = self.element.clone();
            let (session, engine_events) =
                EngineSession::open(self.factory.as_ref(), self.index, &self.descriptor, element);
            self.session = Some(session);
            Readiness::Engine(engine_events)
        } else if self.element.can_play_type(HLS_MIME_TYPE) {
            debug!("engine unsupported, using native playback");
            self.element.set_source(self.descriptor.url());
            self.native_source = true;
            Readiness::Native
        } else {
            let error = WallError::UnsupportedFormat {
                url: self.descriptor.url().to_string(),
            };
            warn!("{error}; player stays loading");
            Readiness::Never
        };

        self.monitor = Some(PlayerMonitor::start(
            self.index,
            Arc::downgrade(&self.view),
            Arc::downgrade(&self.element),
            media_events,
            readiness,
        ));

        self.slots.attach(self.index, &self.element);
        info!("player mounted");
    }

    /// Release the engine and detach from the coordinator for good.
    #[instrument(skip(self), fields(stream = %self.index))]
    pub fn teardown(&mut self) {
        if self.view.state.get() == PlaybackState::TornDown {
            return;
        }

        self.release();
        self.view.transition(PlaybackState::TornDown);
        self.view.playing.set(false);
        info!("player torn down");
    }

    /// Switch to another stream.
    ///
    /// The current engine session is destroyed before the new one is
    /// acquired. Does nothing for the current stream or after teardown.
    #[instrument(skip(self), fields(stream = %self.index))]
    pub fn set_source(&mut self, descriptor: StreamDescriptor) {
        if descriptor == self.descriptor || self.view.state.get() == PlaybackState::TornDown {
            return;
        }

        let was_mounted = self.view.state.get() != PlaybackState::Unattached;
        self.release();

        info!(from = %self.descriptor, to = %descriptor, "switching stream");
        self.descriptor = descriptor;
        self.view.transition(PlaybackState::Unattached);
        self.view.playing.set(false);
        self.view.current_time.set(0.0);
        self.view.duration.set(None);

        if was_mounted {
            self.mount();
        }
    }

    /// Toggle between playing and paused.
    ///
    /// Ignored while the player is not ready, like the disabled button.
    pub async fn toggle_play(&self) {
        if !self.view.state.get().accepts_transport() {
            debug!(stream = %self.index, "toggle ignored while not ready");
            return;
        }

        if self.view.playing.get() {
            self.pause();
        } else {
            self.play().await;
        }
    }

    /// Start playback. A denial is logged and leaves the UI unchanged.
    pub async fn play(&self) {
        if !self.view.state.get().accepts_transport() {
            debug!(stream = %self.index, "play ignored while not ready");
            return;
        }

        match self.element.play().await {
            Ok(()) => {
                self.view.playing.set(true);
                self.view.transition(PlaybackState::Playing);
            }
            Err(e) => warn!(stream = %self.index, "Playback error: {e}"),
        }
    }

    /// Pause playback.
    pub fn pause(&self) {
        if !self.view.state.get().accepts_transport() {
            return;
        }

        self.element.pause();
        self.view.playing.set(false);
        self.view.transition(PlaybackState::Paused);
    }

    /// Seek to an absolute position in seconds.
    pub fn seek(&self, seconds: f64) {
        if self.view.state.get() == PlaybackState::TornDown || !seconds.is_finite() {
            return;
        }

        let target = seconds.max(0.0);
        self.element.set_position(target);
        self.view.current_time.set(target);
    }

    /// Seek to a fraction of the duration, as a progress-bar click does.
    ///
    /// Ignored while the duration is unknown or zero.
    pub fn seek_fraction(&self, fraction: f64) {
        let Some(duration) = self.view.duration.get().filter(|d| *d > 0.0) else {
            return;
        };

        if fraction.is_finite() {
            self.seek(fraction.clamp(0.0, 1.0) * duration);
        }
    }

    /// Set the volume, clamped to `[0, 1]`. Zero mutes the element.
    pub fn set_volume(&self, value: f64) {
        if self.view.state.get() == PlaybackState::TornDown {
            return;
        }

        let volume = Volume::new(value);
        self.element.set_volume(volume);
        self.element.set_muted(volume.is_muted());
        self.view.volume.set(volume);
    }

    /// Enter fullscreen, or leave it when already fullscreen.
    ///
    /// A denial is logged and leaves the UI unchanged.
    pub async fn toggle_fullscreen(&self) {
        if self.view.state.get() == PlaybackState::TornDown {
            return;
        }

        let result = if self.element.is_fullscreen() {
            self.element.exit_fullscreen().await
        } else {
            self.element.request_fullscreen().await
        };

        match result {
            Ok(()) => self.view.fullscreen.set(self.element.is_fullscreen()),
            Err(e) => warn!(stream = %self.index, "Fullscreen error: {e}"),
        }
    }

    fn release(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.abort();
        }

        if let Some(mut session) = self.session.take() {
            session.close();
        }

        if std::mem::take(&mut self.native_source) {
            self.element.clear_source();
        }

        self.slots.detach(self.index);
    }
}

impl<E: MediaElement + 'static> Drop for PlayerController<E> {
    fn drop(&mut self) {
        self.release();
    }
}
