//! In-process element and engine that play nothing but keep honest clocks.
//!
//! Positions advance with tokio time while playing, so tests can drive them
//! deterministically with a paused clock. Loading delays, format support
//! and permission denials come from [`SimulatedConfig`] and the builder
//! methods on [`SimulatedElement`].

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use tokio::{runtime::Handle, sync::broadcast, task::JoinHandle, time::Instant};
use tracing::{debug, trace};

use crate::config::SimulatedConfig;
use crate::services::wall::{
    DecodingEngine, EngineEvent, EngineFactory, HLS_MIME_TYPE, MediaElement, MediaEvent,
    PlaybackHandle, SourceInfo, StreamDescriptor, Volume, WallError,
};

const EVENT_CAPACITY: usize = 64;
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

struct Clock {
    source: Option<String>,
    duration: Option<f64>,
    ready: bool,
    anchor: f64,
    started: Option<Instant>,
    volume: Volume,
    muted: bool,
    fullscreen: bool,
    generation: u64,
    run: u64,
}

impl Clock {
    fn position(&self) -> f64 {
        let elapsed = self
            .started
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or_default();

        let position = self.anchor + elapsed;
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    fn freeze(&mut self) {
        self.anchor = self.position();
        self.started = None;
    }

    fn reset(&mut self) {
        self.source = None;
        self.duration = None;
        self.ready = false;
        self.anchor = 0.0;
        self.started = None;
        self.generation += 1;
    }
}

struct Shared {
    clock: Mutex<Clock>,
    events: broadcast::Sender<MediaEvent>,
}

impl Shared {
    fn clock(&self) -> MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: MediaEvent) {
        trace!(?event, "emit");
        let _ = self.events.send(event);
    }
}

/// A media element whose clock runs on tokio time.
pub struct SimulatedElement {
    shared: Arc<Shared>,
    config: SimulatedConfig,
    deny_play: AtomicBool,
    deny_fullscreen: AtomicBool,
}

impl SimulatedElement {
    /// Create an element with no source.
    pub fn new(config: SimulatedConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                clock: Mutex::new(Clock {
                    source: None,
                    duration: None,
                    ready: false,
                    anchor: 0.0,
                    started: None,
                    volume: Volume::default(),
                    muted: false,
                    fullscreen: false,
                    generation: 0,
                    run: 0,
                }),
                events,
            }),
            config,
            deny_play: AtomicBool::new(false),
            deny_fullscreen: AtomicBool::new(false),
        }
    }

    /// Refuse every play request, as an autoplay policy would.
    pub fn with_play_denied(self) -> Self {
        self.deny_play.store(true, Ordering::Relaxed);
        self
    }

    /// Refuse every fullscreen request.
    pub fn with_fullscreen_denied(self) -> Self {
        self.deny_fullscreen.store(true, Ordering::Relaxed);
        self
    }

    /// Change whether play requests are refused.
    pub fn set_play_denied(&self, denied: bool) {
        self.deny_play.store(denied, Ordering::Relaxed);
    }

    /// The source set on the element, natively or by an engine.
    pub fn source(&self) -> Option<String> {
        self.shared.clock().source.clone()
    }

    /// Whether the clock is running.
    pub fn is_playing(&self) -> bool {
        self.shared.clock().is_playing()
    }

    fn spawn_time_updates(&self, generation: u64, run: u64) {
        let shared = Arc::downgrade(&self.shared);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TIME_UPDATE_INTERVAL);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(shared) = shared.upgrade() else { return };

                let ended = {
                    let mut clock = shared.clock();
                    if clock.generation != generation || clock.run != run || !clock.is_playing() {
                        return;
                    }

                    let ended = clock
                        .duration
                        .is_some_and(|duration| clock.position() >= duration);
                    if ended {
                        clock.freeze();
                    }
                    ended
                };

                shared.emit(MediaEvent::TimeUpdate);
                if ended {
                    shared.emit(MediaEvent::Pause);
                    shared.emit(MediaEvent::Ended);
                    return;
                }
            }
        });
    }

    fn finish_load(shared: &Shared, generation: u64, duration: Option<f64>) {
        {
            let mut clock = shared.clock();
            if clock.generation != generation {
                return;
            }
            clock.duration = duration;
            clock.ready = true;
        }

        shared.emit(MediaEvent::LoadedMetadata);
        shared.emit(MediaEvent::CanPlay);
    }
}

impl PlaybackHandle for SimulatedElement {
    fn position(&self) -> f64 {
        self.shared.clock().position()
    }

    fn set_position(&self, seconds: f64) {
        {
            let mut clock = self.shared.clock();
            let upper = clock
                .duration
                .filter(|d| *d >= 0.0)
                .unwrap_or(f64::INFINITY);
            clock.anchor = seconds.clamp(0.0, upper);
            if clock.is_playing() {
                clock.started = Some(Instant::now());
            }
        }

        self.shared.emit(MediaEvent::Seeking);
        self.shared.emit(MediaEvent::Waiting);
        self.shared.emit(MediaEvent::Seeked);
        self.shared.emit(MediaEvent::CanPlay);
    }

    fn duration(&self) -> Option<f64> {
        self.shared.clock().duration
    }

    fn is_ready(&self) -> bool {
        self.shared.clock().ready
    }
}

#[async_trait]
impl MediaElement for SimulatedElement {
    async fn play(&self) -> Result<(), WallError> {
        if self.deny_play.load(Ordering::Relaxed) {
            return Err(WallError::PlaybackDenied(
                "play() is not allowed without user interaction".to_string(),
            ));
        }

        let (generation, run) = {
            let mut clock = self.shared.clock();
            if clock.is_playing() {
                return Ok(());
            }
            clock.started = Some(Instant::now());
            clock.run += 1;
            (clock.generation, clock.run)
        };

        self.shared.emit(MediaEvent::Play);
        self.spawn_time_updates(generation, run);
        Ok(())
    }

    fn pause(&self) {
        {
            let mut clock = self.shared.clock();
            if !clock.is_playing() {
                return;
            }
            clock.freeze();
        }

        self.shared.emit(MediaEvent::Pause);
    }

    fn is_paused(&self) -> bool {
        !self.shared.clock().is_playing()
    }

    fn volume(&self) -> Volume {
        self.shared.clock().volume
    }

    fn set_volume(&self, volume: Volume) {
        self.shared.clock().volume = volume;
    }

    fn set_muted(&self, muted: bool) {
        self.shared.clock().muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.shared.clock().muted
    }

    fn can_play_type(&self, mime: &str) -> bool {
        self.config.native_hls && mime == HLS_MIME_TYPE
    }

    fn set_source(&self, url: &str) {
        let generation = {
            let mut clock = self.shared.clock();
            clock.reset();
            clock.source = Some(url.to_string());
            clock.generation
        };

        let duration = Some(self.config.duration);
        let delay = Duration::from_millis(self.config.ready_delay_ms);

        match Handle::try_current() {
            Ok(runtime) => {
                let shared = Arc::downgrade(&self.shared);
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(shared) = shared.upgrade() {
                        Self::finish_load(&shared, generation, duration);
                    }
                });
            }
            Err(_) => Self::finish_load(&self.shared, generation, duration),
        }
    }

    fn clear_source(&self) {
        let was_playing = {
            let mut clock = self.shared.clock();
            let was_playing = clock.is_playing();
            clock.reset();
            was_playing
        };

        if was_playing {
            self.shared.emit(MediaEvent::Pause);
        }
    }

    fn open_media_source(&self, info: SourceInfo) {
        let generation = self.shared.clock().generation;
        Self::finish_load(&self.shared, generation, info.duration);
    }

    async fn request_fullscreen(&self) -> Result<(), WallError> {
        if self.deny_fullscreen.load(Ordering::Relaxed) {
            return Err(WallError::FullscreenDenied(
                "fullscreen is not allowed in this context".to_string(),
            ));
        }
        self.shared.clock().fullscreen = true;
        Ok(())
    }

    async fn exit_fullscreen(&self) -> Result<(), WallError> {
        self.shared.clock().fullscreen = false;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.shared.clock().fullscreen
    }

    fn events(&self) -> broadcast::Receiver<MediaEvent> {
        self.shared.events.subscribe()
    }
}

/// A decoding engine that "parses" HLS manifests after a fixed delay.
///
/// Non-HLS sources fail with a fatal error, as a manifest parser would.
pub struct SimulatedEngine {
    config: SimulatedConfig,
    source: Option<StreamDescriptor>,
    element: Option<Arc<dyn MediaElement>>,
    events: broadcast::Sender<EngineEvent>,
    loader: Option<JoinHandle<()>>,
    live_sessions: Arc<AtomicUsize>,
    destroyed: bool,
}

impl SimulatedEngine {
    fn start_loading(&mut self) {
        let (Some(source), Some(element)) = (self.source.clone(), self.element.clone()) else {
            return;
        };

        if let Some(previous) = self.loader.take() {
            previous.abort();
        }

        let events = self.events.clone();
        let delay = Duration::from_millis(self.config.ready_delay_ms);
        let duration = self.config.duration;

        self.loader = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if !source.is_hls() {
                let _ = events.send(EngineEvent::Error {
                    fatal: true,
                    details: format!("manifest load error: '{source}' is not an HLS playlist"),
                });
                return;
            }

            element.open_media_source(SourceInfo {
                duration: Some(duration),
            });
            debug!(%source, "manifest parsed");
            let _ = events.send(EngineEvent::ManifestParsed);
        }));
    }
}

impl DecodingEngine for SimulatedEngine {
    fn load_source(&mut self, descriptor: &StreamDescriptor) {
        self.source = Some(descriptor.clone());
        self.start_loading();
    }

    fn attach(&mut self, element: Arc<dyn MediaElement>) {
        self.element = Some(element);
        self.start_loading();
    }

    fn events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        if let Some(element) = self.element.take() {
            element.clear_source();
        }
        self.live_sessions.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Drop for SimulatedEngine {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Creates [`SimulatedEngine`]s and counts the ones not yet destroyed.
pub struct SimulatedEngineFactory {
    config: SimulatedConfig,
    live_sessions: Arc<AtomicUsize>,
}

impl SimulatedEngineFactory {
    /// Create a factory for engines configured by `config`.
    pub fn new(config: SimulatedConfig) -> Self {
        Self {
            config,
            live_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Engines created and not yet destroyed.
    pub fn live_sessions(&self) -> usize {
        self.live_sessions.load(Ordering::Relaxed)
    }
}

impl EngineFactory for SimulatedEngineFactory {
    fn is_supported(&self) -> bool {
        self.config.engine_supported
    }

    fn create(&self) -> Box<dyn DecodingEngine> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        self.live_sessions.fetch_add(1, Ordering::Relaxed);

        Box::new(SimulatedEngine {
            config: self.config.clone(),
            source: None,
            element: None,
            events,
            loader: None,
            live_sessions: Arc::clone(&self.live_sessions),
            destroyed: false,
        })
    }
}
