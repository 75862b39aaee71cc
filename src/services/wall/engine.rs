use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use super::{MediaElement, StreamDescriptor, StreamIndex};

/// Notifications from an adaptive-streaming decoding engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The manifest was fetched and parsed; the stream is playable.
    ManifestParsed,
    /// Loading or decoding failed.
    Error {
        /// Whether the engine gave up on the stream
        fatal: bool,
        /// Engine-provided description
        details: String,
    },
}

/// An adaptive-streaming decoder that feeds one media element.
///
/// Stream acquisition, manifest parsing and segment buffering all happen
/// behind this trait.
pub trait DecodingEngine: Send + Sync {
    /// Start loading the given source.
    fn load_source(&mut self, descriptor: &StreamDescriptor);

    /// Bind the engine's output to a media element.
    fn attach(&mut self, element: Arc<dyn MediaElement>);

    /// Subscribe to engine events.
    fn events(&self) -> broadcast::Receiver<EngineEvent>;

    /// Stop all work and detach from the element. Must be idempotent.
    fn destroy(&mut self);
}

/// Creates decoding engines.
pub trait EngineFactory: Send + Sync {
    /// Whether the engine can run in this environment at all.
    fn is_supported(&self) -> bool;

    /// Create a fresh, unattached engine.
    fn create(&self) -> Box<dyn DecodingEngine>;
}

/// An engine bound to one element for the lifetime of a mount.
///
/// The engine is destroyed when the session is closed or dropped, so a
/// controller can never leak a decode session.
pub struct EngineSession {
    stream: StreamIndex,
    engine: Option<Box<dyn DecodingEngine>>,
}

impl EngineSession {
    /// Create an engine, subscribe to it, load `descriptor` and attach
    /// `element`.
    ///
    /// The subscription is taken before loading so no readiness signal can
    /// be missed.
    pub fn open(
        factory: &dyn EngineFactory,
        stream: StreamIndex,
        descriptor: &StreamDescriptor,
        element: Arc<dyn MediaElement>,
    ) -> (Self, broadcast::Receiver<EngineEvent>) {
        let mut engine = factory.create();
        let events = engine.events();

        engine.load_source(descriptor);
        engine.attach(element);
        debug!(%stream, %descriptor, "engine session opened");

        let session = Self {
            stream,
            engine: Some(engine),
        };

        (session, events)
    }

    /// Whether the engine is still alive.
    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Destroy the engine now. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
            debug!(stream = %self.stream, "engine session closed");
        }
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.close();
    }
}
