use std::future;
use std::sync::Weak;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

use super::PlayerView;
use crate::services::wall::{
    EngineEvent, MediaElement, MediaEvent, PlaybackState, StreamIndex, WallError,
};

/// Which signal marks the player ready.
pub(crate) enum Readiness {
    /// The decoding engine's manifest-parsed event
    Engine(broadcast::Receiver<EngineEvent>),
    /// The element's own loaded-metadata event
    Native,
    /// No playback path; the player never becomes ready
    Never,
}

enum Next {
    Media(Result<MediaEvent, RecvError>),
    Engine(Result<EngineEvent, RecvError>),
}

/// Projects element and engine events onto a [`PlayerView`].
pub(crate) struct PlayerMonitor;

impl PlayerMonitor {
    /// Spawn the monitor task for one player.
    ///
    /// The task holds only weak references and ends on its own once the
    /// view or the element is dropped, or the element's event channel
    /// closes.
    pub(crate) fn start<E: MediaElement + 'static>(
        stream: StreamIndex,
        view: Weak<PlayerView>,
        element: Weak<E>,
        media_events: broadcast::Receiver<MediaEvent>,
        readiness: Readiness,
    ) -> JoinHandle<()> {
        debug!(%stream, "starting player monitor");

        tokio::spawn(async move {
            Self::monitor(stream, view, element, media_events, readiness).await;
        })
    }

    #[instrument(skip_all, fields(%stream))]
    async fn monitor<E: MediaElement + 'static>(
        stream: StreamIndex,
        view: Weak<PlayerView>,
        element: Weak<E>,
        mut media_events: broadcast::Receiver<MediaEvent>,
        readiness: Readiness,
    ) {
        let native = matches!(readiness, Readiness::Native);
        let mut engine_events = match readiness {
            Readiness::Engine(rx) => Some(rx),
            Readiness::Native | Readiness::Never => None,
        };

        loop {
            let engine_next = async {
                match engine_events.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => future::pending().await,
                }
            };

            let next = tokio::select! {
                event = media_events.recv() => Next::Media(event),
                event = engine_next => Next::Engine(event),
            };

            match next {
                Next::Media(Ok(event)) => {
                    let (Some(view), Some(element)) = (view.upgrade(), element.upgrade()) else {
                        break;
                    };
                    Self::on_media_event(&view, element.as_ref(), &event, native);
                }
                Next::Media(Err(RecvError::Lagged(skipped))) => {
                    trace!(skipped, "media events lagged");
                    if let (Some(view), Some(element)) = (view.upgrade(), element.upgrade()) {
                        Self::refresh_clock(&view, element.as_ref());
                    }
                }
                Next::Media(Err(RecvError::Closed)) => break,
                Next::Engine(Ok(event)) => {
                    let (Some(view), Some(element)) = (view.upgrade(), element.upgrade()) else {
                        break;
                    };
                    Self::on_engine_event(&view, element.as_ref(), stream, event);
                }
                Next::Engine(Err(RecvError::Lagged(skipped))) => {
                    trace!(skipped, "engine events lagged");
                }
                Next::Engine(Err(RecvError::Closed)) => {
                    debug!("engine event stream closed");
                    engine_events = None;
                }
            }
        }

        debug!("player monitor ended");
    }

    fn on_engine_event<E: MediaElement>(
        view: &PlayerView,
        element: &E,
        stream: StreamIndex,
        event: EngineEvent,
    ) {
        match event {
            EngineEvent::ManifestParsed => {
                Self::refresh_clock(view, element);
                view.loading.set(false);
                view.transition(PlaybackState::Ready);
                debug!(%stream, "manifest parsed");
            }
            EngineEvent::Error { fatal, details } => {
                let error = WallError::Engine { stream, details };
                warn!(fatal, "{error}");
            }
        }
    }

    fn on_media_event<E: MediaElement>(
        view: &PlayerView,
        element: &E,
        event: &MediaEvent,
        native: bool,
    ) {
        trace!(?event, "media event");

        match event {
            MediaEvent::LoadedMetadata => {
                Self::refresh_clock(view, element);
                if native {
                    view.loading.set(false);
                    view.transition(PlaybackState::Ready);
                }
            }
            MediaEvent::TimeUpdate | MediaEvent::Seeked => Self::refresh_clock(view, element),
            MediaEvent::Play => {
                view.playing.set(true);
                view.transition(PlaybackState::Playing);
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                view.playing.set(false);
                view.transition(PlaybackState::Paused);
                Self::refresh_clock(view, element);
            }
            MediaEvent::Waiting => view.loading.set(true),
            MediaEvent::CanPlay => view.loading.set(false),
            MediaEvent::Seeking => {}
            MediaEvent::Error(details) => warn!("media element error: {details}"),
        }
    }

    fn refresh_clock<E: MediaElement>(view: &PlayerView, element: &E) {
        view.current_time.set(element.position());
        if let Some(duration) = element.duration() {
            view.duration.set(Some(duration));
        }
    }
}
