use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, instrument, warn};

use super::backend::{SimulatedElement, SimulatedEngineFactory};
use super::{
    EngineFactory, HandleSlots, MediaElement, PlaybackState, PlayerController, StreamDescriptor,
    StreamIndex, SyncCoordinator, SyncReport, Tolerance, WallError,
};
use crate::config::Config;

/// A fixed grid of players sharing one sync coordinator.
///
/// Player `i` shows descriptor `i` and registers its element in slot `i`;
/// slot 0 is the reference clock.
pub struct VideoWall<E: MediaElement + 'static> {
    controllers: Vec<PlayerController<E>>,
    coordinator: SyncCoordinator,
}

impl<E: MediaElement + 'static> VideoWall<E> {
    /// Build an unmounted wall, one controller per descriptor.
    ///
    /// `make_element` is called once per player, in index order.
    pub fn new(
        descriptors: Vec<StreamDescriptor>,
        tolerance: Tolerance,
        factory: Arc<dyn EngineFactory>,
        mut make_element: impl FnMut(StreamIndex, &StreamDescriptor) -> Arc<E>,
    ) -> Self {
        let slots = HandleSlots::with_len(descriptors.len());

        let controllers = descriptors
            .into_iter()
            .enumerate()
            .map(|(i, descriptor)| {
                let index = StreamIndex::new(i);
                let element = make_element(index, &descriptor);
                PlayerController::new(
                    index,
                    descriptor,
                    element,
                    Arc::clone(&factory),
                    slots.clone(),
                )
            })
            .collect();

        Self {
            controllers,
            coordinator: SyncCoordinator::new(slots, tolerance),
        }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether the wall has no players.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// All controllers, in slot order.
    pub fn controllers(&self) -> &[PlayerController<E>] {
        &self.controllers
    }

    /// Controller for slot `index`.
    pub fn controller(&self, index: StreamIndex) -> Option<&PlayerController<E>> {
        self.controllers.get(index.get())
    }

    /// Mutable controller for slot `index`.
    pub fn controller_mut(&mut self, index: StreamIndex) -> Option<&mut PlayerController<E>> {
        self.controllers.get_mut(index.get())
    }

    /// The coordinator shared by every player.
    pub fn coordinator(&self) -> &SyncCoordinator {
        &self.coordinator
    }

    /// Slots the players register in.
    pub fn slots(&self) -> &HandleSlots {
        self.coordinator.slots()
    }

    /// Mount every player.
    #[instrument(skip(self), fields(players = self.controllers.len()))]
    pub fn mount_all(&mut self) {
        for controller in &mut self.controllers {
            controller.mount();
        }
        info!(attached = self.slots().present_count(), "wall mounted");
    }

    /// The global sync trigger: align every player to the reference.
    pub fn sync_all(&self) -> SyncReport {
        self.coordinator.synchronize()
    }

    /// Start playback on every player.
    pub async fn play_all(&self) {
        join_all(self.controllers.iter().map(PlayerController::play)).await;
    }

    /// Pause every player.
    pub fn pause_all(&self) {
        for controller in &self.controllers {
            controller.pause();
        }
    }

    /// Wait until every player has left the loading state.
    ///
    /// Returns `false` if `timeout` elapses first.
    pub async fn wait_until_ready(&self, timeout: Duration) -> bool {
        let ready = join_all(self.controllers.iter().map(|controller| {
            controller
                .view()
                .state
                .wait_for(|state| state.accepts_transport() || *state == PlaybackState::TornDown)
        }));

        match tokio::time::timeout(timeout, ready).await {
            Ok(_) => true,
            Err(_) => {
                let pending = self
                    .controllers
                    .iter()
                    .filter(|c| !c.view().state.get().accepts_transport())
                    .count();
                warn!(pending, ?timeout, "players not ready in time");
                false
            }
        }
    }

    /// Tear every player down, destroying engines and emptying the slots.
    #[instrument(skip(self))]
    pub fn teardown_all(&mut self) {
        for controller in &mut self.controllers {
            controller.teardown();
        }
        info!("wall torn down");
    }
}

impl VideoWall<SimulatedElement> {
    /// Build an unmounted wall from `config` on the simulated backend.
    ///
    /// # Errors
    /// Returns [`WallError::InvalidTolerance`] when the configured tolerance
    /// is negative or not finite.
    pub fn simulated(config: &Config) -> Result<Self, WallError> {
        let tolerance = Tolerance::try_from(&config.sync)?;
        let backend = config.backend.simulated.clone();
        let factory: Arc<dyn EngineFactory> = Arc::new(SimulatedEngineFactory::new(backend.clone()));

        let descriptors = config
            .wall
            .streams
            .iter()
            .map(StreamDescriptor::new)
            .collect();

        Ok(Self::new(descriptors, tolerance, factory, |_, _| {
            Arc::new(SimulatedElement::new(backend.clone()))
        }))
    }
}
