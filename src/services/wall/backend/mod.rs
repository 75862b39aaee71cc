/// Tokio-clocked element and engine
pub mod simulated;

pub use simulated::{SimulatedElement, SimulatedEngine, SimulatedEngineFactory};
