//! Scene data: the static triangle geometry and the per-frame simulation state.

mod geometry;
mod simulation;

pub use geometry::{GeometryError, GeometryStore, Vertex2D, ARROW};
pub use simulation::{SimulationConfig, SimulationState};
