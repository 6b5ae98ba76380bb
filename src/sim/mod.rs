pub mod alerts;
pub mod constants;
pub mod controls;
pub mod simulation_loop;
pub mod state;
pub mod systems;
pub mod view;

pub use simulation_loop::{LoopSettings, SimulationLoop, StepOutcome, TelemetrySink};
