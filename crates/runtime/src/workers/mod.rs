//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the encounter session; everything else talks
//! to it through channels.

mod simulation;

pub use simulation::{Command, SimulationWorker};
