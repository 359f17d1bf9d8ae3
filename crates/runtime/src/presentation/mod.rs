//! Headless presentation collaborators.
//!
//! The terminal client and the tests have no renderer or mixer; these
//! implementations stand in for them with simulated clip timing and log
//! output.
mod audio;
mod stage;

pub use audio::LogAudio;
pub use stage::ScriptedStage;
