//! Decision providers for AI-controlled combatants and party autopilot.
mod ai;
mod autopilot;

pub use ai::CategoryAi;
pub use autopilot::AutoPilot;
