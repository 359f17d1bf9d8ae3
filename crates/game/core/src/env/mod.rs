//! Collaborators the resolver talks to but does not own.
//!
//! Presentation (animation, audio) and decision making (AI) live outside
//! `game-core`. The [`CombatEnv`] aggregate bundles the three trait objects
//! so the engine can reach them without coupling to concrete implementations.
mod animation;
mod audio;
mod decision;

pub use animation::{AnimationKind, AnimationOracle};
pub use audio::{AudioSink, SoundId};
pub use decision::{Decision, DecisionError, DecisionProvider};

/// Aggregates the collaborators required by [`crate::engine::CombatEngine`].
pub struct CombatEnv<'a> {
    pub animation: &'a mut dyn AnimationOracle,
    pub audio: &'a mut dyn AudioSink,
    pub decisions: &'a mut dyn DecisionProvider,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        animation: &'a mut dyn AnimationOracle,
        audio: &'a mut dyn AudioSink,
        decisions: &'a mut dyn DecisionProvider,
    ) -> Self {
        Self {
            animation,
            audio,
            decisions,
        }
    }
}
