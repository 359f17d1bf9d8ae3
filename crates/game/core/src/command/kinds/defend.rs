use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError};
use crate::env::{AnimationKind, SoundId};

/// Braces for a fixed duration. No terminal effect.
#[derive(Clone, Debug)]
pub struct DefendCommand {
    duration: f32,
}

impl DefendCommand {
    pub fn new(duration: f32) -> Self {
        Self { duration }
    }
}

impl CommandBehavior for DefendCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.play_animation(order.source, AnimationKind::Defend);
        engine.play_sound(SoundId::Defend);
        Ok(())
    }

    fn is_finished(&self, order: &Order, _engine: &CombatEngine<'_>) -> bool {
        order.elapsed() >= self.duration
    }
}
