use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError};
use crate::env::{AnimationKind, SoundId};

/// Fades the source out, then removes it from the encounter.
#[derive(Clone, Debug)]
pub struct DeathCommand {
    fade: f32,
}

impl DeathCommand {
    pub fn new(fade: f32) -> Self {
        Self { fade }
    }
}

impl CommandBehavior for DeathCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.play_animation(order.source, AnimationKind::Death);
        engine.play_sound(SoundId::Death);
        Ok(())
    }

    fn is_finished(&self, order: &Order, _engine: &CombatEngine<'_>) -> bool {
        order.elapsed() >= self.fade
    }

    fn on_finish(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.remove_combatant(order.source);
        Ok(())
    }
}
