use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError};
use crate::env::{AnimationKind, SoundId};

/// Restores life and mana to every target as soon as the cast begins.
#[derive(Clone, Debug)]
pub struct HealCommand {
    life: f32,
    mana: f32,
}

impl HealCommand {
    pub fn new(life: f32, mana: f32) -> Self {
        Self { life, mana }
    }
}

impl CommandBehavior for HealCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.play_animation(order.source, AnimationKind::Cast);
        engine.play_sound(SoundId::Heal);
        for &target in &order.targets {
            engine.heal(order.source, target, self.life, self.mana);
        }
        Ok(())
    }

    fn is_finished(&self, order: &Order, engine: &CombatEngine<'_>) -> bool {
        engine.animation_finished(order.source)
    }
}
