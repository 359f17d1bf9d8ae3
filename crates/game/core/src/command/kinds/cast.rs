//! Spell casts that resolve when the cast animation ends.

use crate::buff::BuffKind;
use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError, Damage};
use crate::env::{AnimationKind, SoundId};
use crate::state::StatKind;

/// Wraps every target in the Protect buff.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProtectCommand;

impl CommandBehavior for ProtectCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.play_animation(order.source, AnimationKind::Cast);
        Ok(())
    }

    fn is_finished(&self, order: &Order, engine: &CombatEngine<'_>) -> bool {
        engine.animation_finished(order.source)
    }

    fn on_finish(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        for &target in &order.targets {
            engine.attach_buff(target, BuffKind::Protect)?;
        }
        Ok(())
    }
}

/// Burns every target with the source's magic damage plus a flat bonus.
#[derive(Clone, Debug)]
pub struct FireCommand {
    bonus: f32,
}

impl FireCommand {
    pub fn new(bonus: f32) -> Self {
        Self { bonus }
    }
}

impl CommandBehavior for FireCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.play_animation(order.source, AnimationKind::Cast);
        engine.play_sound(SoundId::Fire);
        Ok(())
    }

    fn is_finished(&self, order: &Order, engine: &CombatEngine<'_>) -> bool {
        engine.animation_finished(order.source)
    }

    fn on_finish(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        let Some(magic) = engine.roster().stat(order.source, StatKind::MagicDamage) else {
            return Ok(());
        };
        for &target in &order.targets {
            engine.deal_damage(order.source, target, Damage::magic(magic + self.bonus))?;
        }
        Ok(())
    }
}
