//! Physical attack.

use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError, Damage};
use crate::env::{AnimationKind, SoundId};
use crate::state::StatKind;

/// Strikes every target once with the source's total physical damage.
///
/// The hit lands when the elapsed time reaches the impact delay, or when
/// the attack animation finishes first. Either way it lands exactly once.
#[derive(Clone, Debug)]
pub struct AttackCommand {
    impact_delay: f32,
    struck: bool,
}

impl AttackCommand {
    pub fn new(impact_delay: f32) -> Self {
        Self {
            impact_delay,
            struck: false,
        }
    }

    fn strike(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        if self.struck {
            return Ok(());
        }
        self.struck = true;

        let Some(physical) = engine.roster().stat(order.source, StatKind::PhysicalDamage) else {
            return Ok(());
        };
        for &target in &order.targets {
            engine.deal_damage(order.source, target, Damage::physical(physical))?;
        }
        Ok(())
    }
}

impl CommandBehavior for AttackCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        engine.play_animation(order.source, AnimationKind::Attack);
        engine.play_sound(SoundId::Attack);
        Ok(())
    }

    fn per_update(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        if order.elapsed() >= self.impact_delay {
            self.strike(order, engine)?;
        }
        Ok(())
    }

    fn is_finished(&self, order: &Order, engine: &CombatEngine<'_>) -> bool {
        engine.animation_finished(order.source)
    }

    fn on_finish(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        self.strike(order, engine)
    }

    fn reset(&mut self) {
        self.struck = false;
    }
}
