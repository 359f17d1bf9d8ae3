use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError};
use crate::env::{AnimationKind, SoundId};
use crate::state::StatKind;

/// Boss phase change.
///
/// Starting the transformation consumes one phase and restores a fraction
/// of max life plus full mana. The visual morph runs for the full duration.
#[derive(Clone, Debug)]
pub struct TransformCommand {
    duration: f32,
    life_fraction: f32,
}

impl TransformCommand {
    pub fn new(duration: f32, life_fraction: f32) -> Self {
        Self {
            duration,
            life_fraction,
        }
    }
}

impl CommandBehavior for TransformCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        if let Some(boss) = engine.roster_mut().get_mut(order.source) {
            boss.phases = boss.phases.saturating_sub(1);
            let max_life = boss.stats.total(StatKind::MaxLife);
            let max_mana = boss.stats.total(StatKind::MaxMana);
            boss.stats.set(StatKind::Life, max_life * self.life_fraction);
            boss.stats.set(StatKind::Mana, max_mana);
        }
        engine.play_animation(order.source, AnimationKind::Transform);
        engine.play_sound(SoundId::Transform);
        Ok(())
    }

    fn is_finished(&self, order: &Order, _engine: &CombatEngine<'_>) -> bool {
        order.elapsed() >= self.duration
    }
}
