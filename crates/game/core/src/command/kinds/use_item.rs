use crate::command::{CommandBehavior, Order};
use crate::engine::{CombatEngine, CombatError};
use crate::env::SoundId;

/// Queues the consumption of one item and finishes immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct UseItemCommand;

impl CommandBehavior for UseItemCommand {
    fn start(&mut self, order: &Order, engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        match order.item {
            Some(item) => {
                engine.play_sound(SoundId::Item);
                engine.queue_item_use(order.source, item);
            }
            None => tracing::warn!(
                target: "combat::commands",
                source = %order.source,
                "UseItem executed without an item"
            ),
        }
        Ok(())
    }

    fn is_finished(&self, _order: &Order, _engine: &CombatEngine<'_>) -> bool {
        true
    }
}
