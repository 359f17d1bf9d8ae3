use async_trait::async_trait;

use game_core::EntityId;

use super::CategoryAi;
use crate::api::{OrderProvider, PlayerOrder, Result};
use crate::session::SessionSnapshot;

/// Plays the party with the same rules as the opponents.
///
/// Falls back to Defend when the AI finds nothing to do, like the resolver
/// does for AI-controlled combatants.
#[derive(Clone, Debug, Default)]
pub struct AutoPilot {
    ai: CategoryAi,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderProvider for AutoPilot {
    async fn provide_order(
        &self,
        actor: EntityId,
        snapshot: &SessionSnapshot,
    ) -> Result<PlayerOrder> {
        let order = match self.ai.choose(actor, &snapshot.combatants) {
            Ok(decision) => PlayerOrder {
                source: actor,
                kind: decision.kind,
                targets: decision.targets,
                item: decision.item,
            },
            Err(_) => PlayerOrder::new(actor, game_core::CommandKind::Defend, Vec::new()),
        };
        Ok(order)
    }
}
