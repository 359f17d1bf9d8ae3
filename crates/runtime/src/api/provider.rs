//! Player order seam.

use async_trait::async_trait;

use game_core::{CommandKind, EntityId, ItemKind};

use super::errors::Result;
use crate::session::SessionSnapshot;

/// An order for one party member, as submitted by a frontend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerOrder {
    pub source: EntityId,
    pub kind: CommandKind,
    pub targets: Vec<EntityId>,
    pub item: Option<ItemKind>,
}

impl PlayerOrder {
    pub fn new(source: EntityId, kind: CommandKind, targets: Vec<EntityId>) -> Self {
        Self {
            source,
            kind,
            targets,
            item: None,
        }
    }

    pub fn use_item(source: EntityId, item: ItemKind) -> Self {
        Self {
            source,
            kind: CommandKind::UseItem,
            targets: Vec::new(),
            item: Some(item),
        }
    }
}

/// Produces orders for party members when the resolver waits for them.
///
/// Implemented by frontends (terminal prompts, scripted tests) and by
/// [`crate::providers::AutoPilot`].
#[async_trait]
pub trait OrderProvider: Send + Sync {
    async fn provide_order(&self, actor: EntityId, snapshot: &SessionSnapshot)
    -> Result<PlayerOrder>;
}
