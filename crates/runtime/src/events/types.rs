use serde::{Deserialize, Serialize};

use game_core::{CommandKind, EntityId, ItemKind, Outcome};

/// Notifications produced by the session around the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A player order was refused before it reached the resolver.
    OrderRejected {
        source: EntityId,
        kind: CommandKind,
        code: String,
        message: String,
    },
    /// A queued item consumption was applied from the party inventory.
    ItemUsed {
        source: EntityId,
        item: ItemKind,
        remaining: u32,
    },
    /// The encounter reached victory or defeat.
    EncounterEnded { outcome: Outcome, round: u32 },
}
