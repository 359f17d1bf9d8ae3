//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, the combat core and
//! the inventory so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{CombatError, EntityId, OrderError};

pub use crate::inventory::InventoryError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("player order provider not set")]
    ProviderNotSet,

    #[error("save repository not configured")]
    RepositoryNotSet,

    #[error("runtime requires an encounter session before building")]
    MissingSession,

    #[error("encounter has no player-controlled combatant")]
    NoHero,

    #[error("{0} has nothing to order")]
    NotAwaitingOrder(EntityId),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
