//! Runtime orchestration for turn-based encounters.
//!
//! This crate owns an encounter session and drives the `game-core` resolver
//! from the outside: it supplies the headless presentation collaborators and
//! the AI decision provider, applies item consumption through the party
//! inventory, persists the hero between encounters and runs the whole thing
//! on a background worker behind a cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`session`] owns the combat state and ticks it
//! - [`events`] provides a topic-based event bus for combat notifications
//! - [`presentation`] and [`providers`] implement the core's collaborator traits
//! - [`inventory`] and [`repository`] keep party data across encounters
pub mod api;
pub mod events;
pub mod inventory;
pub mod presentation;
pub mod providers;
pub mod repository;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{OrderProvider, PlayerOrder, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, SessionEvent, Topic};
pub use inventory::{Inventory, InventoryError, ItemStack};
pub use presentation::{LogAudio, ScriptedStage};
pub use providers::{AutoPilot, CategoryAi};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveData, SaveRepository,
    SavedStat,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{CombatantView, EncounterSession, SessionSnapshot, TickReport};
