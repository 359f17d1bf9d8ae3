//! Data-driven combat content and loaders.
//!
//! This crate houses static content definitions and loaders for RON/TOML data files:
//! - Encounter rosters (data-driven via RON)
//! - Item catalogs: consumable effects and gear bonuses (data-driven via RON)
//! - Combat tuning (data-driven via TOML)
//!
//! Content is consumed by the runtime when it sets up an encounter and never
//! appears in combat state directly.

pub mod items;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use items::{ItemCatalog, ItemDefinition, ItemEffect};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EncounterLoader, EncounterSpec, ItemLoader};
