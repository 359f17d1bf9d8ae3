//! Turn-based combat resolution shared by the runtime and offline tools.
//!
//! `game-core` owns the rules of an encounter: combatant records, the
//! poolable [`Command`] and [`Buff`] units, the synchronous [`EventDispatcher`]
//! and the tick-driven resolver exposed through [`engine::CombatEngine`].
//! Presentation, decision making and persistence stay outside the crate and
//! are reached through the collaborator traits in [`env`].
pub mod buff;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use buff::{Buff, BuffBehavior, BuffKind, BuffPool, ProtectBuff};
pub use command::{
    AiCategory, Command, CommandBehavior, CommandKind, CommandPool, CommandProfile, Order,
    TargetPolicy,
};
pub use config::CombatConfig;
pub use engine::{CombatEngine, CombatError, Damage, OrderError};
pub use env::{
    AnimationKind, AnimationOracle, AudioSink, CombatEnv, Decision, DecisionError,
    DecisionProvider, SoundId,
};
pub use error::{CombatFault, ErrorSeverity};
pub use event::{CombatEvent, EventDispatcher, EventKind, ObserverId, Subscriber};
pub use state::{
    CombatState, Combatant, CombatantTemplate, EntityId, InFlight, ItemKind, ItemUse, Outcome,
    Roster, StatKind, StatSheet, Stats, TurnPhase, TurnState,
};
