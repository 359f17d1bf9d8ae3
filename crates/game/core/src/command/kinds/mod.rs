//! Built-in command kinds.
//!
//! - **Animation-bound** (complete when the source's animation reports
//!   finished): [`AttackCommand`], [`HealCommand`], [`ProtectCommand`],
//!   [`FireCommand`]
//! - **Timed** (complete after a fixed elapsed time): [`DefendCommand`],
//!   [`DeathCommand`], [`TransformCommand`]
//! - **Instant**: [`UseItemCommand`]

mod attack;
mod cast;
mod death;
mod defend;
mod heal;
mod transform;
mod use_item;

pub use attack::AttackCommand;
pub use cast::{FireCommand, ProtectCommand};
pub use death::DeathCommand;
pub use defend::DefendCommand;
pub use heal::HealCommand;
pub use transform::TransformCommand;
pub use use_item::UseItemCommand;
