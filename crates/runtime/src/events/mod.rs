//! Topic-based event bus for runtime events.
//!
//! Combat events dispatched inside the core are republished here unchanged;
//! session-level notifications (rejected orders, item use, encounter end)
//! travel on their own topic.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::SessionEvent;
