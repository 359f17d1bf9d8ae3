//! Public API surface for runtime consumers.
//!
//! Re-exports the handle, the error types and the order provider seam.
mod errors;
mod handle;
mod provider;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use provider::{OrderProvider, PlayerOrder};
