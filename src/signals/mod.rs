/*!
 * Signals Module
 * Suspension, resumption, and termination of universe processes
 *
 * Control moves between universes strictly ping-pong: the caller arms its
 * handlers, resumes exactly one peer, and suspends until that peer hands
 * control back or dies.
 */

mod controller;
mod guard;
mod handlers;
mod reaper;
pub mod traits;
pub mod types;

// Re-export public API
pub use controller::SuspensionController;
pub use guard::{ArmedHandlers, BlockedWakeups};
pub use handlers::exit_immediately;
pub use reaper::Reaper;
pub use traits::ProcessSignaller;
pub use types::{Liveness, ReturnEvent, SignalResult, WakeEvent};
