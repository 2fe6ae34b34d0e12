/*!
 * Registry Module
 * Per-process universe bookkeeping
 */

mod registry;
mod state;
pub mod types;

// Re-export public API
pub use registry::UniverseRegistry;
pub use state::UniverseState;
pub use types::{Description, ForgottenUniverse, UniverseEntry};
