/*!
 * Lifecycle Module
 * Session-end semantics for root and snapshot universes
 */

mod manager;

pub use manager::{LifecycleManager, ShutdownReport};
