/*!
 * Session Module
 * One process's view of the multiverse, wired to the host hooks
 */

mod config;
mod multiverse;

// Re-export public API
pub use config::TomographyConfig;
pub use multiverse::Multiverse;
