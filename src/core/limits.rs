/*!
 * Tomography Limits and Constants
 *
 * Centralized location for defaults, thresholds, and environment keys.
 */

use std::time::Duration;

// =============================================================================
// UNIVERSE BOOKKEEPING
// =============================================================================

/// Maximum number of live snapshot processes kept per session
/// Each snapshot is a full OS process, so this bounds process table usage
pub const DEFAULT_UNIVERSE_CAPACITY: usize = 100;

/// Source locations in universe descriptions keep only their last 75 characters
pub const DEFAULT_DESCRIPTION_WIDTH: usize = 75;

// =============================================================================
// PROMPT
// =============================================================================

/// Prompt label used before any snapshot is taken
pub const DEFAULT_PROMPT_PREFIX: &str = "tdb";

// =============================================================================
// NAVIGATION
// =============================================================================

/// How often a suspended jumper re-checks that its target is still alive
/// Targets that are not our direct children never raise SIGCHLD
pub const DEFAULT_LIVENESS_POLL: Duration = Duration::from_millis(250);

/// Scratch buffer for draining wake-up bytes from the notification socket
pub const WAKE_DRAIN_BUFFER: usize = 64;

// =============================================================================
// ENVIRONMENT
// =============================================================================

pub const ENV_ENABLED: &str = "TOMOGRAPHY_ENABLED";
pub const ENV_CAPACITY: &str = "TOMOGRAPHY_CAPACITY";
pub const ENV_DESCRIPTION_WIDTH: &str = "TOMOGRAPHY_DESCRIPTION_WIDTH";
pub const ENV_PROMPT: &str = "TOMOGRAPHY_PROMPT";
pub const ENV_POLL_MS: &str = "TOMOGRAPHY_POLL_MS";
pub const ENV_TRACE_JSON: &str = "TOMOGRAPHY_TRACE_JSON";

/// Log filter used when RUST_LOG is unset
/// Kept quiet so diagnostics do not interleave with the interactive prompt
pub const DEFAULT_LOG_FILTER: &str = "warn";
