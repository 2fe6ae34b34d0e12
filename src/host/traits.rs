/*!
 * Host Traits
 */

use super::types::SourceLocation;

/// Execution context passed to the stop-event hook
///
/// Must stay stable for the duration of the hook so a description can be
/// formatted from it.
pub trait StopContext {
    /// Current source location
    fn location(&self) -> SourceLocation;
}

impl StopContext for SourceLocation {
    fn location(&self) -> SourceLocation {
        self.clone()
    }
}
