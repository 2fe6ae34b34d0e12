/*!
 * Core Types
 * Common types used across the tomography core
 */

use std::fmt;

/// OS process identifier of a universe
pub use nix::unistd::Pid;

/// One-based, monotonically increasing universe identifier
pub type Serial = u64;

/// Zero-based universe number shown to the user
pub type UniverseIndex = u64;

/// Convert an internal serial into the index the user sees
#[inline]
#[must_use]
pub const fn display_index(serial: Serial) -> UniverseIndex {
    serial.saturating_sub(1)
}

/// Convert a user-facing index back into a serial
///
/// Returns `None` when the index is at the very top of the range.
#[inline]
#[must_use]
pub const fn serial_for_index(index: UniverseIndex) -> Option<Serial> {
    index.checked_add(1)
}

/// Which side of a fork this process is on
///
/// Fixed for the lifetime of a process: only the child branch of a snapshot
/// fork ever starts life as [`Role::SnapshotChild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The original process that began the session
    Root,
    /// A forked process representing a captured past state
    SnapshotChild,
}

impl Role {
    #[inline]
    pub fn is_snapshot_child(&self) -> bool {
        matches!(self, Role::SnapshotChild)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Root => write!(f, "root"),
            Role::SnapshotChild => write!(f, "snapshot"),
        }
    }
}
