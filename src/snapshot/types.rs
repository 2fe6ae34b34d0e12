/*!
 * Snapshot Types
 */

use crate::core::errors::TomographyError;
use crate::core::types::{Pid, Serial};

/// What a stop event did to this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Parent side: a new universe is parked and tracked
    Recorded {
        pid: Pid,
        serial: Serial,
        evicted: Vec<Pid>,
    },
    /// Child side: this process was a parked universe and has just been
    /// jumped into
    Resumed { serial: Serial, invoker: Pid },
    /// Forking failed; the registry is unchanged
    Abandoned(TomographyError),
    /// Snapshot-on-stop is switched off
    Disabled,
}

impl SnapshotOutcome {
    pub fn is_resumed(&self) -> bool {
        matches!(self, SnapshotOutcome::Resumed { .. })
    }
}
