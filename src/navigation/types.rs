/*!
 * Navigation Types
 */

use crate::core::types::Pid;
use nix::sys::wait::WaitStatus;

/// How control came back after a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The target ran hand-back-control and is parked again
    HandedBack { pid: Pid },
    /// The target exited; `status` is known only for our own children
    TargetDied {
        pid: Pid,
        status: Option<WaitStatus>,
    },
}

impl JumpOutcome {
    pub fn pid(&self) -> Pid {
        match self {
            JumpOutcome::HandedBack { pid } | JumpOutcome::TargetDied { pid, .. } => *pid,
        }
    }
}

/// Result of a completed jump, after reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpReport {
    pub outcome: JumpOutcome,
    /// Pids the reconciliation sweep found dead and forgot
    pub pruned: Vec<Pid>,
}
