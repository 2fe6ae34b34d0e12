/*!
 * Signal Types
 * Wake-up events and liveness results
 */

use crate::core::errors::TomographyError;
use nix::sys::wait::WaitStatus;

/// Signal operation result
pub type SignalResult<T> = Result<T, TomographyError>;

/// Notification observed by a suspended process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeEvent {
    /// SIGCONT arrived: someone handed control to us
    Resumed,
    /// SIGCHLD arrived: one of our children changed state
    ChildStateChanged,
}

/// Result of probing a tracked pid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    /// Our child exited and has just been reaped
    Exited(WaitStatus),
    /// Not our child, and the zero signal says it no longer exists
    Gone,
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        matches!(self, Liveness::Alive)
    }
}

/// How a jump target gave control back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnEvent {
    HandedBack,
    /// `None` when the target was not our child and could not be reaped
    Died(Option<WaitStatus>),
}
