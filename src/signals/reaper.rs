/*!
 * Snapshot Reaper
 * Collects exit statuses of snapshots we terminated without waiting
 *
 * Eviction and shutdown only send SIGTERM. Until reaped, a terminated child
 * lingers as a zombie and still answers the zero-signal liveness probe, so
 * terminated pids are tracked here and reaped without blocking.
 */

use super::traits::ProcessSignaller;
use crate::core::types::Pid;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Reaper {
    pending: Vec<Pid>,
}

impl Reaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a pid that was sent SIGTERM
    pub fn track(&mut self, pid: Pid) {
        if !self.pending.contains(&pid) {
            self.pending.push(pid);
        }
    }

    /// Reap every tracked pid that has exited; returns how many were collected
    pub fn reap<S: ProcessSignaller + ?Sized>(&mut self, signaller: &S) -> usize {
        let before = self.pending.len();
        self.pending.retain(|pid| {
            let liveness = signaller.probe(*pid);
            if !liveness.is_alive() {
                debug!(pid = %pid, ?liveness, "reaped terminated snapshot");
            }
            liveness.is_alive()
        });
        before - self.pending.len()
    }

    pub fn pending(&self) -> &[Pid] {
        &self.pending
    }
}
