/*!
 * Lifecycle Manager
 *
 * Runs on the host's session-ending hook, before teardown:
 * - a snapshot child leaves every other universe alone; its registry copy is
 *   stale and it has no authority over siblings it cannot observe
 * - the root terminates every tracked universe and clears its registry
 */

use crate::core::types::Pid;
use crate::registry::UniverseState;
use crate::signals::{ProcessSignaller, Reaper};
use tracing::info;

/// What session end did to the other universes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReport {
    /// Snapshot child: only this process goes away
    Detached,
    /// Root: these pids were sent SIGTERM
    Terminated { pids: Vec<Pid> },
}

#[derive(Debug, Clone, Default)]
pub struct LifecycleManager;

impl LifecycleManager {
    pub fn new() -> Self {
        Self
    }

    pub fn on_session_end<S: ProcessSignaller + ?Sized>(
        &self,
        universe: &mut UniverseState,
        signaller: &S,
        reaper: &mut Reaper,
    ) -> ShutdownReport {
        if universe.is_snapshot_child() {
            info!("snapshot universe ending, leaving other universes alone");
            return ShutdownReport::Detached;
        }

        let pids: Vec<Pid> = universe.registry.pids().collect();
        for pid in &pids {
            signaller.terminate(*pid);
            reaper.track(*pid);
        }
        universe.registry.clear();
        reaper.reap(signaller);

        info!(count = pids.len(), "terminated all tracked universes");
        ShutdownReport::Terminated { pids }
    }
}
