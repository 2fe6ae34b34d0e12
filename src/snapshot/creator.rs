/*!
 * Snapshot Creator
 *
 * Reacts to the host's stop event by forking. The parent keeps going as
 * "the present" and records the child; the child parks until some universe
 * jumps into it.
 *
 * Wake-up signals stay blocked across the fork. The child only unblocks them
 * after its handlers are armed, so a jump that follows the stop immediately
 * still reaches it.
 */

use super::traits::{Forker, SystemForker};
use super::types::SnapshotOutcome;
use crate::core::errors::{TomographyError, TomographyResult};
use crate::core::types::{display_index, Pid, Role};
use crate::host::StopContext;
use crate::registry::{Description, UniverseRegistry, UniverseState};
use crate::signals::{
    exit_immediately, BlockedWakeups, ProcessSignaller, Reaper, SuspensionController,
};
use nix::unistd::ForkResult;
use tracing::{debug, info, warn};

/// Forks a universe at every stop and keeps the live count bounded
#[derive(Debug, Clone)]
pub struct SnapshotCreator<F = SystemForker> {
    capacity: usize,
    description_width: usize,
    forker: F,
}

impl SnapshotCreator {
    pub fn new(capacity: usize, description_width: usize) -> Self {
        Self::with_forker(capacity, description_width, SystemForker)
    }
}

impl<F: Forker> SnapshotCreator<F> {
    pub fn with_forker(capacity: usize, description_width: usize, forker: F) -> Self {
        Self {
            capacity,
            description_width,
            forker,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capture the current process as a new universe
    ///
    /// Returns twice in the OS sense: once in the parent with
    /// [`SnapshotOutcome::Recorded`], and, possibly much later, in the child
    /// with [`SnapshotOutcome::Resumed`] once it is jumped into. A failed
    /// fork leaves the registry and serial counter untouched.
    pub fn capture<C: StopContext + ?Sized>(
        &self,
        universe: &mut UniverseState,
        controller: &mut SuspensionController,
        reaper: &mut Reaper,
        context: &C,
    ) -> SnapshotOutcome {
        reaper.reap(&*controller);
        let description = Description::capture(context.location(), self.description_width);

        let blocked = match BlockedWakeups::block() {
            Ok(blocked) => blocked,
            Err(err) => {
                warn!(error = %err, "could not hold wake-ups, snapshot abandoned");
                return SnapshotOutcome::Abandoned(err);
            }
        };

        // SAFETY: the child only rebinds its wake socket, installs handlers
        // and parks before running anything else
        match unsafe { self.forker.fork() } {
            Err(errno) => {
                drop(blocked);
                warn!(error = %errno, "fork failed, snapshot abandoned");
                SnapshotOutcome::Abandoned(TomographyError::ForkFailed(errno))
            }
            Ok(ForkResult::Parent { child }) => {
                drop(blocked);
                match self.record(universe, &*controller, reaper, child, description) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        warn!(pid = %child, error = %err, "could not track snapshot, discarding it");
                        controller.terminate(child);
                        reaper.track(child);
                        SnapshotOutcome::Abandoned(err)
                    }
                }
            }
            Ok(ForkResult::Child) => self.park(universe, controller, blocked),
        }
    }

    /// Parent side of the fork: number and track the new universe
    ///
    /// The serial is consumed only once the universe is tracked.
    fn record<S: ProcessSignaller + ?Sized>(
        &self,
        universe: &mut UniverseState,
        signaller: &S,
        reaper: &mut Reaper,
        child: Pid,
        description: Description,
    ) -> TomographyResult<SnapshotOutcome> {
        // fork just handed out this pid, so whatever we still hold for it is dead
        if let Some(stale) = universe.registry.forget(child) {
            debug!(pid = %child, serial = stale.serial, "dropped stale entry for reused pid");
        }

        let serial = universe.serial + 1;
        universe.registry.insert(child, serial, description)?;
        universe.serial = serial;
        info!(
            pid = %child,
            serial,
            index = display_index(serial),
            "universe captured"
        );

        let evicted = self.evict(&mut universe.registry, signaller, reaper);
        Ok(SnapshotOutcome::Recorded {
            pid: child,
            serial,
            evicted,
        })
    }

    /// Terminate oldest universes until the live count fits the capacity
    pub fn evict<S: ProcessSignaller + ?Sized>(
        &self,
        registry: &mut UniverseRegistry,
        signaller: &S,
        reaper: &mut Reaper,
    ) -> Vec<Pid> {
        let mut evicted = Vec::new();
        while registry.len() > self.capacity {
            let Some(victim) = registry.pop_oldest() else {
                break;
            };
            signaller.terminate(victim.pid);
            reaper.track(victim.pid);
            debug!(pid = %victim.pid, serial = victim.serial, "evicted oldest universe");
            evicted.push(victim.pid);
        }
        evicted
    }

    /// Child side of the fork: wait to be jumped into
    fn park(
        &self,
        universe: &mut UniverseState,
        controller: &mut SuspensionController,
        blocked: BlockedWakeups,
    ) -> SnapshotOutcome {
        universe.role = Role::SnapshotChild;

        // A parked universe that cannot be woken is useless; leave quietly
        if controller.rebind_after_fork().is_err() {
            exit_immediately(1);
        }
        if controller.park_interruptible(blocked).is_err() {
            exit_immediately(1);
        }

        let invoker = controller.last_waker();
        universe.invoker = Some(invoker);
        // Skip ourself: the parent numbered us after the fork
        universe.serial += 1;
        info!(
            serial = universe.serial,
            invoker = %invoker,
            "parked universe resumed"
        );

        SnapshotOutcome::Resumed {
            serial: universe.serial,
            invoker,
        }
    }
}
