/*!
 * Universe Navigator
 *
 * Jump protocol:
 * 1. Resolve the user-facing index to a live pid
 * 2. Arm "resumed" and "child state changed", then resume the target
 * 3. Suspend until the target hands control back or dies
 * 4. Reconcile the registry against what is actually still alive
 *
 * At most one universe is interactive at a time. This is cooperative: the
 * caller is suspended for as long as its target runs.
 */

use super::types::{JumpOutcome, JumpReport};
use crate::core::errors::{TomographyError, TomographyResult};
use crate::core::types::{serial_for_index, Pid, UniverseIndex};
use crate::registry::{UniverseRegistry, UniverseState};
use crate::signals::{ProcessSignaller, Reaper, ReturnEvent, SuspensionController};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct UniverseNavigator {
    liveness_poll: Duration,
}

impl UniverseNavigator {
    pub fn new(liveness_poll: Duration) -> Self {
        Self { liveness_poll }
    }

    /// Map a user-typed index to the pid of a live universe
    pub fn resolve(&self, registry: &UniverseRegistry, index: &str) -> TomographyResult<Pid> {
        let requested = index.trim();
        requested
            .parse::<UniverseIndex>()
            .ok()
            .and_then(serial_for_index)
            .and_then(|serial| registry.pid_of(serial))
            .ok_or_else(|| TomographyError::NoSuchUniverse(requested.to_string()))
    }

    /// Hand control to universe `index` and wait for it to come back
    ///
    /// An invalid index changes nothing.
    #[instrument(skip_all, fields(index = %index.trim()))]
    pub fn jump_to(
        &self,
        universe: &mut UniverseState,
        controller: &SuspensionController,
        reaper: &mut Reaper,
        index: &str,
    ) -> TomographyResult<JumpReport> {
        let target = self.resolve(&universe.registry, index)?;

        let armed = controller.arm().on_child_state_change()?.on_resumed()?;
        info!(pid = %target, "jumping into universe");

        let outcome = match controller.resume(target) {
            Ok(()) => match controller.wait_for_return(target, self.liveness_poll)? {
                ReturnEvent::HandedBack => {
                    info!(pid = %target, "universe handed control back");
                    JumpOutcome::HandedBack { pid: target }
                }
                ReturnEvent::Died(status) => {
                    info!(pid = %target, ?status, "universe exited");
                    JumpOutcome::TargetDied {
                        pid: target,
                        status,
                    }
                }
            },
            Err(err) => {
                warn!(pid = %target, error = %err, "could not resume universe");
                JumpOutcome::TargetDied {
                    pid: target,
                    status: None,
                }
            }
        };
        drop(armed);

        if let JumpOutcome::TargetDied { pid, .. } = outcome {
            universe.registry.forget(pid);
        }
        let pruned = self.reconcile(&mut universe.registry, controller);
        reaper.reap(controller);

        Ok(JumpReport { outcome, pruned })
    }

    /// Forget every tracked universe that is no longer alive
    ///
    /// Scans newest to oldest. Repairs drift from universes that died without
    /// this process being told.
    pub fn reconcile<S: ProcessSignaller + ?Sized>(
        &self,
        registry: &mut UniverseRegistry,
        signaller: &S,
    ) -> Vec<Pid> {
        let dead: Vec<Pid> = registry
            .pids()
            .rev()
            .filter(|pid| !signaller.probe(*pid).is_alive())
            .collect();

        for pid in &dead {
            registry.forget(*pid);
            debug!(pid = %pid, "forgot dead universe");
        }
        dead
    }

    /// Resume whoever jumped into this universe, then park until resumed again
    pub fn hand_back(
        &self,
        universe: &mut UniverseState,
        controller: &SuspensionController,
    ) -> TomographyResult<Pid> {
        let invoker = universe.invoker.ok_or(TomographyError::NotNavigated)?;

        let armed = controller.arm().on_resumed()?;
        controller.resume(invoker)?;
        info!(invoker = %invoker, "handed control back");
        let waker = controller.park_until_resumed()?;
        drop(armed);

        universe.invoker = Some(waker.unwrap_or(invoker));
        info!(invoker = ?universe.invoker, "universe resumed again");
        Ok(invoker)
    }
}
