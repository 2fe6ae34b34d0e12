/*!
 * Signal Guards
 *
 * RAII guards over temporarily installed signal dispositions and the
 * calling thread's signal mask.
 *
 * Arming clears previously recorded events; dropping the guard restores
 * whatever was installed before, so each arming is consumed by exactly one
 * suspension. Blocking wake-ups across `fork` keeps a SIGCONT aimed at the
 * new child pending until the child has its handlers in place.
 */

use super::handlers;
use super::types::SignalResult;
use crate::core::errors::TomographyError;
use nix::sys::signal::{
    pthread_sigmask, sigaction, SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal,
};

/// At most resume, child-state and interrupt handlers are armed at once
const MAX_ARMED: usize = 3;

/// Handlers armed for the next suspension
///
/// Holds no heap allocation, so a freshly forked child can arm itself before
/// touching the allocator.
#[must_use = "dropping the guard immediately disarms the handlers"]
pub struct ArmedHandlers {
    saved: [Option<(Signal, SigAction)>; MAX_ARMED],
}

impl ArmedHandlers {
    pub(super) fn new() -> Self {
        handlers::clear_events();
        Self {
            saved: [None, None, None],
        }
    }

    /// Record SIGCONT as "resumed"
    pub fn on_resumed(self) -> SignalResult<Self> {
        let action = SigAction::new(
            SigHandler::SigAction(handlers::on_resumed),
            SaFlags::SA_SIGINFO | SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        self.install(Signal::SIGCONT, action)
    }

    /// Record SIGCHLD as "a child changed state"
    pub fn on_child_state_change(self) -> SignalResult<Self> {
        let action = SigAction::new(
            SigHandler::Handler(handlers::on_child_state_change),
            SaFlags::SA_NOCLDSTOP | SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        self.install(Signal::SIGCHLD, action)
    }

    /// Exit on SIGINT without any cleanup
    pub fn interrupt_exits(self) -> SignalResult<Self> {
        let action = SigAction::new(
            SigHandler::Handler(handlers::on_interrupt),
            SaFlags::empty(),
            SigSet::empty(),
        );
        self.install(Signal::SIGINT, action)
    }

    fn install(mut self, signal: Signal, action: SigAction) -> SignalResult<Self> {
        let slot = self
            .saved
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or_else(|| TomographyError::signal("arm", nix::errno::Errno::ENOSPC))?;

        // SAFETY: the installed handlers only touch atomics and call write(2) or _exit(2)
        let previous = unsafe { sigaction(signal, &action) }
            .map_err(|errno| TomographyError::signal("sigaction", errno))?;
        *slot = Some((signal, previous));
        Ok(self)
    }
}

impl Drop for ArmedHandlers {
    fn drop(&mut self) {
        for slot in self.saved.iter_mut().rev() {
            if let Some((signal, previous)) = slot.take() {
                // SAFETY: restores a disposition that was valid before arming
                let _ = unsafe { sigaction(signal, &previous) };
            }
        }
    }
}

/// Wake-up signals held pending on the calling thread
///
/// Covers SIGCONT and SIGINT. Dropping the guard restores the previous mask,
/// and any signal that arrived meanwhile is delivered at that point. The
/// guard survives `fork`, so the child inherits both the mask and the duty to
/// restore it.
#[must_use = "dropping the guard immediately unblocks wake-ups"]
pub struct BlockedWakeups {
    previous: SigSet,
}

impl BlockedWakeups {
    pub fn block() -> SignalResult<Self> {
        let mut wakeups = SigSet::empty();
        wakeups.add(Signal::SIGCONT);
        wakeups.add(Signal::SIGINT);

        let mut previous = SigSet::empty();
        pthread_sigmask(SigmaskHow::SIG_BLOCK, Some(&wakeups), Some(&mut previous))
            .map_err(|errno| TomographyError::signal("sigmask", errno))?;
        Ok(Self { previous })
    }
}

impl Drop for BlockedWakeups {
    fn drop(&mut self) {
        // pthread_sigmask(3) is async-signal-safe and fine in a fresh child
        let _ = pthread_sigmask(SigmaskHow::SIG_SETMASK, Some(&self.previous), None);
    }
}
