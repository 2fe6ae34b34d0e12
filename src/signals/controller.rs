/*!
 * Suspension Controller
 *
 * Thin wrapper over fork-safe signal primitives:
 * - suspend until an armed notification arrives
 * - resume, terminate, and probe peer universes
 *
 * Wake-ups travel through a per-process Unix socket pair written by the
 * signal handlers. Arming happens before the peer is resumed, so a
 * notification that races ahead of the suspension is never lost.
 */

use super::guard::{ArmedHandlers, BlockedWakeups};
use super::handlers;
use super::traits::ProcessSignaller;
use super::types::{Liveness, ReturnEvent, SignalResult, WakeEvent};
use crate::core::errors::TomographyError;
use crate::core::limits::WAKE_DRAIN_BUFFER;
use crate::core::types::Pid;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{getpgid, getppid};
use std::io::{ErrorKind, Read};
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixStream;
use std::time::Duration;
use tracing::debug;

/// Suspends and resumes universe processes
pub struct SuspensionController {
    wake_rx: UnixStream,
    wake_tx: UnixStream,
}

impl SuspensionController {
    pub fn new() -> SignalResult<Self> {
        let (wake_rx, wake_tx) = UnixStream::pair()?;
        wake_tx.set_nonblocking(true)?;
        handlers::bind_wake_fd(wake_tx.as_raw_fd());
        Ok(Self { wake_rx, wake_tx })
    }

    /// Replace the wake socket inherited across `fork`
    ///
    /// Parent and child would otherwise share one socket and steal each
    /// other's wake-ups.
    pub fn rebind_after_fork(&mut self) -> SignalResult<()> {
        *self = Self::new()?;
        Ok(())
    }

    /// Start arming handlers for the next suspension
    pub fn arm(&self) -> ArmedHandlers {
        ArmedHandlers::new()
    }

    /// Block until any armed notification arrives
    pub fn suspend_self(&self) -> SignalResult<WakeEvent> {
        loop {
            if let Some(event) = self.wait_once(None)? {
                return Ok(event);
            }
        }
    }

    /// Block until resumed by another universe of this session
    ///
    /// SIGCONT from outside the session (a shell's `fg`, for instance) is
    /// ignored so that it cannot wake several parked universes at once.
    /// Returns the pid that resumed us, when the platform reports it.
    pub fn park_until_resumed(&self) -> SignalResult<Option<Pid>> {
        loop {
            if self.suspend_self()? != WakeEvent::Resumed {
                continue;
            }
            match handlers::last_waker() {
                Some(waker) if !self.is_session_peer(waker) => {
                    debug!(waker = %waker, "ignoring SIGCONT from outside the session");
                }
                waker => return Ok(waker),
            }
        }
    }

    /// Park a freshly forked universe until a session peer resumes it
    ///
    /// `blocked` is the mask guard taken before the fork. It is released only
    /// once the handlers are armed, so a wake-up that reached the child early
    /// is delivered into the handler instead of being discarded. While parked,
    /// an interrupt ends the process at once; the previous interrupt
    /// disposition is back in place when this returns.
    pub fn park_interruptible(&self, blocked: BlockedWakeups) -> SignalResult<Option<Pid>> {
        let _armed = self.arm().on_resumed()?.interrupt_exits()?;
        drop(blocked);
        self.park_until_resumed()
    }

    /// Suspend until `target` hands control back or dies
    ///
    /// Re-probes the target every `poll` so that targets which are not our
    /// children, and therefore never raise SIGCHLD here, are still noticed.
    pub fn wait_for_return(&self, target: Pid, poll: Duration) -> SignalResult<ReturnEvent> {
        loop {
            match self.wait_once(Some(poll))? {
                Some(WakeEvent::Resumed) => match handlers::last_waker() {
                    Some(waker) if waker != target => {
                        debug!(waker = %waker, target = %target, "ignoring SIGCONT from a non-target");
                    }
                    _ => return Ok(ReturnEvent::HandedBack),
                },
                Some(WakeEvent::ChildStateChanged) | None => match self.probe(target) {
                    Liveness::Alive => {}
                    Liveness::Exited(status) => return Ok(ReturnEvent::Died(Some(status))),
                    Liveness::Gone => return Ok(ReturnEvent::Died(None)),
                },
            }
        }
    }

    /// Pid of the universe that most recently resumed us, falling back to
    /// our parent
    pub fn last_waker(&self) -> Pid {
        handlers::last_waker().unwrap_or_else(getppid)
    }

    fn wait_once(&self, timeout: Option<Duration>) -> SignalResult<Option<WakeEvent>> {
        if let Some(event) = handlers::take_event() {
            return Ok(Some(event));
        }

        self.wake_rx.set_read_timeout(timeout)?;
        let mut scratch = [0u8; WAKE_DRAIN_BUFFER];
        match (&self.wake_rx).read(&mut scratch) {
            Ok(0) => Err(TomographyError::Io("wake socket closed".to_string())),
            Ok(_) => Ok(handlers::take_event()),
            Err(e) if e.kind() == ErrorKind::Interrupted => Ok(handlers::take_event()),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_session_peer(&self, pid: Pid) -> bool {
        matches!((getpgid(Some(pid)), getpgid(None)), (Ok(theirs), Ok(ours)) if theirs == ours)
    }
}

impl ProcessSignaller for SuspensionController {
    fn resume(&self, pid: Pid) -> SignalResult<()> {
        kill(pid, Signal::SIGCONT).map_err(|errno| TomographyError::signal("resume", errno))
    }

    fn terminate(&self, pid: Pid) {
        if let Err(errno) = kill(pid, Signal::SIGTERM) {
            debug!(pid = %pid, error = %errno, "terminate skipped");
        }
    }

    fn probe(&self, pid: Pid) -> Liveness {
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => Liveness::Alive,
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..))) => {
                Liveness::Exited(status)
            }
            Ok(_) => Liveness::Alive,
            // Not our child: fall back to the zero signal
            Err(_) => match kill(pid, None) {
                Err(Errno::ESRCH) => Liveness::Gone,
                // Someone else's zombie still answers the zero signal
                _ if is_zombie(pid) => Liveness::Gone,
                _ => Liveness::Alive,
            },
        }
    }
}

/// Whether `pid` has exited but not yet been reaped by its parent
#[cfg(target_os = "linux")]
fn is_zombie(pid: Pid) -> bool {
    std::fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .as_deref()
        .and_then(process_state)
        .is_some_and(|state| state == 'Z' || state == 'X')
}

#[cfg(not(target_os = "linux"))]
fn is_zombie(_pid: Pid) -> bool {
    false
}

/// State letter from a `/proc/<pid>/stat` line: `pid (comm) S ...`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn process_state(stat: &str) -> Option<char> {
    let (_, after_comm) = stat.rsplit_once(')')?;
    after_comm.trim_start().chars().next()
}

impl Drop for SuspensionController {
    fn drop(&mut self) {
        handlers::unbind_wake_fd(self.wake_tx.as_raw_fd());
    }
}
