/*!
 * Signal Handlers
 *
 * Handlers only flip atomic flags and write one byte to the process's wake
 * socket (self-pipe pattern). Everything else happens on the main control
 * path after the suspended process reads that byte.
 */

use super::types::WakeEvent;
use crate::core::types::Pid;
use nix::libc::{self, c_int, c_void};
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

static WAKE_FD: AtomicI32 = AtomicI32::new(-1);
static RESUMED: AtomicBool = AtomicBool::new(false);
static CHILD_CHANGED: AtomicBool = AtomicBool::new(false);
static LAST_WAKER: AtomicI32 = AtomicI32::new(0);

/// Point the handlers at this process's wake socket
pub(super) fn bind_wake_fd(fd: RawFd) {
    WAKE_FD.store(fd, Ordering::SeqCst);
}

/// Detach the handlers from `fd` if it is still the bound one
pub(super) fn unbind_wake_fd(fd: RawFd) {
    let _ = WAKE_FD.compare_exchange(fd, -1, Ordering::SeqCst, Ordering::SeqCst);
}

/// Forget events recorded before the current arming
pub(super) fn clear_events() {
    RESUMED.store(false, Ordering::SeqCst);
    CHILD_CHANGED.store(false, Ordering::SeqCst);
}

/// Consume one recorded event, resumption first
pub(super) fn take_event() -> Option<WakeEvent> {
    if RESUMED.swap(false, Ordering::SeqCst) {
        return Some(WakeEvent::Resumed);
    }
    if CHILD_CHANGED.swap(false, Ordering::SeqCst) {
        return Some(WakeEvent::ChildStateChanged);
    }
    None
}

/// Sender of the most recent SIGCONT, where the platform reports it
pub(super) fn last_waker() -> Option<Pid> {
    let raw = LAST_WAKER.load(Ordering::SeqCst);
    (raw > 0).then(|| Pid::from_raw(raw))
}

pub(super) extern "C" fn on_resumed(_signo: c_int, info: *mut libc::siginfo_t, _ctx: *mut c_void) {
    record_sender(info);
    RESUMED.store(true, Ordering::SeqCst);
    nudge();
}

pub(super) extern "C" fn on_child_state_change(_signo: c_int) {
    CHILD_CHANGED.store(true, Ordering::SeqCst);
    nudge();
}

/// A parked snapshot has nothing worth shutting down gracefully
pub(super) extern "C" fn on_interrupt(_signo: c_int) {
    // SAFETY: _exit(2) is async-signal-safe
    unsafe { libc::_exit(0) }
}

/// Leave the process right away, skipping destructors and atexit hooks
pub fn exit_immediately(code: c_int) -> ! {
    // SAFETY: _exit(2) never returns and touches no Rust state
    unsafe { libc::_exit(code) }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn record_sender(info: *const libc::siginfo_t) {
    let sender = if info.is_null() {
        0
    } else {
        // SAFETY: SA_SIGINFO handlers receive a valid siginfo_t from the kernel
        unsafe { (*info).si_pid() }
    };
    LAST_WAKER.store(sender, Ordering::SeqCst);
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn record_sender(_info: *const libc::siginfo_t) {}

fn nudge() {
    let fd = WAKE_FD.load(Ordering::SeqCst);
    if fd < 0 {
        return;
    }
    let byte = [1u8];
    // SAFETY: write(2) is async-signal-safe. The socket is non-blocking; a full
    // buffer already guarantees a pending wake-up, so a short write is fine.
    let _ = unsafe { libc::write(fd, byte.as_ptr().cast::<c_void>(), 1) };
}
