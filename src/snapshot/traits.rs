/*!
 * Snapshot Traits
 */

use nix::unistd::ForkResult;

/// Source of new universe processes
pub trait Forker {
    /// Duplicate the calling process
    ///
    /// # Safety
    ///
    /// Same contract as `fork(2)` in a possibly multi-threaded process: until
    /// it parks, the child may only run async-signal-safe code.
    unsafe fn fork(&self) -> nix::Result<ForkResult>;
}

/// Forks through the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemForker;

impl Forker for SystemForker {
    unsafe fn fork(&self) -> nix::Result<ForkResult> {
        nix::unistd::fork()
    }
}
