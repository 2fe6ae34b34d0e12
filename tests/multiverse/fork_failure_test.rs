/*!
 * Fork Failure Tests
 * A stop whose fork fails leaves the session exactly as it was
 */

use nix::errno::Errno;
use nix::sys::signal::{pthread_sigmask, SigSet, SigmaskHow, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::ForkResult;
use pretty_assertions::assert_eq;
use serial_test::serial;
use tomography::signals::exit_immediately;
use tomography::{
    Forker, ProcessSignaller, Reaper, SnapshotCreator, SnapshotOutcome, SourceLocation,
    SuspensionController, TomographyError, UniverseState,
};

/// Always fails the way an exhausted process table does
struct FailingForker;

impl Forker for FailingForker {
    unsafe fn fork(&self) -> nix::Result<ForkResult> {
        Err(Errno::EAGAIN)
    }
}

fn is_blocked(signal: Signal) -> bool {
    let mut current = SigSet::empty();
    pthread_sigmask(SigmaskHow::SIG_BLOCK, None, Some(&mut current)).unwrap();
    current.contains(signal)
}

#[test]
#[serial]
fn test_failed_fork_abandons_snapshot() {
    let mut universe = UniverseState::root();
    let mut controller = SuspensionController::new().unwrap();
    let mut reaper = Reaper::new();
    let location = SourceLocation::new("scenario.rs", 1);

    let failing = SnapshotCreator::with_forker(10, 75, FailingForker);
    let outcome = failing.capture(&mut universe, &mut controller, &mut reaper, &location);

    assert_eq!(
        outcome,
        SnapshotOutcome::Abandoned(TomographyError::ForkFailed(Errno::EAGAIN))
    );
    assert_eq!(universe.serial(), 0);
    assert!(universe.registry().is_empty());
    assert!(!is_blocked(Signal::SIGCONT));
    assert!(!is_blocked(Signal::SIGINT));

    // The next stop numbers its universe as if the failure never happened
    let working = SnapshotCreator::new(10, 75);
    let outcome = working.capture(&mut universe, &mut controller, &mut reaper, &location);
    if outcome.is_resumed() {
        exit_immediately(0);
    }

    let pid = match outcome {
        SnapshotOutcome::Recorded { pid, serial, .. } => {
            assert_eq!(serial, 1);
            pid
        }
        other => panic!("expected a recorded snapshot, got {other:?}"),
    };
    assert_eq!(universe.registry().pid_of(1), Some(pid));
    assert!(!is_blocked(Signal::SIGCONT));

    controller.terminate(pid);
    assert_eq!(
        waitpid(pid, None).unwrap(),
        WaitStatus::Signaled(pid, Signal::SIGTERM, false)
    );
}
