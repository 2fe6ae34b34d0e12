/*!
 * Scenario Harness
 *
 * A forked snapshot child must never return into the test runner. Its half
 * of a scenario runs in a closure whose return value becomes the child's exit
 * code, which the parent can then observe through the jump outcome.
 */

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::sys::wait::waitpid;
use std::time::Duration;
use tomography::signals::exit_immediately;
use tomography::{Multiverse, Pid, SnapshotOutcome, SourceLocation, TomographyConfig};

pub fn session(capacity: usize) -> Multiverse {
    let config = TomographyConfig::default()
        .with_capacity(capacity)
        .with_liveness_poll(Duration::from_millis(20));
    Multiverse::new(config).unwrap()
}

/// Trigger a stop; in the snapshot child run `child` once it is jumped into
pub fn stop<F>(multiverse: &mut Multiverse, line: u32, child: F) -> SnapshotOutcome
where
    F: FnOnce(&mut Multiverse) -> i32,
{
    let outcome = multiverse.on_stop_event(&SourceLocation::new("scenario.rs", line));
    if multiverse.is_snapshot_child() {
        let code = child(multiverse);
        exit_immediately(code);
    }
    outcome
}

/// Stop with a child that simply stays parked until terminated
pub fn parked_stop(multiverse: &mut Multiverse, line: u32) -> Pid {
    recorded_pid(&stop(multiverse, line, |_| 0))
}

pub fn recorded_pid(outcome: &SnapshotOutcome) -> Pid {
    match outcome {
        SnapshotOutcome::Recorded { pid, .. } => *pid,
        other => panic!("expected a recorded snapshot, got {other:?}"),
    }
}

pub fn is_alive(pid: Pid) -> bool {
    kill(pid, None) != Err(Errno::ESRCH)
}

/// End the session as root and wait for every leftover universe to exit
pub fn teardown(mut multiverse: Multiverse, extra: &[Pid]) {
    let pids: Vec<Pid> = multiverse.registry().pids().collect();
    multiverse.on_session_end();
    for pid in pids.iter().chain(extra) {
        // ECHILD: already reaped by the session
        let _ = waitpid(*pid, None);
    }
}
