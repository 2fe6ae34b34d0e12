/*!
 * Multiverse Scenario Tests
 * Eviction, round trips, and session end with real processes
 */

use super::harness::{is_alive, parked_stop, recorded_pid, session, stop, teardown};
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::getpid;
use pretty_assertions::assert_eq;
use serial_test::serial;
use tomography::{JumpOutcome, ShutdownReport, SnapshotOutcome, TomographyError};

#[test]
#[serial]
fn test_eviction_keeps_newest_two() {
    let mut multiverse = session(2);

    let first = parked_stop(&mut multiverse, 1);
    let second = parked_stop(&mut multiverse, 2);
    let outcome = stop(&mut multiverse, 3, |_| 0);

    match &outcome {
        SnapshotOutcome::Recorded { serial, evicted, .. } => {
            assert_eq!(*serial, 3);
            assert_eq!(evicted, &vec![first]);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    let third = recorded_pid(&outcome);

    let serials: Vec<u64> = multiverse.registry().iter().map(|entry| entry.serial).collect();
    assert_eq!(serials, vec![2, 3]);
    assert_eq!(multiverse.prompt(), "(tdb:2) ");

    // SIGTERM was sent; once collected the pid is gone
    match waitpid(first, None) {
        Ok(status) => assert_eq!(status, WaitStatus::Signaled(first, Signal::SIGTERM, false)),
        Err(errno) => assert_eq!(errno, nix::errno::Errno::ECHILD),
    }
    assert!(!is_alive(first));
    assert!(is_alive(second));
    assert!(is_alive(third));

    teardown(multiverse, &[]);
}

#[test]
#[serial]
fn test_clean_round_trip() {
    let mut multiverse = session(10);
    let target = recorded_pid(&stop(&mut multiverse, 1, |universe| {
        match universe.hand_back() {
            Ok(_) => 0,
            Err(_) => 3,
        }
    }));

    let report = multiverse.jump("0").unwrap();

    assert_eq!(report.outcome, JumpOutcome::HandedBack { pid: target });
    assert!(report.pruned.is_empty());
    assert_eq!(multiverse.registry().pid_of(1), Some(target));
    assert_eq!(multiverse.registry().len(), 1);
    assert!(is_alive(target));

    // The universe parked again and can be entered a second time
    let report = multiverse.jump("0").unwrap();
    assert_eq!(report.outcome, JumpOutcome::TargetDied {
        pid: target,
        status: Some(WaitStatus::Exited(target, 0)),
    });

    teardown(multiverse, &[]);
}

#[test]
#[serial]
fn test_dirty_round_trip() {
    let mut multiverse = session(10);
    let target = recorded_pid(&stop(&mut multiverse, 1, |_| 7));

    let report = multiverse.jump("0").unwrap();

    assert_eq!(
        report.outcome,
        JumpOutcome::TargetDied {
            pid: target,
            status: Some(WaitStatus::Exited(target, 7)),
        }
    );
    assert!(multiverse.registry().is_empty());
    assert_eq!(
        multiverse.jump("0").unwrap_err(),
        TomographyError::NoSuchUniverse("0".to_string())
    );

    teardown(multiverse, &[]);
}

#[test]
#[serial]
fn test_resumed_child_numbering_and_prompt() {
    let root = getpid();
    let mut multiverse = session(10);
    let target = recorded_pid(&stop(&mut multiverse, 1, move |universe| {
        let serial_ok = universe.serial() == 2;
        let prompt_ok = universe.prompt() == "(tdb:1) ";
        let invoker_ok = universe.invoker() == Some(root);
        match (serial_ok, prompt_ok, invoker_ok) {
            (true, true, true) => 0,
            (false, _, _) => 10,
            (_, false, _) => 11,
            (_, _, false) => 12,
        }
    }));
    assert_eq!(multiverse.prompt(), "(tdb:0) ");

    let report = multiverse.jump("0").unwrap();

    assert_eq!(report.outcome.pid(), target);
    assert_eq!(
        report.outcome,
        JumpOutcome::TargetDied {
            pid: target,
            status: Some(WaitStatus::Exited(target, 0)),
        }
    );

    teardown(multiverse, &[]);
}

#[test]
#[serial]
fn test_jump_reaches_exact_target() {
    let mut multiverse = session(10);
    let older = parked_stop(&mut multiverse, 1);
    let newer = recorded_pid(&stop(&mut multiverse, 2, |_| 42));

    let report = multiverse.jump(" 1 ").unwrap();

    assert_eq!(
        report.outcome,
        JumpOutcome::TargetDied {
            pid: newer,
            status: Some(WaitStatus::Exited(newer, 42)),
        }
    );
    assert_eq!(multiverse.registry().pids().collect::<Vec<_>>(), vec![older]);

    teardown(multiverse, &[]);
}

#[test]
#[serial]
fn test_child_quit_leaves_others_running() {
    let mut multiverse = session(10);
    let sibling = parked_stop(&mut multiverse, 1);
    let quitter = recorded_pid(&stop(&mut multiverse, 2, |universe| {
        let tracked_before = universe.registry().len();
        match universe.on_session_end() {
            ShutdownReport::Detached if universe.registry().len() == tracked_before => 0,
            _ => 5,
        }
    }));

    let report = multiverse.jump("1").unwrap();

    assert_eq!(
        report.outcome,
        JumpOutcome::TargetDied {
            pid: quitter,
            status: Some(WaitStatus::Exited(quitter, 0)),
        }
    );
    assert!(is_alive(sibling));
    let listed: Vec<String> = multiverse.universes().map(|entry| entry.to_string()).collect();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].starts_with(&format!("0: {sibling} [")));
    assert!(listed[0].ends_with("scenario.rs:1"));

    teardown(multiverse, &[]);
}

#[test]
#[serial]
fn test_root_quit_terminates_everything() {
    let mut multiverse = session(10);
    let pids = vec![
        parked_stop(&mut multiverse, 1),
        parked_stop(&mut multiverse, 2),
        parked_stop(&mut multiverse, 3),
    ];

    let report = multiverse.on_session_end();

    assert_eq!(report, ShutdownReport::Terminated { pids: pids.clone() });
    assert!(multiverse.registry().is_empty());
    for pid in &pids {
        match waitpid(*pid, None) {
            Ok(status) => assert_eq!(status, WaitStatus::Signaled(*pid, Signal::SIGTERM, false)),
            Err(errno) => assert_eq!(errno, nix::errno::Errno::ECHILD),
        }
        assert!(!is_alive(*pid));
    }
}

#[test]
#[serial]
fn test_disabled_session_takes_no_snapshots() {
    let mut multiverse = session(10);
    multiverse.disable();

    assert_eq!(stop(&mut multiverse, 1, |_| 0), SnapshotOutcome::Disabled);
    assert!(multiverse.registry().is_empty());
    assert_eq!(multiverse.prompt(), "(tdb) ");

    multiverse.enable();
    let pid = parked_stop(&mut multiverse, 2);
    assert_eq!(multiverse.registry().pids().collect::<Vec<_>>(), vec![pid]);

    teardown(multiverse, &[]);
}
