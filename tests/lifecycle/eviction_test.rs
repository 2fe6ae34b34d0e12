/*!
 * Eviction and Reconciliation Tests
 * Capacity sweeps terminate the oldest universes; dead ones are pruned
 */

use super::recording::{populated, RecordingSignaller};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tomography::{Pid, Reaper, SnapshotCreator, UniverseNavigator};

#[test]
fn test_capacity_sweep_keeps_newest() {
    let creator = SnapshotCreator::new(3, 75);
    let signaller = RecordingSignaller::default();
    let mut reaper = Reaper::new();
    let mut registry = populated(300, 5);

    let evicted = creator.evict(&mut registry, &signaller, &mut reaper);

    assert_eq!(evicted, vec![Pid::from_raw(301), Pid::from_raw(302)]);
    assert_eq!(*signaller.terminated.borrow(), evicted);
    assert_eq!(
        registry.iter().map(|entry| entry.index()).collect::<Vec<_>>(),
        vec![2, 3, 4]
    );

    // Terminated universes are collected once they are gone
    assert_eq!(reaper.reap(&signaller), 2);
    assert!(reaper.pending().is_empty());
}

#[test]
fn test_capacity_of_one() {
    let creator = SnapshotCreator::new(1, 75);
    let signaller = RecordingSignaller::default();
    let mut reaper = Reaper::new();
    let mut registry = populated(400, 3);

    creator.evict(&mut registry, &signaller, &mut reaper);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.oldest().unwrap(), Pid::from_raw(403));
}

#[test]
fn test_reconcile_forgets_silently_dead_universes() {
    let navigator = UniverseNavigator::new(Duration::from_millis(5));
    let signaller = RecordingSignaller::default();
    let mut registry = populated(500, 4);
    signaller.kill_quietly(Pid::from_raw(501));
    signaller.kill_quietly(Pid::from_raw(503));

    let pruned = navigator.reconcile(&mut registry, &signaller);

    assert_eq!(pruned, vec![Pid::from_raw(503), Pid::from_raw(501)]);
    assert_eq!(
        registry.iter().map(|entry| entry.to_string()).collect::<Vec<_>>(),
        vec![
            "1: 502 [06:30:00] scenario.rs:2".to_string(),
            "3: 504 [06:30:00] scenario.rs:4".to_string(),
        ]
    );
    assert!(signaller.terminated.borrow().is_empty());
}

#[test]
fn test_reconcile_with_everyone_alive_changes_nothing() {
    let navigator = UniverseNavigator::new(Duration::from_millis(5));
    let signaller = RecordingSignaller::default();
    let mut registry = populated(600, 3);

    assert!(navigator.reconcile(&mut registry, &signaller).is_empty());
    assert_eq!(registry.len(), 3);
}
