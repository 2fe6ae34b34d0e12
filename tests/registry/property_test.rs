/*!
 * Registry Property Tests
 * Random insert/forget/evict sequences keep every index consistent
 */

use proptest::prelude::*;
use std::collections::VecDeque;
use time::macros::time;
use tomography::{Description, Pid, TomographyError, UniverseRegistry};

#[derive(Debug, Clone)]
enum Op {
    Insert,
    /// Forget the n-th live universe (modulo the live count)
    Forget(usize),
    PopOldest,
    /// Re-insert an already tracked pid under a fresh serial
    DuplicatePid(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Insert),
        2 => any::<usize>().prop_map(Op::Forget),
        1 => Just(Op::PopOldest),
        1 => any::<usize>().prop_map(Op::DuplicatePid),
    ]
}

fn description() -> Description {
    Description::new(time!(12:00), "prop.rs:1", 75)
}

proptest! {
    #[test]
    fn registry_indices_stay_consistent(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut registry = UniverseRegistry::new();
        let mut model: VecDeque<(Pid, u64)> = VecDeque::new();
        let mut next_serial = 1u64;
        let mut next_pid = 10_000i32;

        for op in ops {
            match op {
                Op::Insert => {
                    let pid = Pid::from_raw(next_pid);
                    next_pid += 1;
                    registry.insert(pid, next_serial, description()).unwrap();
                    model.push_back((pid, next_serial));
                    next_serial += 1;
                }
                Op::Forget(n) => {
                    if !model.is_empty() {
                        let (pid, serial) = model.remove(n % model.len()).unwrap();
                        let forgotten = registry.forget(pid).unwrap();
                        prop_assert_eq!(forgotten.serial, serial);
                        prop_assert!(registry.forget(pid).is_none());
                    }
                }
                Op::PopOldest => {
                    let expected = model.pop_front();
                    let popped = registry.pop_oldest().map(|u| (u.pid, u.serial));
                    prop_assert_eq!(popped, expected);
                }
                Op::DuplicatePid(n) => {
                    if !model.is_empty() {
                        let (pid, _) = model[n % model.len()];
                        let result = registry.insert(pid, next_serial, description());
                        let is_duplicate = matches!(result, Err(TomographyError::DuplicateIdentifier { .. }));
                        prop_assert!(is_duplicate);
                        next_serial += 1;
                    }
                }
            }

            prop_assert_eq!(registry.len(), model.len());
            prop_assert_eq!(registry.is_empty(), model.is_empty());
            let pids: Vec<Pid> = registry.pids().collect();
            let expected: Vec<Pid> = model.iter().map(|(pid, _)| *pid).collect();
            prop_assert_eq!(pids, expected);

            for (pid, serial) in &model {
                prop_assert_eq!(registry.serial_of(*pid), Some(*serial));
                prop_assert_eq!(registry.pid_of(*serial), Some(*pid));
                prop_assert!(registry.describe(*serial).is_some());
            }
            prop_assert_eq!(registry.oldest().ok(), model.front().map(|(pid, _)| *pid));
        }
    }

    #[test]
    fn drained_registry_resolves_nothing(count in 1usize..40) {
        let mut registry = UniverseRegistry::new();
        for serial in 1..=count as u64 {
            registry.insert(Pid::from_raw(20_000 + serial as i32), serial, description()).unwrap();
        }
        while registry.pop_oldest().is_some() {}

        prop_assert!(registry.is_empty());
        for serial in 1..=count as u64 {
            prop_assert!(registry.pid_of(serial).is_none());
        }
    }
}
