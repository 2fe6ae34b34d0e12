/*!
 * Universe Registry
 * Triple-indexed bookkeeping of the snapshots this process created
 *
 * # Invariants
 *
 * - `serial_of`, `pid_of` and `descriptions` always change together
 * - `order` holds exactly the pids present in `serial_of`, oldest first
 *
 * Only `insert` and `forget` (and helpers built on them) touch the indices,
 * so no caller can update one index without the others.
 */

use super::types::{Description, ForgottenUniverse, UniverseEntry};
use crate::core::errors::{TomographyError, TomographyResult};
use crate::core::types::{Pid, Serial};
use ahash::RandomState;
use std::collections::{HashMap, VecDeque};

/// Per-process registry of live universes
///
/// Each process owns an independent copy taken at fork time. Nothing here is
/// shared between processes.
#[derive(Debug, Clone, Default)]
pub struct UniverseRegistry {
    serial_of: HashMap<Pid, Serial, RandomState>,
    pid_of: HashMap<Serial, Pid, RandomState>,
    descriptions: HashMap<Serial, Description, RandomState>,
    order: VecDeque<Pid>,
}

impl UniverseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new universe
    ///
    /// Fails without applying anything if either the pid or the serial is
    /// already tracked.
    pub fn insert(
        &mut self,
        pid: Pid,
        serial: Serial,
        description: Description,
    ) -> TomographyResult<()> {
        if self.serial_of.contains_key(&pid) || self.pid_of.contains_key(&serial) {
            return Err(TomographyError::DuplicateIdentifier { pid, serial });
        }

        self.serial_of.insert(pid, serial);
        self.pid_of.insert(serial, pid);
        self.descriptions.insert(serial, description);
        self.order.push_back(pid);
        Ok(())
    }

    /// Drop every trace of `pid`; absent pids are ignored
    pub fn forget(&mut self, pid: Pid) -> Option<ForgottenUniverse> {
        let serial = *self.serial_of.get(&pid)?;
        let position = self.order.iter().position(|tracked| *tracked == pid)?;
        if self.pid_of.get(&serial) != Some(&pid) {
            return None;
        }
        // Last lookup; nothing has been removed yet if it misses
        let description = self.descriptions.remove(&serial)?;

        self.serial_of.remove(&pid);
        self.pid_of.remove(&serial);
        self.order.remove(position);

        Some(ForgottenUniverse {
            pid,
            serial,
            description,
        })
    }

    /// Oldest live universe
    pub fn oldest(&self) -> TomographyResult<Pid> {
        self.order.front().copied().ok_or(TomographyError::Empty)
    }

    /// Forget the oldest universe and return it
    pub fn pop_oldest(&mut self) -> Option<ForgottenUniverse> {
        let pid = self.oldest().ok()?;
        self.forget(pid)
    }

    pub fn describe(&self, serial: Serial) -> Option<&Description> {
        self.descriptions.get(&serial)
    }

    pub fn pid_of(&self, serial: Serial) -> Option<Pid> {
        self.pid_of.get(&serial).copied()
    }

    pub fn serial_of(&self, pid: Pid) -> Option<Serial> {
        self.serial_of.get(&pid).copied()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.serial_of.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tracked pids, oldest first
    pub fn pids(&self) -> impl DoubleEndedIterator<Item = Pid> + '_ {
        self.order.iter().copied()
    }

    /// Live universes, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = UniverseEntry<'_>> + '_ {
        self.order.iter().filter_map(move |pid| {
            let serial = *self.serial_of.get(pid)?;
            let description = self.descriptions.get(&serial)?;
            Some(UniverseEntry {
                pid: *pid,
                serial,
                description,
            })
        })
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.serial_of.clear();
        self.pid_of.clear();
        self.descriptions.clear();
        self.order.clear();
    }
}
