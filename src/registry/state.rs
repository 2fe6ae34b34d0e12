/*!
 * Universe State
 * Everything a single process knows about the multiverse
 */

use super::registry::UniverseRegistry;
use crate::core::types::{Pid, Role, Serial};

/// Process-local view of the multiverse
///
/// A forked child inherits a frozen copy of its parent's state. Only the copy
/// held by the currently interactive process is treated as authoritative.
#[derive(Debug, Clone)]
pub struct UniverseState {
    pub(crate) registry: UniverseRegistry,
    pub(crate) serial: Serial,
    pub(crate) role: Role,
    pub(crate) invoker: Option<Pid>,
}

impl UniverseState {
    pub fn new(role: Role) -> Self {
        Self {
            registry: UniverseRegistry::new(),
            serial: 0,
            role,
            invoker: None,
        }
    }

    pub fn root() -> Self {
        Self::new(Role::Root)
    }

    pub fn registry(&self) -> &UniverseRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut UniverseRegistry {
        &mut self.registry
    }

    /// Snapshots taken so far, as counted by this process
    pub fn serial(&self) -> Serial {
        self.serial
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_snapshot_child(&self) -> bool {
        self.role.is_snapshot_child()
    }

    /// Process that last resumed this universe through a jump
    pub fn invoker(&self) -> Option<Pid> {
        self.invoker
    }
}

impl Default for UniverseState {
    fn default() -> Self {
        Self::root()
    }
}
