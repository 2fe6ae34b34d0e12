/*!
 * Multiverse Session
 *
 * Facade the debugger host talks to. Owns this process's universe state and
 * routes the two host hooks and the navigation commands to the creator,
 * navigator and lifecycle manager.
 */

use super::config::TomographyConfig;
use crate::core::errors::TomographyResult;
use crate::core::types::{display_index, Pid, Serial};
use crate::host::StopContext;
use crate::lifecycle::{LifecycleManager, ShutdownReport};
use crate::navigation::{JumpReport, UniverseNavigator};
use crate::registry::{UniverseEntry, UniverseRegistry, UniverseState};
use crate::signals::{Reaper, SuspensionController};
use crate::snapshot::{SnapshotCreator, SnapshotOutcome};
use tracing::{debug, info, instrument};

pub struct Multiverse {
    config: TomographyConfig,
    enabled: bool,
    universe: UniverseState,
    controller: SuspensionController,
    reaper: Reaper,
    creator: SnapshotCreator,
    navigator: UniverseNavigator,
    lifecycle: LifecycleManager,
    prompt_label: String,
}

impl Multiverse {
    pub fn new(config: TomographyConfig) -> TomographyResult<Self> {
        config.validate()?;
        let controller = SuspensionController::new()?;

        info!(
            enabled = config.enabled,
            capacity = config.capacity,
            "tomography session started"
        );
        Ok(Self {
            enabled: config.enabled,
            universe: UniverseState::root(),
            controller,
            reaper: Reaper::new(),
            creator: SnapshotCreator::new(config.capacity, config.description_width),
            navigator: UniverseNavigator::new(config.liveness_poll),
            lifecycle: LifecycleManager::new(),
            prompt_label: config.prompt_prefix.clone(),
            config,
        })
    }

    /// Host hook: execution stopped at `context`
    ///
    /// In the parent this returns right after recording the snapshot. In the
    /// snapshot child it returns only once someone jumps into it.
    #[instrument(skip_all, fields(location = %context.location()))]
    pub fn on_stop_event<C: StopContext + ?Sized>(&mut self, context: &C) -> SnapshotOutcome {
        if !self.enabled {
            return SnapshotOutcome::Disabled;
        }

        let outcome = self.creator.capture(
            &mut self.universe,
            &mut self.controller,
            &mut self.reaper,
            context,
        );
        match &outcome {
            SnapshotOutcome::Recorded { serial, .. } | SnapshotOutcome::Resumed { serial, .. } => {
                self.label_for(*serial);
            }
            SnapshotOutcome::Abandoned(_) | SnapshotOutcome::Disabled => {}
        }
        outcome
    }

    /// Host hook: the debugging session is ending
    pub fn on_session_end(&mut self) -> ShutdownReport {
        self.lifecycle
            .on_session_end(&mut self.universe, &self.controller, &mut self.reaper)
    }

    /// Flip snapshot-on-stop; returns the new setting
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!(enabled = self.enabled, "tomography toggled");
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Live universes known to this process, oldest first
    pub fn universes(&self) -> impl Iterator<Item = UniverseEntry<'_>> + '_ {
        self.universe.registry.iter()
    }

    pub fn jump(&mut self, index: &str) -> TomographyResult<JumpReport> {
        self.navigator.jump_to(
            &mut self.universe,
            &self.controller,
            &mut self.reaper,
            index,
        )
    }

    /// Give control back to the universe that jumped here
    ///
    /// Returns once this universe is resumed again.
    pub fn hand_back(&mut self) -> TomographyResult<Pid> {
        self.navigator.hand_back(&mut self.universe, &self.controller)
    }

    pub fn prompt_label(&self) -> &str {
        &self.prompt_label
    }

    /// Prompt as the host should print it
    pub fn prompt(&self) -> String {
        format!("({}) ", self.prompt_label)
    }

    pub fn registry(&self) -> &UniverseRegistry {
        self.universe.registry()
    }

    pub fn is_snapshot_child(&self) -> bool {
        self.universe.is_snapshot_child()
    }

    pub fn serial(&self) -> Serial {
        self.universe.serial()
    }

    pub fn invoker(&self) -> Option<Pid> {
        self.universe.invoker()
    }

    pub fn config(&self) -> &TomographyConfig {
        &self.config
    }

    fn label_for(&mut self, serial: Serial) {
        self.prompt_label = format!("{}:{}", self.config.prompt_prefix, display_index(serial));
    }
}
