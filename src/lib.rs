/*!
 * Tomography Library
 * Fork-based time travel for breakpoint debuggers
 *
 * Every time the host debugger stops, the process forks. The copy parks as a
 * frozen "universe" the user can later jump into, poke around, and hand
 * control back from.
 */

pub mod commands;
pub mod core;
pub mod host;
pub mod lifecycle;
pub mod monitoring;
pub mod navigation;
pub mod registry;
pub mod session;
pub mod signals;
pub mod snapshot;

// Re-exports
pub use commands::{dispatch, parse, Command};
pub use self::core::{Pid, Role, Serial, TomographyError, TomographyResult, UniverseIndex};
pub use host::{SourceLocation, StopContext};
pub use lifecycle::{LifecycleManager, ShutdownReport};
pub use monitoring::init_tracing;
pub use navigation::{JumpOutcome, JumpReport, UniverseNavigator};
pub use registry::{Description, UniverseRegistry, UniverseState};
pub use session::{Multiverse, TomographyConfig};
pub use signals::{ProcessSignaller, Reaper, SuspensionController};
pub use snapshot::{Forker, SnapshotCreator, SnapshotOutcome, SystemForker};
