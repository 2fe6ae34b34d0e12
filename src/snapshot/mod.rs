/*!
 * Snapshot Module
 * Tomography: capturing universes by forking at every stop
 */

mod creator;
pub mod traits;
pub mod types;

pub use creator::SnapshotCreator;
pub use traits::{Forker, SystemForker};
pub use types::SnapshotOutcome;
