/*!
 * Navigation Module
 * Jumping between universes and handing control back
 */

mod navigator;
pub mod types;

pub use navigator::UniverseNavigator;
pub use types::{JumpOutcome, JumpReport};
