/*!
 * Host Module
 * What the surrounding debugger hands to the tomography core
 */

pub mod traits;
pub mod types;

pub use traits::StopContext;
pub use types::SourceLocation;
