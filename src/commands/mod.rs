/*!
 * Commands Module
 * User-facing tomography commands for the debugger prompt
 */

mod executor;
mod parser;
pub mod types;

// Re-export public API
pub use executor::{dispatch, help_lines};
pub use parser::parse;
pub use types::{Command, CommandSpec, COMMANDS};
