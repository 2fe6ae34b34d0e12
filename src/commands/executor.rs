/*!
 * Command Executor
 * Runs a parsed command against the session and renders its output lines
 */

use super::types::{Command, COMMANDS};
use crate::navigation::JumpOutcome;
use crate::session::Multiverse;
use tracing::debug;

/// Execute `command`, returning the lines to print
///
/// Errors are rendered as `ERR: <message>` rather than returned; none of them
/// ends the debugging session.
pub fn dispatch(multiverse: &mut Multiverse, command: Command) -> Vec<String> {
    match command {
        Command::Toggle => vec![switch_line(multiverse.toggle())],
        Command::Enable => {
            multiverse.enable();
            vec![switch_line(true)]
        }
        Command::Disable => {
            multiverse.disable();
            vec![switch_line(false)]
        }
        Command::List => multiverse.universes().map(|entry| entry.to_string()).collect(),
        Command::Jump(index) => match multiverse.jump(&index) {
            Ok(report) => {
                if let JumpOutcome::TargetDied { pid, status } = report.outcome {
                    debug!(pid = %pid, ?status, "jump target is gone");
                }
                Vec::new()
            }
            Err(err) => vec![format!("ERR: {err}")],
        },
        Command::HandBack => match multiverse.hand_back() {
            Ok(_) => Vec::new(),
            Err(err) => vec![format!("ERR: {err}")],
        },
        Command::Help => help_lines(),
    }
}

/// One line per command: name, alias, and summary
pub fn help_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|spec| {
            let invocation = if spec.usage.is_empty() {
                spec.name.to_string()
            } else {
                format!("{} {}", spec.name, spec.usage)
            };
            format!("{invocation:<26} ({:<6}) {}", spec.alias, spec.summary)
        })
        .collect()
}

fn switch_line(enabled: bool) -> String {
    let line = if enabled { "TOM ON" } else { "TOM OFF" };
    line.to_string()
}
