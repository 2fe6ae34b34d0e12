/*!
 * Command Parser
 */

use super::types::Command;

/// Parse one prompt line
///
/// Returns `None` for lines that are not tomography commands, leaving them to
/// the host debugger.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "toggle-tomography" | "tom" => Some(Command::Toggle),
        "enable-tomography" | "tomon" => Some(Command::Enable),
        "disable-tomography" | "tomoff" => Some(Command::Disable),
        "list-universes" | "ulist" => Some(Command::List),
        "jump" | "ujump" => Some(Command::Jump(rest.to_string())),
        "hand-back-control" | "uup" => Some(Command::HandBack),
        "help-tomography" | "uhelp" => Some(Command::Help),
        _ => None,
    }
}
