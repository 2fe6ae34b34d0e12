/*!
 * Command Types
 */

/// A parsed tomography command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Enable,
    Disable,
    List,
    /// Raw index text, validated by the navigator
    Jump(String),
    HandBack,
    Help,
}

/// Name, alias, and one-line help for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub alias: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "toggle-tomography",
        alias: "tom",
        usage: "",
        summary: "Flip snapshot-on-stop on or off.",
    },
    CommandSpec {
        name: "enable-tomography",
        alias: "tomon",
        usage: "",
        summary: "Take a snapshot at every stop.",
    },
    CommandSpec {
        name: "disable-tomography",
        alias: "tomoff",
        usage: "",
        summary: "Stop taking snapshots.",
    },
    CommandSpec {
        name: "list-universes",
        alias: "ulist",
        usage: "",
        summary: "View the list of universes saved in the multiverse.",
    },
    CommandSpec {
        name: "jump",
        alias: "ujump",
        usage: "<index>",
        summary: "Travel to universe <index>; returns here when it hands back or exits.",
    },
    CommandSpec {
        name: "hand-back-control",
        alias: "uup",
        usage: "",
        summary: "Return control to the universe that jumped here.",
    },
    CommandSpec {
        name: "help-tomography",
        alias: "uhelp",
        usage: "",
        summary: "Show this help.",
    },
];
