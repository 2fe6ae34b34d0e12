/*!
 * Registry Types
 * Universe descriptions and the views handed out by the registry
 */

use crate::core::types::{display_index, Pid, Serial};
use std::fmt;
use time::{OffsetDateTime, Time};

/// Human-readable description of a captured universe
///
/// Holds the wall-clock capture time and the source location, already
/// truncated to its tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    captured_at: Time,
    location: String,
}

impl Description {
    pub fn new(captured_at: Time, location: &str, width: usize) -> Self {
        Self {
            captured_at,
            location: truncate_tail(location, width),
        }
    }

    /// Describe a stop happening right now
    ///
    /// Uses local time when the offset can be determined, UTC otherwise.
    pub fn capture(location: impl fmt::Display, width: usize) -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::new(now.time(), &location.to_string(), width)
    }

    pub fn captured_at(&self) -> Time {
        self.captured_at
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Capture time as `hh:mm:ss`
    pub fn timestamp(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.captured_at.hour(),
            self.captured_at.minute(),
            self.captured_at.second()
        )
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp(), self.location)
    }
}

/// Keep only the last `width` characters of `text`
fn truncate_tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        text.to_string()
    } else {
        text.chars().skip(count - width).collect()
    }
}

/// Borrowed view of one live universe, as listed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniverseEntry<'a> {
    pub pid: Pid,
    pub serial: Serial,
    pub description: &'a Description,
}

impl UniverseEntry<'_> {
    pub fn index(&self) -> u64 {
        display_index(self.serial)
    }
}

impl fmt::Display for UniverseEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.index(), self.pid, self.description)
    }
}

/// Everything the registry knew about a universe it just dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgottenUniverse {
    pub pid: Pid,
    pub serial: Serial,
    pub description: Description,
}
