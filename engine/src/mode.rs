//! Connection mode of the store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the list currently mirrors the server.
///
/// Transitions:
/// - any mode, refresh succeeds → `Connected`
/// - `Uninitialized`/`LocalFallback`, refresh fails → `LocalFallback`
/// - `Connected`/`Degraded`, refresh fails → `Degraded`
/// - `LocalFallback`, write fails → `LocalFallback`
/// - any other mode, write fails → `Degraded`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// No fetch attempted yet
    #[default]
    Uninitialized,
    /// The last refresh came from the server
    Connected,
    /// The API was unreachable from the start
    LocalFallback,
    /// Local mutations were applied after a failed call
    Degraded,
}

impl Mode {
    /// Mode after a failed list fetch.
    pub fn after_refresh_failure(self) -> Mode {
        match self {
            Mode::Uninitialized | Mode::LocalFallback => Mode::LocalFallback,
            Mode::Connected | Mode::Degraded => Mode::Degraded,
        }
    }

    /// Mode after a failed create or delete.
    pub fn after_write_failure(self) -> Mode {
        match self {
            Mode::LocalFallback => Mode::LocalFallback,
            _ => Mode::Degraded,
        }
    }

    /// Check if the list may contain unconfirmed changes.
    pub fn is_offline(self) -> bool {
        matches!(self, Mode::LocalFallback | Mode::Degraded)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Uninitialized => write!(f, "uninitialized"),
            Mode::Connected => write!(f, "connected"),
            Mode::LocalFallback => write!(f, "local-fallback"),
            Mode::Degraded => write!(f, "degraded"),
        }
    }
}
