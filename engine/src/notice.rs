//! User-visible banner messages.

use crate::Error;
use std::fmt;

/// The banner shown after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Connected,
    ApiUnavailable,
    Saved,
    SavedLocally,
    Deleted,
    DeletedLocally,
    /// Validation rejected the form
    Invalid(String),
}

impl Notice {
    /// Check if the banner reports a fallback to local state.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Notice::ApiUnavailable | Notice::SavedLocally | Notice::DeletedLocally
        )
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        match err {
            Error::MissingField(_) => Notice::Invalid("Fill in every field.".to_string()),
            other => Notice::Invalid(format!("{}.", capitalize(&other.to_string()))),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Connected => write!(f, "Connected to the API."),
            Notice::ApiUnavailable => write!(f, "API is not reachable. Using local mode."),
            Notice::Saved => write!(f, "User saved to the API."),
            Notice::SavedLocally => write!(f, "API error. User added locally."),
            Notice::Deleted => write!(f, "User permanently deleted from the API."),
            Notice::DeletedLocally => write!(f, "API error. User deleted only locally."),
            Notice::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}
