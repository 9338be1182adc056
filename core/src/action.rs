//! Mining control actions.
//!
//! An action is appended to the API prefix as a single path segment, so it
//! is checked against a conservative charset before any request is built.
//! Nothing is percent-encoded: a value that would need encoding is rejected.

use crate::error::ApiError;

/// Commands understood by the teleport GUI backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningAction {
    Start,
    Stop,
}

impl MiningAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MiningAction::Start => "start_mining",
            MiningAction::Stop => "stop_mining",
        }
    }
}

impl AsRef<str> for MiningAction {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Accept non-empty ASCII `[A-Za-z0-9_-]` only.
pub fn validate_action(action: &str) -> Result<&str, ApiError> {
    let valid = !action.is_empty()
        && action
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(action)
    } else {
        Err(ApiError::InvalidAction(action.to_string()))
    }
}
