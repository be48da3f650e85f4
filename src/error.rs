//! Error Types
//!
//! Failures that reach the UI boundary. Field validation is not here:
//! an invalid field is only ever `is_valid = false` in the form.

use std::fmt;

use crate::roster::Operation;

/// Transport-level failure talking to the roster backend
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never completed (offline, CORS, no window)
    Network(String),
    /// Server answered with a non-success HTTP status
    Status(u16),
    /// Response body did not match the expected shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status(code) => write!(f, "Server responded with status {}", code),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Roster workflow errors
#[derive(Debug, Clone, PartialEq)]
pub enum RosterError {
    /// No acting leader was supplied; the page cannot operate
    NoActingLeader,
    /// Add attempted while some field is invalid
    IncompleteForm,
    /// Roster already holds the maximum number of friends
    RosterFull(usize),
    /// Email belongs to an already registered user
    AlreadyRegistered(String),
    /// Server answered `success: false`
    Rejected(Operation),
    Transport(ApiError),
    /// Same action already in flight
    Busy(Operation),
    UnknownInvitee(usize),
    /// Saved friend whose server id is not known yet
    Unsynced(usize),
    /// Submit with no new friends on the roster
    NothingToSave,
    NoPendingDeletion,
    /// Response arrived after the page was torn down
    Detached,
}

impl RosterError {
    /// Errors the user should not be told about
    pub fn is_silent(&self) -> bool {
        matches!(self, RosterError::Busy(_) | RosterError::Detached)
    }
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::NoActingLeader => write!(f, "Please fill in your personal data first"),
            RosterError::IncompleteForm => write!(f, "Some of the fields contain invalid information"),
            RosterError::RosterFull(cap) => write!(f, "You can invite at most {} friends", cap),
            RosterError::AlreadyRegistered(email) => {
                write!(f, "A volunteer with the email {} already exists", email)
            }
            RosterError::Rejected(Operation::Lookup) => write!(f, "Could not check that email"),
            RosterError::Rejected(Operation::Submit) => write!(f, "Error while trying to save your friends"),
            RosterError::Rejected(Operation::Delete) => write!(f, "Could not remove your friend"),
            RosterError::Transport(err) => write!(f, "Something went wrong, please try again ({})", err),
            RosterError::Busy(op) => write!(f, "{} already in progress", op),
            RosterError::UnknownInvitee(position) => write!(f, "No friend at position {}", position + 1),
            RosterError::Unsynced(position) => write!(
                f,
                "Friend {} was just saved, reload the page before removing them",
                position + 1
            ),
            RosterError::NothingToSave => write!(f, "There are no new friends to save"),
            RosterError::NoPendingDeletion => write!(f, "No friend selected for removal"),
            RosterError::Detached => write!(f, "Page is no longer active"),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for RosterError {
    fn from(err: ApiError) -> Self {
        RosterError::Transport(err)
    }
}

/// Configuration block could not be parsed
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::ROSTER_CAP;

    #[test]
    fn test_roster_full_mentions_cap() {
        assert_eq!(
            RosterError::RosterFull(ROSTER_CAP).to_string(),
            "You can invite at most 10 friends"
        );
    }

    #[test]
    fn test_transport_wraps_api_error() {
        let err: RosterError = ApiError::Status(502).into();
        assert_eq!(err, RosterError::Transport(ApiError::Status(502)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_silent());
    }

    #[test]
    fn test_busy_and_detached_are_silent() {
        assert!(RosterError::Busy(Operation::Submit).is_silent());
        assert!(RosterError::Detached.is_silent());
        assert!(!RosterError::AlreadyRegistered("a@b.com".into()).is_silent());
    }
}
