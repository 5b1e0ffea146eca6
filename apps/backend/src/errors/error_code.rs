//! Error codes for the VeriDrink API.
//!
//! Every code that can appear in a Problem Details body is defined here.
//! Never pass ad-hoc strings as error codes.

use core::fmt;

/// Closed set of API error codes.
///
/// Each variant maps to a SCREAMING_SNAKE_CASE string that appears in HTTP
/// responses as both the `code` field and the suffix of the `type` URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Ownership
    /// Caller is not the owner of the session
    NotSessionOwner,

    // Request Validation
    /// Invalid session id format
    InvalidSessionId,
    /// Invalid player name
    InvalidPlayerName,
    /// Malformed request body
    BadRequest,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Session not found
    SessionNotFound,
    /// Player not found in the session roster
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// A player with the same name is already in the session
    DuplicatePlayer,
    /// Could not allocate a fresh session id
    SessionIdExhausted,

    // Round Generation
    /// The session has no players to draw from
    EmptyRoster,
    /// No player satisfies a placeholder's filter
    NoEligiblePlayers,

    // System Errors
    /// The secure random source failed
    RandomSource,
    /// Round templates are unavailable
    TemplatesUnavailable,
    /// Invalid runtime configuration
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotSessionOwner => "NOT_SESSION_OWNER",

            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::SessionIdExhausted => "SESSION_ID_EXHAUSTED",

            Self::EmptyRoster => "EMPTY_ROSTER",
            Self::NoEligiblePlayers => "NO_ELIGIBLE_PLAYERS",

            Self::RandomSource => "RANDOM_SOURCE",
            Self::TemplatesUnavailable => "TEMPLATES_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
