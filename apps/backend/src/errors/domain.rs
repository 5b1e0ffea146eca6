//! Domain-level error type used by the session engine.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// The OS entropy source failed
    RandomSource,
    /// Round template resource missing or empty
    Resource,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicatePlayer,
    SessionIdExhausted,
    Other(String),
}

/// Reasons a selection could not be satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Neither the queue nor the roster has anyone to draw
    EmptyRoster,
    /// A filter left no candidate
    NoEligiblePlayers,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation
    Validation(String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Selection constraints unsatisfiable
    Selection(SelectionKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Selection(kind, d) => write!(f, "selection {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn selection(kind: SelectionKind, detail: impl Into<String>) -> Self {
        Self::Selection(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn empty_roster(detail: impl Into<String>) -> Self {
        Self::selection(SelectionKind::EmptyRoster, detail)
    }
    pub fn no_eligible_players(detail: impl Into<String>) -> Self {
        Self::selection(SelectionKind::NoEligiblePlayers, detail)
    }
    pub fn random_source(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::RandomSource, detail)
    }

    /// True for selection failures of the given kind.
    pub fn is_selection(&self, kind: SelectionKind) -> bool {
        matches!(self, DomainError::Selection(k, _) if *k == kind)
    }
}
