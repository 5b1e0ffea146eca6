//! Round template store.
//!
//! Templates live one per line in a plain UTF-8 text file loaded at
//! startup. The store is immutable afterwards and shared through `Arc`, so
//! lookups need no lock.

use std::fs;
use std::path::Path;

use rand::seq::IndexedRandom;
use tracing::info;

use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;

#[derive(Debug, Default, Clone)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    /// Read every non-blank line of `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::internal(
                ErrorCode::TemplatesUnavailable,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;

        let store = Self::from_lines(raw.lines());
        info!(path = %path.display(), templates = store.len(), "round templates loaded");
        Ok(store)
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|l| l.as_ref().trim_end_matches('\r').to_string())
            .filter(|l| !l.trim().is_empty())
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// A uniformly random template.
    pub fn random_line(&self) -> Result<String, DomainError> {
        self.lines
            .choose(&mut rand::rng())
            .cloned()
            .ok_or_else(|| DomainError::infra(InfraErrorKind::Resource, "no round templates loaded"))
    }
}
