//! A single game session.
//!
//! The roster and draw queue live behind one mutex. Every operation that
//! reads or mutates them takes the lock for its whole duration and never
//! suspends while holding it; round generation holds it across all of its
//! draws and picks so selection and eligibility see one consistent roster.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;

use super::entropy::RandomSource;
use super::player::Player;
use super::roster::{self, Roster};
use super::round;
use crate::errors::domain::{DomainError, NotFoundKind};

pub struct Session {
    id: String,
    difficulty: i32,
    owner: String,
    roster: Mutex<Roster>,
    rng: Arc<dyn RandomSource>,
    /// Unix seconds of the last operation; read by the registry without the roster lock.
    last_active: AtomicI64,
    /// Set once the registry has evicted this session.
    closed: AtomicBool,
}

/// Wire view of a session. The draw queue is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub difficulty: i32,
    pub owner: String,
    pub players: Vec<PlayerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub health: i32,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        difficulty: i32,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            id: id.into(),
            difficulty,
            owner: owner.into(),
            roster: Mutex::new(Roster::new()),
            rng,
            last_active: AtomicI64::new(now_unix()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.owner == caller
    }

    pub fn last_active(&self) -> i64 {
        self.last_active.load(Ordering::Relaxed)
    }

    fn touch(&self) {
        self.last_active.store(now_unix(), Ordering::Relaxed);
    }

    /// Whether the registry has evicted this session.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Called by the registry after removing the session from its map.
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Fails for an evicted session. Checked with the roster lock held so an
    /// operation either completes before eviction or does not happen.
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_closed() {
            return Err(DomainError::not_found(
                NotFoundKind::Session,
                format!("session '{}' has expired", self.id),
            ));
        }
        Ok(())
    }

    pub fn add_player(&self, player: Player) -> Result<(), DomainError> {
        self.touch();
        let name = player.name.clone();
        let mut roster = self.roster.lock();
        self.ensure_open()?;
        roster.add(player)?;
        drop(roster);
        debug!(session_id = %self.id, player = %name, "player added");
        Ok(())
    }

    pub fn remove_player(&self, name: &str) -> Result<(), DomainError> {
        self.touch();
        let mut roster = self.roster.lock();
        self.ensure_open()?;
        roster.remove(name)?;
        drop(roster);
        debug!(session_id = %self.id, player = %name, "player removed");
        Ok(())
    }

    /// Next player from the fairness queue.
    pub fn draw_next(&self) -> Result<Player, DomainError> {
        self.touch();
        let mut roster = self.roster.lock();
        self.ensure_open()?;
        roster.draw_next(self.rng.as_ref())
    }

    /// Roster members not named in `exclude` that satisfy `predicate`.
    pub fn eligible<F>(&self, exclude: &[String], predicate: F) -> Result<Vec<Player>, DomainError>
    where
        F: Fn(&Player) -> bool,
    {
        self.touch();
        let roster = self.roster.lock();
        let eligible = roster.eligible(exclude, predicate)?;
        Ok(eligible.into_iter().cloned().collect())
    }

    /// Uniform pick among `candidates` using the session's random source.
    pub fn pick_from(&self, candidates: &[Player]) -> Result<Player, DomainError> {
        roster::pick_from(candidates, self.rng.as_ref()).cloned()
    }

    /// Generate one round of text from `template`.
    pub fn generate_round(&self, template: &str) -> Result<String, DomainError> {
        self.touch();
        let mut roster = self.roster.lock();
        self.ensure_open()?;
        let text = round::generate_round(&mut roster, template, self.rng.as_ref())?;
        debug!(session_id = %self.id, "round generated");
        Ok(text)
    }

    pub fn player_count(&self) -> usize {
        self.roster.lock().len()
    }

    /// Serializable view of the session. Reading counts as activity.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.touch();
        let roster = self.roster.lock();
        SessionSnapshot {
            id: self.id.clone(),
            difficulty: self.difficulty,
            owner: self.owner.clone(),
            players: roster
                .players()
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name.clone(),
                    health: p.health,
                })
                .collect(),
        }
    }

    /// Players not yet drawn in the current cycle.
    #[cfg(test)]
    pub(crate) fn queued(&self) -> Vec<String> {
        self.roster.lock().queued().to_vec()
    }

    #[cfg(test)]
    pub(crate) fn set_last_active(&self, unix: i64) {
        self.last_active.store(unix, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("difficulty", &self.difficulty)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

pub(crate) fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
