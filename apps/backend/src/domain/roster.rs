//! Session roster and the shuffle-bag selection queue.
//!
//! `Roster` is plain data with no locking of its own; [`Session`] wraps it in
//! a mutex and every method here runs under that lock.
//!
//! The queue holds player names, never players: each entry refers to a
//! roster member by identity. Whenever a player leaves the roster its queue
//! entry leaves with it, so a draw can never yield someone who is gone.
//!
//! [`Session`]: super::session::Session

use super::entropy::RandomSource;
use super::player::Player;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

#[derive(Debug, Default, Clone)]
pub struct Roster {
    players: Vec<Player>,
    queue: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players still waiting to be drawn in the current cycle.
    pub fn queued(&self) -> &[String] {
        &self.queue
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Append a player to the roster and to the current draw cycle.
    ///
    /// Names are the identity used by removal and exclusion, so a second
    /// player with an existing name is rejected.
    pub fn add(&mut self, player: Player) -> Result<(), DomainError> {
        if self.get(&player.name).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::DuplicatePlayer,
                format!("player '{}' is already in the session", player.name),
            ));
        }
        self.queue.push(player.name.clone());
        self.players.push(player);
        Ok(())
    }

    /// Remove a player from the roster and, if still queued, from the queue.
    pub fn remove(&mut self, name: &str) -> Result<Player, DomainError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("player '{name}' not found"))
            })?;
        let removed = self.players.remove(idx);

        // Not being queued is fine: the player may already have been drawn this cycle.
        if let Some(q) = self.queue.iter().position(|n| *n == removed.name) {
            self.queue.remove(q);
        }
        Ok(removed)
    }

    /// Draw the next player from the shuffle bag.
    ///
    /// Refills the queue from the roster when it runs dry, so every player
    /// is returned exactly once per cycle.
    pub fn draw_next(&mut self, rng: &dyn RandomSource) -> Result<Player, DomainError> {
        if self.queue.is_empty() {
            if self.players.is_empty() {
                return Err(DomainError::empty_roster("no players in the session"));
            }
            self.queue = self.players.iter().map(|p| p.name.clone()).collect();
        }

        let i = rng.index(self.queue.len())?;
        let name = self.queue.remove(i);
        self.get(&name).cloned().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Other("queue".to_string()),
                format!("queued player '{name}' missing from roster"),
            )
        })
    }

    /// Roster members not in `exclude` that satisfy `predicate`.
    ///
    /// Independent of the draw queue: eligibility always samples the full roster.
    pub fn eligible<F>(&self, exclude: &[String], predicate: F) -> Result<Vec<&Player>, DomainError>
    where
        F: Fn(&Player) -> bool,
    {
        let eligible: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| !exclude.iter().any(|ex| *ex == p.name))
            .filter(|p| predicate(p))
            .collect();

        if eligible.is_empty() {
            return Err(DomainError::no_eligible_players("no eligible players found"));
        }
        Ok(eligible)
    }
}

/// Uniformly pick one candidate.
pub fn pick_from<'a, T>(candidates: &'a [T], rng: &dyn RandomSource) -> Result<&'a T, DomainError> {
    if candidates.is_empty() {
        return Err(DomainError::no_eligible_players("candidate list is empty"));
    }
    let i = rng.index(candidates.len())?;
    Ok(&candidates[i])
}
