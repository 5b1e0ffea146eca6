use std::collections::VecDeque;

use parking_lot::Mutex;

use super::entropy::RandomSource;
use super::player::{Gender, Player};
use crate::errors::domain::DomainError;

/// Replays a fixed list of indices, clamped into range; falls back to 0 when exhausted.
pub struct ScriptedRandom {
    script: Mutex<VecDeque<usize>>,
}

impl ScriptedRandom {
    pub fn new(script: &[usize]) -> Self {
        Self {
            script: Mutex::new(script.iter().copied().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn index(&self, upper: usize) -> Result<usize, DomainError> {
        let next = self.script.lock().pop_front().unwrap_or(0);
        Ok(next.min(upper - 1))
    }
}

/// Always fails like an exhausted entropy pool.
pub struct FailingRandom;

impl RandomSource for FailingRandom {
    fn index(&self, _upper: usize) -> Result<usize, DomainError> {
        Err(DomainError::random_source("entropy source unavailable"))
    }
}

pub fn alice() -> Player {
    Player::new("Alice", Gender::Female, Gender::Male)
}

pub fn bob() -> Player {
    Player::new("Bob", Gender::Male, Gender::Female)
}

pub fn player(name: &str, gender: Gender) -> Player {
    Player::new(name, gender, gender.opposite().unwrap_or(Gender::Unspecified))
}
