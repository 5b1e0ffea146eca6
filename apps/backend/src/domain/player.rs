//! Player value type.

use serde::{Deserialize, Serialize};

/// Health a player starts with unless the caller says otherwise.
pub const DEFAULT_HEALTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "m")]
    Male,
    #[serde(alias = "f")]
    Female,
    #[default]
    #[serde(alias = "other")]
    Unspecified,
}

impl Gender {
    /// The other binary gender. `Unspecified` has no opposite.
    pub fn opposite(self) -> Option<Gender> {
        match self {
            Gender::Male => Some(Gender::Female),
            Gender::Female => Some(Gender::Male),
            Gender::Unspecified => None,
        }
    }
}

/// A participant in a session. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub gender: Gender,
    pub preference: Gender,
}

impl Player {
    pub fn new(name: impl Into<String>, gender: Gender, preference: Gender) -> Self {
        Self {
            name: name.into(),
            health: DEFAULT_HEALTH,
            gender,
            preference,
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }
}
