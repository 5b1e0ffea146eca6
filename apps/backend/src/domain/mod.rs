//! Domain layer: the session engine.
//!
//! Players, rosters with their fairness queue, round text generation,
//! sessions and the registry that owns them. Nothing here knows about HTTP.

pub mod entropy;
pub mod id_gen;
pub mod player;
pub mod registry;
pub mod roster;
pub mod round;
pub mod session;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests_registry;

// Re-exports for ergonomics
pub use entropy::{OsRandom, RandomSource, SeededRandom};
pub use player::{Gender, Player};
pub use registry::SessionRegistry;
pub use session::{PlayerSnapshot, Session, SessionSnapshot};
