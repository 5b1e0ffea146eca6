//! Round text generation.
//!
//! A round template contains placeholder symbols that are replaced with
//! player names. Placeholders are resolved one at a time in the fixed
//! order of [`Placeholder::ORDER`]; each resolution picks a player nobody
//! else in the round has been given yet.

use super::entropy::RandomSource;
use super::player::{Gender, Player};
use super::roster::{pick_from, Roster};
use crate::errors::domain::DomainError;

/// A template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `:&`, the player whose turn it is
    Current,
    /// `:@`, anyone
    Anyone,
    /// `:@o`, opposite gender of the current player
    Opposite,
    /// `:@s`, same gender as the current player
    Same,
    /// `:@a`, the gender the current player is attracted to
    Attracted,
}

/// Which roster members may fill a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderFilter {
    Any,
    Exactly(Gender),
    /// No gender qualifies (opposite of an unspecified gender).
    Nobody,
}

impl GenderFilter {
    pub fn accepts(self, player: &Player) -> bool {
        match self {
            GenderFilter::Any => true,
            GenderFilter::Exactly(g) => player.gender == g,
            GenderFilter::Nobody => false,
        }
    }
}

impl Placeholder {
    /// Resolution order. Significant: earlier steps exclude their picks from later ones.
    pub const ORDER: [Placeholder; 5] = [
        Placeholder::Current,
        Placeholder::Anyone,
        Placeholder::Opposite,
        Placeholder::Same,
        Placeholder::Attracted,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Placeholder::Current => ":&",
            Placeholder::Anyone => ":@",
            Placeholder::Opposite => ":@o",
            Placeholder::Same => ":@s",
            Placeholder::Attracted => ":@a",
        }
    }

    /// Gender filter for this placeholder relative to the current player.
    ///
    /// `Current` is never filtered: it always resolves to the drawn player.
    pub fn filter(self, current: &Player) -> GenderFilter {
        match self {
            Placeholder::Current | Placeholder::Anyone => GenderFilter::Any,
            Placeholder::Same => GenderFilter::Exactly(current.gender),
            Placeholder::Opposite => match current.gender.opposite() {
                Some(g) => GenderFilter::Exactly(g),
                None => GenderFilter::Nobody,
            },
            Placeholder::Attracted => match current.preference {
                Gender::Unspecified => GenderFilter::Any,
                g => GenderFilter::Exactly(g),
            },
        }
    }
}

/// Fill `template` for one round.
///
/// Draws the current player from the fairness queue, then runs one step per
/// placeholder in [`Placeholder::ORDER`]. Each step replaces the first
/// remaining occurrence of its symbol in the text built so far, so an
/// earlier step can consume text a later symbol would have matched (`:@`
/// eats the prefix of `:@o`). Placeholders whose symbol does not occur in
/// the template as given are skipped and pick nobody. Any step without a
/// candidate fails the round; the queue draw already made is kept.
pub fn generate_round(
    roster: &mut Roster,
    template: &str,
    rng: &dyn RandomSource,
) -> Result<String, DomainError> {
    let current = roster.draw_next(rng)?;
    let mut excluded = vec![current.name.clone()];
    let mut text = template.to_string();

    for placeholder in Placeholder::ORDER {
        let symbol = placeholder.symbol();
        if !template.contains(symbol) {
            continue;
        }

        let name = if placeholder == Placeholder::Current {
            current.name.clone()
        } else {
            let filter = placeholder.filter(&current);
            let candidates = roster
                .eligible(&excluded, |p| filter.accepts(p))
                .map_err(|_| {
                    DomainError::no_eligible_players(format!(
                        "no eligible player for '{symbol}' (current player '{}')",
                        current.name
                    ))
                })?;
            let picked = pick_from(&candidates, rng)?.name.clone();
            excluded.push(picked.clone());
            picked
        };

        text = text.replacen(symbol, &name, 1);
    }

    Ok(text)
}
