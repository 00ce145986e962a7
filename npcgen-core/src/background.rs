//! Player-character backgrounds: one personality trait, ideal, bond and flaw
//! drawn from a background's lists.

use crate::generator::Choice;
use crate::rules::{BackgroundDefinition, RuleTables};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundProfile {
    pub id: String,
    pub name: String,
    pub personality_trait: String,
    pub ideal: String,
    pub bond: String,
    pub flaw: String,
}

fn pick<R: Rng>(items: &[String], rng: &mut R) -> String {
    items.choose(rng).cloned().unwrap_or_default()
}

impl BackgroundProfile {
    pub fn draw<R: Rng>(definition: &BackgroundDefinition, rng: &mut R) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            personality_trait: pick(&definition.personality_traits, rng),
            ideal: pick(&definition.ideals, rng),
            bond: pick(&definition.bonds, rng),
            flaw: pick(&definition.flaws, rng),
        }
    }
}

/// Resolve a background selector against the tables.
///
/// An unknown fixed id is replaced by a random background. Returns `None`
/// only when the tables hold no backgrounds.
pub fn resolve_background<R: Rng>(
    tables: &RuleTables,
    choice: &Choice<String>,
    rng: &mut R,
) -> Option<BackgroundProfile> {
    let fixed = choice.fixed().and_then(|id| {
        let found = tables.background(id);
        if found.is_none() {
            tracing::warn!(background = %id, "Unknown background, drawing one at random");
        }
        found
    });
    let definition = match fixed {
        Some(definition) => definition,
        None => tables.backgrounds.choose(rng)?,
    };
    Some(BackgroundProfile::draw(definition, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_background_draws_from_its_lists() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(11);
        let profile = resolve_background(tables, &Choice::Fixed("sage".into()), &mut rng).unwrap();
        let sage = tables.background("sage").unwrap();
        assert_eq!(profile.name, "Sage");
        assert!(sage.personality_traits.contains(&profile.personality_trait));
        assert!(sage.ideals.contains(&profile.ideal));
        assert!(sage.bonds.contains(&profile.bond));
        assert!(sage.flaws.contains(&profile.flaw));
    }

    #[test]
    fn test_unknown_background_is_replaced() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(12);
        let profile = resolve_background(tables, &Choice::Fixed("pirate king".into()), &mut rng).unwrap();
        assert!(tables.background(&profile.id).is_some());
    }

    #[test]
    fn test_no_backgrounds_in_tables() {
        let mut tables = RuleTables::standard().clone();
        tables.backgrounds.clear();
        let mut rng = StdRng::seed_from_u64(13);
        assert!(resolve_background(&tables, &Choice::Random, &mut rng).is_none());
    }
}
