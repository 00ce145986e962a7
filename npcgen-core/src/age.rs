//! Age categories and their mapping to concrete ages.
//!
//! Bands scale with a race's maturity age and lifespan, with absolute floors
//! so that short-lived races still get sensible ages. Sampling and
//! classification can disagree on a band's shared upper edge; that overlap is
//! accepted.

use crate::abilities::RollTier;
use crate::rules::RaceDefinition;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Life stage of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeCategory {
    Infant,
    Child,
    YoungAdult,
    Adult,
    Mature,
    Elderly,
}

impl AgeCategory {
    pub fn all() -> [AgeCategory; 6] {
        [
            AgeCategory::Infant,
            AgeCategory::Child,
            AgeCategory::YoungAdult,
            AgeCategory::Adult,
            AgeCategory::Mature,
            AgeCategory::Elderly,
        ]
    }

    /// Kebab-case identifier, e.g. `young-adult`.
    pub fn id(&self) -> &'static str {
        match self {
            AgeCategory::Infant => "infant",
            AgeCategory::Child => "child",
            AgeCategory::YoungAdult => "young-adult",
            AgeCategory::Adult => "adult",
            AgeCategory::Mature => "mature",
            AgeCategory::Elderly => "elderly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeCategory::Infant => "Infant",
            AgeCategory::Child => "Child",
            AgeCategory::YoungAdult => "Young Adult",
            AgeCategory::Adult => "Adult",
            AgeCategory::Mature => "Mature",
            AgeCategory::Elderly => "Elderly",
        }
    }

    /// Relative weight when the category is drawn at random.
    pub fn weight(&self) -> u32 {
        match self {
            AgeCategory::Infant | AgeCategory::Child => 10,
            _ => 20,
        }
    }

    /// Absolute minimum age of the band.
    fn floor(&self) -> u32 {
        match self {
            AgeCategory::Infant => 0,
            AgeCategory::Child => 2,
            AgeCategory::YoungAdult => 6,
            AgeCategory::Adult => 12,
            AgeCategory::Mature => 25,
            AgeCategory::Elderly => 40,
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AgeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(|c: char| c == ' ' || c == '_', "-");
        AgeCategory::all()
            .into_iter()
            .find(|c| c.id() == normalized)
            .ok_or_else(|| format!("Unknown age category: {s}"))
    }
}

/// Raw band edges for a race, before floors are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeThresholds {
    pub maturity: u32,
    pub lifespan: u32,
    pub child_start: u32,
    pub child_end: u32,
    pub adult_start: u32,
    pub mature_start: u32,
    pub elderly_start: u32,
}

impl AgeThresholds {
    pub fn for_race(race: &RaceDefinition) -> Self {
        Self::new(race.lifespan, race.maturity)
    }

    pub fn new(lifespan: u32, maturity: u32) -> Self {
        let adult_span = lifespan.saturating_sub(maturity);
        Self {
            maturity,
            lifespan,
            child_start: maturity * 25 / 100,
            child_end: maturity * 85 / 100,
            adult_start: maturity + adult_span * 35 / 100,
            mature_start: maturity + adult_span * 70 / 100,
            elderly_start: lifespan * 90 / 100,
        }
    }

    /// Unfloored `[min, max]` for a category.
    fn raw_band(&self, category: AgeCategory) -> (u32, u32) {
        match category {
            AgeCategory::Infant => (0, self.child_start),
            AgeCategory::Child => (self.child_start, self.child_end),
            AgeCategory::YoungAdult => (self.maturity, self.adult_start),
            AgeCategory::Adult => (self.adult_start, self.mature_start),
            AgeCategory::Mature => (self.mature_start, self.elderly_start),
            AgeCategory::Elderly => (self.elderly_start, self.lifespan),
        }
    }

    /// Inclusive `[min, max]` for a category after floors are applied.
    pub fn band(&self, category: AgeCategory) -> (u32, u32) {
        let (raw_min, raw_max) = self.raw_band(category);
        let min = raw_min.max(category.floor());
        let max = if min > raw_max { min + 1 } else { raw_max };
        (min, max)
    }
}

/// Inclusive `[min, max]` age range for a category of the given race.
pub fn age_range(category: AgeCategory, race: &RaceDefinition) -> (u32, u32) {
    AgeThresholds::for_race(race).band(category)
}

/// Draw a uniform age from the category's band.
pub fn sample_age<R: Rng>(category: AgeCategory, race: &RaceDefinition, rng: &mut R) -> u32 {
    let (min, max) = age_range(category, race);
    rng.gen_range(min..=max)
}

/// Category owning an age: the first band whose upper edge exceeds it.
pub fn classify_age(age: u32, race: &RaceDefinition) -> AgeCategory {
    let thresholds = AgeThresholds::for_race(race);
    AgeCategory::all()
        .into_iter()
        .take(5)
        .find(|category| {
            let (min, max) = thresholds.band(*category);
            age < max.max(min + 1)
        })
        .unwrap_or(AgeCategory::Elderly)
}

/// Weighted draw over the allowed categories.
pub fn random_category<R: Rng>(allowed: &[AgeCategory], rng: &mut R) -> AgeCategory {
    let total: u32 = allowed.iter().map(|c| c.weight()).sum();
    if total == 0 {
        return AgeCategory::Adult;
    }
    let mut roll = rng.gen_range(0..total);
    for category in allowed {
        if roll < category.weight() {
            return *category;
        }
        roll -= category.weight();
    }
    AgeCategory::Adult
}

// ============================================================================
// Age-tier policy
// ============================================================================

/// Everything that changes for a character because of its life stage.
///
/// Consulted by class resolution, occupation, ability rolling, hit points and
/// weapons so the infant special cases live in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeTierPolicy {
    pub category: AgeCategory,
    /// Only the level-0 commoner entry is allowed.
    pub forces_commoner: bool,
    /// Occupation is fixed to `Infant`.
    pub forces_infant_occupation: bool,
    /// Dice rolled for ability scores always use the infant tier.
    pub infant_dice: bool,
    pub allows_weapons: bool,
}

impl AgeTierPolicy {
    pub fn for_category(category: AgeCategory) -> Self {
        let infant = category == AgeCategory::Infant;
        Self {
            category,
            forces_commoner: infant,
            forces_infant_occupation: infant,
            infant_dice: infant,
            allows_weapons: !infant,
        }
    }

    pub fn is_infant(&self) -> bool {
        self.category == AgeCategory::Infant
    }

    /// Dice tier for a character of this age, given its class mix.
    pub fn roll_tier(&self, pure_commoner: bool) -> RollTier {
        if self.infant_dice {
            RollTier::Infant
        } else if pure_commoner {
            RollTier::Commoner
        } else {
            RollTier::Adventurer
        }
    }
}
