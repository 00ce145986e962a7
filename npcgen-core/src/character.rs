//! The generated character record and its identity types.

use crate::abilities::{Ability, AbilityBlock};
use crate::age::AgeCategory;
use crate::background::BackgroundProfile;
use crate::composition::{CharacterFeature, ClassEntries};
use crate::equipment::CharacterWeapon;
use crate::rules::{Occupation, RaceId, Size};
use crate::skills::Skill;
use crate::spellcasting::SpellcastingProfile;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for generated characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// A v4 id drawn from the given generator, so seeded runs repeat.
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Identity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub fn all() -> [Gender; 3] {
        [Gender::Male, Gender::Female, Gender::NonBinary]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "non-binary" | "nonbinary" | "non_binary" | "nb" => Ok(Gender::NonBinary),
            _ => Err(format!("Unknown gender: {s}")),
        }
    }
}

/// The nine alignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    LawfulGood,
    NeutralGood,
    ChaoticGood,
    LawfulNeutral,
    TrueNeutral,
    ChaoticNeutral,
    LawfulEvil,
    NeutralEvil,
    ChaoticEvil,
}

impl Alignment {
    pub fn all() -> [Alignment; 9] {
        [
            Alignment::LawfulGood,
            Alignment::NeutralGood,
            Alignment::ChaoticGood,
            Alignment::LawfulNeutral,
            Alignment::TrueNeutral,
            Alignment::ChaoticNeutral,
            Alignment::LawfulEvil,
            Alignment::NeutralEvil,
            Alignment::ChaoticEvil,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Alignment::LawfulGood => "Lawful Good",
            Alignment::NeutralGood => "Neutral Good",
            Alignment::ChaoticGood => "Chaotic Good",
            Alignment::LawfulNeutral => "Lawful Neutral",
            Alignment::TrueNeutral => "True Neutral",
            Alignment::ChaoticNeutral => "Chaotic Neutral",
            Alignment::LawfulEvil => "Lawful Evil",
            Alignment::NeutralEvil => "Neutral Evil",
            Alignment::ChaoticEvil => "Chaotic Evil",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Alignment::LawfulGood => "LG",
            Alignment::NeutralGood => "NG",
            Alignment::ChaoticGood => "CG",
            Alignment::LawfulNeutral => "LN",
            Alignment::TrueNeutral => "N",
            Alignment::ChaoticNeutral => "CN",
            Alignment::LawfulEvil => "LE",
            Alignment::NeutralEvil => "NE",
            Alignment::ChaoticEvil => "CE",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', " ");
        if normalized == "neutral" {
            return Ok(Alignment::TrueNeutral);
        }
        Alignment::all()
            .into_iter()
            .find(|a| a.name().to_lowercase() == normalized || a.abbreviation().to_lowercase() == normalized)
            .ok_or_else(|| format!("Unknown alignment: {s}"))
    }
}

// ============================================================================
// Character record
// ============================================================================

/// Everything generated for one character.
///
/// Created fresh by each generation cycle and edited in place through
/// [`crate::GeneratorSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub race: RaceId,
    pub race_name: String,
    pub gender: Gender,
    pub alignment: Alignment,
    pub age: u32,
    pub age_category: AgeCategory,
    pub occupation: Occupation,
    pub classes: ClassEntries,
    pub abilities: AbilityBlock,
    pub total_level: u8,
    pub proficiency_bonus: i8,
    pub hit_points: i32,
    /// Set by a manual hit point edit; automatic recomputes leave it alone.
    #[serde(default)]
    pub custom_hit_points: bool,
    pub hit_dice: String,
    pub armor_class: i32,
    pub armor: String,
    #[serde(default)]
    pub custom_armor_class: bool,
    pub initiative: i8,
    pub passive_perception: i32,
    pub saving_throws: Vec<Ability>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub features: Vec<CharacterFeature>,
    pub equipment: Vec<String>,
    pub languages: Vec<String>,
    pub traits: Vec<String>,
    pub senses: Vec<String>,
    pub size: Size,
    pub speed: u32,
    pub spellcasting: Option<SpellcastingProfile>,
    pub weapons: Vec<CharacterWeapon>,
    /// Set only in player-character mode.
    #[serde(default)]
    pub background: Option<BackgroundProfile>,
    pub backstory: String,
}

impl CharacterRecord {
    pub fn is_infant(&self) -> bool {
        self.age_category == AgeCategory::Infant
    }

    pub fn is_spellcaster(&self) -> bool {
        self.spellcasting.is_some()
    }

    /// `Fighter 3 / Wizard 2`, omitting the commoner baseline unless it is
    /// the only entry.
    pub fn class_summary(&self) -> String {
        if self.classes.is_pure_commoner() {
            return "Commoner".to_string();
        }
        self.classes
            .adventuring()
            .map(|e| format!("{} {}", e.class.name(), e.level))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_ids_repeat() {
        let a = CharacterId::from_rng(&mut StdRng::seed_from_u64(1));
        let b = CharacterId::from_rng(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert_eq!(a.0.get_version_num(), 4);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Non-Binary".parse::<Gender>(), Ok(Gender::NonBinary));
        assert_eq!("f".parse::<Gender>(), Ok(Gender::Female));
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn test_alignment_parsing() {
        assert_eq!("lawful-good".parse::<Alignment>(), Ok(Alignment::LawfulGood));
        assert_eq!("CE".parse::<Alignment>(), Ok(Alignment::ChaoticEvil));
        assert_eq!("neutral".parse::<Alignment>(), Ok(Alignment::TrueNeutral));
        assert_eq!("true neutral".parse::<Alignment>(), Ok(Alignment::TrueNeutral));
        assert!("lawful awesome".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Gender::NonBinary).unwrap(), "\"non-binary\"");
        assert_eq!(
            serde_json::to_string(&Alignment::ChaoticNeutral).unwrap(),
            "\"chaotic-neutral\""
        );
    }
}
