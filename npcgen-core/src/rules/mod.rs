//! Declarative rule tables consumed by the generation engine.
//!
//! The built-in tables are assembled once and shared through
//! [`RuleTables::standard`]. Alternative tables can be loaded from JSON; they
//! are trusted as-is.

pub mod backgrounds;
pub mod classes;
pub mod features;
pub mod occupations;
pub mod races;
pub mod spells;
pub mod weapons;

pub use backgrounds::BackgroundDefinition;
pub use classes::{
    ArmorProfile, CharacterClass, ClassDefinition, SubclassDefinition, SubclassOption,
    UnarmoredDefense,
};
pub use features::FeatureDefinition;
pub use occupations::{Occupation, OccupationDefinition, OccupationId};
pub use races::{LoreFragment, NameTable, RaceDefinition, RaceId, Size};
pub use spells::{
    CasterSource, CasterType, SlotRow, SlotTables, SpellDefinition, SpellSchool,
    SpellcastingRule, SpellsKnown,
};
pub use weapons::{DamageType, WeaponCategory, WeaponDefinition, WeaponProperty, WeaponRange};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Error type for loading rule tables.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rule tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rule tables: {0}")]
    Json(#[from] serde_json::Error),
}

static STANDARD_TABLES: LazyLock<RuleTables> = LazyLock::new(RuleTables::build_standard);
static FALLBACK_LORE: LazyLock<LoreFragment> = LazyLock::new(LoreFragment::generic);

/// All reference data for generation. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    pub races: Vec<RaceDefinition>,
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub subclasses: Vec<SubclassDefinition>,
    pub occupations: Vec<OccupationDefinition>,
    #[serde(default)]
    pub spells: Vec<SpellDefinition>,
    #[serde(default)]
    pub spellcasting: Vec<SpellcastingRule>,
    #[serde(default = "SlotTables::standard")]
    pub slot_tables: SlotTables,
    #[serde(default)]
    pub weapons: Vec<WeaponDefinition>,
    #[serde(default)]
    pub features: Vec<FeatureDefinition>,
    #[serde(default)]
    pub backgrounds: Vec<BackgroundDefinition>,
}

impl RuleTables {
    /// The built-in tables.
    pub fn standard() -> &'static RuleTables {
        &STANDARD_TABLES
    }

    fn build_standard() -> Self {
        Self {
            races: races::standard_races(),
            classes: classes::standard_classes(),
            subclasses: classes::standard_subclasses(),
            occupations: occupations::standard_occupations(),
            spells: spells::standard_spells(),
            spellcasting: spells::standard_spellcasting_rules(),
            slot_tables: SlotTables::standard(),
            weapons: weapons::WEAPONS.clone(),
            features: features::standard_features(),
            backgrounds: backgrounds::standard_backgrounds(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, RulesError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn race(&self, id: &RaceId) -> Option<&RaceDefinition> {
        self.races.iter().find(|r| &r.id == id)
    }

    pub fn class(&self, class: CharacterClass) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn subclasses(&self, class: CharacterClass) -> Option<&SubclassDefinition> {
        self.subclasses.iter().find(|s| s.class == class)
    }

    pub fn subclass_option(&self, class: CharacterClass, id: &str) -> Option<&SubclassOption> {
        self.subclasses(class).and_then(|s| s.option(id))
    }

    pub fn occupation(&self, occupation: &Occupation) -> Option<&OccupationDefinition> {
        self.occupations
            .iter()
            .find(|o| o.id.as_str() == occupation.id())
    }

    /// Occupations a grown commoner can hold (everything but the reserved ones).
    pub fn trade_occupations(&self) -> impl Iterator<Item = &OccupationDefinition> {
        self.occupations.iter().filter(|o| !o.is_reserved())
    }

    pub fn spell(&self, id: &str) -> Option<&SpellDefinition> {
        self.spells.iter().find(|s| s.id == id)
    }

    pub fn spells_for_class(&self, class: CharacterClass) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.iter().filter(move |s| s.classes.contains(&class))
    }

    pub fn spellcasting_rule(&self, source: &CasterSource) -> Option<&SpellcastingRule> {
        self.spellcasting.iter().find(|r| &r.source == source)
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.iter().find(|w| w.id == id)
    }

    /// Features of `class` gained at or below `level`, in table order.
    pub fn features_for(&self, class: CharacterClass, level: u8) -> impl Iterator<Item = &FeatureDefinition> {
        self.features
            .iter()
            .filter(move |f| f.class == class && f.level <= level)
    }

    pub fn background(&self, id: &str) -> Option<&BackgroundDefinition> {
        let id = id.trim().to_lowercase().replace([' ', '-'], "_");
        self.backgrounds.iter().find(|b| b.id == id)
    }

    /// Lore for a race, falling back to human lore, then to generic lore.
    pub fn lore(&self, race: &RaceId) -> &LoreFragment {
        self.race(race)
            .and_then(|r| r.lore.as_ref())
            .or_else(|| self.race(&RaceId::new("human")).and_then(|r| r.lore.as_ref()))
            .unwrap_or_else(|| &*FALLBACK_LORE)
    }

    /// Name table for a race, falling back to the human table.
    pub fn names(&self, race: &RaceId) -> Option<&NameTable> {
        self.race(race)
            .and_then(|r| r.names.as_ref())
            .or_else(|| self.race(&RaceId::new("human")).and_then(|r| r.names.as_ref()))
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::build_standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lookups() {
        let tables = RuleTables::standard();
        assert_eq!(tables.race(&RaceId::new("elf")).unwrap().lifespan, 750);
        assert!(tables.race(&RaceId::new("sea-folk")).is_none());
        assert!(tables.class(CharacterClass::Wizard).is_some());
        assert_eq!(
            tables.subclasses(CharacterClass::Cleric).unwrap().unlock_level,
            1
        );
        assert!(tables.occupation(&Occupation::Infant).is_some());
        assert!(tables.trade_occupations().all(|o| o.id.as_str() != "infant"));
        assert!(tables.weapon("longsword").is_some());
        assert_eq!(tables.background("Folk Hero").unwrap().id, "folk_hero");
        assert_eq!(tables.features_for(CharacterClass::Fighter, 2).count(), 3);
        assert_eq!(tables.features_for(CharacterClass::Commoner, 20).count(), 0);
    }

    #[test]
    fn test_lore_fallback() {
        let tables = RuleTables::standard();
        let human = tables.lore(&RaceId::new("human")).clone();
        assert_eq!(tables.lore(&RaceId::new("unknown-race")), &human);
        // half-elf has its own lore
        assert_ne!(tables.lore(&RaceId::new("half-elf")), &human);
    }

    #[test]
    fn test_names_fallback() {
        let tables = RuleTables::standard();
        let human = tables.names(&RaceId::new("human")).unwrap();
        assert_eq!(tables.names(&RaceId::new("goliath")), Some(human));
    }

    #[test]
    fn test_json_roundtrip_preserves_tables() {
        let tables = RuleTables::standard();
        let json = tables.to_json().unwrap();
        let loaded = RuleTables::from_json_str(&json).unwrap();
        assert_eq!(&loaded, tables);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleTables::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = RuleTables::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, RulesError::Json(_)));
    }
}
