//! Standard weapon catalog.

use crate::dice::{DiceError, DicePool};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proficiency group a weapon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponCategory {
    Simple,
    Martial,
}

impl fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponCategory::Simple => write!(f, "Simple"),
            WeaponCategory::Martial => write!(f, "Martial"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponRange {
    Melee,
    Ranged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Bludgeoning,
    Piercing,
    Slashing,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageType::Bludgeoning => write!(f, "bludgeoning"),
            DamageType::Piercing => write!(f, "piercing"),
            DamageType::Slashing => write!(f, "slashing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponProperty {
    Finesse,
    Light,
    Heavy,
    TwoHanded,
    Versatile(String),
    Thrown,
    Ammunition,
    Loading,
    Reach,
}

/// A weapon in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    pub id: String,
    pub name: String,
    pub category: WeaponCategory,
    pub range: WeaponRange,
    pub damage: String,
    pub damage_type: DamageType,
    #[serde(default)]
    pub properties: Vec<WeaponProperty>,
}

impl WeaponDefinition {
    pub fn new(
        id: &str,
        name: &str,
        category: WeaponCategory,
        range: WeaponRange,
        damage: &str,
        damage_type: DamageType,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            range,
            damage: damage.to_string(),
            damage_type,
            properties: Vec::new(),
        }
    }

    pub fn with_properties(mut self, properties: Vec<WeaponProperty>) -> Self {
        self.properties = properties;
        self
    }

    pub fn is_finesse(&self) -> bool {
        self.properties.contains(&WeaponProperty::Finesse)
    }

    pub fn is_ranged(&self) -> bool {
        self.range == WeaponRange::Ranged
    }

    pub fn damage_dice(&self) -> Result<DicePool, DiceError> {
        DicePool::parse(&self.damage)
    }
}

lazy_static::lazy_static! {
    /// Standard D&D 5e weapons.
    pub static ref WEAPONS: Vec<WeaponDefinition> = {
        use DamageType::*;
        use WeaponCategory::*;
        use WeaponProperty::*;
        use WeaponRange::*;

        vec![
            // Simple Melee Weapons
            WeaponDefinition::new("club", "Club", Simple, Melee, "1d4", Bludgeoning)
                .with_properties(vec![Light]),
            WeaponDefinition::new("dagger", "Dagger", Simple, Melee, "1d4", Piercing)
                .with_properties(vec![Finesse, Light, Thrown]),
            WeaponDefinition::new("greatclub", "Greatclub", Simple, Melee, "1d8", Bludgeoning)
                .with_properties(vec![TwoHanded]),
            WeaponDefinition::new("handaxe", "Handaxe", Simple, Melee, "1d6", Slashing)
                .with_properties(vec![Light, Thrown]),
            WeaponDefinition::new("javelin", "Javelin", Simple, Melee, "1d6", Piercing)
                .with_properties(vec![Thrown]),
            WeaponDefinition::new("light-hammer", "Light Hammer", Simple, Melee, "1d4", Bludgeoning)
                .with_properties(vec![Light, Thrown]),
            WeaponDefinition::new("mace", "Mace", Simple, Melee, "1d6", Bludgeoning),
            WeaponDefinition::new("quarterstaff", "Quarterstaff", Simple, Melee, "1d6", Bludgeoning)
                .with_properties(vec![Versatile("1d8".to_string())]),
            WeaponDefinition::new("sickle", "Sickle", Simple, Melee, "1d4", Slashing)
                .with_properties(vec![Light]),
            WeaponDefinition::new("spear", "Spear", Simple, Melee, "1d6", Piercing)
                .with_properties(vec![Thrown, Versatile("1d8".to_string())]),
            // Simple Ranged Weapons
            WeaponDefinition::new("light-crossbow", "Light Crossbow", Simple, Ranged, "1d8", Piercing)
                .with_properties(vec![Ammunition, Loading, TwoHanded]),
            WeaponDefinition::new("dart", "Dart", Simple, Ranged, "1d4", Piercing)
                .with_properties(vec![Finesse, Thrown]),
            WeaponDefinition::new("shortbow", "Shortbow", Simple, Ranged, "1d6", Piercing)
                .with_properties(vec![Ammunition, TwoHanded]),
            WeaponDefinition::new("sling", "Sling", Simple, Ranged, "1d4", Bludgeoning)
                .with_properties(vec![Ammunition]),
            // Martial Melee Weapons
            WeaponDefinition::new("battleaxe", "Battleaxe", Martial, Melee, "1d8", Slashing)
                .with_properties(vec![Versatile("1d10".to_string())]),
            WeaponDefinition::new("greataxe", "Greataxe", Martial, Melee, "1d12", Slashing)
                .with_properties(vec![Heavy, TwoHanded]),
            WeaponDefinition::new("greatsword", "Greatsword", Martial, Melee, "2d6", Slashing)
                .with_properties(vec![Heavy, TwoHanded]),
            WeaponDefinition::new("longsword", "Longsword", Martial, Melee, "1d8", Slashing)
                .with_properties(vec![Versatile("1d10".to_string())]),
            WeaponDefinition::new("maul", "Maul", Martial, Melee, "2d6", Bludgeoning)
                .with_properties(vec![Heavy, TwoHanded]),
            WeaponDefinition::new("rapier", "Rapier", Martial, Melee, "1d8", Piercing)
                .with_properties(vec![Finesse]),
            WeaponDefinition::new("scimitar", "Scimitar", Martial, Melee, "1d6", Slashing)
                .with_properties(vec![Finesse, Light]),
            WeaponDefinition::new("shortsword", "Shortsword", Martial, Melee, "1d6", Piercing)
                .with_properties(vec![Finesse, Light]),
            WeaponDefinition::new("warhammer", "Warhammer", Martial, Melee, "1d8", Bludgeoning)
                .with_properties(vec![Versatile("1d10".to_string())]),
            WeaponDefinition::new("whip", "Whip", Martial, Melee, "1d4", Slashing)
                .with_properties(vec![Finesse, Reach]),
            // Martial Ranged Weapons
            WeaponDefinition::new("hand-crossbow", "Hand Crossbow", Martial, Ranged, "1d6", Piercing)
                .with_properties(vec![Ammunition, Light, Loading]),
            WeaponDefinition::new("heavy-crossbow", "Heavy Crossbow", Martial, Ranged, "1d10", Piercing)
                .with_properties(vec![Ammunition, Heavy, Loading, TwoHanded]),
            WeaponDefinition::new("longbow", "Longbow", Martial, Ranged, "1d8", Piercing)
                .with_properties(vec![Ammunition, Heavy, TwoHanded]),
        ]
    };
}

/// Get a standard weapon by id or display name.
pub fn get_weapon(name: &str) -> Option<WeaponDefinition> {
    let name_lower = name.to_lowercase();
    WEAPONS
        .iter()
        .find(|w| w.id == name_lower || w.name.to_lowercase() == name_lower)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_weapon() {
        let rapier = get_weapon("Rapier").unwrap();
        assert!(rapier.is_finesse());
        assert_eq!(rapier.category, WeaponCategory::Martial);
        assert!(get_weapon("light-crossbow").unwrap().is_ranged());
        assert!(get_weapon("vorpal blade").is_none());
    }

    #[test]
    fn test_damage_notation_parses() {
        for weapon in WEAPONS.iter() {
            let dice = weapon.damage_dice();
            assert!(dice.is_ok(), "{}: {:?}", weapon.id, dice);
        }
    }
}
