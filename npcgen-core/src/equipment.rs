//! Starting gear: the occupation's equipment list and ready weapon attacks.

use crate::abilities::{format_modifier, Ability, AbilityBlock};
use crate::age::AgeTierPolicy;
use crate::composition::ClassEntries;
use crate::rules::{ClassDefinition, DamageType, Occupation, RuleTables, WeaponDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A weapon as the character wields it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterWeapon {
    pub id: String,
    pub name: String,
    pub ability: Ability,
    pub proficient: bool,
    pub attack_bonus: i32,
    pub damage: String,
    pub damage_bonus: i32,
    pub damage_type: DamageType,
}

impl fmt::Display for CharacterWeapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} to hit, {}{} {}",
            self.name,
            format_modifier(self.attack_bonus),
            self.damage,
            match self.damage_bonus {
                0 => String::new(),
                b => format_modifier(b),
            },
            self.damage_type
        )
    }
}

/// Ability used to attack: DEX at range, the better of STR and DEX for
/// finesse, STR otherwise.
pub fn attack_ability(weapon: &WeaponDefinition, abilities: &AbilityBlock) -> Ability {
    if weapon.is_ranged() {
        Ability::Dexterity
    } else if weapon.is_finesse()
        && abilities.modifier(Ability::Dexterity) > abilities.modifier(Ability::Strength)
    {
        Ability::Dexterity
    } else {
        Ability::Strength
    }
}

/// Attack and damage numbers for one weapon.
pub fn character_weapon(
    weapon: &WeaponDefinition,
    class: &ClassDefinition,
    abilities: &AbilityBlock,
    proficiency: i8,
) -> CharacterWeapon {
    let ability = attack_ability(weapon, abilities);
    let modifier = abilities.modifier(ability) as i32;
    let proficient = class.is_proficient_with(&weapon.id, weapon.category);
    CharacterWeapon {
        id: weapon.id.clone(),
        name: weapon.name.clone(),
        ability,
        proficient,
        attack_bonus: modifier + if proficient { proficiency as i32 } else { 0 },
        damage: weapon.damage.clone(),
        damage_bonus: modifier,
        damage_type: weapon.damage_type,
    }
}

/// Primary class defaults followed by the occupation's tool-weapons.
/// Infants carry nothing. Unknown weapon ids and weapons whose damage is not
/// valid dice notation are skipped.
pub fn character_weapons(
    tables: &RuleTables,
    entries: &ClassEntries,
    occupation: &Occupation,
    abilities: &AbilityBlock,
    proficiency: i8,
    policy: &AgeTierPolicy,
) -> Vec<CharacterWeapon> {
    if !policy.allows_weapons {
        return Vec::new();
    }

    let class = tables
        .class(entries.primary().class)
        .cloned()
        .unwrap_or_else(|| ClassDefinition::fallback(entries.primary().class));

    let mut ids: Vec<&str> = Vec::new();
    let occupation_weapons = tables
        .occupation(occupation)
        .map(|o| o.weapons.as_slice())
        .unwrap_or_default();
    for id in class.default_weapons.iter().chain(occupation_weapons) {
        if !ids.contains(&id.as_str()) {
            ids.push(id);
        }
    }

    ids.into_iter()
        .filter_map(|id| {
            let weapon = tables.weapon(id);
            if weapon.is_none() {
                tracing::warn!(weapon = id, "Unknown weapon id, skipping");
            }
            weapon
        })
        .filter(|weapon| match weapon.damage_dice() {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(weapon = %weapon.id, %err, "Invalid weapon damage, skipping");
                false
            }
        })
        .map(|weapon| character_weapon(weapon, &class, abilities, proficiency))
        .collect()
}

/// The occupation's equipment list; empty for unknown occupations.
pub fn occupation_equipment(tables: &RuleTables, occupation: &Occupation) -> Vec<String> {
    tables
        .occupation(occupation)
        .map(|o| o.equipment.clone())
        .unwrap_or_default()
}
