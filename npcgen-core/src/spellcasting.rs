//! Spellcasting: which entries cast, how much, and which spells they know.

use crate::abilities::{Ability, AbilityBlock};
use crate::composition::{ClassEntries, ClassEntry};
use crate::rules::{
    CasterSource, CasterType, CharacterClass, RuleTables, SlotRow, SpellDefinition,
    SpellcastingRule,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A character's spellcasting, derived from one class entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcastingProfile {
    pub class: CharacterClass,
    #[serde(default)]
    pub subclass: Option<String>,
    pub ability: Ability,
    pub ability_modifier: i8,
    pub caster_type: CasterType,
    pub caster_level: u8,
    pub save_dc: i32,
    pub attack_bonus: i32,
    pub spell_slots: SlotRow,
    pub cantrips_known: u8,
    pub spells_known: u8,
    pub max_spell_level: u8,
    pub cantrips: Vec<String>,
    pub spells: Vec<String>,
}

impl SpellcastingProfile {
    /// Recompute DC and attack bonus after the ability or proficiency moved.
    pub fn refresh_bonuses(&mut self, abilities: &AbilityBlock, proficiency: i8) {
        self.ability_modifier = abilities.modifier(self.ability);
        self.save_dc = 8 + self.ability_modifier as i32 + proficiency as i32;
        self.attack_bonus = self.ability_modifier as i32 + proficiency as i32;
    }

    /// Slot counts as `(spell level, slots)`, skipping empty levels.
    pub fn slot_summary(&self) -> Vec<(u8, u8)> {
        self.spell_slots
            .iter()
            .enumerate()
            .filter(|(_, slots)| **slots > 0)
            .map(|(i, slots)| (i as u8 + 1, *slots))
            .collect()
    }
}

/// The rule that makes this entry a caster, if it has reached the rule's
/// start level. A subclass that grants spellcasting takes precedence.
pub fn spellcasting_rule<'t>(tables: &'t RuleTables, entry: &ClassEntry) -> Option<&'t SpellcastingRule> {
    if !entry.is_adventuring() {
        return None;
    }

    let subclass_rule = entry
        .subclass
        .as_deref()
        .filter(|id| {
            tables
                .subclass_option(entry.class, id)
                .is_some_and(|o| o.grants_spellcasting)
        })
        .and_then(|id| tables.spellcasting_rule(&CasterSource::Subclass(id.to_string())));

    subclass_rule
        .or_else(|| tables.spellcasting_rule(&CasterSource::Class(entry.class)))
        .filter(|rule| entry.level >= rule.start_level)
}

/// Cantrip and leveled-spell pools a rule can draw from at a spell level cap.
pub fn available_spells<'t>(
    tables: &'t RuleTables,
    rule: &SpellcastingRule,
    max_spell_level: u8,
) -> (Vec<&'t SpellDefinition>, Vec<&'t SpellDefinition>) {
    tables
        .spells_for_class(rule.spell_list)
        .filter(|spell| spell.level <= max_spell_level && rule.allows_school(spell))
        .partition(|spell| spell.is_cantrip())
}

/// Draw up to `count` leveled spells without replacement, favouring lower
/// levels with weight `max(1, max_spell_level - level + 1)`.
fn draw_weighted<'s, R: Rng>(
    mut pool: Vec<&'s SpellDefinition>,
    count: usize,
    max_spell_level: u8,
    rng: &mut R,
) -> Vec<&'s SpellDefinition> {
    let weight = |spell: &SpellDefinition| (max_spell_level as i32 - spell.level as i32 + 1).max(1) as u32;
    let mut chosen = Vec::with_capacity(count.min(pool.len()));

    while chosen.len() < count && !pool.is_empty() {
        let total: u32 = pool.iter().map(|s| weight(s)).sum();
        let mut roll = rng.gen_range(0..total);
        let mut index = pool.len() - 1;
        for (i, spell) in pool.iter().enumerate() {
            let w = weight(spell);
            if roll < w {
                index = i;
                break;
            }
            roll -= w;
        }
        chosen.push(pool.swap_remove(index));
    }
    chosen
}

/// Full profile for a single class entry, or `None` if it does not cast.
pub fn calculate_spellcasting<R: Rng>(
    tables: &RuleTables,
    entry: &ClassEntry,
    abilities: &AbilityBlock,
    proficiency: i8,
    rng: &mut R,
) -> Option<SpellcastingProfile> {
    let rule = spellcasting_rule(tables, entry)?;
    let caster_level = entry.level;
    let ability_modifier = abilities.modifier(rule.ability);
    let max_spell_level = rule.caster_type.max_spell_level(caster_level);
    let cantrips_known = rule.cantrips_known(caster_level);
    let spells_known = rule.spells_known.count(caster_level, ability_modifier);

    let (cantrip_pool, leveled_pool) = available_spells(tables, rule, max_spell_level);

    let cantrips: Vec<String> = cantrip_pool
        .choose_multiple(rng, cantrips_known as usize)
        .map(|s| s.id.clone())
        .collect();
    let spells: Vec<String> = draw_weighted(leveled_pool, spells_known as usize, max_spell_level, rng)
        .into_iter()
        .map(|s| s.id.clone())
        .collect();

    tracing::debug!(
        class = %entry.class,
        caster_type = %rule.caster_type,
        caster_level,
        max_spell_level,
        cantrips = cantrips.len(),
        spells = spells.len(),
        "Calculated spellcasting"
    );

    let mut profile = SpellcastingProfile {
        class: entry.class,
        subclass: entry.subclass.clone(),
        ability: rule.ability,
        ability_modifier,
        caster_type: rule.caster_type,
        caster_level,
        save_dc: 0,
        attack_bonus: 0,
        spell_slots: tables.slot_tables.row(rule.caster_type, caster_level),
        cantrips_known,
        spells_known,
        max_spell_level,
        cantrips,
        spells,
    };
    profile.refresh_bonuses(abilities, proficiency);
    Some(profile)
}

/// Spellcasting for the whole character, from the primary entry only.
/// Multiclass entries never cast.
pub fn character_spellcasting<R: Rng>(
    tables: &RuleTables,
    entries: &ClassEntries,
    abilities: &AbilityBlock,
    proficiency: i8,
    rng: &mut R,
) -> Option<SpellcastingProfile> {
    calculate_spellcasting(tables, entries.primary(), abilities, proficiency, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityScores;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn smart() -> AbilityBlock {
        AbilityBlock::new(AbilityScores::new(8, 14, 13, 16, 12, 10))
    }

    #[test]
    fn test_wizard_five() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(5);
        let entry = ClassEntry::new(CharacterClass::Wizard, 5);
        let profile = calculate_spellcasting(tables, &entry, &smart(), 3, &mut rng).unwrap();

        assert_eq!(profile.max_spell_level, 3);
        assert_eq!(profile.spell_slots, [4, 3, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(profile.cantrips_known, 4);
        assert_eq!(profile.spells_known, 8);
        assert_eq!(profile.save_dc, 8 + 3 + 3);
        assert_eq!(profile.attack_bonus, 6);
        assert!(profile.cantrips.len() <= 4);
        assert!(profile.spells.len() <= 8);
        for id in &profile.spells {
            let spell = tables.spell(id).unwrap();
            assert!((1..=3).contains(&spell.level));
            assert!(spell.classes.contains(&CharacterClass::Wizard));
        }
    }

    #[test]
    fn test_no_duplicate_selections() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(11);
        let entry = ClassEntry::new(CharacterClass::Sorcerer, 20);
        let profile = calculate_spellcasting(tables, &entry, &smart(), 6, &mut rng).unwrap();
        let mut spells = profile.spells.clone();
        spells.sort();
        spells.dedup();
        assert_eq!(spells.len(), profile.spells.len());
    }

    #[test]
    fn test_half_caster_starts_at_two() {
        let tables = RuleTables::standard();
        assert!(spellcasting_rule(tables, &ClassEntry::new(CharacterClass::Paladin, 1)).is_none());
        assert!(spellcasting_rule(tables, &ClassEntry::new(CharacterClass::Paladin, 2)).is_some());
    }

    #[test]
    fn test_non_casters() {
        let tables = RuleTables::standard();
        assert!(spellcasting_rule(tables, &ClassEntry::new(CharacterClass::Fighter, 10)).is_none());
        assert!(spellcasting_rule(tables, &ClassEntry::commoner()).is_none());
    }

    #[test]
    fn test_eldritch_knight_schools() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let entry = ClassEntry::new(CharacterClass::Fighter, 7).with_subclass("eldritch-knight");
        let profile = calculate_spellcasting(tables, &entry, &smart(), 3, &mut rng).unwrap();

        assert_eq!(profile.caster_type, CasterType::Third);
        assert_eq!(profile.max_spell_level, 2);
        for id in &profile.spells {
            let school = tables.spell(id).unwrap().school;
            assert!(matches!(
                school,
                crate::rules::SpellSchool::Abjuration | crate::rules::SpellSchool::Evocation
            ));
        }
    }

    #[test]
    fn test_pact_caster_slots() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(8);
        let entry = ClassEntry::new(CharacterClass::Warlock, 5);
        let profile = calculate_spellcasting(tables, &entry, &smart(), 3, &mut rng).unwrap();
        assert_eq!(profile.max_spell_level, 3);
        assert_eq!(profile.slot_summary(), vec![(3, 2)]);
    }

    #[test]
    fn test_only_primary_entry_casts() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let fighter_first = ClassEntries::new(ClassEntry::new(CharacterClass::Fighter, 3))
            .with(ClassEntry::new(CharacterClass::Wizard, 3));
        assert!(character_spellcasting(tables, &fighter_first, &smart(), 2, &mut rng).is_none());

        let hidden_life = ClassEntries::commoner().with(ClassEntry::new(CharacterClass::Wizard, 1));
        assert!(character_spellcasting(tables, &hidden_life, &smart(), 2, &mut rng).is_none());

        let wizard_first = ClassEntries::new(ClassEntry::new(CharacterClass::Wizard, 3))
            .with(ClassEntry::new(CharacterClass::Fighter, 3));
        let profile = character_spellcasting(tables, &wizard_first, &smart(), 3, &mut rng).unwrap();
        assert_eq!(profile.class, CharacterClass::Wizard);
        assert_eq!(profile.caster_level, 3);
    }

    #[test]
    fn test_weighted_draw_exhausts_small_pool() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(2);
        let pool: Vec<_> = tables.spells.iter().filter(|s| s.level == 1).take(3).collect();
        let drawn = draw_weighted(pool, 10, 1, &mut rng);
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn test_refresh_bonuses() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(6);
        let entry = ClassEntry::new(CharacterClass::Cleric, 1);
        let mut abilities = smart();
        let mut profile = calculate_spellcasting(tables, &entry, &abilities, 2, &mut rng).unwrap();
        assert_eq!(profile.save_dc, 8 + 1 + 2);

        abilities.set(Ability::Wisdom, 18);
        profile.refresh_bonuses(&abilities, 2);
        assert_eq!(profile.save_dc, 8 + 4 + 2);
        assert_eq!(profile.attack_bonus, 6);
    }
}
