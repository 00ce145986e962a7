//! Property-based tests for the derivation rules.
//!
//! Tests invariants:
//! - Modifiers are floor((score - 10) / 2)
//! - Score assignment is a permutation of the raw values
//! - Hit points never drop below 1
//! - Proficiency steps up every four levels from +2 to +6
//! - Spell lists never exceed the caps of their profile
//! - Sampled ages classify back to their category except at the band's top edge

use npcgen_core::abilities::{assign_scores, modifier, StatPriority};
use npcgen_core::age::{age_range, classify_age, sample_age};
use npcgen_core::composition::{hit_points, proficiency_bonus};
use npcgen_core::spellcasting::calculate_spellcasting;
use npcgen_core::{Ability, AbilityBlock, AbilityScores, AgeCategory, CharacterClass, ClassEntries, ClassEntry, RuleTables};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Strategies
// ============================================================================

fn arb_ability() -> impl Strategy<Value = Ability> {
    (0usize..6).prop_map(|i| Ability::all()[i])
}

fn arb_class() -> impl Strategy<Value = CharacterClass> {
    (0usize..13).prop_map(|i| CharacterClass::all()[i])
}

fn arb_category() -> impl Strategy<Value = AgeCategory> {
    (0usize..6).prop_map(|i| AgeCategory::all()[i])
}

fn arb_priority() -> impl Strategy<Value = StatPriority> {
    (
        proptest::option::of(arb_ability()),
        proptest::option::of(arb_ability()),
        proptest::option::of(arb_ability()),
    )
        .prop_map(|(primary, secondary, dump)| StatPriority {
            primary,
            secondary,
            dump,
        })
}

fn arb_entries() -> impl Strategy<Value = ClassEntries> {
    proptest::collection::vec((arb_class(), 1u8..=20), 1..4).prop_map(|specs| {
        let mut specs = specs.into_iter().map(|(class, level)| {
            if class.is_commoner() {
                ClassEntry::commoner()
            } else {
                ClassEntry::new(class, level)
            }
        });
        let mut entries = ClassEntries::new(specs.next().unwrap_or_else(ClassEntry::commoner));
        for entry in specs {
            entries.push(entry);
        }
        entries
    })
}

fn sorted_desc(mut values: [u8; 6]) -> [u8; 6] {
    values.sort_by(|a, b| b.cmp(a));
    values
}

proptest! {
    #[test]
    fn prop_modifier_formula(score in 1u8..=30) {
        let expected = ((score as i32 - 10) as f64 / 2.0).floor() as i8;
        prop_assert_eq!(modifier(score), expected);
    }

    #[test]
    fn prop_assignment_is_permutation(
        raw in proptest::array::uniform6(1u8..=18),
        priority in arb_priority(),
        seed in any::<u64>(),
    ) {
        let raw = sorted_desc(raw);
        let scores = assign_scores(raw, &priority, &mut StdRng::seed_from_u64(seed));
        let assigned: [u8; 6] = Ability::all().map(|a| scores.get(a));
        prop_assert_eq!(sorted_desc(assigned), raw);
    }

    #[test]
    fn prop_primary_gets_highest(raw in proptest::array::uniform6(3u8..=18), primary in arb_ability(), seed in any::<u64>()) {
        let raw = sorted_desc(raw);
        let scores = assign_scores(raw, &StatPriority::new(primary), &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(scores.get(primary), raw[0]);
    }

    #[test]
    fn prop_hit_points_at_least_one(entries in arb_entries(), con in -5i8..=10) {
        prop_assert!(hit_points(RuleTables::standard(), &entries, con) >= 1);
    }

    #[test]
    fn prop_proficiency_steps(level in 1u8..=20) {
        let bonus = proficiency_bonus(level);
        prop_assert_eq!(bonus as i32, 2 + (level as i32 - 1) / 4);
        prop_assert!(proficiency_bonus(level.saturating_sub(1)) <= bonus);
    }

    #[test]
    fn prop_spell_lists_within_caps(class in arb_class(), level in 1u8..=20, int in 3u8..=20, seed in any::<u64>()) {
        let tables = RuleTables::standard();
        let abilities = AbilityBlock::new(AbilityScores::new(10, 10, 10, int, int, int));
        let entry = ClassEntry::new(class, level);
        let mut rng = StdRng::seed_from_u64(seed);

        if let Some(profile) = calculate_spellcasting(tables, &entry, &abilities, proficiency_bonus(level), &mut rng) {
            prop_assert!(profile.cantrips.len() <= profile.cantrips_known as usize);
            prop_assert!(profile.spells.len() <= profile.spells_known as usize);
            for id in profile.cantrips.iter().chain(&profile.spells) {
                let spell = tables.spell(id).expect("catalog spell");
                prop_assert!(spell.level <= profile.max_spell_level, "{} above level {}", id, profile.max_spell_level);
                prop_assert!(spell.classes.contains(&class));
            }
            for (slot_level, _) in profile.slot_summary() {
                prop_assert!(slot_level <= profile.max_spell_level);
            }
        }
    }

    #[test]
    fn prop_sampled_age_classifies_back(race_index in 0usize..64, category in arb_category(), seed in any::<u64>()) {
        let tables = RuleTables::standard();
        let race = &tables.races[race_index % tables.races.len()];
        let age = sample_age(category, race, &mut StdRng::seed_from_u64(seed));
        let (min, max) = age_range(category, race);

        prop_assert!((min..=max).contains(&age));
        if age != max {
            prop_assert_eq!(classify_age(age, race), category, "{} age {}", race.name, age);
        }
    }
}

#[test]
fn test_wide_elf_bands_mostly_agree() {
    let tables = RuleTables::standard();
    let elf = tables
        .races
        .iter()
        .find(|r| r.id.as_str() == "elf")
        .expect("elf in standard tables");
    let mut rng = StdRng::seed_from_u64(99);

    for category in [
        AgeCategory::YoungAdult,
        AgeCategory::Adult,
        AgeCategory::Mature,
        AgeCategory::Elderly,
    ] {
        let agree = (0..1000)
            .filter(|_| classify_age(sample_age(category, elf, &mut rng), elf) == category)
            .count();
        assert!(agree >= 950, "{category}: {agree}/1000");
    }
}
