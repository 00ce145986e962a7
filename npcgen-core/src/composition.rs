//! Class composition: the ordered class entries of a character and every
//! quantity derived from them.

use crate::abilities::{Ability, AbilityBlock};
use crate::generator::Choice;
use crate::rules::{CharacterClass, ClassDefinition, Occupation, RaceDefinition, RuleTables};
use crate::skills::{skill_proficiency_cap, Skill};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One class held by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub class: CharacterClass,
    /// 0 for the commoner baseline.
    pub level: u8,
    #[serde(default)]
    pub subclass: Option<String>,
}

impl ClassEntry {
    pub fn new(class: CharacterClass, level: u8) -> Self {
        Self {
            class,
            level,
            subclass: None,
        }
    }

    /// The level-0 baseline of ordinary folk.
    pub fn commoner() -> Self {
        Self::new(CharacterClass::Commoner, 0)
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }

    /// A real adventuring class with at least one level.
    pub fn is_adventuring(&self) -> bool {
        !self.class.is_commoner() && self.level > 0
    }

    /// Levels counted toward total level and hit points.
    pub fn counted_levels(&self) -> u8 {
        if self.class.is_commoner() {
            0
        } else {
            self.level
        }
    }

    /// `Evocation Wizard`-style label, falling back to the class name.
    pub fn describe(&self, tables: &RuleTables) -> String {
        match self
            .subclass
            .as_deref()
            .and_then(|id| tables.subclass_option(self.class, id))
        {
            Some(option) => format!("{} {}", option.name, self.class.name()),
            None => self.class.name().to_string(),
        }
    }
}

impl fmt::Display for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class.name(), self.level)?;
        if let Some(subclass) = &self.subclass {
            write!(f, " ({subclass})")?;
        }
        Ok(())
    }
}

/// A character's class entries. Never empty: the first entry is primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntries {
    primary: ClassEntry,
    #[serde(default)]
    multiclass: Vec<ClassEntry>,
}

impl ClassEntries {
    pub fn new(primary: ClassEntry) -> Self {
        Self {
            primary,
            multiclass: Vec::new(),
        }
    }

    pub fn commoner() -> Self {
        Self::new(ClassEntry::commoner())
    }

    pub fn with(mut self, entry: ClassEntry) -> Self {
        self.multiclass.push(entry);
        self
    }

    pub fn push(&mut self, entry: ClassEntry) {
        self.multiclass.push(entry);
    }

    pub fn primary(&self) -> &ClassEntry {
        &self.primary
    }

    pub fn multiclass(&self) -> &[ClassEntry] {
        &self.multiclass
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        std::iter::once(&self.primary).chain(self.multiclass.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClassEntry> {
        std::iter::once(&mut self.primary).chain(self.multiclass.iter_mut())
    }

    pub fn len(&self) -> usize {
        1 + self.multiclass.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn has_commoner(&self) -> bool {
        self.iter().any(|e| e.class.is_commoner())
    }

    pub fn adventuring(&self) -> impl Iterator<Item = &ClassEntry> {
        self.iter().filter(|e| e.is_adventuring())
    }

    pub fn has_adventuring(&self) -> bool {
        self.adventuring().next().is_some()
    }

    /// A commoner who trained in an adventuring class on the side.
    pub fn is_hidden_life(&self) -> bool {
        self.has_commoner() && self.has_adventuring()
    }

    /// Only commoner levels, no adventuring training.
    pub fn is_pure_commoner(&self) -> bool {
        !self.has_adventuring()
    }
}

impl<'a> IntoIterator for &'a ClassEntries {
    type Item = &'a ClassEntry;
    type IntoIter = Box<dyn Iterator<Item = &'a ClassEntry> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

fn class_or_fallback(tables: &RuleTables, class: CharacterClass) -> ClassDefinition {
    match tables.class(class) {
        Some(def) => def.clone(),
        None => {
            tracing::warn!(class = %class, "Class missing from rule tables, using defaults");
            ClassDefinition::fallback(class)
        }
    }
}

/// Resolve the subclass of an adventuring entry.
///
/// Below the unlock level there is no subclass. At or above it a fixed choice
/// is kept and a random one is drawn uniformly from the class's options.
pub fn resolve_subclass<R: Rng>(
    tables: &RuleTables,
    class: CharacterClass,
    level: u8,
    choice: &Choice<String>,
    rng: &mut R,
) -> Option<String> {
    let definition = tables.subclasses(class)?;
    if class.is_commoner() || level < definition.unlock_level {
        return None;
    }
    match choice {
        Choice::Fixed(id) => Some(id.clone()),
        Choice::Random => definition.options.choose(rng).map(|o| o.id.clone()),
    }
}

/// Highest total character level.
pub const MAX_LEVEL: u8 = 20;

/// Sum of levels, excluding commoner entries, capped at [`MAX_LEVEL`].
pub fn total_level(entries: &ClassEntries) -> u8 {
    let sum: u32 = entries.iter().map(|e| e.counted_levels() as u32).sum();
    if sum > MAX_LEVEL as u32 {
        tracing::warn!(levels = sum, "Class levels exceed the maximum, capping total level");
    }
    sum.min(MAX_LEVEL as u32) as u8
}

/// Proficiency bonus by total level. Level 0 (pure commoner) counts as 1.
pub fn proficiency_bonus(total_level: u8) -> i8 {
    match total_level {
        0..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        _ => 6,
    }
}

/// Hit points for the class mix and constitution modifier. Always at least 1.
pub fn hit_points(tables: &RuleTables, entries: &ClassEntries, con_mod: i8) -> i32 {
    let con = con_mod as i32;
    let mut adventuring = entries.adventuring();

    let Some(first) = adventuring.next() else {
        return (1 + con).max(1);
    };

    let first_die = class_or_fallback(tables, first.class).hit_die;
    let mut hp = first_die.sides() as i32 + con;
    hp += (first.level as i32 - 1) * (first_die.average() as i32 + con);

    for entry in adventuring {
        let die = class_or_fallback(tables, entry.class).hit_die;
        hp += entry.level as i32 * (die.average() as i32 + con);
    }

    hp.max(1)
}

/// Hit dice per adventuring entry, e.g. `5d6 + 2d10`.
pub fn hit_dice_summary(tables: &RuleTables, entries: &ClassEntries) -> String {
    entries
        .adventuring()
        .map(|e| format!("{}{}", e.level, class_or_fallback(tables, e.class).hit_die))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Saving throw proficiencies, from the primary class only.
pub fn saving_throws(tables: &RuleTables, entries: &ClassEntries) -> Vec<Ability> {
    class_or_fallback(tables, entries.primary().class).saving_throws
}

/// Armor class and the armor it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClass {
    pub value: i32,
    pub armor: String,
}

/// Armor class from the primary class's armor profile.
pub fn armor_class(tables: &RuleTables, entries: &ClassEntries, abilities: &AbilityBlock) -> ArmorClass {
    let dex = abilities.modifier(Ability::Dexterity) as i32;
    let definition = class_or_fallback(tables, entries.primary().class);

    let Some(armor) = definition.armor else {
        return ArmorClass {
            value: 10 + dex,
            armor: "Unarmored".to_string(),
        };
    };

    if let Some(formula) = armor.unarmored_defense {
        return ArmorClass {
            value: 10 + dex + abilities.modifier(formula.ability()) as i32,
            armor: "Unarmored Defense".to_string(),
        };
    }

    let mut value = armor.base_ac;
    if armor.add_dex {
        value += armor.max_dex.map_or(dex, |cap| dex.min(cap));
    }
    ArmorClass {
        value,
        armor: armor.name,
    }
}

/// Union of every entry's granted skills, the race's trait skills and the
/// occupation's skills, in first-seen order.
pub fn combined_skills(
    tables: &RuleTables,
    entries: &ClassEntries,
    race: &RaceDefinition,
    occupation: &Occupation,
) -> Vec<Skill> {
    let mut skills: Vec<Skill> = Vec::new();
    let class_skills = entries
        .iter()
        .filter_map(|e| tables.class(e.class))
        .flat_map(|def| def.granted_skills().iter().copied());
    let occupation_skills = tables
        .occupation(occupation)
        .into_iter()
        .flat_map(|o| o.skills.iter().copied());

    for skill in class_skills
        .chain(race.skills.iter().copied())
        .chain(occupation_skills)
    {
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills
}

/// Most skills a character may be proficient in: the primary class's picks,
/// the race's allowance, and the occupation's trade skills.
pub fn skill_limit(tables: &RuleTables, entries: &ClassEntries, race: &RaceDefinition, occupation: &Occupation) -> usize {
    let class_choices = tables.class(entries.primary().class).map(|def| def.skill_choices);
    let trade_skills = tables.occupation(occupation).map_or(0, |o| o.skills.len());
    skill_proficiency_cap(class_choices, race.skill_allowance()) + trade_skills
}

/// A class feature a character has unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFeature {
    pub class: CharacterClass,
    pub level: u8,
    pub name: String,
}

impl fmt::Display for CharacterFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.class.name(), self.level)
    }
}

/// Every feature the adventuring entries have reached, ordered by level and
/// then class name.
pub fn character_features(tables: &RuleTables, entries: &ClassEntries) -> Vec<CharacterFeature> {
    let mut features: Vec<CharacterFeature> = entries
        .adventuring()
        .flat_map(|entry| tables.features_for(entry.class, entry.level))
        .map(|def| CharacterFeature {
            class: def.class,
            level: def.level,
            name: def.name.clone(),
        })
        .collect();
    features.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.class.name().cmp(b.class.name())));
    features
}

/// 10 + WIS, plus proficiency when trained in Perception.
pub fn passive_perception(abilities: &AbilityBlock, skills: &[Skill], proficiency: i8) -> i32 {
    let mut value = 10 + abilities.modifier(Ability::Wisdom) as i32;
    if skills.contains(&Skill::Perception) {
        value += proficiency as i32;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityScores;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn block(dex: u8, con: u8, wis: u8) -> AbilityBlock {
        AbilityBlock::new(AbilityScores::new(10, dex, con, 10, wis, 10))
    }

    #[test]
    fn test_proficiency_steps() {
        let expected = [(0, 2), (1, 2), (4, 2), (5, 3), (8, 3), (9, 4), (12, 4), (13, 5), (16, 5), (17, 6), (20, 6)];
        for (level, bonus) in expected {
            assert_eq!(proficiency_bonus(level), bonus, "level {level}");
        }
    }

    #[test]
    fn test_total_level_ignores_commoner() {
        let entries = ClassEntries::commoner().with(ClassEntry::new(CharacterClass::Fighter, 3));
        assert_eq!(total_level(&entries), 3);
        assert_eq!(total_level(&ClassEntries::commoner()), 0);
    }

    #[test]
    fn test_total_level_saturates() {
        let mut entries = ClassEntries::new(ClassEntry::new(CharacterClass::Wizard, 20));
        for _ in 0..13 {
            entries.push(ClassEntry::new(CharacterClass::Wizard, 20));
        }
        assert_eq!(total_level(&entries), MAX_LEVEL);
        assert_eq!(proficiency_bonus(total_level(&entries)), 6);
    }

    #[test]
    fn test_single_class_hit_points() {
        let tables = RuleTables::standard();
        // wizard 5, CON +2: 6+2 then 4 * (4+2)
        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Wizard, 5));
        assert_eq!(hit_points(tables, &entries, 2), 8 + 24);
    }

    #[test]
    fn test_multiclass_hit_points() {
        let tables = RuleTables::standard();
        // fighter 3 (d10) / rogue 2 (d8), CON +1
        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Fighter, 3))
            .with(ClassEntry::new(CharacterClass::Rogue, 2));
        let expected = (10 + 1) + 2 * (6 + 1) + 2 * (5 + 1);
        assert_eq!(hit_points(tables, &entries, 1), expected);
        assert_eq!(hit_dice_summary(tables, &entries), "3d10 + 2d8");
    }

    #[test]
    fn test_commoner_hit_points() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::commoner();
        assert_eq!(hit_points(tables, &entries, 3), 4);
        assert_eq!(hit_points(tables, &entries, -2), 1);
        assert_eq!(hit_dice_summary(tables, &entries), "");
    }

    #[test]
    fn test_hidden_life_first_adventuring_entry_gets_max_die() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::commoner().with(ClassEntry::new(CharacterClass::Barbarian, 2));
        assert_eq!(hit_points(tables, &entries, 0), 12 + 7);
        assert!(entries.is_hidden_life());
    }

    #[test]
    fn test_hit_points_floor() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Sorcerer, 3));
        assert_eq!(hit_points(tables, &entries, -5), 1);
    }

    #[test]
    fn test_saving_throws_from_primary_only() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Rogue, 1))
            .with(ClassEntry::new(CharacterClass::Wizard, 1));
        assert_eq!(
            saving_throws(tables, &entries),
            vec![Ability::Dexterity, Ability::Intelligence]
        );
        assert!(saving_throws(tables, &ClassEntries::commoner()).is_empty());
    }

    #[test]
    fn test_armor_class_profiles() {
        let tables = RuleTables::standard();
        let abilities = block(16, 14, 12);
        let ac = |class| armor_class(tables, &ClassEntries::new(ClassEntry::new(class, 1)), &abilities);

        assert_eq!(ac(CharacterClass::Barbarian).value, 10 + 3 + 2);
        assert_eq!(ac(CharacterClass::Monk).value, 10 + 3 + 1);
        assert_eq!(ac(CharacterClass::Monk).armor, "Unarmored Defense");
        assert_eq!(ac(CharacterClass::Cleric).value, 14 + 2);
        assert_eq!(ac(CharacterClass::Fighter).value, 16);
        assert_eq!(ac(CharacterClass::Rogue).value, 11 + 3);
        assert_eq!(ac(CharacterClass::Wizard).value, 13);
        assert_eq!(ac(CharacterClass::Wizard).armor, "Unarmored");
    }

    #[test]
    fn test_combined_skills_dedup() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::commoner().with(ClassEntry::new(CharacterClass::Fighter, 1));
        let human = tables.race(&"human".into()).unwrap();
        let skills = combined_skills(tables, &entries, human, &Occupation::from_id("town_guard"));
        assert_eq!(skills, vec![Skill::Athletics, Skill::Intimidation, Skill::Perception]);
    }

    #[test]
    fn test_racial_trait_skills() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Wizard, 1));
        let tabaxi = tables.race(&"tabaxi".into()).unwrap();
        let skills = combined_skills(tables, &entries, tabaxi, &Occupation::Adventurer);
        assert!(skills.contains(&Skill::Perception));
        assert!(skills.contains(&Skill::Stealth));
    }

    #[test]
    fn test_skill_limit() {
        let tables = RuleTables::standard();
        let rogue = ClassEntries::new(ClassEntry::new(CharacterClass::Rogue, 1));
        let dwarf = tables.race(&"dwarf".into()).unwrap();
        let half_elf = tables.race(&"half-elf".into()).unwrap();
        let rogue_picks = tables.class(CharacterClass::Rogue).unwrap().skill_choices;
        assert_eq!(skill_limit(tables, &rogue, dwarf, &Occupation::Adventurer), rogue_picks);
        assert_eq!(skill_limit(tables, &rogue, half_elf, &Occupation::Adventurer), rogue_picks + 2);
    }

    #[test]
    fn test_features_by_level_then_class() {
        let tables = RuleTables::standard();
        let entries = ClassEntries::commoner()
            .with(ClassEntry::new(CharacterClass::Wizard, 2))
            .with(ClassEntry::new(CharacterClass::Fighter, 1));
        let features = character_features(tables, &entries);
        let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Fighting Style", "Second Wind", "Spellcasting", "Arcane Recovery", "Arcane Tradition"]
        );
        assert!(character_features(tables, &ClassEntries::commoner()).is_empty());
    }

    #[test]
    fn test_passive_perception() {
        let abilities = block(10, 10, 14);
        assert_eq!(passive_perception(&abilities, &[], 2), 12);
        assert_eq!(passive_perception(&abilities, &[Skill::Perception], 3), 15);
    }

    #[test]
    fn test_resolve_subclass() {
        let tables = RuleTables::standard();
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            resolve_subclass(tables, CharacterClass::Fighter, 2, &Choice::Random, &mut rng),
            None
        );
        let drawn = resolve_subclass(tables, CharacterClass::Fighter, 3, &Choice::Random, &mut rng).unwrap();
        assert!(tables.subclass_option(CharacterClass::Fighter, &drawn).is_some());
        assert_eq!(
            resolve_subclass(tables, CharacterClass::Cleric, 1, &Choice::Fixed("life".into()), &mut rng),
            Some("life".to_string())
        );
        assert_eq!(
            resolve_subclass(tables, CharacterClass::Commoner, 0, &Choice::Random, &mut rng),
            None
        );
    }

    #[test]
    fn test_describe_entry() {
        let tables = RuleTables::standard();
        let entry = ClassEntry::new(CharacterClass::Wizard, 3).with_subclass("evocation");
        assert_eq!(entry.describe(tables), "School of Evocation Wizard");
        assert_eq!(ClassEntry::new(CharacterClass::Bard, 1).describe(tables), "Bard");
    }
}
