//! Ability scores: rolling, class-priority assignment, and racial bonuses.

use crate::dice::{DicePool, DieType};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six core abilities, in canonical enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Position in the canonical order (STR=0 .. CHA=5).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Accepts full names or three-letter abbreviations, case-insensitively.
    pub fn parse(s: &str) -> Option<Ability> {
        let s = s.trim().to_lowercase();
        Ability::all()
            .into_iter()
            .find(|a| a.abbreviation().to_lowercase() == s || a.name().to_lowercase() == s)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Standard 5e modifier: floor((score - 10) / 2).
pub fn modifier(score: u8) -> i8 {
    (score as i16 - 10).div_euclid(2) as i8
}

/// Format a modifier with an explicit sign, e.g. `+2` or `-1`.
pub fn format_modifier(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Ability scores container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    pub fn total(&self) -> u32 {
        Ability::all().iter().map(|a| self.get(*a) as u32).sum()
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Final scores paired with their derived modifiers.
///
/// Scores are only mutable through [`AbilityBlock::set`], which keeps each
/// modifier equal to `modifier(score)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBlock {
    scores: AbilityScores,
    modifiers: [i8; 6],
}

impl AbilityBlock {
    pub fn new(scores: AbilityScores) -> Self {
        let mut modifiers = [0; 6];
        for ability in Ability::all() {
            modifiers[ability.index()] = modifier(scores.get(ability));
        }
        Self { scores, modifiers }
    }

    pub fn scores(&self) -> &AbilityScores {
        &self.scores
    }

    pub fn score(&self, ability: Ability) -> u8 {
        self.scores.get(ability)
    }

    pub fn modifier(&self, ability: Ability) -> i8 {
        self.modifiers[ability.index()]
    }

    pub fn set(&mut self, ability: Ability, value: u8) {
        self.scores.set(ability, value);
        self.modifiers[ability.index()] = modifier(value);
    }
}

impl From<AbilityScores> for AbilityBlock {
    fn from(scores: AbilityScores) -> Self {
        AbilityBlock::new(scores)
    }
}

impl Default for AbilityBlock {
    fn default() -> Self {
        AbilityBlock::new(AbilityScores::default())
    }
}

// ============================================================================
// Rolling
// ============================================================================

/// Standard array values, highest first.
pub const STANDARD_ARRAY: [u8; 6] = [15, 14, 13, 12, 10, 8];

/// How raw ability values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbilityMethod {
    /// Dice rolled per the character's tier.
    #[default]
    Rolled,
    /// The fixed standard array (player-character mode). Infants still roll.
    StandardArray,
}

/// Dice tier that determines how each raw score is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollTier {
    /// 4d6, drop the lowest.
    Adventurer,
    /// 4d4, drop the lowest.
    Commoner,
    /// 1d4.
    Infant,
}

impl RollTier {
    pub fn dice(&self) -> DicePool {
        match self {
            RollTier::Adventurer => DicePool::keep_highest(4, DieType::D6, 3),
            RollTier::Commoner => DicePool::keep_highest(4, DieType::D4, 3),
            RollTier::Infant => DicePool::new(1, DieType::D4),
        }
    }
}

/// Produce six raw values sorted descending.
pub fn roll_raw_scores<R: Rng>(method: AbilityMethod, tier: RollTier, rng: &mut R) -> [u8; 6] {
    if method == AbilityMethod::StandardArray && tier != RollTier::Infant {
        return STANDARD_ARRAY;
    }

    let dice = tier.dice();
    let mut raw = [0u8; 6];
    for value in raw.iter_mut() {
        *value = dice.roll_with_rng(rng) as u8;
    }
    raw.sort_by(|a, b| b.cmp(a));
    raw
}

// ============================================================================
// Class priority assignment
// ============================================================================

/// Which abilities a class wants highest, second highest, and lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatPriority {
    pub primary: Option<Ability>,
    pub secondary: Option<Ability>,
    pub dump: Option<Ability>,
}

impl StatPriority {
    pub fn new(primary: Ability) -> Self {
        Self {
            primary: Some(primary),
            secondary: None,
            dump: None,
        }
    }

    pub fn with_secondary(mut self, secondary: Ability) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn with_dump(mut self, dump: Ability) -> Self {
        self.dump = Some(dump);
        self
    }
}

fn default_secondary(primary: Ability) -> Ability {
    match primary {
        Ability::Strength => Ability::Constitution,
        Ability::Dexterity => Ability::Constitution,
        Ability::Constitution => Ability::Strength,
        Ability::Intelligence => Ability::Wisdom,
        Ability::Wisdom => Ability::Constitution,
        Ability::Charisma => Ability::Dexterity,
    }
}

fn default_dump(primary: Ability) -> Ability {
    match primary {
        Ability::Strength => Ability::Intelligence,
        Ability::Dexterity => Ability::Strength,
        Ability::Constitution => Ability::Intelligence,
        Ability::Intelligence => Ability::Strength,
        Ability::Wisdom => Ability::Strength,
        Ability::Charisma => Ability::Strength,
    }
}

/// Pick the first candidate not already taken, falling back to enumeration order.
fn first_free(candidates: &[Option<Ability>], taken: &[Ability]) -> Ability {
    candidates
        .iter()
        .flatten()
        .copied()
        .chain(Ability::all())
        .find(|a| !taken.contains(a))
        .unwrap_or(Ability::Charisma)
}

/// Distribute six raw values (sorted descending) over the abilities.
///
/// Primary takes the highest value, secondary the second, dump the lowest,
/// and the remaining abilities take the middle values in enumeration order.
/// A class without a primary ability gets a uniform random assignment.
pub fn assign_scores<R: Rng>(raw: [u8; 6], priority: &StatPriority, rng: &mut R) -> AbilityScores {
    let mut scores = AbilityScores::default();

    let Some(primary) = priority.primary else {
        let mut slots = Ability::all();
        slots.shuffle(rng);
        for (ability, value) in slots.iter().zip(raw) {
            scores.set(*ability, value);
        }
        return scores;
    };

    let secondary = first_free(&[priority.secondary, Some(default_secondary(primary))], &[primary]);
    let dump = first_free(
        &[priority.dump, Some(default_dump(primary))],
        &[primary, secondary],
    );

    scores.set(primary, raw[0]);
    scores.set(secondary, raw[1]);
    scores.set(dump, raw[5]);

    let remaining = Ability::all()
        .into_iter()
        .filter(|a| *a != primary && *a != secondary && *a != dump);
    for (ability, value) in remaining.zip(raw[2..5].iter()) {
        scores.set(ability, *value);
    }

    scores
}

// ============================================================================
// Racial bonuses
// ============================================================================

/// A race's ability score increase rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityBonus {
    /// Named increases, applied as-is.
    #[serde(default)]
    pub fixed: Vec<(Ability, i8)>,
    /// A flexible increase. Alone it applies to every ability; alongside
    /// fixed increases it goes to the highest score after those are applied.
    #[serde(default)]
    pub any: Option<i8>,
}

impl AbilityBonus {
    pub fn fixed(ability: Ability, amount: i8) -> Self {
        Self {
            fixed: vec![(ability, amount)],
            any: None,
        }
    }

    pub fn any(amount: i8) -> Self {
        Self {
            fixed: Vec::new(),
            any: Some(amount),
        }
    }

    pub fn and(mut self, ability: Ability, amount: i8) -> Self {
        self.fixed.push((ability, amount));
        self
    }

    pub fn and_any(mut self, amount: i8) -> Self {
        self.any = Some(amount);
        self
    }
}

fn add(scores: &mut AbilityScores, ability: Ability, amount: i8) {
    let value = (scores.get(ability) as i16 + amount as i16).clamp(1, 30);
    scores.set(ability, value as u8);
}

/// Abilities ordered by score, highest first; ties keep enumeration order.
fn ranked(scores: &AbilityScores) -> Vec<Ability> {
    let mut order = Ability::all().to_vec();
    order.sort_by(|a, b| scores.get(*b).cmp(&scores.get(*a)));
    order
}

/// Apply a race's bonus rule to assigned scores.
pub fn apply_racial_bonus(scores: &mut AbilityScores, bonus: &AbilityBonus) {
    match (bonus.fixed.is_empty(), bonus.any) {
        (true, Some(amount)) => {
            for ability in Ability::all() {
                add(scores, ability, amount);
            }
        }
        (true, None) => {
            let order = ranked(scores);
            add(scores, order[0], 2);
            add(scores, order[1], 1);
        }
        (false, any) => {
            for (ability, amount) in &bonus.fixed {
                add(scores, *ability, *amount);
            }
            if let Some(amount) = any {
                let highest = ranked(scores)[0];
                add(scores, highest, amount);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RAW: [u8; 6] = [16, 15, 14, 12, 10, 8];

    #[test]
    fn test_modifier_table() {
        assert_eq!(modifier(1), -5);
        assert_eq!(modifier(8), -1);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(15), 2);
        assert_eq!(modifier(20), 5);
        assert_eq!(modifier(30), 10);
    }

    #[test]
    fn test_block_keeps_modifiers_in_sync() {
        let mut block = AbilityBlock::new(AbilityScores::new(10, 10, 10, 10, 10, 10));
        block.set(Ability::Strength, 18);
        assert_eq!(block.score(Ability::Strength), 18);
        assert_eq!(block.modifier(Ability::Strength), 4);
        block.set(Ability::Strength, 7);
        assert_eq!(block.modifier(Ability::Strength), -2);
    }

    #[test]
    fn test_wizard_assignment() {
        let mut rng = StdRng::seed_from_u64(1);
        let priority = StatPriority::new(Ability::Intelligence).with_secondary(Ability::Constitution);
        let scores = assign_scores(RAW, &priority, &mut rng);
        assert_eq!(scores.intelligence, 16);
        assert_eq!(scores.constitution, 15);
        // default dump for an INT primary
        assert_eq!(scores.strength, 8);
        assert_eq!(scores.dexterity, 14);
        assert_eq!(scores.wisdom, 12);
        assert_eq!(scores.charisma, 10);
    }

    #[test]
    fn test_default_secondary_and_dump() {
        let mut rng = StdRng::seed_from_u64(1);
        let scores = assign_scores(RAW, &StatPriority::new(Ability::Charisma), &mut rng);
        assert_eq!(scores.charisma, 16);
        assert_eq!(scores.dexterity, 15);
        assert_eq!(scores.strength, 8);
    }

    #[test]
    fn test_no_primary_is_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        let scores = assign_scores(RAW, &StatPriority::default(), &mut rng);
        let mut values: Vec<u8> = Ability::all().iter().map(|a| scores.get(*a)).collect();
        values.sort_by(|a, b| b.cmp(a));
        assert_eq!(values, RAW.to_vec());
    }

    #[test]
    fn test_colliding_priorities_still_use_every_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let priority = StatPriority::new(Ability::Wisdom)
            .with_secondary(Ability::Wisdom)
            .with_dump(Ability::Wisdom);
        let scores = assign_scores(RAW, &priority, &mut rng);
        assert_eq!(scores.total(), RAW.iter().map(|v| *v as u32).sum::<u32>());
        assert_eq!(scores.wisdom, 16);
    }

    #[test]
    fn test_standard_array_skips_dice_except_for_infants() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            roll_raw_scores(AbilityMethod::StandardArray, RollTier::Commoner, &mut rng),
            STANDARD_ARRAY
        );
        let infant = roll_raw_scores(AbilityMethod::StandardArray, RollTier::Infant, &mut rng);
        assert!(infant.iter().all(|v| (1..=4).contains(v)));
    }

    #[test]
    fn test_raw_scores_sorted_descending() {
        let mut rng = StdRng::seed_from_u64(11);
        for tier in [RollTier::Adventurer, RollTier::Commoner, RollTier::Infant] {
            let raw = roll_raw_scores(AbilityMethod::Rolled, tier, &mut rng);
            assert!(raw.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_bonus_any_applies_to_all() {
        let mut scores = AbilityScores::new(10, 11, 12, 13, 14, 15);
        apply_racial_bonus(&mut scores, &AbilityBonus::any(1));
        assert_eq!(scores, AbilityScores::new(11, 12, 13, 14, 15, 16));
    }

    #[test]
    fn test_bonus_empty_boosts_top_two() {
        let mut scores = AbilityScores::new(12, 15, 15, 10, 9, 8);
        apply_racial_bonus(&mut scores, &AbilityBonus::default());
        // DEX wins the tie by enumeration order
        assert_eq!(scores.dexterity, 17);
        assert_eq!(scores.constitution, 16);
        assert_eq!(scores.strength, 12);
    }

    #[test]
    fn test_bonus_fixed_plus_any() {
        let mut scores = AbilityScores::new(8, 10, 12, 14, 13, 15);
        let bonus = AbilityBonus::fixed(Ability::Charisma, 2).and_any(1);
        apply_racial_bonus(&mut scores, &bonus);
        assert_eq!(scores.charisma, 18);
        assert_eq!(scores.intelligence, 14);
    }

    #[test]
    fn test_bonus_clamps_to_thirty() {
        let mut scores = AbilityScores::new(30, 10, 10, 10, 10, 10);
        apply_racial_bonus(&mut scores, &AbilityBonus::fixed(Ability::Strength, 2));
        assert_eq!(scores.strength, 30);
    }

    #[test]
    fn test_ability_parse() {
        assert_eq!(Ability::parse("str"), Some(Ability::Strength));
        assert_eq!(Ability::parse("Wisdom"), Some(Ability::Wisdom));
        assert_eq!(Ability::parse("luck"), None);
    }
}
