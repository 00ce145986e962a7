//! Spell list and spellcasting progressions.
//!
//! Contains the spell catalog, per-tier slot tables, and the rules that make
//! a class (or one of the two spellcasting subclasses) a caster.

use crate::abilities::Ability;
use crate::rules::classes::CharacterClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Schools of magic in D&D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

impl SpellSchool {
    pub fn name(&self) -> &'static str {
        match self {
            SpellSchool::Abjuration => "Abjuration",
            SpellSchool::Conjuration => "Conjuration",
            SpellSchool::Divination => "Divination",
            SpellSchool::Enchantment => "Enchantment",
            SpellSchool::Evocation => "Evocation",
            SpellSchool::Illusion => "Illusion",
            SpellSchool::Necromancy => "Necromancy",
            SpellSchool::Transmutation => "Transmutation",
        }
    }
}

impl fmt::Display for SpellSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A spell in the catalog. Level 0 is a cantrip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDefinition {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub school: SpellSchool,
    pub classes: Vec<CharacterClass>,
}

impl SpellDefinition {
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}

// ============================================================================
// Caster tiers
// ============================================================================

/// Pace at which a caster gains spell levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    Full,
    Half,
    Third,
    Pact,
}

impl CasterType {
    pub fn name(&self) -> &'static str {
        match self {
            CasterType::Full => "full",
            CasterType::Half => "half",
            CasterType::Third => "third",
            CasterType::Pact => "pact",
        }
    }

    /// Highest spell level castable at the given caster level.
    pub fn max_spell_level(&self, caster_level: u8) -> u8 {
        let l = caster_level;
        match self {
            CasterType::Full => match l {
                17.. => 9,
                15..=16 => 8,
                13..=14 => 7,
                11..=12 => 6,
                9..=10 => 5,
                7..=8 => 4,
                5..=6 => 3,
                3..=4 => 2,
                _ => 1,
            },
            CasterType::Half => match l {
                17.. => 5,
                13..=16 => 4,
                9..=12 => 3,
                5..=8 => 2,
                2..=4 => 1,
                _ => 0,
            },
            CasterType::Third => match l {
                19.. => 4,
                13..=18 => 3,
                7..=12 => 2,
                3..=6 => 1,
                _ => 0,
            },
            CasterType::Pact => match l {
                9.. => 5,
                7..=8 => 4,
                5..=6 => 3,
                3..=4 => 2,
                _ => 1,
            },
        }
    }
}

impl fmt::Display for CasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Slots per spell level (index 0 = 1st level).
pub type SlotRow = [u8; 9];

/// Slot tables for each caster tier, one row per caster level starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTables {
    pub full: Vec<SlotRow>,
    pub half: Vec<SlotRow>,
    pub third: Vec<SlotRow>,
    /// Pact magic: the slot count sits at the index of the current slot level.
    pub pact: Vec<SlotRow>,
}

impl SlotTables {
    pub fn row(&self, caster_type: CasterType, caster_level: u8) -> SlotRow {
        let table = match caster_type {
            CasterType::Full => &self.full,
            CasterType::Half => &self.half,
            CasterType::Third => &self.third,
            CasterType::Pact => &self.pact,
        };
        (caster_level as usize)
            .checked_sub(1)
            .and_then(|i| table.get(i))
            .copied()
            .unwrap_or([0; 9])
    }

    pub fn standard() -> Self {
        Self {
            full: vec![
                [2, 0, 0, 0, 0, 0, 0, 0, 0],
                [3, 0, 0, 0, 0, 0, 0, 0, 0],
                [4, 2, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 2, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 1, 0, 0, 0, 0, 0],
                [4, 3, 3, 2, 0, 0, 0, 0, 0],
                [4, 3, 3, 3, 1, 0, 0, 0, 0],
                [4, 3, 3, 3, 2, 0, 0, 0, 0],
                [4, 3, 3, 3, 2, 1, 0, 0, 0],
                [4, 3, 3, 3, 2, 1, 0, 0, 0],
                [4, 3, 3, 3, 2, 1, 1, 0, 0],
                [4, 3, 3, 3, 2, 1, 1, 0, 0],
                [4, 3, 3, 3, 2, 1, 1, 1, 0],
                [4, 3, 3, 3, 2, 1, 1, 1, 0],
                [4, 3, 3, 3, 2, 1, 1, 1, 1],
                [4, 3, 3, 3, 3, 1, 1, 1, 1],
                [4, 3, 3, 3, 3, 2, 1, 1, 1],
                [4, 3, 3, 3, 3, 2, 2, 1, 1],
            ],
            half: vec![
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [2, 0, 0, 0, 0, 0, 0, 0, 0],
                [3, 0, 0, 0, 0, 0, 0, 0, 0],
                [3, 0, 0, 0, 0, 0, 0, 0, 0],
                [4, 2, 0, 0, 0, 0, 0, 0, 0],
                [4, 2, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 2, 0, 0, 0, 0, 0, 0],
                [4, 3, 2, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 1, 0, 0, 0, 0, 0],
                [4, 3, 3, 1, 0, 0, 0, 0, 0],
                [4, 3, 3, 2, 0, 0, 0, 0, 0],
                [4, 3, 3, 2, 0, 0, 0, 0, 0],
                [4, 3, 3, 3, 1, 0, 0, 0, 0],
                [4, 3, 3, 3, 1, 0, 0, 0, 0],
                [4, 3, 3, 3, 2, 0, 0, 0, 0],
                [4, 3, 3, 3, 2, 0, 0, 0, 0],
            ],
            third: vec![
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0, 0, 0],
                [2, 0, 0, 0, 0, 0, 0, 0, 0],
                [3, 0, 0, 0, 0, 0, 0, 0, 0],
                [3, 0, 0, 0, 0, 0, 0, 0, 0],
                [3, 0, 0, 0, 0, 0, 0, 0, 0],
                [4, 2, 0, 0, 0, 0, 0, 0, 0],
                [4, 2, 0, 0, 0, 0, 0, 0, 0],
                [4, 2, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 0, 0, 0, 0, 0, 0, 0],
                [4, 3, 2, 0, 0, 0, 0, 0, 0],
                [4, 3, 2, 0, 0, 0, 0, 0, 0],
                [4, 3, 2, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 0, 0, 0, 0, 0, 0],
                [4, 3, 3, 1, 0, 0, 0, 0, 0],
                [4, 3, 3, 1, 0, 0, 0, 0, 0],
            ],
            pact: vec![
                [1, 0, 0, 0, 0, 0, 0, 0, 0],
                [2, 0, 0, 0, 0, 0, 0, 0, 0],
                [0, 2, 0, 0, 0, 0, 0, 0, 0],
                [0, 2, 0, 0, 0, 0, 0, 0, 0],
                [0, 0, 2, 0, 0, 0, 0, 0, 0],
                [0, 0, 2, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 2, 0, 0, 0, 0, 0],
                [0, 0, 0, 2, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 2, 0, 0, 0, 0],
                [0, 0, 0, 0, 2, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 0, 0, 0, 0],
                [0, 0, 0, 0, 3, 0, 0, 0, 0],
                [0, 0, 0, 0, 4, 0, 0, 0, 0],
                [0, 0, 0, 0, 4, 0, 0, 0, 0],
                [0, 0, 0, 0, 4, 0, 0, 0, 0],
                [0, 0, 0, 0, 4, 0, 0, 0, 0],
            ],
        }
    }
}

// ============================================================================
// Spellcasting rules
// ============================================================================

/// What grants spellcasting: a class itself or a subclass option id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterSource {
    Class(CharacterClass),
    Subclass(String),
}

/// How many leveled spells a caster knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellsKnown {
    /// Looked up by caster level (index 0 = level 1).
    Table(Vec<u8>),
    /// `max(1, ability modifier + caster level)`.
    LevelPlusModifier,
    /// `max(1, ability modifier + caster level / 2)`.
    HalfLevelPlusModifier,
}

impl SpellsKnown {
    pub fn count(&self, caster_level: u8, ability_modifier: i8) -> u8 {
        let formula = |level: i32| (ability_modifier as i32 + level).max(1) as u8;
        match self {
            SpellsKnown::Table(table) => lookup(table, caster_level),
            SpellsKnown::LevelPlusModifier => formula(caster_level as i32),
            SpellsKnown::HalfLevelPlusModifier => formula(caster_level as i32 / 2),
        }
    }
}

fn lookup(table: &[u8], caster_level: u8) -> u8 {
    (caster_level as usize)
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(0)
}

/// Spellcasting progression for one caster source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcastingRule {
    pub source: CasterSource,
    /// Whose spell list the caster draws from.
    pub spell_list: CharacterClass,
    pub ability: Ability,
    pub caster_type: CasterType,
    pub start_level: u8,
    /// Cantrips known by caster level (index 0 = level 1).
    #[serde(default)]
    pub cantrips_known: Vec<u8>,
    pub spells_known: SpellsKnown,
    /// Leveled spells must come from these schools; cantrips are exempt.
    #[serde(default)]
    pub restricted_schools: Option<Vec<SpellSchool>>,
}

impl SpellcastingRule {
    pub fn cantrips_known(&self, caster_level: u8) -> u8 {
        lookup(&self.cantrips_known, caster_level)
    }

    pub fn allows_school(&self, spell: &SpellDefinition) -> bool {
        spell.is_cantrip()
            || self
                .restricted_schools
                .as_ref()
                .map_or(true, |schools| schools.contains(&spell.school))
    }
}

/// Expand `(from_level, value)` breakpoints into a 20-level table.
fn progression(breakpoints: &[(u8, u8)]) -> Vec<u8> {
    (1..=20u8)
        .map(|level| {
            breakpoints
                .iter()
                .rev()
                .find(|(from, _)| level >= *from)
                .map_or(0, |(_, value)| *value)
        })
        .collect()
}

/// The built-in spellcasting rules.
pub fn standard_spellcasting_rules() -> Vec<SpellcastingRule> {
    use Ability::*;
    use CharacterClass as C;

    let class_rule = |class: C, ability: Ability, caster_type: CasterType, start_level: u8| {
        SpellcastingRule {
            source: CasterSource::Class(class),
            spell_list: class,
            ability,
            caster_type,
            start_level,
            cantrips_known: Vec::new(),
            spells_known: SpellsKnown::LevelPlusModifier,
            restricted_schools: None,
        }
    };
    let third_caster_known = SpellsKnown::Table(vec![
        0, 0, 3, 4, 4, 4, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 11, 11, 12, 13,
    ]);

    vec![
        SpellcastingRule {
            cantrips_known: progression(&[(1, 2), (4, 3), (10, 4)]),
            spells_known: SpellsKnown::Table(vec![
                4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 15, 16, 18, 19, 19, 20, 22, 22, 22,
            ]),
            ..class_rule(C::Bard, Charisma, CasterType::Full, 1)
        },
        SpellcastingRule {
            cantrips_known: progression(&[(1, 3), (4, 4), (10, 5)]),
            ..class_rule(C::Cleric, Wisdom, CasterType::Full, 1)
        },
        SpellcastingRule {
            cantrips_known: progression(&[(1, 2), (4, 3), (10, 4)]),
            ..class_rule(C::Druid, Wisdom, CasterType::Full, 1)
        },
        SpellcastingRule {
            spells_known: SpellsKnown::HalfLevelPlusModifier,
            ..class_rule(C::Paladin, Charisma, CasterType::Half, 2)
        },
        SpellcastingRule {
            spells_known: SpellsKnown::Table(vec![
                0, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11,
            ]),
            ..class_rule(C::Ranger, Wisdom, CasterType::Half, 2)
        },
        SpellcastingRule {
            cantrips_known: progression(&[(1, 4), (4, 5), (10, 6)]),
            spells_known: SpellsKnown::Table(vec![
                2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15, 15,
            ]),
            ..class_rule(C::Sorcerer, Charisma, CasterType::Full, 1)
        },
        SpellcastingRule {
            cantrips_known: progression(&[(1, 2), (4, 3), (10, 4)]),
            spells_known: SpellsKnown::Table(vec![
                2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15,
            ]),
            ..class_rule(C::Warlock, Charisma, CasterType::Pact, 1)
        },
        SpellcastingRule {
            cantrips_known: progression(&[(1, 3), (4, 4), (10, 5)]),
            ..class_rule(C::Wizard, Intelligence, CasterType::Full, 1)
        },
        SpellcastingRule {
            source: CasterSource::Subclass("eldritch-knight".to_string()),
            spell_list: C::Wizard,
            ability: Intelligence,
            caster_type: CasterType::Third,
            start_level: 3,
            cantrips_known: progression(&[(3, 2), (10, 3)]),
            spells_known: third_caster_known.clone(),
            restricted_schools: Some(vec![SpellSchool::Abjuration, SpellSchool::Evocation]),
        },
        SpellcastingRule {
            source: CasterSource::Subclass("arcane-trickster".to_string()),
            spell_list: C::Wizard,
            ability: Intelligence,
            caster_type: CasterType::Third,
            start_level: 3,
            cantrips_known: progression(&[(3, 3), (10, 4)]),
            spells_known: third_caster_known,
            restricted_schools: Some(vec![SpellSchool::Enchantment, SpellSchool::Illusion]),
        },
    ]
}

// ============================================================================
// Spell catalog
// ============================================================================

fn spell(
    id: &str,
    name: &str,
    level: u8,
    school: SpellSchool,
    classes: &[CharacterClass],
) -> SpellDefinition {
    SpellDefinition {
        id: id.to_string(),
        name: name.to_string(),
        level,
        school,
        classes: classes.to_vec(),
    }
}

/// The built-in spell catalog.
pub fn standard_spells() -> Vec<SpellDefinition> {
    use CharacterClass::{
        Bard as Bd, Cleric as Cl, Druid as Dr, Paladin as Pa, Ranger as Ra, Sorcerer as So,
        Warlock as Wa, Wizard as Wi,
    };
    use SpellSchool::*;

    vec![
        // Cantrips
        spell("acid-splash", "Acid Splash", 0, Conjuration, &[So, Wi]),
        spell("chill-touch", "Chill Touch", 0, Necromancy, &[So, Wa, Wi]),
        spell("dancing-lights", "Dancing Lights", 0, Evocation, &[Bd, So, Wi]),
        spell("druidcraft", "Druidcraft", 0, Transmutation, &[Dr]),
        spell("eldritch-blast", "Eldritch Blast", 0, Evocation, &[Wa]),
        spell("fire-bolt", "Fire Bolt", 0, Evocation, &[So, Wi]),
        spell("guidance", "Guidance", 0, Divination, &[Cl, Dr]),
        spell("light", "Light", 0, Evocation, &[Bd, Cl, So, Wi]),
        spell("mage-hand", "Mage Hand", 0, Conjuration, &[Bd, So, Wa, Wi]),
        spell("mending", "Mending", 0, Transmutation, &[Bd, Cl, Dr, So, Wi]),
        spell("message", "Message", 0, Transmutation, &[Bd, So, Wi]),
        spell("minor-illusion", "Minor Illusion", 0, Illusion, &[Bd, So, Wa, Wi]),
        spell("poison-spray", "Poison Spray", 0, Conjuration, &[Dr, So, Wa, Wi]),
        spell("prestidigitation", "Prestidigitation", 0, Transmutation, &[Bd, So, Wa, Wi]),
        spell("produce-flame", "Produce Flame", 0, Conjuration, &[Dr]),
        spell("ray-of-frost", "Ray of Frost", 0, Evocation, &[So, Wi]),
        spell("resistance", "Resistance", 0, Abjuration, &[Cl, Dr]),
        spell("sacred-flame", "Sacred Flame", 0, Evocation, &[Cl]),
        spell("shillelagh", "Shillelagh", 0, Transmutation, &[Dr]),
        spell("shocking-grasp", "Shocking Grasp", 0, Evocation, &[So, Wi]),
        spell("spare-the-dying", "Spare the Dying", 0, Necromancy, &[Cl]),
        spell("thaumaturgy", "Thaumaturgy", 0, Transmutation, &[Cl]),
        spell("thorn-whip", "Thorn Whip", 0, Transmutation, &[Dr]),
        spell("true-strike", "True Strike", 0, Divination, &[Bd, So, Wa, Wi]),
        spell("vicious-mockery", "Vicious Mockery", 0, Enchantment, &[Bd]),
        // 1st level
        spell("alarm", "Alarm", 1, Abjuration, &[Ra, Wi]),
        spell("bane", "Bane", 1, Enchantment, &[Bd, Cl]),
        spell("bless", "Bless", 1, Enchantment, &[Cl, Pa]),
        spell("burning-hands", "Burning Hands", 1, Evocation, &[So, Wi]),
        spell("charm-person", "Charm Person", 1, Enchantment, &[Bd, Dr, So, Wa, Wi]),
        spell("color-spray", "Color Spray", 1, Illusion, &[So, Wi]),
        spell("command", "Command", 1, Enchantment, &[Cl, Pa]),
        spell("comprehend-languages", "Comprehend Languages", 1, Divination, &[Bd, So, Wa, Wi]),
        spell("cure-wounds", "Cure Wounds", 1, Evocation, &[Bd, Cl, Dr, Pa, Ra]),
        spell("detect-magic", "Detect Magic", 1, Divination, &[Bd, Cl, Dr, Pa, Ra, So, Wi]),
        spell("disguise-self", "Disguise Self", 1, Illusion, &[Bd, So, Wi]),
        spell("divine-favor", "Divine Favor", 1, Evocation, &[Pa]),
        spell("entangle", "Entangle", 1, Conjuration, &[Dr]),
        spell("faerie-fire", "Faerie Fire", 1, Evocation, &[Bd, Dr]),
        spell("false-life", "False Life", 1, Necromancy, &[So, Wi]),
        spell("feather-fall", "Feather Fall", 1, Transmutation, &[Bd, So, Wi]),
        spell("fog-cloud", "Fog Cloud", 1, Conjuration, &[Dr, Ra, So, Wi]),
        spell("goodberry", "Goodberry", 1, Transmutation, &[Dr, Ra]),
        spell("guiding-bolt", "Guiding Bolt", 1, Evocation, &[Cl]),
        spell("healing-word", "Healing Word", 1, Evocation, &[Bd, Cl, Dr]),
        spell("hellish-rebuke", "Hellish Rebuke", 1, Evocation, &[Wa]),
        spell("heroism", "Heroism", 1, Enchantment, &[Bd, Pa]),
        spell("hex", "Hex", 1, Enchantment, &[Wa]),
        spell("hunters-mark", "Hunter's Mark", 1, Divination, &[Ra]),
        spell("inflict-wounds", "Inflict Wounds", 1, Necromancy, &[Cl]),
        spell("mage-armor", "Mage Armor", 1, Abjuration, &[So, Wi]),
        spell("magic-missile", "Magic Missile", 1, Evocation, &[So, Wi]),
        spell(
            "protection-from-evil-and-good",
            "Protection from Evil and Good",
            1,
            Abjuration,
            &[Cl, Pa, Wa, Wi],
        ),
        spell("shield", "Shield", 1, Abjuration, &[So, Wi]),
        spell("shield-of-faith", "Shield of Faith", 1, Abjuration, &[Cl, Pa]),
        spell("silent-image", "Silent Image", 1, Illusion, &[Bd, So, Wi]),
        spell("sleep", "Sleep", 1, Enchantment, &[Bd, So, Wi]),
        spell("tashas-hideous-laughter", "Tasha's Hideous Laughter", 1, Enchantment, &[Bd, Wi]),
        spell("thunderwave", "Thunderwave", 1, Evocation, &[Bd, Dr, So, Wi]),
        spell("witch-bolt", "Witch Bolt", 1, Evocation, &[So, Wa, Wi]),
        // 2nd level
        spell("aid", "Aid", 2, Abjuration, &[Cl, Pa]),
        spell("arcane-lock", "Arcane Lock", 2, Abjuration, &[Wi]),
        spell("blur", "Blur", 2, Illusion, &[So, Wi]),
        spell("crown-of-madness", "Crown of Madness", 2, Enchantment, &[Bd, So, Wa, Wi]),
        spell("darkness", "Darkness", 2, Evocation, &[So, Wa, Wi]),
        spell("enhance-ability", "Enhance Ability", 2, Transmutation, &[Bd, Cl, Dr, So]),
        spell("flaming-sphere", "Flaming Sphere", 2, Conjuration, &[Dr, Wi]),
        spell("hold-person", "Hold Person", 2, Enchantment, &[Bd, Cl, Dr, So, Wa, Wi]),
        spell("invisibility", "Invisibility", 2, Illusion, &[Bd, So, Wa, Wi]),
        spell("lesser-restoration", "Lesser Restoration", 2, Abjuration, &[Bd, Cl, Dr, Pa, Ra]),
        spell("magic-weapon", "Magic Weapon", 2, Transmutation, &[Pa, Wi]),
        spell("mirror-image", "Mirror Image", 2, Illusion, &[So, Wa, Wi]),
        spell("misty-step", "Misty Step", 2, Conjuration, &[So, Wa, Wi]),
        spell("moonbeam", "Moonbeam", 2, Evocation, &[Dr]),
        spell("pass-without-trace", "Pass without Trace", 2, Abjuration, &[Dr, Ra]),
        spell("phantasmal-force", "Phantasmal Force", 2, Illusion, &[Bd, So, Wa, Wi]),
        spell("scorching-ray", "Scorching Ray", 2, Evocation, &[So, Wi]),
        spell("shatter", "Shatter", 2, Evocation, &[Bd, So, Wa, Wi]),
        spell("silence", "Silence", 2, Illusion, &[Bd, Cl, Ra]),
        spell("spike-growth", "Spike Growth", 2, Transmutation, &[Dr, Ra]),
        spell("spiritual-weapon", "Spiritual Weapon", 2, Evocation, &[Cl]),
        spell("suggestion", "Suggestion", 2, Enchantment, &[Bd, So, Wa, Wi]),
        // 3rd level
        spell("animate-dead", "Animate Dead", 3, Necromancy, &[Cl, Wi]),
        spell("call-lightning", "Call Lightning", 3, Conjuration, &[Dr]),
        spell("conjure-animals", "Conjure Animals", 3, Conjuration, &[Dr, Ra]),
        spell("counterspell", "Counterspell", 3, Abjuration, &[So, Wa, Wi]),
        spell("crusaders-mantle", "Crusader's Mantle", 3, Evocation, &[Pa]),
        spell("dispel-magic", "Dispel Magic", 3, Abjuration, &[Bd, Cl, Dr, Pa, So, Wa, Wi]),
        spell("fear", "Fear", 3, Illusion, &[Bd, So, Wa, Wi]),
        spell("fireball", "Fireball", 3, Evocation, &[So, Wi]),
        spell("fly", "Fly", 3, Transmutation, &[So, Wa, Wi]),
        spell("glyph-of-warding", "Glyph of Warding", 3, Abjuration, &[Bd, Cl, Wi]),
        spell("haste", "Haste", 3, Transmutation, &[So, Wi]),
        spell("hypnotic-pattern", "Hypnotic Pattern", 3, Illusion, &[Bd, So, Wa, Wi]),
        spell("lightning-arrow", "Lightning Arrow", 3, Transmutation, &[Ra]),
        spell("lightning-bolt", "Lightning Bolt", 3, Evocation, &[So, Wi]),
        spell("major-image", "Major Image", 3, Illusion, &[Bd, So, Wa, Wi]),
        spell("mass-healing-word", "Mass Healing Word", 3, Evocation, &[Cl]),
        spell(
            "protection-from-energy",
            "Protection from Energy",
            3,
            Abjuration,
            &[Cl, Dr, Ra, So, Wi],
        ),
        spell("remove-curse", "Remove Curse", 3, Abjuration, &[Cl, Pa, Wa, Wi]),
        spell("revivify", "Revivify", 3, Necromancy, &[Cl, Pa]),
        spell("spirit-guardians", "Spirit Guardians", 3, Conjuration, &[Cl]),
        // 4th level
        spell("banishment", "Banishment", 4, Abjuration, &[Cl, Pa, So, Wa, Wi]),
        spell("blight", "Blight", 4, Necromancy, &[Dr, So, Wa, Wi]),
        spell("compulsion", "Compulsion", 4, Enchantment, &[Bd]),
        spell("confusion", "Confusion", 4, Enchantment, &[Bd, Dr, So, Wi]),
        spell("death-ward", "Death Ward", 4, Abjuration, &[Cl, Pa]),
        spell("dimension-door", "Dimension Door", 4, Conjuration, &[Bd, So, Wa, Wi]),
        spell("freedom-of-movement", "Freedom of Movement", 4, Abjuration, &[Bd, Cl, Dr, Ra]),
        spell("greater-invisibility", "Greater Invisibility", 4, Illusion, &[Bd, So, Wi]),
        spell("guardian-of-faith", "Guardian of Faith", 4, Conjuration, &[Cl]),
        spell("ice-storm", "Ice Storm", 4, Evocation, &[Dr, So, Wi]),
        spell("polymorph", "Polymorph", 4, Transmutation, &[Bd, Dr, So, Wi]),
        spell("stoneskin", "Stoneskin", 4, Abjuration, &[Dr, Ra, So, Wi]),
        spell("wall-of-fire", "Wall of Fire", 4, Evocation, &[Dr, So, Wi]),
        // 5th level
        spell("banishing-smite", "Banishing Smite", 5, Abjuration, &[Pa]),
        spell("cone-of-cold", "Cone of Cold", 5, Evocation, &[So, Wi]),
        spell("dominate-person", "Dominate Person", 5, Enchantment, &[Bd, So]),
        spell("flame-strike", "Flame Strike", 5, Evocation, &[Cl]),
        spell("greater-restoration", "Greater Restoration", 5, Abjuration, &[Bd, Cl, Dr]),
        spell("hold-monster", "Hold Monster", 5, Enchantment, &[Bd, So, Wa, Wi]),
        spell("mass-cure-wounds", "Mass Cure Wounds", 5, Evocation, &[Bd, Cl, Dr]),
        spell("raise-dead", "Raise Dead", 5, Necromancy, &[Bd, Cl, Pa]),
        spell("scrying", "Scrying", 5, Divination, &[Bd, Cl, Dr, Wa, Wi]),
        spell("seeming", "Seeming", 5, Illusion, &[Bd, So, Wi]),
        spell("tree-stride", "Tree Stride", 5, Conjuration, &[Dr, Ra]),
        spell("wall-of-force", "Wall of Force", 5, Evocation, &[Wi]),
        // 6th level
        spell("chain-lightning", "Chain Lightning", 6, Evocation, &[So, Wi]),
        spell("disintegrate", "Disintegrate", 6, Transmutation, &[So, Wi]),
        spell("globe-of-invulnerability", "Globe of Invulnerability", 6, Abjuration, &[So, Wi]),
        spell("heal", "Heal", 6, Evocation, &[Cl, Dr]),
        spell("mass-suggestion", "Mass Suggestion", 6, Enchantment, &[Bd, So, Wa, Wi]),
        spell("true-seeing", "True Seeing", 6, Divination, &[Bd, Cl, So, Wa, Wi]),
        // 7th level
        spell("finger-of-death", "Finger of Death", 7, Necromancy, &[So, Wa, Wi]),
        spell("fire-storm", "Fire Storm", 7, Evocation, &[Cl, Dr, So]),
        spell("forcecage", "Forcecage", 7, Evocation, &[Bd, Wa, Wi]),
        spell("regenerate", "Regenerate", 7, Transmutation, &[Bd, Cl, Dr]),
        spell("teleport", "Teleport", 7, Conjuration, &[Bd, So, Wi]),
        // 8th level
        spell("dominate-monster", "Dominate Monster", 8, Enchantment, &[Bd, So, Wa, Wi]),
        spell("earthquake", "Earthquake", 8, Evocation, &[Cl, Dr, So]),
        spell("holy-aura", "Holy Aura", 8, Abjuration, &[Cl]),
        spell("power-word-stun", "Power Word Stun", 8, Enchantment, &[Bd, So, Wa, Wi]),
        spell("sunburst", "Sunburst", 8, Evocation, &[Dr, So, Wi]),
        // 9th level
        spell("foresight", "Foresight", 9, Divination, &[Bd, Dr, Wa, Wi]),
        spell("meteor-swarm", "Meteor Swarm", 9, Evocation, &[So, Wi]),
        spell("power-word-kill", "Power Word Kill", 9, Enchantment, &[Bd, So, Wa, Wi]),
        spell("time-stop", "Time Stop", 9, Transmutation, &[So, Wi]),
        spell("true-resurrection", "True Resurrection", 9, Necromancy, &[Cl, Dr]),
        spell("wish", "Wish", 9, Conjuration, &[So, Wi]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_spell_level_breakpoints() {
        assert_eq!(CasterType::Full.max_spell_level(1), 1);
        assert_eq!(CasterType::Full.max_spell_level(5), 3);
        assert_eq!(CasterType::Full.max_spell_level(17), 9);
        assert_eq!(CasterType::Half.max_spell_level(1), 0);
        assert_eq!(CasterType::Half.max_spell_level(2), 1);
        assert_eq!(CasterType::Half.max_spell_level(17), 5);
        assert_eq!(CasterType::Third.max_spell_level(2), 0);
        assert_eq!(CasterType::Third.max_spell_level(3), 1);
        assert_eq!(CasterType::Third.max_spell_level(19), 4);
        assert_eq!(CasterType::Pact.max_spell_level(1), 1);
        assert_eq!(CasterType::Pact.max_spell_level(9), 5);
        assert_eq!(CasterType::Pact.max_spell_level(20), 5);
    }

    #[test]
    fn test_slot_rows_never_exceed_max_spell_level() {
        let tables = SlotTables::standard();
        for caster_type in [CasterType::Full, CasterType::Half, CasterType::Third, CasterType::Pact] {
            for level in 1..=20u8 {
                let row = tables.row(caster_type, level);
                let max = caster_type.max_spell_level(level) as usize;
                assert!(
                    row.iter().skip(max).all(|s| *s == 0),
                    "{caster_type} level {level}: {row:?}"
                );
            }
        }
    }

    #[test]
    fn test_slot_row_out_of_range_is_empty() {
        let tables = SlotTables::standard();
        assert_eq!(tables.row(CasterType::Full, 0), [0; 9]);
        assert_eq!(tables.row(CasterType::Full, 21), [0; 9]);
        assert_eq!(tables.row(CasterType::Full, 5), [4, 3, 2, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_spells_known_formulas() {
        assert_eq!(SpellsKnown::LevelPlusModifier.count(5, 3), 8);
        assert_eq!(SpellsKnown::LevelPlusModifier.count(1, -3), 1);
        assert_eq!(SpellsKnown::HalfLevelPlusModifier.count(5, 2), 4);
        assert_eq!(SpellsKnown::Table(vec![2, 3, 4]).count(2, 5), 3);
        assert_eq!(SpellsKnown::Table(vec![2, 3, 4]).count(9, 5), 0);
    }

    #[test]
    fn test_progression_expansion() {
        let table = progression(&[(3, 2), (10, 3)]);
        assert_eq!(table.len(), 20);
        assert_eq!(table[1], 0);
        assert_eq!(table[2], 2);
        assert_eq!(table[9], 3);
    }

    #[test]
    fn test_spell_ids_unique() {
        let spells = standard_spells();
        let mut ids: Vec<&str> = spells.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), spells.len());
    }

    #[test]
    fn test_restricted_schools_exempt_cantrips() {
        let rules = standard_spellcasting_rules();
        let ek = rules
            .iter()
            .find(|r| r.source == CasterSource::Subclass("eldritch-knight".into()))
            .unwrap();
        let spells = standard_spells();
        let by_id = |id: &str| spells.iter().find(|s| s.id == id).unwrap();
        assert!(ek.allows_school(by_id("fire-bolt")));
        assert!(ek.allows_school(by_id("acid-splash")));
        assert!(ek.allows_school(by_id("shield")));
        assert!(!ek.allows_school(by_id("sleep")));
    }
}
