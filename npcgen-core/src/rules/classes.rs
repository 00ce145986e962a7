//! Class and subclass definitions.
//!
//! Contains hit dice, stat priorities, saving throws, granted skills, armor
//! profiles and weapon proficiencies for the twelve PHB classes plus the
//! non-adventuring commoner.

use crate::abilities::{Ability, StatPriority};
use crate::dice::DieType;
use crate::rules::weapons::WeaponCategory;
use crate::skills::Skill;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character classes. `Commoner` is the level-0 baseline for ordinary folk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
    Commoner,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Commoner => "Commoner",
        }
    }

    pub fn all() -> [CharacterClass; 13] {
        [
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
            CharacterClass::Commoner,
        ]
    }

    /// Every class except the commoner baseline.
    pub fn adventuring() -> impl Iterator<Item = CharacterClass> {
        CharacterClass::all()
            .into_iter()
            .filter(|c| !c.is_commoner())
    }

    pub fn is_commoner(&self) -> bool {
        matches!(self, CharacterClass::Commoner)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        CharacterClass::all()
            .into_iter()
            .find(|c| c.name().to_lowercase() == lower)
            .ok_or_else(|| format!("Unknown class: {s}"))
    }
}

/// Special armor class formulas that replace worn armor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnarmoredDefense {
    /// 10 + DEX + CON.
    Constitution,
    /// 10 + DEX + WIS.
    Wisdom,
}

impl UnarmoredDefense {
    pub fn ability(&self) -> Ability {
        match self {
            UnarmoredDefense::Constitution => Ability::Constitution,
            UnarmoredDefense::Wisdom => Ability::Wisdom,
        }
    }
}

/// The armor a class starts in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorProfile {
    pub name: String,
    pub base_ac: i32,
    pub add_dex: bool,
    pub max_dex: Option<i32>,
    #[serde(default)]
    pub unarmored_defense: Option<UnarmoredDefense>,
}

impl ArmorProfile {
    pub fn new(name: &str, base_ac: i32) -> Self {
        Self {
            name: name.to_string(),
            base_ac,
            add_dex: false,
            max_dex: None,
            unarmored_defense: None,
        }
    }

    /// Light armor: full DEX bonus.
    pub fn light(name: &str, base_ac: i32) -> Self {
        Self {
            add_dex: true,
            ..Self::new(name, base_ac)
        }
    }

    /// Medium armor: DEX bonus capped at +2.
    pub fn medium(name: &str, base_ac: i32) -> Self {
        Self {
            add_dex: true,
            max_dex: Some(2),
            ..Self::new(name, base_ac)
        }
    }

    pub fn unarmored_defense(formula: UnarmoredDefense) -> Self {
        Self {
            add_dex: true,
            unarmored_defense: Some(formula),
            ..Self::new("Unarmored Defense", 10)
        }
    }
}

/// Class-specific rules data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub class: CharacterClass,
    pub hit_die: DieType,
    #[serde(default)]
    pub primary: Option<Ability>,
    #[serde(default)]
    pub secondary: Option<Ability>,
    #[serde(default)]
    pub dump: Option<Ability>,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    /// Class skill list; the first `skill_choices` entries are granted.
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub skill_choices: usize,
    #[serde(default)]
    pub armor: Option<ArmorProfile>,
    #[serde(default)]
    pub weapon_categories: Vec<WeaponCategory>,
    /// Individual weapons the class is proficient with beyond its categories.
    #[serde(default)]
    pub weapon_proficiencies: Vec<String>,
    #[serde(default)]
    pub default_weapons: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl ClassDefinition {
    pub fn new(class: CharacterClass, hit_die: DieType) -> Self {
        Self {
            class,
            hit_die,
            primary: None,
            secondary: None,
            dump: None,
            saving_throws: Vec::new(),
            skills: Vec::new(),
            skill_choices: 0,
            armor: None,
            weapon_categories: Vec::new(),
            weapon_proficiencies: Vec::new(),
            default_weapons: Vec::new(),
            description: String::new(),
        }
    }

    /// Stand-in for a class missing from the tables: d4 hit die, nothing else.
    pub fn fallback(class: CharacterClass) -> Self {
        Self::new(class, DieType::D4)
    }

    pub fn stat_priority(&self) -> StatPriority {
        StatPriority {
            primary: self.primary,
            secondary: self.secondary,
            dump: self.dump,
        }
    }

    pub fn granted_skills(&self) -> &[Skill] {
        &self.skills[..self.skill_choices.min(self.skills.len())]
    }

    pub fn is_proficient_with(&self, weapon_id: &str, category: WeaponCategory) -> bool {
        self.weapon_categories.contains(&category)
            || self.weapon_proficiencies.iter().any(|w| w == weapon_id)
    }

    fn with_stats(mut self, primary: Ability, secondary: Ability, dump: Ability) -> Self {
        self.primary = Some(primary);
        self.secondary = Some(secondary);
        self.dump = Some(dump);
        self
    }

    fn with_saves(mut self, saves: [Ability; 2]) -> Self {
        self.saving_throws = saves.to_vec();
        self
    }

    fn with_skills(mut self, choices: usize, skills: &[Skill]) -> Self {
        self.skill_choices = choices;
        self.skills = skills.to_vec();
        self
    }

    fn with_armor(mut self, armor: ArmorProfile) -> Self {
        self.armor = Some(armor);
        self
    }

    fn with_weapons(
        mut self,
        categories: &[WeaponCategory],
        proficiencies: &[&str],
        defaults: &[&str],
    ) -> Self {
        self.weapon_categories = categories.to_vec();
        self.weapon_proficiencies = proficiencies.iter().map(|w| w.to_string()).collect();
        self.default_weapons = defaults.iter().map(|w| w.to_string()).collect();
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// The built-in class table.
pub fn standard_classes() -> Vec<ClassDefinition> {
    use Ability::*;
    use CharacterClass as C;
    use WeaponCategory::{Martial, Simple};

    vec![
        ClassDefinition::new(C::Barbarian, DieType::D12)
            .with_stats(Strength, Constitution, Intelligence)
            .with_saves([Strength, Constitution])
            .with_skills(2, &[Skill::Athletics, Skill::Survival, Skill::Intimidation, Skill::Perception])
            .with_armor(ArmorProfile::unarmored_defense(UnarmoredDefense::Constitution))
            .with_weapons(&[Simple, Martial], &[], &["greataxe", "handaxe"])
            .with_description("A fierce warrior who can enter a battle rage."),
        ClassDefinition::new(C::Bard, DieType::D8)
            .with_stats(Charisma, Dexterity, Strength)
            .with_saves([Dexterity, Charisma])
            .with_skills(3, &[Skill::Performance, Skill::Persuasion, Skill::Deception, Skill::History])
            .with_armor(ArmorProfile::light("Leather Armor", 11))
            .with_weapons(
                &[Simple],
                &["hand-crossbow", "longsword", "rapier", "shortsword"],
                &["rapier", "dagger"],
            )
            .with_description("An inspiring magician whose power echoes the music of creation."),
        ClassDefinition::new(C::Cleric, DieType::D8)
            .with_stats(Wisdom, Constitution, Dexterity)
            .with_saves([Wisdom, Charisma])
            .with_skills(2, &[Skill::Religion, Skill::Insight, Skill::Medicine, Skill::History])
            .with_armor(ArmorProfile::medium("Scale Mail", 14))
            .with_weapons(&[Simple], &[], &["mace", "light-crossbow"])
            .with_description("A priestly champion who wields divine magic in service of a higher power."),
        ClassDefinition::new(C::Druid, DieType::D8)
            .with_stats(Wisdom, Constitution, Strength)
            .with_saves([Intelligence, Wisdom])
            .with_skills(2, &[Skill::Nature, Skill::Survival, Skill::AnimalHandling, Skill::Medicine])
            .with_armor(ArmorProfile::medium("Hide Armor", 12))
            .with_weapons(
                &[],
                &["club", "dagger", "dart", "javelin", "mace", "quarterstaff", "scimitar", "sickle", "sling", "spear"],
                &["scimitar", "quarterstaff"],
            )
            .with_description("A priest of the Old Faith, wielding the powers of nature."),
        ClassDefinition::new(C::Fighter, DieType::D10)
            .with_stats(Strength, Constitution, Charisma)
            .with_saves([Strength, Constitution])
            .with_skills(2, &[Skill::Athletics, Skill::Intimidation, Skill::Perception, Skill::Survival])
            .with_armor(ArmorProfile::new("Chain Mail", 16))
            .with_weapons(&[Simple, Martial], &[], &["longsword", "longbow"])
            .with_description("A master of martial combat, skilled with a variety of weapons and armor."),
        ClassDefinition::new(C::Monk, DieType::D8)
            .with_stats(Dexterity, Wisdom, Charisma)
            .with_saves([Strength, Dexterity])
            .with_skills(2, &[Skill::Acrobatics, Skill::Stealth, Skill::Insight, Skill::Religion])
            .with_armor(ArmorProfile::unarmored_defense(UnarmoredDefense::Wisdom))
            .with_weapons(&[Simple], &["shortsword"], &["shortsword", "dart"])
            .with_description("A master of martial arts, harnessing the power of the body in pursuit of perfection."),
        ClassDefinition::new(C::Paladin, DieType::D10)
            .with_stats(Strength, Charisma, Intelligence)
            .with_saves([Wisdom, Charisma])
            .with_skills(2, &[Skill::Athletics, Skill::Religion, Skill::Persuasion, Skill::Insight])
            .with_armor(ArmorProfile::new("Chain Mail", 16))
            .with_weapons(&[Simple, Martial], &[], &["longsword", "javelin"])
            .with_description("A holy warrior bound to a sacred oath."),
        ClassDefinition::new(C::Ranger, DieType::D10)
            .with_stats(Dexterity, Wisdom, Charisma)
            .with_saves([Strength, Dexterity])
            .with_skills(3, &[Skill::Survival, Skill::Perception, Skill::Stealth, Skill::Nature])
            .with_armor(ArmorProfile::medium("Scale Mail", 14))
            .with_weapons(&[Simple, Martial], &[], &["shortsword", "longbow"])
            .with_description("A warrior who combats threats on the edges of civilization."),
        ClassDefinition::new(C::Rogue, DieType::D8)
            .with_stats(Dexterity, Intelligence, Strength)
            .with_saves([Dexterity, Intelligence])
            .with_skills(
                4,
                &[Skill::Stealth, Skill::SleightOfHand, Skill::Perception, Skill::Deception, Skill::Investigation],
            )
            .with_armor(ArmorProfile::light("Leather Armor", 11))
            .with_weapons(
                &[Simple],
                &["hand-crossbow", "longsword", "rapier", "shortsword"],
                &["rapier", "shortbow", "dagger"],
            )
            .with_description("A scoundrel who uses stealth and trickery to overcome obstacles."),
        ClassDefinition::new(C::Sorcerer, DieType::D6)
            .with_stats(Charisma, Constitution, Strength)
            .with_saves([Constitution, Charisma])
            .with_skills(2, &[Skill::Arcana, Skill::Persuasion, Skill::Insight, Skill::Intimidation])
            .with_weapons(
                &[],
                &["dagger", "dart", "sling", "quarterstaff", "light-crossbow"],
                &["dagger", "light-crossbow"],
            )
            .with_description("A spellcaster who draws on inherent magic from a gift or bloodline."),
        ClassDefinition::new(C::Warlock, DieType::D8)
            .with_stats(Charisma, Constitution, Strength)
            .with_saves([Wisdom, Charisma])
            .with_skills(2, &[Skill::Arcana, Skill::Deception, Skill::Intimidation, Skill::Investigation])
            .with_armor(ArmorProfile::light("Leather Armor", 11))
            .with_weapons(&[Simple], &[], &["dagger", "light-crossbow"])
            .with_description("A wielder of magic derived from a bargain with an extraplanar entity."),
        ClassDefinition::new(C::Wizard, DieType::D6)
            .with_stats(Intelligence, Constitution, Strength)
            .with_saves([Intelligence, Wisdom])
            .with_skills(2, &[Skill::Arcana, Skill::History, Skill::Investigation, Skill::Insight])
            .with_weapons(
                &[],
                &["dagger", "dart", "sling", "quarterstaff", "light-crossbow"],
                &["quarterstaff", "dagger"],
            )
            .with_description("A scholarly magic-user capable of manipulating the structures of reality."),
        // No primary ability: scores land on random abilities.
        ClassDefinition::new(C::Commoner, DieType::D4)
            .with_weapons(&[Simple], &[], &[])
            .with_description("An ordinary person with no adventuring training."),
    ]
}

// ============================================================================
// Subclasses
// ============================================================================

/// A single subclass choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubclassOption {
    pub id: String,
    pub name: String,
    /// Verb phrase woven into backstories, e.g. "swore a sacred oath".
    #[serde(default)]
    pub backstory_hook: Option<String>,
    /// Grants spellcasting to an otherwise non-casting class.
    #[serde(default)]
    pub grants_spellcasting: bool,
}

impl SubclassOption {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            backstory_hook: None,
            grants_spellcasting: false,
        }
    }

    fn hook(mut self, hook: &str) -> Self {
        self.backstory_hook = Some(hook.to_string());
        self
    }

    fn spellcasting(mut self) -> Self {
        self.grants_spellcasting = true;
        self
    }
}

/// The subclass options of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubclassDefinition {
    pub class: CharacterClass,
    /// Class level at which a subclass is chosen.
    pub unlock_level: u8,
    pub options: Vec<SubclassOption>,
}

impl SubclassDefinition {
    pub fn option(&self, id: &str) -> Option<&SubclassOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// The built-in subclass table.
pub fn standard_subclasses() -> Vec<SubclassDefinition> {
    use CharacterClass as C;
    use SubclassOption as O;

    vec![
        SubclassDefinition {
            class: C::Barbarian,
            unlock_level: 3,
            options: vec![
                O::new("berserker", "Path of the Berserker")
                    .hook("learned to lose {reflexive} in the red haze of battle"),
                O::new("totem-warrior", "Path of the Totem Warrior")
                    .hook("bonded with a spirit animal during a vision quest"),
            ],
        },
        SubclassDefinition {
            class: C::Bard,
            unlock_level: 3,
            options: vec![
                O::new("lore", "College of Lore")
                    .hook("collected secrets and songs from every tavern on the road"),
                O::new("valor", "College of Valor")
                    .hook("sang the deeds of heroes and then set out to match them"),
            ],
        },
        SubclassDefinition {
            class: C::Cleric,
            unlock_level: 1,
            options: vec![
                O::new("life", "Life Domain").hook("was called to heal the sick and dying"),
                O::new("light", "Light Domain").hook("was touched by a vision of burning radiance"),
                O::new("knowledge", "Knowledge Domain"),
                O::new("nature", "Nature Domain"),
                O::new("tempest", "Tempest Domain").hook("survived a storm that should have killed {object}"),
                O::new("trickery", "Trickery Domain"),
                O::new("war", "War Domain").hook("prayed on the eve of a great battle and was answered"),
            ],
        },
        SubclassDefinition {
            class: C::Druid,
            unlock_level: 2,
            options: vec![
                O::new("land", "Circle of the Land")
                    .hook("kept vigil over a sacred grove for a full turning of the seasons"),
                O::new("moon", "Circle of the Moon")
                    .hook("ran with wolves under the full moon and came back changed"),
            ],
        },
        SubclassDefinition {
            class: C::Fighter,
            unlock_level: 3,
            options: vec![
                O::new("champion", "Champion").hook("trained relentlessly to perfect {possessive} form"),
                O::new("battle-master", "Battle Master")
                    .hook("studied the campaigns of long-dead generals"),
                O::new("eldritch-knight", "Eldritch Knight")
                    .hook("learned to weave spells between sword strokes")
                    .spellcasting(),
            ],
        },
        SubclassDefinition {
            class: C::Monk,
            unlock_level: 3,
            options: vec![
                O::new("open-hand", "Way of the Open Hand")
                    .hook("spent years in a remote monastery mastering the open hand"),
                O::new("shadow", "Way of Shadow").hook("was trained in silence by a hidden order"),
                O::new("four-elements", "Way of the Four Elements"),
            ],
        },
        SubclassDefinition {
            class: C::Paladin,
            unlock_level: 3,
            options: vec![
                O::new("devotion", "Oath of Devotion")
                    .hook("swore a sacred oath to uphold justice and honor"),
                O::new("ancients", "Oath of the Ancients")
                    .hook("swore to protect the light and life of the world"),
                O::new("vengeance", "Oath of Vengeance")
                    .hook("swore vengeance on those who wronged {object}"),
            ],
        },
        SubclassDefinition {
            class: C::Ranger,
            unlock_level: 3,
            options: vec![
                O::new("hunter", "Hunter").hook("tracked monsters through the wild places of the world"),
                O::new("beast-master", "Beast Master")
                    .hook("found a loyal animal companion in the wilderness"),
            ],
        },
        SubclassDefinition {
            class: C::Rogue,
            unlock_level: 3,
            options: vec![
                O::new("thief", "Thief").hook("ran with a gang of cutpurses in the city streets"),
                O::new("assassin", "Assassin").hook("was trained in the quiet art of killing"),
                O::new("arcane-trickster", "Arcane Trickster")
                    .hook("stole a spellbook and taught {reflexive} its tricks")
                    .spellcasting(),
            ],
        },
        SubclassDefinition {
            class: C::Sorcerer,
            unlock_level: 1,
            options: vec![
                O::new("draconic", "Draconic Bloodline")
                    .hook("discovered the blood of dragons running in {possessive} veins"),
                O::new("wild-magic", "Wild Magic")
                    .hook("caused a surge of wild magic that nobody could explain"),
            ],
        },
        SubclassDefinition {
            class: C::Warlock,
            unlock_level: 1,
            options: vec![
                O::new("archfey", "The Archfey").hook("struck a bargain with a capricious fey lord"),
                O::new("fiend", "The Fiend").hook("made a pact with a fiend from the lower planes"),
                O::new("great-old-one", "The Great Old One")
                    .hook("heard whispers from a being beyond the stars"),
            ],
        },
        SubclassDefinition {
            class: C::Wizard,
            unlock_level: 2,
            options: vec![
                O::new("abjuration", "School of Abjuration"),
                O::new("divination", "School of Divination")
                    .hook("glimpsed the future in a dream and set out to change it"),
                O::new("evocation", "School of Evocation")
                    .hook("spent long nights studying the raw forces of magic"),
                O::new("illusion", "School of Illusion"),
                O::new("necromancy", "School of Necromancy")
                    .hook("studied forbidden texts on the nature of death"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_a_definition() {
        let classes = standard_classes();
        for class in CharacterClass::all() {
            assert!(classes.iter().any(|d| d.class == class), "{class}");
        }
    }

    #[test]
    fn test_adventuring_classes_have_two_saves() {
        for def in standard_classes() {
            if def.class.is_commoner() {
                assert!(def.saving_throws.is_empty());
                assert!(def.primary.is_none());
            } else {
                assert_eq!(def.saving_throws.len(), 2, "{}", def.class);
            }
        }
    }

    #[test]
    fn test_granted_skills_respect_choice_count() {
        for def in standard_classes() {
            assert_eq!(def.granted_skills().len(), def.skill_choices.min(def.skills.len()));
        }
        let rogue = standard_classes()
            .into_iter()
            .find(|d| d.class == CharacterClass::Rogue)
            .unwrap();
        assert_eq!(rogue.granted_skills().len(), 4);
    }

    #[test]
    fn test_class_parsing() {
        assert_eq!("wizard".parse::<CharacterClass>(), Ok(CharacterClass::Wizard));
        assert_eq!("Commoner".parse::<CharacterClass>(), Ok(CharacterClass::Commoner));
        assert!("necromancer".parse::<CharacterClass>().is_err());
        assert_eq!(CharacterClass::adventuring().count(), 12);
    }

    #[test]
    fn test_spellcasting_subclasses() {
        let granting: Vec<String> = standard_subclasses()
            .iter()
            .flat_map(|s| s.options.iter())
            .filter(|o| o.grants_spellcasting)
            .map(|o| o.id.clone())
            .collect();
        assert_eq!(granting, vec!["eldritch-knight", "arcane-trickster"]);
    }
}
