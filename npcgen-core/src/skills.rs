//! Skills, their modifiers, and the proficiency cap a character may carry.

use crate::abilities::{Ability, AbilityBlock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    Arcana,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Perception,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Persuasion,
}

const ALL_SKILLS: [Skill; 18] = [
    Skill::Acrobatics,
    Skill::AnimalHandling,
    Skill::Arcana,
    Skill::Athletics,
    Skill::Deception,
    Skill::History,
    Skill::Insight,
    Skill::Intimidation,
    Skill::Investigation,
    Skill::Medicine,
    Skill::Nature,
    Skill::Perception,
    Skill::Performance,
    Skill::Persuasion,
    Skill::Religion,
    Skill::SleightOfHand,
    Skill::Stealth,
    Skill::Survival,
];

impl Skill {
    /// Every skill in sheet order (alphabetical by display name).
    pub fn all() -> &'static [Skill] {
        &ALL_SKILLS
    }

    /// Ability whose modifier the skill check adds.
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana | Skill::History | Skill::Investigation | Skill::Nature | Skill::Religion => {
                Ability::Intelligence
            }
            Skill::AnimalHandling | Skill::Insight | Skill::Medicine | Skill::Perception | Skill::Survival => {
                Ability::Wisdom
            }
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => Ability::Charisma,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Athletics => "Athletics",
            Skill::Acrobatics => "Acrobatics",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Arcana => "Arcana",
            Skill::History => "History",
            Skill::Investigation => "Investigation",
            Skill::Nature => "Nature",
            Skill::Religion => "Religion",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Insight => "Insight",
            Skill::Medicine => "Medicine",
            Skill::Perception => "Perception",
            Skill::Survival => "Survival",
            Skill::Deception => "Deception",
            Skill::Intimidation => "Intimidation",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
        }
    }

    /// Check modifier: the governing ability modifier plus the proficiency
    /// bonus when `skills` contains this skill.
    pub fn bonus(&self, abilities: &AbilityBlock, skills: &[Skill], proficiency: i8) -> i32 {
        let base = abilities.modifier(self.ability()) as i32;
        if skills.contains(self) {
            base + proficiency as i32
        } else {
            base
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Skill {
    type Err = String;

    /// Accepts display names or snake_case ids, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        Skill::all()
            .iter()
            .copied()
            .find(|skill| skill.name().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown skill: {}", s))
    }
}

/// Skill picks a class grants when a race's traits add none.
pub const DEFAULT_SKILL_CHOICES: usize = 2;

/// Most skill proficiencies a character may hold: the primary class's picks
/// plus whatever the race's traits grant or allow.
pub fn skill_proficiency_cap(class_choices: Option<usize>, race_allowance: usize) -> usize {
    class_choices.unwrap_or(DEFAULT_SKILL_CHOICES) + race_allowance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityScores;

    #[test]
    fn test_all_skills_sorted_and_complete() {
        let names: Vec<&str> = Skill::all().iter().map(|s| s.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 18);
    }

    #[test]
    fn test_skill_bonus_adds_proficiency() {
        let abilities = AbilityBlock::new(AbilityScores::new(10, 14, 10, 10, 16, 8));
        let skills = [Skill::Perception];
        assert_eq!(Skill::Perception.bonus(&abilities, &skills, 3), 6);
        assert_eq!(Skill::Insight.bonus(&abilities, &skills, 3), 3);
        assert_eq!(Skill::Stealth.bonus(&abilities, &skills, 3), 2);
        assert_eq!(Skill::Persuasion.bonus(&abilities, &skills, 3), -1);
    }

    #[test]
    fn test_parse_skill() {
        assert_eq!("sleight_of_hand".parse::<Skill>(), Ok(Skill::SleightOfHand));
        assert_eq!("Animal Handling".parse::<Skill>(), Ok(Skill::AnimalHandling));
        assert!("juggling".parse::<Skill>().is_err());
    }

    #[test]
    fn test_skill_cap() {
        assert_eq!(skill_proficiency_cap(Some(4), 0), 4);
        assert_eq!(skill_proficiency_cap(None, 2), 4);
    }
}
