//! Class features gained by level.

use crate::rules::classes::CharacterClass;
use serde::{Deserialize, Serialize};

/// A feature a class grants on reaching `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub class: CharacterClass,
    pub level: u8,
    pub name: String,
}

fn class_features(class: CharacterClass, by_level: &[(u8, &str)]) -> Vec<FeatureDefinition> {
    by_level
        .iter()
        .map(|(level, name)| FeatureDefinition {
            class,
            level: *level,
            name: name.to_string(),
        })
        .collect()
}

/// The built-in feature table. Commoners have no entries.
pub fn standard_features() -> Vec<FeatureDefinition> {
    use CharacterClass::*;

    [
        class_features(
            Barbarian,
            &[
                (1, "Rage"),
                (1, "Unarmored Defense"),
                (2, "Reckless Attack"),
                (2, "Danger Sense"),
                (3, "Primal Path"),
                (5, "Extra Attack"),
                (5, "Fast Movement"),
                (7, "Feral Instinct"),
                (9, "Brutal Critical"),
                (11, "Relentless Rage"),
                (15, "Persistent Rage"),
                (18, "Indomitable Might"),
                (20, "Primal Champion"),
            ],
        ),
        class_features(
            Bard,
            &[
                (1, "Bardic Inspiration"),
                (1, "Spellcasting"),
                (2, "Jack of All Trades"),
                (2, "Song of Rest"),
                (3, "Bard College"),
                (3, "Expertise"),
                (5, "Font of Inspiration"),
                (6, "Countercharm"),
                (10, "Magical Secrets"),
                (20, "Superior Inspiration"),
            ],
        ),
        class_features(
            Cleric,
            &[
                (1, "Spellcasting"),
                (1, "Divine Domain"),
                (2, "Channel Divinity"),
                (5, "Destroy Undead"),
                (10, "Divine Intervention"),
            ],
        ),
        class_features(
            Druid,
            &[
                (1, "Druidic"),
                (1, "Spellcasting"),
                (2, "Wild Shape"),
                (2, "Druid Circle"),
                (18, "Timeless Body"),
                (18, "Beast Spells"),
                (20, "Archdruid"),
            ],
        ),
        class_features(
            Fighter,
            &[
                (1, "Fighting Style"),
                (1, "Second Wind"),
                (2, "Action Surge"),
                (3, "Martial Archetype"),
                (5, "Extra Attack"),
                (9, "Indomitable"),
                (11, "Two Extra Attacks"),
                (20, "Three Extra Attacks"),
            ],
        ),
        class_features(
            Monk,
            &[
                (1, "Unarmored Defense"),
                (1, "Martial Arts"),
                (2, "Ki"),
                (2, "Unarmored Movement"),
                (3, "Monastic Tradition"),
                (3, "Deflect Missiles"),
                (4, "Slow Fall"),
                (5, "Extra Attack"),
                (5, "Stunning Strike"),
                (6, "Ki-Empowered Strikes"),
                (7, "Evasion"),
                (7, "Stillness of Mind"),
                (10, "Purity of Body"),
                (13, "Tongue of the Sun and Moon"),
                (14, "Diamond Soul"),
                (15, "Timeless Body"),
                (18, "Empty Body"),
                (20, "Perfect Self"),
            ],
        ),
        class_features(
            Paladin,
            &[
                (1, "Divine Sense"),
                (1, "Lay on Hands"),
                (2, "Fighting Style"),
                (2, "Spellcasting"),
                (2, "Divine Smite"),
                (3, "Divine Health"),
                (3, "Sacred Oath"),
                (5, "Extra Attack"),
                (6, "Aura of Protection"),
                (10, "Aura of Courage"),
                (11, "Improved Divine Smite"),
                (14, "Cleansing Touch"),
            ],
        ),
        class_features(
            Ranger,
            &[
                (1, "Favored Enemy"),
                (1, "Natural Explorer"),
                (2, "Fighting Style"),
                (2, "Spellcasting"),
                (3, "Ranger Archetype"),
                (3, "Primeval Awareness"),
                (5, "Extra Attack"),
                (8, "Land's Stride"),
                (10, "Hide in Plain Sight"),
                (14, "Vanish"),
                (18, "Feral Senses"),
                (20, "Foe Slayer"),
            ],
        ),
        class_features(
            Rogue,
            &[
                (1, "Expertise"),
                (1, "Sneak Attack"),
                (1, "Thieves' Cant"),
                (2, "Cunning Action"),
                (3, "Roguish Archetype"),
                (5, "Uncanny Dodge"),
                (7, "Evasion"),
                (11, "Reliable Talent"),
                (14, "Blindsense"),
                (15, "Slippery Mind"),
                (18, "Elusive"),
                (20, "Stroke of Luck"),
            ],
        ),
        class_features(
            Sorcerer,
            &[
                (1, "Spellcasting"),
                (1, "Sorcerous Origin"),
                (2, "Font of Magic"),
                (3, "Metamagic"),
                (20, "Sorcerous Restoration"),
            ],
        ),
        class_features(
            Warlock,
            &[
                (1, "Otherworldly Patron"),
                (1, "Pact Magic"),
                (2, "Eldritch Invocations"),
                (3, "Pact Boon"),
                (11, "Mystic Arcanum"),
                (20, "Eldritch Master"),
            ],
        ),
        class_features(
            Wizard,
            &[
                (1, "Spellcasting"),
                (1, "Arcane Recovery"),
                (2, "Arcane Tradition"),
                (18, "Spell Mastery"),
                (20, "Signature Spells"),
            ],
        ),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_adventuring_class_has_level_one_features() {
        let features = standard_features();
        for class in CharacterClass::adventuring() {
            assert!(
                features.iter().any(|f| f.class == class && f.level == 1),
                "{class}"
            );
        }
        assert!(features.iter().all(|f| f.class != CharacterClass::Commoner));
    }

    #[test]
    fn test_feature_levels_in_range() {
        assert!(standard_features().iter().all(|f| (1..=20).contains(&f.level)));
    }
}
