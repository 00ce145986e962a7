//! Occupations: what a character does when not adventuring.

use crate::rules::races::{owned, title_case};
use crate::skills::Skill;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a trade occupation (lowercase, underscores between words).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupationId(String);

impl OccupationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_lowercase().replace(' ', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OccupationId {
    fn from(id: &str) -> Self {
        OccupationId::new(id)
    }
}

impl fmt::Display for OccupationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const INFANT_ID: &str = "infant";
pub const ADVENTURER_ID: &str = "adventurer";

/// A character's occupation.
///
/// Infants and full-time adventurers have reserved occupations; everyone
/// else practices a trade from the rule tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupation {
    Infant,
    Adventurer,
    Trade(OccupationId),
}

impl Occupation {
    /// Parse an id; the reserved ids map to their dedicated variants.
    pub fn from_id(id: &str) -> Self {
        let id = OccupationId::new(id);
        match id.as_str() {
            INFANT_ID => Occupation::Infant,
            ADVENTURER_ID => Occupation::Adventurer,
            _ => Occupation::Trade(id),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Occupation::Infant => INFANT_ID,
            Occupation::Adventurer => ADVENTURER_ID,
            Occupation::Trade(id) => id.as_str(),
        }
    }

    /// Title-cased with underscores as spaces, e.g. `Town Guard`.
    pub fn title(&self) -> String {
        title_case(&self.id().replace('_', " "))
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, Occupation::Trade(_))
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Rules data for an occupation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationDefinition {
    pub id: OccupationId,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Tools of the trade that double as weapons.
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl OccupationDefinition {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: OccupationId::new(id),
            skills: Vec::new(),
            equipment: Vec::new(),
            weapons: Vec::new(),
            description: description.to_string(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self.id.as_str(), INFANT_ID | ADVENTURER_ID)
    }

    fn with_skills(mut self, skills: &[Skill]) -> Self {
        self.skills = skills.to_vec();
        self
    }

    fn with_equipment(mut self, equipment: &[&str]) -> Self {
        self.equipment = owned(equipment);
        self
    }

    fn with_weapons(mut self, weapons: &[&str]) -> Self {
        self.weapons = owned(weapons);
        self
    }
}

/// The built-in occupation table, reserved entries first.
pub fn standard_occupations() -> Vec<OccupationDefinition> {
    use Skill::*;

    vec![
        OccupationDefinition::new(INFANT_ID, "Too young to work; cared for by family.")
            .with_equipment(&["Swaddling blanket", "Wooden rattle"]),
        OccupationDefinition::new(ADVENTURER_ID, "Lives by the sword, the spell, and the open road.")
            .with_equipment(&["Backpack", "Bedroll", "Rations (5 days)", "Waterskin", "Torch (5)", "Hempen rope (50 ft.)"]),
        OccupationDefinition::new("blacksmith", "Works iron and steel at a forge.")
            .with_skills(&[Athletics])
            .with_equipment(&["Smith's tools", "Leather apron", "Common clothes", "Pouch (10 gp)"])
            .with_weapons(&["light-hammer"]),
        OccupationDefinition::new("farmer", "Tends fields and livestock.")
            .with_skills(&[AnimalHandling, Nature])
            .with_equipment(&["Farming tools", "Straw hat", "Common clothes", "Pouch (2 gp)"])
            .with_weapons(&["sickle"]),
        OccupationDefinition::new("merchant", "Buys and sells goods for profit.")
            .with_skills(&[Persuasion, Insight])
            .with_equipment(&["Merchant's scale", "Ledger", "Fine clothes", "Pouch (25 gp)"])
            .with_weapons(&["dagger"]),
        OccupationDefinition::new("innkeeper", "Runs a tavern or inn for travelers.")
            .with_skills(&[Insight, Persuasion])
            .with_equipment(&["Brewer's supplies", "Ring of keys", "Common clothes", "Pouch (15 gp)"])
            .with_weapons(&["club"]),
        OccupationDefinition::new("town_guard", "Keeps the peace within the town walls.")
            .with_skills(&[Athletics, Perception])
            .with_equipment(&["Guard uniform", "Horn", "Manacles", "Pouch (5 gp)"])
            .with_weapons(&["spear", "light-crossbow"]),
        OccupationDefinition::new("hunter", "Tracks game through forest and field.")
            .with_skills(&[Survival, Stealth])
            .with_equipment(&["Hunting trap", "Skinning knife", "Traveler's clothes", "Pouch (4 gp)"])
            .with_weapons(&["shortbow", "dagger"]),
        OccupationDefinition::new("fisher", "Hauls nets and lines from river or sea.")
            .with_skills(&[Nature, Survival])
            .with_equipment(&["Fishing tackle", "Net", "Oilskin coat", "Pouch (3 gp)"])
            .with_weapons(&["spear"]),
        OccupationDefinition::new("baker", "Rises before dawn to bake bread for the town.")
            .with_skills(&[Persuasion])
            .with_equipment(&["Cook's utensils", "Flour sack", "Common clothes", "Pouch (4 gp)"])
            .with_weapons(&["club"]),
        OccupationDefinition::new("carpenter", "Builds houses, furniture, and carts.")
            .with_skills(&[Athletics, Investigation])
            .with_equipment(&["Carpenter's tools", "Measuring cord", "Common clothes", "Pouch (6 gp)"])
            .with_weapons(&["light-hammer", "handaxe"]),
        OccupationDefinition::new("acolyte", "Serves in a temple and tends to the faithful.")
            .with_skills(&[Religion, Insight])
            .with_equipment(&["Holy symbol", "Prayer book", "Vestments", "Pouch (5 gp)"])
            .with_weapons(&["mace"]),
        OccupationDefinition::new("scholar", "Studies old texts and records new ones.")
            .with_skills(&[History, Arcana])
            .with_equipment(&["Ink and quill", "Parchment (10 sheets)", "Scholar's robes", "Pouch (8 gp)"])
            .with_weapons(&["dagger"]),
        OccupationDefinition::new("sailor", "Crews merchant vessels on long voyages.")
            .with_skills(&[Athletics, Perception])
            .with_equipment(&["Navigator's tools", "Silk rope (50 ft.)", "Common clothes", "Pouch (10 gp)"])
            .with_weapons(&["club", "dagger"]),
        OccupationDefinition::new("miner", "Digs ore and gems out of the deep places.")
            .with_skills(&[Athletics, Survival])
            .with_equipment(&["Miner's pick", "Lantern", "Common clothes", "Pouch (5 gp)"])
            .with_weapons(&["light-hammer"]),
        OccupationDefinition::new("tailor", "Cuts and sews clothing to order.")
            .with_skills(&[Insight, Persuasion])
            .with_equipment(&["Weaver's tools", "Bolt of cloth", "Fine clothes", "Pouch (10 gp)"])
            .with_weapons(&["dagger"]),
        OccupationDefinition::new("herbalist", "Gathers herbs and brews simple remedies.")
            .with_skills(&[Medicine, Nature])
            .with_equipment(&["Herbalism kit", "Mortar and pestle", "Common clothes", "Pouch (6 gp)"])
            .with_weapons(&["sickle", "quarterstaff"]),
        OccupationDefinition::new("minstrel", "Plays music in taverns and town squares.")
            .with_skills(&[Performance, Persuasion])
            .with_equipment(&["Lute", "Costume", "Pouch (3 gp)"])
            .with_weapons(&["dagger"]),
        OccupationDefinition::new("noble", "Manages family lands and political ties.")
            .with_skills(&[History, Persuasion])
            .with_equipment(&["Signet ring", "Scroll of pedigree", "Fine clothes", "Purse (25 gp)"])
            .with_weapons(&["rapier"]),
        OccupationDefinition::new("stablehand", "Cares for horses and keeps the stables clean.")
            .with_skills(&[AnimalHandling])
            .with_equipment(&["Curry comb", "Feed bag", "Common clothes", "Pouch (1 gp)"])
            .with_weapons(&["club"]),
        OccupationDefinition::new("scribe", "Copies letters, contracts, and books.")
            .with_skills(&[History, Investigation])
            .with_equipment(&["Calligrapher's supplies", "Sealing wax", "Common clothes", "Pouch (7 gp)"])
            .with_weapons(&["dagger"]),
        OccupationDefinition::new("woodcutter", "Fells trees and splits firewood.")
            .with_skills(&[Athletics, Survival])
            .with_equipment(&["Woodcutter's axe", "Saw", "Common clothes", "Pouch (3 gp)"])
            .with_weapons(&["handaxe"]),
        OccupationDefinition::new("beggar", "Lives on the charity of strangers.")
            .with_skills(&[SleightOfHand, Stealth])
            .with_equipment(&["Tin cup", "Rags", "Pet mouse"])
            .with_weapons(&["club"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_ids_map_to_variants() {
        assert_eq!(Occupation::from_id("infant"), Occupation::Infant);
        assert_eq!(Occupation::from_id("Adventurer"), Occupation::Adventurer);
        assert_eq!(
            Occupation::from_id("town guard"),
            Occupation::Trade(OccupationId::new("town_guard"))
        );
    }

    #[test]
    fn test_title() {
        assert_eq!(Occupation::from_id("town_guard").title(), "Town Guard");
        assert_eq!(Occupation::Infant.title(), "Infant");
    }

    #[test]
    fn test_standard_table_has_reserved_entries() {
        let table = standard_occupations();
        assert!(table.iter().any(|o| o.id.as_str() == INFANT_ID));
        assert!(table.iter().any(|o| o.id.as_str() == ADVENTURER_ID));
        assert!(table.iter().filter(|o| !o.is_reserved()).count() >= 20);
    }
}
