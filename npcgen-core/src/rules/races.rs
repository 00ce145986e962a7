//! Race definitions: lifespans, ability bonuses, traits, lore, and name tables.

use crate::abilities::{Ability, AbilityBonus};
use crate::skills::Skill;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a race in the rule tables (lowercase, e.g. `half-elf`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceId(String);

impl RaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RaceId {
    fn from(id: &str) -> Self {
        RaceId::new(id)
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creature size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub fn name(&self) -> &'static str {
        match self {
            Size::Tiny => "Tiny",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }
}

/// Phrases woven into backstories for a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreFragment {
    pub homeland: String,
    pub culture: String,
    pub childhood: String,
    pub challenge: String,
    pub tradition: String,
    pub elder: String,
}

impl LoreFragment {
    pub fn new(
        homeland: &str,
        culture: &str,
        childhood: &str,
        challenge: &str,
        tradition: &str,
        elder: &str,
    ) -> Self {
        Self {
            homeland: homeland.to_string(),
            culture: culture.to_string(),
            childhood: childhood.to_string(),
            challenge: challenge.to_string(),
            tradition: tradition.to_string(),
            elder: elder.to_string(),
        }
    }

    /// Lore used when neither the race nor humans define any.
    pub fn generic() -> Self {
        Self::new(
            "a small settlement far from the great cities",
            "makes the best of whatever the world offers",
            "growing up among ordinary folk",
            "finding a place in a wide and uncaring world",
            "the simple customs of their home village",
            "respected elder of their community",
        )
    }
}

/// First names by gender plus family names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameTable {
    pub male: Vec<String>,
    pub female: Vec<String>,
    pub surnames: Vec<String>,
}

impl NameTable {
    pub fn new(male: &[&str], female: &[&str], surnames: &[&str]) -> Self {
        Self {
            male: owned(male),
            female: owned(female),
            surnames: owned(surnames),
        }
    }
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A playable (or NPC-only) race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDefinition {
    pub id: RaceId,
    pub name: String,
    /// Typical maximum age in years.
    pub lifespan: u32,
    /// Age of physical adulthood in years.
    pub maturity: u32,
    #[serde(default)]
    pub ability_bonus: AbilityBonus,
    #[serde(default)]
    pub size: Size,
    #[serde(default = "default_speed")]
    pub speed: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub senses: Vec<String>,
    /// Skills granted outright by racial traits.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Extra free skill picks the race's traits allow.
    #[serde(default)]
    pub skill_choices: usize,
    #[serde(default)]
    pub lore: Option<LoreFragment>,
    #[serde(default)]
    pub names: Option<NameTable>,
}

fn default_speed() -> u32 {
    30
}

impl RaceDefinition {
    pub fn new(id: &str, name: &str, lifespan: u32, maturity: u32) -> Self {
        Self {
            id: RaceId::new(id),
            name: name.to_string(),
            lifespan,
            maturity,
            ability_bonus: AbilityBonus::default(),
            size: Size::Medium,
            speed: default_speed(),
            languages: vec!["Common".to_string()],
            traits: Vec::new(),
            senses: Vec::new(),
            skills: Vec::new(),
            skill_choices: 0,
            lore: None,
            names: None,
        }
    }

    /// Stand-in for a race id missing from the tables: human proportions,
    /// the default highest-two bonus, and no lore of its own.
    pub fn fallback(id: &RaceId) -> Self {
        let mut race = Self::new(id.as_str(), id.as_str(), 80, 18);
        race.name = title_case(id.as_str());
        race
    }

    pub fn with_bonus(mut self, bonus: AbilityBonus) -> Self {
        self.ability_bonus = bonus;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = owned(languages);
        self
    }

    pub fn with_traits(mut self, traits: &[&str]) -> Self {
        self.traits = owned(traits);
        self
    }

    pub fn with_senses(mut self, senses: &[&str]) -> Self {
        self.senses = owned(senses);
        self
    }

    pub fn with_skills(mut self, skills: &[Skill]) -> Self {
        self.skills = skills.to_vec();
        self
    }

    pub fn with_skill_choices(mut self, choices: usize) -> Self {
        self.skill_choices = choices;
        self
    }

    /// Number of skills the race adds to a character's proficiency cap.
    pub fn skill_allowance(&self) -> usize {
        self.skills.len() + self.skill_choices
    }

    pub fn with_lore(mut self, lore: LoreFragment) -> Self {
        self.lore = Some(lore);
        self
    }

    pub fn with_names(mut self, names: NameTable) -> Self {
        self.names = Some(names);
        self
    }
}

pub(crate) fn title_case(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(if s.contains('-') { "-" } else { " " })
}

const DARKVISION: &str = "Darkvision 60 ft.";
const SUPERIOR_DARKVISION: &str = "Darkvision 120 ft.";

/// The built-in race table.
pub fn standard_races() -> Vec<RaceDefinition> {
    use Ability::*;

    vec![
        RaceDefinition::new("human", "Human", 80, 18)
            .with_bonus(AbilityBonus::any(1))
            .with_languages(&["Common", "one extra language"])
            .with_traits(&["Extra Skill"])
            .with_skill_choices(1)
            .with_lore(LoreFragment::new(
                "the diverse and ever-expanding human settlements",
                "embodies the adaptability and ambition of humankind",
                "growing up amid the bustling energy of human society",
                "making their mark in the brief span of a human life",
                "the varied customs of their particular human culture",
                "respected figure whose lifetime of experience guides the community",
            ))
            .with_names(NameTable::new(
                &["Aldric", "Bram", "Cedric", "Darian", "Edmund", "Gareth", "Marcus", "Tobias"],
                &["Alys", "Brienne", "Clara", "Elena", "Isolde", "Maren", "Rowena", "Tessa"],
                &["Ashford", "Blackwood", "Carter", "Fletcher", "Hale", "Marsh", "Thorne", "Wren"],
            )),
        RaceDefinition::new("elf", "Elf", 750, 100)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2))
            .with_languages(&["Common", "Elvish"])
            .with_traits(&["Fey Ancestry", "Trance", "Keen Senses"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Perception])
            .with_lore(LoreFragment::new(
                "the ancient elven forests and hidden realms",
                "takes the long view, shaped by centuries of elven tradition",
                "spending decades in the patient ways of elven learning",
                "watching shorter-lived friends age while they remain unchanged",
                "the moonlit reveries that connect elves to their ancestors",
                "living link to elven history stretching back millennia",
            ))
            .with_names(NameTable::new(
                &["Adran", "Aelar", "Erevan", "Galinndan", "Ivellios", "Soveliss", "Thamior"],
                &["Adrie", "Birel", "Enna", "Keyleth", "Naivara", "Sariel", "Shava"],
                &["Amakiir", "Galanodel", "Holimion", "Liadon", "Meliamne", "Siannodel"],
            )),
        RaceDefinition::new("dwarf", "Dwarf", 350, 50)
            .with_bonus(AbilityBonus::fixed(Constitution, 2))
            .with_speed(25)
            .with_languages(&["Common", "Dwarvish"])
            .with_traits(&["Dwarven Resilience", "Stonecunning", "Dwarven Combat Training"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the great mountain halls of the dwarven kingdoms",
                "honors clan traditions and the mastery of stone and steel",
                "learning the craft-secrets of their clan",
                "living up to the legendary standards of dwarven craftsmanship",
                "the sacred smithing rites of their ancestors",
                "venerated keeper of clan history and tradition",
            ))
            .with_names(NameTable::new(
                &["Baern", "Dain", "Eberk", "Harbek", "Rurik", "Thorin", "Vondal"],
                &["Amber", "Bardryn", "Dagnal", "Eldeth", "Gunnloda", "Helja", "Vistra"],
                &["Battlehammer", "Fireforge", "Gorunn", "Ironfist", "Loderr", "Strakeln"],
            )),
        RaceDefinition::new("halfling", "Halfling", 150, 20)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2))
            .with_size(Size::Small)
            .with_speed(25)
            .with_languages(&["Common", "Halfling"])
            .with_traits(&["Lucky", "Brave", "Halfling Nimbleness"])
            .with_lore(LoreFragment::new(
                "the cozy villages and warm hearths of halfling communities",
                "cherishes good food, good company, and a comfortable home",
                "running barefoot through pastoral halfling lands",
                "finding adventure while staying true to halfling values",
                "the great feasts and storytelling of halfling gatherings",
                "beloved elder whose stories and recipes are village treasures",
            ))
            .with_names(NameTable::new(
                &["Alton", "Cade", "Eldon", "Garret", "Milo", "Perrin", "Roscoe"],
                &["Andry", "Bree", "Callie", "Kithri", "Lavinia", "Merla", "Seraphina"],
                &["Brushgather", "Goodbarrel", "Greenbottle", "Tealeaf", "Thorngage", "Underbough"],
            )),
        RaceDefinition::new("gnome", "Gnome", 425, 40)
            .with_bonus(AbilityBonus::fixed(Intelligence, 2))
            .with_size(Size::Small)
            .with_speed(25)
            .with_languages(&["Common", "Gnomish"])
            .with_traits(&["Gnome Cunning"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the busy burrows and workshops of the gnomish community",
                "approaches life with boundless curiosity and inventive spirit",
                "tinkering with contraptions and asking endless questions",
                "being taken seriously despite their small stature",
                "the great invention festivals of gnomish society",
                "master inventor with centuries of accumulated knowledge",
            ))
            .with_names(NameTable::new(
                &["Alston", "Boddynock", "Dimble", "Fonkin", "Glim", "Orryn", "Zook"],
                &["Bimpnottin", "Carlin", "Ellyjobell", "Nissa", "Orla", "Roywyn", "Zanna"],
                &["Beren", "Daergel", "Folkor", "Garrick", "Nackle", "Scheppen", "Timbers"],
            )),
        RaceDefinition::new("half-elf", "Half-Elf", 180, 20)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and_any(1))
            .with_languages(&["Common", "Elvish", "one extra language"])
            .with_traits(&["Fey Ancestry", "Skill Versatility"])
            .with_senses(&[DARKVISION])
            .with_skill_choices(2)
            .with_lore(LoreFragment::new(
                "the borderlands between human and elven society",
                "bridges two worlds while fully belonging to neither",
                "navigating between human and elven relatives",
                "finding a community that truly accepts all of who they are",
                "creating new traditions that honor both heritages",
                "wise mediator between the human and elven worlds",
            )),
        RaceDefinition::new("half-orc", "Half-Orc", 75, 14)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Constitution, 1))
            .with_languages(&["Common", "Orc"])
            .with_traits(&["Menacing", "Relentless Endurance", "Savage Attacks"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Intimidation])
            .with_lore(LoreFragment::new(
                "the frontier lands where orc and human territories meet",
                "channels the strength of their orcish blood toward their own ends",
                "learning to harness their fierce inner strength",
                "facing prejudice from those who fear their orcish heritage",
                "proving themselves through deeds rather than words",
                "respected warrior whose strength and wisdom are beyond question",
            ))
            .with_names(NameTable::new(
                &["Dench", "Feng", "Gell", "Holg", "Imsh", "Krusk", "Shump"],
                &["Baggi", "Emen", "Engong", "Myev", "Ovak", "Sutha", "Volen"],
                &["Bonecrusher", "Gorefang", "Ironhide", "Skullsplitter", "Stonejaw"],
            )),
        RaceDefinition::new("tiefling", "Tiefling", 100, 18)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and(Intelligence, 1))
            .with_languages(&["Common", "Infernal"])
            .with_traits(&["Hellish Resistance", "Infernal Legacy"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "a lineage marked by infernal heritage",
                "has learned self-reliance in the face of prejudice",
                "dealing with the stares and whispers of the fearful",
                "proving their infernal blood does not define their character",
                "forging their own path despite the expectations of others",
                "wise figure who has turned prejudice into strength",
            ))
            .with_names(NameTable::new(
                &["Akmenos", "Amnon", "Barakas", "Damakos", "Ekemon", "Leucis", "Morthos"],
                &["Akta", "Bryseis", "Criella", "Kallista", "Makaria", "Nemeia", "Orianna"],
                &["Ash", "Carrion", "Despair", "Hope", "Quill", "Sorrow", "Torment"],
            )),
        RaceDefinition::new("dragonborn", "Dragonborn", 80, 15)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Charisma, 1))
            .with_languages(&["Common", "Draconic"])
            .with_traits(&["Draconic Ancestry", "Breath Weapon", "Damage Resistance"])
            .with_lore(LoreFragment::new(
                "the proud dragonborn clans",
                "carries the honor of their clan and the legacy of dragonkind",
                "learning the history and traditions of their draconic ancestors",
                "upholding clan honor while forging their own path",
                "the sacred recitation of clan lineage",
                "honored elder whose scales have silvered with age and wisdom",
            ))
            .with_names(NameTable::new(
                &["Arjhan", "Balasar", "Donaar", "Ghesh", "Kriv", "Medrash", "Torinn"],
                &["Akra", "Biri", "Daar", "Harann", "Kava", "Sora", "Thava"],
                &["Clethtinthiallor", "Daardendrian", "Delmirev", "Kepeshkmolik", "Myastan"],
            )),
        RaceDefinition::new("aasimar", "Aasimar", 160, 18)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Celestial"])
            .with_traits(&["Celestial Resistance", "Healing Hands", "Light Bearer"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "a family blessed by celestial heritage",
                "feels the weight of divine purpose guiding their actions",
                "experiencing strange celestial visions and dreams",
                "living up to the expectations of their divine heritage",
                "communion with their celestial guide",
                "beacon of divine light to those who have lost their way",
            )),
        RaceDefinition::new("goliath", "Goliath", 100, 18)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Constitution, 1))
            .with_languages(&["Common", "Giant"])
            .with_traits(&["Stone's Endurance", "Powerful Build", "Mountain Born"])
            .with_lore(LoreFragment::new(
                "the harsh peaks of the highest mountains",
                "measures worth through personal achievement and fair competition",
                "testing themselves against the unforgiving mountain environment",
                "finding worthy challenges to prove their strength",
                "the competitive trials that determine goliath standing",
                "legendary champion whose deeds are sung around mountain campfires",
            )),
        RaceDefinition::new("orc", "Orc", 50, 12)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Constitution, 1))
            .with_languages(&["Common", "Orc"])
            .with_traits(&["Aggressive", "Powerful Build", "Primal Intuition"])
            .with_senses(&[DARKVISION])
            .with_skill_choices(2)
            .with_lore(LoreFragment::new(
                "the fierce orc tribes of the wild lands",
                "embraces strength, endurance, and the bonds of the tribe",
                "proving themselves through contests of strength and will",
                "channeling their fierce nature toward constructive ends",
                "the strength-trials that determine orcish standing",
                "mighty elder whose battle-wisdom is sought by all",
            )),
        RaceDefinition::new("tabaxi", "Tabaxi", 80, 15)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Charisma, 1))
            .with_languages(&["Common", "one extra language"])
            .with_traits(&["Feline Agility", "Cat's Claws", "Cat's Talent"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Perception, Skill::Stealth])
            .with_lore(LoreFragment::new(
                "the distant jungles where tabaxi clans roam",
                "is driven by insatiable curiosity and wanderlust",
                "chasing butterflies and collecting stories",
                "staying interested once the mystery is solved",
                "the story-sharing gatherings of the clan",
                "legendary collector of tales from across the world",
            )),
        RaceDefinition::new("firbolg", "Firbolg", 500, 30)
            .with_bonus(AbilityBonus::fixed(Wisdom, 2).and(Strength, 1))
            .with_languages(&["Common", "Elvish", "Giant"])
            .with_traits(&["Firbolg Magic", "Hidden Step", "Powerful Build", "Speech of Beast and Leaf"])
            .with_lore(LoreFragment::new(
                "the deep and ancient forests",
                "serves as a gentle guardian of the natural world",
                "learning to speak with the beasts and plants of the forest",
                "venturing into the noisy, crowded world beyond the trees",
                "the sacred duty of forest stewardship",
                "wise druid-like guardian the forest itself seems to obey",
            )),
        // No fixed bonus: the two highest scores get +2 and +1.
        RaceDefinition::new("kobold", "Kobold", 120, 6)
            .with_size(Size::Small)
            .with_languages(&["Common", "Draconic"])
            .with_traits(&["Draconic Cry", "Kobold Legacy"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the trap-filled warrens of the kobold tribes",
                "serves the glory of dragonkind with clever devotion",
                "learning to craft traps and honor their draconic masters",
                "earning respect despite their small and underestimated stature",
                "the dragon-worship ceremonies of kobold society",
                "cunning trap-master whose ingenious designs are legendary",
            )),
        RaceDefinition::new("goblin", "Goblin", 60, 8)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Constitution, 1))
            .with_size(Size::Small)
            .with_languages(&["Common", "Goblin"])
            .with_traits(&["Fury of the Small", "Nimble Escape"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the scrappy goblin warrens",
                "has learned cunning and resourcefulness through necessity",
                "scrapping for survival among the chaos of the warren",
                "proving their worth beyond the stereotypes of their kind",
                "the clever tricks passed down through goblin generations",
                "cunning survivor who has outlived countless rivals",
            )),
        RaceDefinition::new("tortle", "Tortle", 50, 15)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Aquan"])
            .with_traits(&["Natural Armor", "Shell Defense", "Hold Breath"])
            .with_lore(LoreFragment::new(
                "the coastal regions where tortles hatch",
                "approaches life as a journey of experiences to collect",
                "wandering from the nesting beach to see the world",
                "feeling the pull to settle as their years advance",
                "the return to ancestral beaches to share wisdom",
                "ancient wanderer whose shell bears the marks of countless journeys",
            )),
        RaceDefinition::new("warforged", "Warforged", 150, 2)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and_any(1))
            .with_languages(&["Common", "one extra language"])
            .with_traits(&["Constructed Resilience", "Sentry's Rest", "Integrated Protection", "Specialized Design"])
            .with_skill_choices(1)
            .with_lore(LoreFragment::new(
                "the forges where they were created for war",
                "seeks purpose and meaning beyond their original design",
                "being activated and learning their initial functions",
                "understanding emotions and finding their place in peace",
                "the maintenance rituals that keep them functioning",
                "ancient construct who has found purpose beyond their original programming",
            )),
        RaceDefinition::new("aarakocra", "Aarakocra", 30, 3)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Wisdom, 1))
            .with_speed(25)
            .with_languages(&["Common", "Aarakocra", "Auran"])
            .with_traits(&["Flight", "Talons"])
            .with_lore(LoreFragment::new(
                "the high mountain peaks near the Elemental Plane of Air",
                "values freedom above all else and feels most at home soaring through open skies",
                "learning to fly and hunt in the thin mountain air",
                "adapting to life among the wingless ground-dwellers",
                "the sacred sky-dances of their aerie",
                "keeper of the ancient wind-songs",
            )),
        RaceDefinition::new("astral-elf", "Astral Elf", 750, 100)
            .with_languages(&["Common", "Elvish"])
            .with_traits(&["Astral Fire", "Fey Ancestry", "Keen Senses", "Starlight Step", "Astral Trance"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Perception])
            .with_lore(LoreFragment::new(
                "the silvery void of the Astral Sea",
                "carries the timeless perspective of one born among the stars",
                "drifting through the endless silver expanse",
                "understanding the urgency of those bound by time",
                "the starlight meditations of the Astral realm",
                "living repository of eons of astral knowledge",
            )),
        RaceDefinition::new("autognome", "Autognome", 200, 2)
            .with_size(Size::Small)
            .with_languages(&["Common", "one extra language"])
            .with_traits(&["Armored Casing", "Built for Success", "Mechanical Nature", "Specialized Design"])
            .with_skill_choices(1)
            .with_lore(LoreFragment::new(
                "the workshop of a brilliant gnomish inventor",
                "seeks to understand their purpose and place in the world",
                "being calibrated and learning basic functions",
                "proving they are more than just a construct",
                "the maintenance rituals taught by their creator",
                "well-maintained automaton with centuries of accumulated experience",
            )),
        RaceDefinition::new("bugbear", "Bugbear", 80, 16)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Dexterity, 1))
            .with_languages(&["Common", "Goblin"])
            .with_traits(&["Fey Ancestry", "Long-Limbed", "Powerful Build", "Sneaky", "Surprise Attack"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the shadowy goblinoid territories",
                "combines surprising stealth with brutal strength",
                "learning to move silently despite their bulk",
                "overcoming the fearsome reputation of their kind",
                "the hunt-stalking techniques passed down through generations",
                "grizzled veteran of countless ambushes and raids",
            )),
        RaceDefinition::new("centaur", "Centaur", 100, 15)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Wisdom, 1))
            .with_speed(40)
            .with_languages(&["Common", "Sylvan"])
            .with_traits(&["Charge", "Equine Build", "Hooves", "Natural Affinity"])
            .with_lore(LoreFragment::new(
                "the vast open plains and rolling grasslands",
                "values the freedom of the open run and the bonds of the herd",
                "racing across the grasslands with the other foals",
                "navigating a world built for two-legged folk",
                "the sacred gallop under the full moon",
                "wise keeper of the herd's oral histories",
            )),
        RaceDefinition::new("changeling", "Changeling", 100, 15)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and_any(1))
            .with_languages(&["Common", "two extra languages"])
            .with_traits(&["Shapechanger", "Changeling Instincts"])
            .with_lore(LoreFragment::new(
                "wherever they chose to make their hidden life",
                "understands identity as fluid and self-determined",
                "learning to control their shapeshifting abilities",
                "finding their true self among countless masks",
                "the secret gatherings where changelings reveal their true forms",
                "master of a thousand faces and identities",
            )),
        RaceDefinition::new("deep-gnome", "Deep Gnome", 425, 25)
            .with_bonus(AbilityBonus::fixed(Intelligence, 2).and(Dexterity, 1))
            .with_size(Size::Small)
            .with_speed(25)
            .with_languages(&["Common", "Gnomish", "Undercommon"])
            .with_traits(&["Gift of the Svirfneblin", "Gnomish Magic Resistance", "Svirfneblin Camouflage"])
            .with_senses(&[SUPERIOR_DARKVISION])
            .with_lore(LoreFragment::new(
                "the hidden cities of the Underdark",
                "values secrecy, caution, and the treasures of the deep earth",
                "learning to move silently through lightless tunnels",
                "adjusting to the blinding brightness of the surface",
                "the gem-cutting ceremonies of their hidden community",
                "keeper of the secret paths through the Underdark",
            )),
        RaceDefinition::new("drow", "Drow", 750, 100)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Charisma, 1))
            .with_languages(&["Common", "Elvish", "Undercommon"])
            .with_traits(&["Fey Ancestry", "Trance", "Keen Senses", "Drow Magic", "Sunlight Sensitivity"])
            .with_senses(&[SUPERIOR_DARKVISION])
            .with_skills(&[Skill::Perception])
            .with_lore(LoreFragment::new(
                "the treacherous cities of the Underdark",
                "has learned to survive in a society where trust is rare",
                "navigating the deadly politics of drow society",
                "escaping the shadow of Lolth's influence",
                "the dangerous rites of drow coming-of-age",
                "survivor of centuries of Underdark intrigue",
            )),
        RaceDefinition::new("duergar", "Duergar", 350, 50)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and(Strength, 1))
            .with_speed(25)
            .with_languages(&["Common", "Dwarvish", "Undercommon"])
            .with_traits(&["Duergar Magic", "Duergar Resilience", "Dwarven Resilience"])
            .with_senses(&[SUPERIOR_DARKVISION])
            .with_lore(LoreFragment::new(
                "the fortress-cities deep beneath the mountains",
                "values hard work, discipline, and self-reliance above all",
                "toiling in the forges from a young age",
                "overcoming the bitterness that defines their people",
                "the solemn craft-rites of duergar smithing",
                "master craftsperson whose creations are legendary",
            )),
        RaceDefinition::new("eladrin", "Eladrin", 750, 100)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Charisma, 1))
            .with_languages(&["Common", "Elvish"])
            .with_traits(&["Fey Ancestry", "Trance", "Keen Senses", "Fey Step"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Perception])
            .with_lore(LoreFragment::new(
                "the ever-shifting beauty of the Feywild",
                "experiences emotions with fey intensity, shifting with the seasons",
                "dancing through the eternal twilight of the Feywild",
                "containing the wild fey magic that surges within",
                "the seasonal festivals of the fey courts",
                "ancient fey who has seen countless seasons turn",
            )),
        RaceDefinition::new("fairy", "Fairy", 100, 20)
            .with_size(Size::Small)
            .with_languages(&["Common", "Sylvan"])
            .with_traits(&["Fairy Magic", "Flight"])
            .with_lore(LoreFragment::new(
                "the whimsical glades of the Feywild",
                "approaches life with fey wonder and mischievous delight",
                "flitting among the enchanted flowers of the Feywild",
                "understanding why the material world takes itself so seriously",
                "the moonlight dances and playful tricks of fairy-kind",
                "ancient sprite whose magic has grown subtle and deep",
            )),
        RaceDefinition::new("genasi", "Genasi", 120, 18)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and_any(1))
            .with_languages(&["Common", "Primordial"])
            .with_traits(&["Elemental Legacy", "Elemental Resistance"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "a family touched by elemental power",
                "feels the pull of their elemental heritage in everything they do",
                "learning to control the elemental power within",
                "finding acceptance despite their otherworldly appearance",
                "meditation on their elemental nature",
                "being of elemental wisdom who has mastered their inner power",
            )),
        RaceDefinition::new("giff", "Giff", 80, 18)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Constitution, 1))
            .with_languages(&["Common"])
            .with_traits(&["Astral Spark", "Firearms Mastery", "Hippo Build"])
            .with_lore(LoreFragment::new(
                "the militant hippo-folk society",
                "appreciates military discipline and the proper use of firearms",
                "drilling in formation and learning weapons maintenance",
                "finding worthy causes to apply their martial expertise",
                "the sacred cleaning and maintenance of weaponry",
                "decorated veteran of countless military campaigns",
            )),
        RaceDefinition::new("githyanki", "Githyanki", 100, 18)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Intelligence, 1))
            .with_languages(&["Common", "Gith"])
            .with_traits(&["Astral Knowledge", "Githyanki Psionics", "Psychic Resilience"])
            .with_lore(LoreFragment::new(
                "the fortresses of Tu'narath in the Astral Plane",
                "was raised as a warrior against the mind flayer menace",
                "training relentlessly in the arts of war",
                "questioning the rigid hierarchy of githyanki society",
                "the sacred raids against illithid strongholds",
                "silver-sword wielding veteran of the eternal war",
            )),
        RaceDefinition::new("githzerai", "Githzerai", 100, 18)
            .with_bonus(AbilityBonus::fixed(Wisdom, 2).and(Intelligence, 1))
            .with_languages(&["Common", "Gith"])
            .with_traits(&["Mental Discipline", "Githzerai Psionics", "Psychic Resilience"])
            .with_lore(LoreFragment::new(
                "the monasteries of Limbo",
                "has achieved inner calm through rigorous mental discipline",
                "mastering the mind through endless meditation",
                "maintaining inner peace amid the chaos of the material world",
                "the mental exercises that shape reality in Limbo",
                "master of psionic discipline whose mind is an unassailable fortress",
            )),
        RaceDefinition::new("grung", "Grung", 50, 1)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Constitution, 1))
            .with_size(Size::Small)
            .with_speed(25)
            .with_languages(&["Grung"])
            .with_traits(&["Amphibious", "Poison Immunity", "Poisonous Skin", "Standing Leap", "Water Dependency"])
            .with_lore(LoreFragment::new(
                "the poisonous swamps of the grung tribes",
                "understands their place in the strict color-based caste system",
                "developing their poisonous skin and learning tribal ways",
                "the constant need to stay hydrated away from water",
                "the ritualistic ceremonies of the grung hierarchy",
                "revered elder whose wisdom guides the tribe",
            )),
        RaceDefinition::new("hadozee", "Hadozee", 80, 15)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Constitution, 1))
            .with_languages(&["Common"])
            .with_traits(&["Dexterous Feet", "Glide", "Hadozee Dodge"])
            .with_lore(LoreFragment::new(
                "the wildspace-sailing ships of the hadozee",
                "lives for adventure among the stars and the thrill of wildspace",
                "learning to glide between ship rigging in the void",
                "staying grounded when the call of wildspace beckons",
                "the shipboard traditions of hadozee spacefarers",
                "veteran spacefarer with tales from a hundred crystal spheres",
            )),
        RaceDefinition::new("harengon", "Harengon", 100, 15)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Sylvan"])
            .with_traits(&["Hare-Trigger", "Leporine Senses", "Lucky Footwork", "Rabbit Hop"])
            .with_lore(LoreFragment::new(
                "the ever-changing realms of the Feywild",
                "lives by luck and quick reflexes, always ready to leap",
                "bounding through the Feywild with restless energy",
                "sitting still long enough for others to keep up",
                "the lucky charms and superstitions of harengon culture",
                "remarkably fortunate elder who has hopped out of countless dangers",
            )),
        RaceDefinition::new("hobgoblin", "Hobgoblin", 100, 18)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and(Intelligence, 1))
            .with_languages(&["Common", "Goblin"])
            .with_traits(&["Fey Ancestry", "Fey Gift", "Fortune from the Many"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the disciplined legions of the hobgoblin military",
                "values martial excellence and strategic thinking above all",
                "drilling in formation from the moment they could walk",
                "finding purpose outside the rigid hobgoblin hierarchy",
                "the military codes of honor that govern hobgoblin society",
                "strategic mastermind whose tactical knowledge is unparalleled",
            )),
        RaceDefinition::new("kalashtar", "Kalashtar", 100, 18)
            .with_bonus(AbilityBonus::fixed(Wisdom, 2).and(Charisma, 1))
            .with_languages(&["Common", "Quori", "one extra language"])
            .with_traits(&["Dual Mind", "Mental Discipline", "Mind Link", "Severed from Dreams"])
            .with_lore(LoreFragment::new(
                "a lineage bonded with spirits from the Region of Dreams",
                "carries a quori spirit that whispers wisdom from the dream realm",
                "learning to hear and understand their bonded spirit",
                "protecting their spirit from the forces of Dal Quor",
                "the meditation practices that strengthen the spirit bond",
                "serene sage whose spirit bond has deepened over decades",
            )),
        RaceDefinition::new("kender", "Kender", 100, 20)
            .with_size(Size::Small)
            .with_languages(&["Common", "one extra language"])
            .with_traits(&["Fearless", "Kender Ace", "Taunt"])
            .with_skills(&[Skill::SleightOfHand])
            .with_lore(LoreFragment::new(
                "the curious and wandering communities of Krynn",
                "approaches the world with boundless curiosity and fearlessness",
                "exploring every nook and cranny, collecting \"found\" treasures",
                "understanding why others get so upset about \"borrowing\"",
                "the wanderlust that drives kender to explore new places",
                "legendary wanderer whose tales of adventure span the entire world",
            )),
        RaceDefinition::new("kenku", "Kenku", 60, 12)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Auran"])
            .with_traits(&["Expert Duplication", "Kenku Recall", "Mimicry", "Kenku Training"])
            .with_skill_choices(2)
            .with_lore(LoreFragment::new(
                "the urban shadows where the cursed kenku gather",
                "communicates through mimicked sounds and remembered voices",
                "collecting sounds and voices to build their vocabulary",
                "expressing original thoughts without the gift of true speech",
                "the shared sounds that form kenku community identity",
                "keeper of countless voices and sounds from across the years",
            )),
        RaceDefinition::new("leonin", "Leonin", 100, 18)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and(Strength, 1))
            .with_speed(35)
            .with_languages(&["Common", "Leonin"])
            .with_traits(&["Claws", "Daunting Roar", "Hunter's Instincts"])
            .with_senses(&[DARKVISION])
            .with_skill_choices(2)
            .with_lore(LoreFragment::new(
                "the golden prides of the savanna",
                "carries the fierce pride and loyalty of the leonin people",
                "learning to hunt and protect the pride",
                "balancing personal honor with duty to the pride",
                "the roaring ceremonies that celebrate leonin victories",
                "silver-maned elder whose roar commands respect",
            )),
        RaceDefinition::new("lizardfolk", "Lizardfolk", 60, 14)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Draconic"])
            .with_traits(&["Bite", "Cunning Artisan", "Hold Breath", "Natural Armor", "Hungry Jaws"])
            .with_lore(LoreFragment::new(
                "the swamps and marshlands of their tribal territories",
                "approaches the world with cold practicality and survival instinct",
                "learning to hunt and survive in the harsh swamplands",
                "understanding the emotional complexities of warm-blooded folk",
                "the practical rituals that ensure tribal survival",
                "ancient survivor whose practical wisdom has kept the tribe alive",
            )),
        RaceDefinition::new("locathah", "Locathah", 80, 10)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Dexterity, 1))
            .with_languages(&["Aquan", "Common"])
            .with_traits(&["Natural Armor", "Observant & Athletic", "Leviathan Will", "Limited Amphibiousness"])
            .with_skills(&[Skill::Athletics, Skill::Perception])
            .with_lore(LoreFragment::new(
                "the underwater communities of the locathah",
                "values community cooperation above individual achievement",
                "swimming with their school from earliest memory",
                "adapting to the dry world above the waves",
                "the communal gatherings that strengthen locathah bonds",
                "wise keeper of the school's collective memory",
            )),
        RaceDefinition::new("loxodon", "Loxodon", 450, 60)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Loxodon"])
            .with_traits(&["Keen Smell", "Loxodon Serenity", "Natural Armor", "Powerful Build", "Trunk"])
            .with_lore(LoreFragment::new(
                "the close-knit loxodon herds",
                "values community, tradition, and the wisdom of the ancestors",
                "learning from the elders and memorizing family histories",
                "balancing tradition with the need for change",
                "the memory-sharing rituals that preserve loxodon history",
                "living library of generations of loxodon wisdom",
            )),
        RaceDefinition::new("minotaur", "Minotaur", 80, 17)
            .with_bonus(AbilityBonus::fixed(Strength, 2).and(Constitution, 1))
            .with_languages(&["Common", "Minotaur"])
            .with_traits(&["Horns", "Goring Rush", "Hammering Horns", "Imposing Presence"])
            .with_lore(LoreFragment::new(
                "the labyrinthine halls of minotaur civilization",
                "channels their fierce nature toward honorable goals",
                "navigating the winding passages of their home",
                "controlling the rage that burns within their blood",
                "the maze-running trials that prove minotaur worth",
                "battle-scarred veteran whose horns have grown mighty with age",
            )),
        RaceDefinition::new("owlin", "Owlin", 100, 18)
            .with_languages(&["Common", "one extra language"])
            .with_traits(&["Flight", "Silent Feathers"])
            .with_senses(&[SUPERIOR_DARKVISION])
            .with_skills(&[Skill::Stealth])
            .with_lore(LoreFragment::new(
                "the mysterious reaches of the Feywild",
                "sees the world with owl-like wisdom and patience",
                "learning to fly silently through moonlit forests",
                "staying awake during the bright hours of day",
                "the nighttime gatherings where owlin share knowledge",
                "ancient sage whose wide eyes have seen centuries of secrets",
            )),
        RaceDefinition::new("plasmoid", "Plasmoid", 100, 10)
            .with_languages(&["Common"])
            .with_traits(&["Amorphous", "Hold Breath", "Natural Resilience", "Shape Self"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the far realms where plasmoids originate",
                "experiences the world through their unique amorphous form",
                "learning to hold a stable shape",
                "relating to creatures bound by rigid forms",
                "the flowing dances that celebrate plasmoid nature",
                "elder whose form has stabilized into dignified patterns",
            )),
        RaceDefinition::new("satyr", "Satyr", 150, 20)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and(Dexterity, 1))
            .with_speed(35)
            .with_languages(&["Common", "Sylvan"])
            .with_traits(&["Ram", "Magic Resistance", "Mirthful Leaps", "Reveler"])
            .with_skills(&[Skill::Performance, Skill::Persuasion])
            .with_lore(LoreFragment::new(
                "the festive glades of the Feywild",
                "lives for revelry, music, and the pleasures of life",
                "learning music and mischief among the fey",
                "taking anything too seriously for too long",
                "the wild revels and musical gatherings of satyr-kind",
                "master musician whose songs can move even the coldest heart",
            )),
        RaceDefinition::new("sea-elf", "Sea Elf", 750, 100)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Constitution, 1))
            .with_languages(&["Common", "Elvish", "Aquan"])
            .with_traits(&["Fey Ancestry", "Trance", "Keen Senses", "Child of the Sea", "Friend of the Sea"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Perception])
            .with_lore(LoreFragment::new(
                "the underwater kingdoms of the sea elves",
                "feels the pull of both the ocean depths and the surface world",
                "swimming through coral palaces and sunken ruins",
                "spending extended time away from the sea",
                "the tidal ceremonies that honor the ocean",
                "ancient keeper of secrets from the ocean floor",
            )),
        RaceDefinition::new("shadar-kai", "Shadar-Kai", 750, 100)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Constitution, 1))
            .with_languages(&["Common", "Elvish"])
            .with_traits(&["Fey Ancestry", "Trance", "Keen Senses", "Blessing of the Raven Queen", "Necrotic Resistance"])
            .with_senses(&[DARKVISION])
            .with_skills(&[Skill::Perception])
            .with_lore(LoreFragment::new(
                "the gray realm of the Shadowfell",
                "seeks intense experiences to feel anything at all",
                "enduring the numbing gloom of the Shadowfell",
                "finding meaning in a world that seems colorless",
                "the painful rituals that remind them they are alive",
                "scarred survivor who has found purpose despite the shadow",
            )),
        RaceDefinition::new("shifter", "Shifter", 70, 10)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Wisdom, 1))
            .with_languages(&["Common"])
            .with_traits(&["Shifting", "Bestial Instincts"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the wild frontiers where civilization meets the beast",
                "embraces the primal nature that runs in their blood",
                "learning to channel their bestial heritage",
                "controlling the beast within during times of stress",
                "the moonlit rites that honor their lycanthropic ancestors",
                "wise elder who has achieved harmony with their beast-self",
            )),
        RaceDefinition::new("simic-hybrid", "Simic Hybrid", 80, 18)
            .with_bonus(AbilityBonus::fixed(Constitution, 2).and_any(1))
            .with_languages(&["Common", "Elvish"])
            .with_traits(&["Animal Enhancement"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the biomancy laboratories of the Simic Combine",
                "sees themselves as an evolution of multiple forms",
                "adapting to their enhanced body after the procedure",
                "remembering who they were before the changes",
                "regular check-ins with Simic researchers",
                "veteran hybrid whose adaptations have proven remarkably stable",
            )),
        RaceDefinition::new("thri-kreen", "Thri-Kreen", 30, 6)
            .with_bonus(AbilityBonus::fixed(Dexterity, 2).and(Wisdom, 1))
            .with_languages(&["Common"])
            .with_traits(&["Chameleon Carapace", "Secondary Arms", "Sleepless", "Thri-kreen Telepathy"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the arid wastes where thri-kreen hunt in packs",
                "thinks in practical, communal terms foreign to most humanoids",
                "learning to hunt in perfect coordination with the clutch",
                "understanding the strange individual focus of other races",
                "the silent hunts that bond the clutch together",
                "ancient hunter whose carapace has hardened with age",
            )),
        RaceDefinition::new("triton", "Triton", 200, 15)
            .with_bonus(AbilityBonus::fixed(Strength, 1).and(Constitution, 1).and(Charisma, 1))
            .with_languages(&["Common", "Primordial"])
            .with_traits(&["Amphibious", "Control Air and Water", "Emissary of the Sea", "Guardian of the Depths"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the deep ocean trenches guarded by triton cities",
                "carries the proud duty of protecting the world from deep-sea threats",
                "training to guard against the horrors of the deep",
                "understanding that surface-dwellers don't know of their sacrifices",
                "the solemn oaths of protection sworn by all tritons",
                "veteran guardian of the deep whose tales of undersea battles are legend",
            )),
        RaceDefinition::new("vedalken", "Vedalken", 500, 40)
            .with_bonus(AbilityBonus::fixed(Intelligence, 2).and(Wisdom, 1))
            .with_languages(&["Common", "Vedalken", "one extra language"])
            .with_traits(&["Vedalken Dispassion", "Tireless Precision", "Partially Amphibious"])
            .with_lore(LoreFragment::new(
                "the methodical society of the vedalken",
                "pursues perfection through careful analysis and improvement",
                "cataloging flaws and planning improvements",
                "accepting that perfection may be unattainable",
                "the peer review councils that evaluate vedalken work",
                "master analyst whose critiques have improved countless endeavors",
            )),
        RaceDefinition::new("verdan", "Verdan", 200, 24)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and(Constitution, 1))
            .with_size(Size::Small)
            .with_languages(&["Common", "Goblin"])
            .with_traits(&["Black Blood Healing", "Limited Telepathy", "Telepathic Insight"])
            .with_lore(LoreFragment::new(
                "the strange circumstances of their recent creation",
                "is curious about a world they are only beginning to understand",
                "rapidly growing and changing in unexpected ways",
                "making sense of their mysterious goblinoid origins",
                "sharing discoveries with other verdan",
                "one of the oldest of their young race, full of hard-won wisdom",
            )),
        RaceDefinition::new("yuan-ti", "Yuan-Ti", 80, 18)
            .with_bonus(AbilityBonus::fixed(Charisma, 2).and(Intelligence, 1))
            .with_languages(&["Common", "Abyssal", "Draconic"])
            .with_traits(&["Innate Spellcasting", "Magic Resistance", "Poison Resilience"])
            .with_senses(&[DARKVISION])
            .with_lore(LoreFragment::new(
                "the serpent kingdoms of yuan-ti civilization",
                "approaches the world with cold, calculating logic",
                "being taught to suppress emotion as weakness",
                "understanding why others let feelings guide them",
                "the serpent rites that honor their transformation",
                "cold strategist whose schemes span generations",
            )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_ids_unique_and_lowercase() {
        let races = standard_races();
        let mut ids: Vec<&str> = races.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.iter().all(|id| *id == id.to_lowercase()));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), races.len());
    }

    #[test]
    fn test_lifespans_exceed_maturity() {
        for race in standard_races() {
            assert!(race.lifespan > race.maturity, "{}", race.id);
        }
    }

    #[test]
    fn test_racial_skill_grants() {
        let races = standard_races();
        let find = |id: &str| races.iter().find(|r| r.id.as_str() == id).cloned().unwrap();
        assert_eq!(find("half-orc").skills, vec![Skill::Intimidation]);
        assert_eq!(find("tabaxi").skill_allowance(), 2);
        assert_eq!(find("human").skill_allowance(), 1);
        assert_eq!(find("half-elf").skill_allowance(), 2);
        assert_eq!(find("dwarf").skill_allowance(), 0);
    }

    #[test]
    fn test_every_race_has_lore() {
        let races = standard_races();
        assert_eq!(races.len(), 57);
        assert!(races.iter().all(|r| r.lore.is_some()));
    }

    #[test]
    fn test_fallback_race() {
        let race = RaceDefinition::fallback(&RaceId::new("Sea-Folk"));
        assert_eq!(race.id.as_str(), "sea-folk");
        assert_eq!(race.name, "Sea-Folk");
        assert_eq!(race.lifespan, 80);
        assert!(race.lore.is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("half-orc"), "Half-Orc");
        assert_eq!(title_case("town_guard"), "Town Guard");
        assert_eq!(title_case("blacksmith"), "Blacksmith");
    }
}
