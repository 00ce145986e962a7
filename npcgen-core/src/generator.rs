//! The generation orchestrator.
//!
//! [`generate`] runs one full cycle in dependency order: identity, age,
//! classes, occupation, name, ability scores, derived stats, skills and
//! gear, spells, weapons, the backstory, and in player-character mode a
//! background. Locked fields are copied from the previous record unless the
//! copy would leave the character inconsistent.

use crate::abilities::{apply_racial_bonus, assign_scores, roll_raw_scores, Ability, AbilityBlock, AbilityMethod};
use crate::age::{classify_age, random_category, sample_age, AgeCategory, AgeTierPolicy};
use crate::background::resolve_background;
use crate::backstory::{generate_backstory, BackstorySubject};
use crate::character::{Alignment, CharacterId, CharacterRecord, Gender};
use crate::composition::{
    armor_class, character_features, combined_skills, hit_dice_summary, hit_points, passive_perception, proficiency_bonus,
    resolve_subclass, saving_throws, total_level, ClassEntries, ClassEntry,
};
use crate::equipment::{character_weapons, occupation_equipment};
use crate::locks::{LockField, LockSet};
use crate::names::generate_name;
use crate::rules::{CharacterClass, ClassDefinition, Occupation, RaceDefinition, RaceId, RuleTables};
use crate::spellcasting::character_spellcasting;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// A selector that is either drawn at random or fixed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice<T> {
    Random,
    Fixed(T),
}

impl<T> Choice<T> {
    pub fn fixed(&self) -> Option<&T> {
        match self {
            Choice::Fixed(value) => Some(value),
            Choice::Random => None,
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, Choice::Random)
    }

    /// The fixed value, or one produced by `draw`.
    pub fn resolve_with(&self, draw: impl FnOnce() -> T) -> T
    where
        T: Clone,
    {
        match self {
            Choice::Fixed(value) => value.clone(),
            Choice::Random => draw(),
        }
    }
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::Random
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Choice::Fixed(value),
            None => Choice::Random,
        }
    }
}

/// An extra class requested on top of the primary one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticlassRequest {
    pub class: CharacterClass,
    pub level: u8,
    #[serde(default)]
    pub subclass: Choice<String>,
}

/// What the caller wants generated. Every selector defaults to random.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub race: Choice<RaceId>,
    pub class: Choice<CharacterClass>,
    /// Level of the primary class (ignored for commoners).
    pub level: u8,
    pub subclass: Choice<String>,
    pub multiclass: Vec<MulticlassRequest>,
    pub occupation: Choice<Occupation>,
    pub age: Choice<AgeCategory>,
    pub gender: Choice<Gender>,
    pub alignment: Choice<Alignment>,
    pub ability_method: AbilityMethod,
    /// `Some` switches on player-character mode and selects the background.
    #[serde(default)]
    pub background: Option<Choice<String>>,
}

impl GenerationRequest {
    /// Everything random, level 1, rolled abilities.
    pub fn random() -> Self {
        Self {
            race: Choice::Random,
            class: Choice::Random,
            level: 1,
            subclass: Choice::Random,
            multiclass: Vec::new(),
            occupation: Choice::Random,
            age: Choice::Random,
            gender: Choice::Random,
            alignment: Choice::Random,
            ability_method: AbilityMethod::Rolled,
            background: None,
        }
    }

    pub fn with_race(mut self, race: impl Into<RaceId>) -> Self {
        self.race = Choice::Fixed(race.into());
        self
    }

    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.class = Choice::Fixed(class);
        self
    }

    /// Primary class level, clamped to 1..=20.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 20);
        self
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Choice::Fixed(subclass.into());
        self
    }

    pub fn with_multiclass(mut self, class: CharacterClass, level: u8, subclass: Choice<String>) -> Self {
        self.multiclass.push(MulticlassRequest {
            class,
            level: level.clamp(1, 20),
            subclass,
        });
        self
    }

    pub fn with_occupation(mut self, occupation: Occupation) -> Self {
        self.occupation = Choice::Fixed(occupation);
        self
    }

    pub fn with_age(mut self, category: AgeCategory) -> Self {
        self.age = Choice::Fixed(category);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Choice::Fixed(gender);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Choice::Fixed(alignment);
        self
    }

    pub fn with_ability_method(mut self, method: AbilityMethod) -> Self {
        self.ability_method = method;
        self
    }

    /// Player-character mode with the given background selector.
    pub fn with_background(mut self, background: Choice<String>) -> Self {
        self.background = Some(background);
        self
    }

    /// Infancy is ruled out by a fixed adventuring class, a fixed
    /// non-infant occupation, or any multiclass.
    pub fn infant_allowed(&self) -> bool {
        let class_blocks = self.class.fixed().is_some_and(|c| !c.is_commoner());
        let occupation_blocks = self
            .occupation
            .fixed()
            .is_some_and(|o| *o != Occupation::Infant);
        !class_blocks && !occupation_blocks && self.multiclass.is_empty()
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::random()
    }
}

// ============================================================================
// Shared derivations
// ============================================================================

pub(crate) fn race_definition(tables: &RuleTables, id: &RaceId) -> RaceDefinition {
    match tables.race(id) {
        Some(race) => race.clone(),
        None => {
            tracing::warn!(race = %id, "Race missing from rule tables, using defaults");
            RaceDefinition::fallback(id)
        }
    }
}

pub(crate) fn class_definition(tables: &RuleTables, class: CharacterClass) -> ClassDefinition {
    tables
        .class(class)
        .cloned()
        .unwrap_or_else(|| ClassDefinition::fallback(class))
}

/// A uniformly drawn trade occupation.
pub(crate) fn random_trade<R: Rng>(tables: &RuleTables, rng: &mut R) -> Occupation {
    tables
        .trade_occupations()
        .choose(rng)
        .map(|o| Occupation::Trade(o.id.clone()))
        .unwrap_or(Occupation::Adventurer)
}

/// Level, proficiency, hit points, saves, armor class, initiative and
/// passive perception from the record's classes and abilities. Manual hit
/// point and armor class overrides survive.
pub(crate) fn apply_class_derivations(tables: &RuleTables, record: &mut CharacterRecord) {
    record.total_level = total_level(&record.classes);
    record.proficiency_bonus = proficiency_bonus(record.total_level);
    record.hit_dice = hit_dice_summary(tables, &record.classes);
    if !record.custom_hit_points {
        record.hit_points = hit_points(
            tables,
            &record.classes,
            record.abilities.modifier(Ability::Constitution),
        );
    }
    record.saving_throws = saving_throws(tables, &record.classes);
    record.features = character_features(tables, &record.classes);
    refresh_armor_class(tables, record);
    record.initiative = record.abilities.modifier(Ability::Dexterity);
    record.passive_perception = passive_perception(&record.abilities, &record.skills, record.proficiency_bonus);
}

pub(crate) fn refresh_armor_class(tables: &RuleTables, record: &mut CharacterRecord) {
    if record.custom_armor_class {
        return;
    }
    let ac = armor_class(tables, &record.classes, &record.abilities);
    record.armor_class = ac.value;
    record.armor = ac.armor;
}

pub(crate) fn refresh_weapons(tables: &RuleTables, record: &mut CharacterRecord) {
    record.weapons = character_weapons(
        tables,
        &record.classes,
        &record.occupation,
        &record.abilities,
        record.proficiency_bonus,
        &AgeTierPolicy::for_category(record.age_category),
    );
}

pub(crate) fn refresh_backstory<R: Rng>(tables: &RuleTables, record: &mut CharacterRecord, rng: &mut R) {
    record.backstory = generate_backstory(tables, &BackstorySubject::from(&*record), rng);
}

// ============================================================================
// Generation
// ============================================================================

/// The previous record, if the field is locked and one exists.
fn locked<'p>(locks: &LockSet, field: LockField, previous: Option<&'p CharacterRecord>) -> Option<&'p CharacterRecord> {
    previous.filter(|_| locks.is_locked(field))
}

fn resolve_age<R: Rng>(
    request: &GenerationRequest,
    race: &RaceDefinition,
    previous: Option<&CharacterRecord>,
    locks: &LockSet,
    rng: &mut R,
) -> (u32, AgeCategory) {
    let infant_allowed = request.infant_allowed();

    if let Some(prev) = locked(locks, LockField::Age, previous) {
        let category = classify_age(prev.age, race);
        if category == AgeCategory::Infant && !infant_allowed {
            tracing::warn!(
                age = prev.age,
                "Locked infant age conflicts with the requested class; regenerating as a child"
            );
            return (sample_age(AgeCategory::Child, race, rng), AgeCategory::Child);
        }
        return (prev.age, category);
    }

    let category = match &request.age {
        Choice::Random => {
            let allowed: Vec<AgeCategory> = AgeCategory::all()
                .into_iter()
                .filter(|c| infant_allowed || *c != AgeCategory::Infant)
                .collect();
            random_category(&allowed, rng)
        }
        Choice::Fixed(AgeCategory::Infant) if !infant_allowed => {
            tracing::warn!("Infant requested alongside an adventuring class; using child instead");
            AgeCategory::Child
        }
        Choice::Fixed(category) => *category,
    };
    (sample_age(category, race, rng), category)
}

fn resolve_classes<R: Rng>(
    tables: &RuleTables,
    request: &GenerationRequest,
    policy: &AgeTierPolicy,
    previous: Option<&CharacterRecord>,
    locks: &LockSet,
    rng: &mut R,
) -> ClassEntries {
    if policy.forces_commoner {
        if locked(locks, LockField::Class, previous).is_some_and(|p| p.classes.has_adventuring()) {
            tracing::warn!("Infants cannot hold adventuring classes; ignoring class lock");
        }
        return ClassEntries::commoner();
    }

    if let Some(prev) = locked(locks, LockField::Class, previous) {
        return prev.classes.clone();
    }

    let class = request
        .class
        .resolve_with(|| CharacterClass::adventuring().choose(rng).unwrap_or(CharacterClass::Fighter));

    let primary = if class.is_commoner() {
        ClassEntry::commoner()
    } else {
        let subclass = resolve_subclass(tables, class, request.level, &request.subclass, rng);
        ClassEntry {
            class,
            level: request.level,
            subclass,
        }
    };

    let mut entries = ClassEntries::new(primary);
    for extra in &request.multiclass {
        let subclass = resolve_subclass(tables, extra.class, extra.level, &extra.subclass, rng);
        entries.push(ClassEntry {
            class: extra.class,
            level: extra.level,
            subclass,
        });
    }
    entries
}

fn resolve_occupation<R: Rng>(
    tables: &RuleTables,
    request: &GenerationRequest,
    policy: &AgeTierPolicy,
    classes: &ClassEntries,
    previous: Option<&CharacterRecord>,
    locks: &LockSet,
    rng: &mut R,
) -> Occupation {
    if policy.forces_infant_occupation {
        return Occupation::Infant;
    }
    if !classes.has_commoner() {
        return Occupation::Adventurer;
    }

    if let Some(prev) = locked(locks, LockField::Occupation, previous) {
        if prev.occupation.is_trade() {
            return prev.occupation.clone();
        }
        tracing::debug!(occupation = %prev.occupation, "Locked occupation no longer fits, redrawing");
    }

    match request.occupation.fixed() {
        Some(occupation) if occupation.is_trade() => occupation.clone(),
        _ => random_trade(tables, rng),
    }
}

fn roll_abilities<R: Rng>(
    tables: &RuleTables,
    request: &GenerationRequest,
    race: &RaceDefinition,
    classes: &ClassEntries,
    policy: &AgeTierPolicy,
    rng: &mut R,
) -> AbilityBlock {
    let tier = policy.roll_tier(classes.is_pure_commoner());
    let raw = roll_raw_scores(request.ability_method, tier, rng);
    let priority = class_definition(tables, classes.primary().class).stat_priority();
    let mut scores = assign_scores(raw, &priority, rng);
    apply_racial_bonus(&mut scores, &race.ability_bonus);
    tracing::debug!(?tier, ?raw, "Rolled ability scores");
    AbilityBlock::new(scores)
}

/// Run one generation cycle.
///
/// `previous` is the record being re-rolled, if any; fields in `locks` are
/// carried over from it. Generation never fails: unknown identifiers fall
/// back to defaults.
pub fn generate<R: Rng>(
    tables: &RuleTables,
    request: &GenerationRequest,
    previous: Option<&CharacterRecord>,
    locks: &LockSet,
    rng: &mut R,
) -> CharacterRecord {
    // Identity
    let race_id = match locked(locks, LockField::Race, previous) {
        Some(prev) => prev.race.clone(),
        None => request.race.resolve_with(|| {
            tables
                .races
                .choose(rng)
                .map(|r| r.id.clone())
                .unwrap_or_else(|| RaceId::new("human"))
        }),
    };
    let race = race_definition(tables, &race_id);

    let gender = match locked(locks, LockField::Gender, previous) {
        Some(prev) => prev.gender,
        None => request
            .gender
            .resolve_with(|| *Gender::all().choose(rng).unwrap_or(&Gender::NonBinary)),
    };
    let alignment = match locked(locks, LockField::Alignment, previous) {
        Some(prev) => prev.alignment,
        None => request
            .alignment
            .resolve_with(|| *Alignment::all().choose(rng).unwrap_or(&Alignment::TrueNeutral)),
    };

    // Age, then everything the age tier constrains
    let (age, age_category) = resolve_age(request, &race, previous, locks, rng);
    let policy = AgeTierPolicy::for_category(age_category);
    let classes = resolve_classes(tables, request, &policy, previous, locks, rng);
    let occupation = resolve_occupation(tables, request, &policy, &classes, previous, locks, rng);

    let name = match locked(locks, LockField::Name, previous) {
        Some(prev) => prev.name.clone(),
        None => generate_name(tables, &race_id, gender, rng),
    };

    let abilities = match locked(locks, LockField::Stats, previous) {
        Some(prev) => prev.abilities,
        None => roll_abilities(tables, request, &race, &classes, &policy, rng),
    };

    let skills = match locked(locks, LockField::Skills, previous) {
        Some(prev) => prev.skills.clone(),
        None => combined_skills(tables, &classes, &race, &occupation),
    };
    let equipment = match locked(locks, LockField::Equipment, previous) {
        Some(prev) => prev.equipment.clone(),
        None => occupation_equipment(tables, &occupation),
    };
    let languages = match locked(locks, LockField::Languages, previous) {
        Some(prev) => prev.languages.clone(),
        None => race.languages.clone(),
    };

    let mut record = CharacterRecord {
        id: CharacterId::from_rng(rng),
        name,
        race: race_id,
        race_name: race.name.clone(),
        gender,
        alignment,
        age,
        age_category,
        occupation,
        classes,
        abilities,
        total_level: 0,
        proficiency_bonus: 2,
        hit_points: 1,
        custom_hit_points: false,
        hit_dice: String::new(),
        armor_class: 10,
        armor: String::new(),
        custom_armor_class: false,
        initiative: 0,
        passive_perception: 10,
        saving_throws: Vec::new(),
        skills,
        features: Vec::new(),
        equipment,
        languages,
        traits: race.traits.clone(),
        senses: race.senses.clone(),
        size: race.size,
        speed: race.speed,
        spellcasting: None,
        weapons: Vec::new(),
        background: None,
        backstory: String::new(),
    };
    apply_class_derivations(tables, &mut record);

    record.spellcasting = match locked(locks, LockField::Spells, previous).filter(|p| p.spellcasting.is_some()) {
        Some(prev) => prev.spellcasting.clone(),
        None => character_spellcasting(
            tables,
            &record.classes,
            &record.abilities,
            record.proficiency_bonus,
            rng,
        ),
    };

    match locked(locks, LockField::Weapons, previous) {
        Some(prev) if policy.allows_weapons => record.weapons = prev.weapons.clone(),
        _ => refresh_weapons(tables, &mut record),
    }

    match locked(locks, LockField::Backstory, previous).filter(|p| !p.backstory.trim().is_empty()) {
        Some(prev) => record.backstory = prev.backstory.clone(),
        None => refresh_backstory(tables, &mut record, rng),
    }

    if let Some(choice) = request.background.as_ref().filter(|_| !policy.forces_commoner) {
        record.background = match locked(locks, LockField::Backstory, previous).and_then(|p| p.background.as_ref()) {
            Some(prev) => Some(prev.clone()),
            None => resolve_background(tables, choice, rng),
        };
    }

    tracing::info!(
        name = %record.name,
        race = %record.race,
        age = record.age,
        category = %record.age_category,
        classes = %record.class_summary(),
        occupation = %record.occupation,
        "Generated character"
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_infant_allowed() {
        assert!(GenerationRequest::random().infant_allowed());
        assert!(GenerationRequest::random()
            .with_class(CharacterClass::Commoner)
            .infant_allowed());
        assert!(!GenerationRequest::random()
            .with_class(CharacterClass::Wizard)
            .infant_allowed());
        assert!(!GenerationRequest::random()
            .with_occupation(Occupation::from_id("farmer"))
            .infant_allowed());
        assert!(GenerationRequest::random()
            .with_occupation(Occupation::Infant)
            .infant_allowed());
        assert!(!GenerationRequest::random()
            .with_multiclass(CharacterClass::Rogue, 2, Choice::Random)
            .infant_allowed());
    }

    #[test]
    fn test_level_clamped() {
        assert_eq!(GenerationRequest::random().with_level(0).level, 1);
        assert_eq!(GenerationRequest::random().with_level(35).level, 20);
    }

    #[test]
    fn test_fixed_infant_falls_back_to_child() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_class(CharacterClass::Fighter)
            .with_age(AgeCategory::Infant);
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(1));
        assert_eq!(record.age_category, AgeCategory::Child);
        assert_eq!(record.classes.primary().class, CharacterClass::Fighter);
    }

    #[test]
    fn test_infant_forces_commoner_and_no_weapons() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_race("human")
            .with_age(AgeCategory::Infant);
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(2));
        assert_eq!(record.classes, ClassEntries::commoner());
        assert_eq!(record.occupation, Occupation::Infant);
        assert!(record.weapons.is_empty());
        assert!(record.spellcasting.is_none());
        for ability in Ability::all() {
            assert!((1..=6).contains(&record.abilities.score(ability)));
        }
    }

    #[test]
    fn test_random_class_is_never_commoner() {
        let tables = RuleTables::standard();
        let mut rng = rng(3);
        for _ in 0..50 {
            let request = GenerationRequest::random().with_age(AgeCategory::Adult);
            let record = generate(tables, &request, None, &LockSet::new(), &mut rng);
            assert!(!record.classes.primary().class.is_commoner());
            assert_eq!(record.occupation, Occupation::Adventurer);
        }
    }

    #[test]
    fn test_hidden_life_gets_trade() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_class(CharacterClass::Commoner)
            .with_multiclass(CharacterClass::Fighter, 3, Choice::Fixed("champion".into()));
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(4));
        assert!(record.classes.is_hidden_life());
        assert!(record.occupation.is_trade());
        assert_eq!(record.total_level, 3);
        assert_eq!(record.classes.multiclass()[0].subclass.as_deref(), Some("champion"));
    }

    #[test]
    fn test_subclass_dropped_below_unlock_level() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_class(CharacterClass::Fighter)
            .with_level(2)
            .with_subclass("champion");
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(5));
        assert_eq!(record.classes.primary().subclass, None);
    }

    #[test]
    fn test_locked_infant_age_overridden() {
        let tables = RuleTables::standard();
        let infant_request = GenerationRequest::random()
            .with_race("human")
            .with_age(AgeCategory::Infant);
        let baby = generate(tables, &infant_request, None, &LockSet::new(), &mut rng(6));

        let locks = LockSet::new().with(LockField::Age).with(LockField::Occupation);
        let grown = GenerationRequest::random()
            .with_race("human")
            .with_class(CharacterClass::Commoner)
            .with_multiclass(CharacterClass::Wizard, 1, Choice::Random);
        let record = generate(tables, &grown, Some(&baby), &locks, &mut rng(7));
        assert_eq!(record.age_category, AgeCategory::Child);
        assert!(record.occupation.is_trade());
    }

    #[test]
    fn test_unknown_race_falls_back() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_race("sea-folk")
            .with_age(AgeCategory::Elderly);
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(8));
        assert_eq!(record.race_name, "Sea-Folk");
        assert!((72..=80).contains(&record.age));
    }

    #[test]
    fn test_npc_mode_has_no_background() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random().with_age(AgeCategory::Adult);
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(10));
        assert!(record.background.is_none());
        assert!(!record.features.is_empty());
    }

    #[test]
    fn test_player_character_background() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_class(CharacterClass::Rogue)
            .with_level(5)
            .with_age(AgeCategory::Adult)
            .with_background(Choice::Fixed("criminal".into()));
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(11));
        let background = record.background.as_ref().unwrap();
        assert_eq!(background.name, "Criminal");
        assert!(!background.flaw.is_empty());
        assert!(record.features.iter().any(|f| f.name == "Uncanny Dodge"));
    }

    #[test]
    fn test_infant_gets_no_background() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_race("human")
            .with_age(AgeCategory::Infant)
            .with_background(Choice::Random);
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(12));
        assert!(record.background.is_none());
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_standard_array_mode() {
        let tables = RuleTables::standard();
        let request = GenerationRequest::random()
            .with_race("sea-folk")
            .with_class(CharacterClass::Wizard)
            .with_age(AgeCategory::Adult)
            .with_ability_method(AbilityMethod::StandardArray);
        let record = generate(tables, &request, None, &LockSet::new(), &mut rng(9));
        // no bonus rule: +2 to the highest, +1 to the next
        assert_eq!(record.abilities.score(Ability::Intelligence), 17);
        assert_eq!(record.abilities.scores().total(), 72 + 3);
    }
}
