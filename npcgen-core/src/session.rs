//! GeneratorSession - the primary public API.
//!
//! A session owns the random source, the lock set and the current
//! character. Generation replaces the current record; inline edits change
//! one field and recompute whatever depends on it.

use crate::abilities::Ability;
use crate::age::{classify_age, AgeCategory};
use crate::character::{Alignment, CharacterRecord, Gender};
use crate::composition::{
    combined_skills, hit_points, passive_perception, resolve_subclass, skill_limit, ClassEntries,
};
use crate::equipment::occupation_equipment;
use crate::generator::{
    apply_class_derivations, generate, race_definition, random_trade, refresh_armor_class, refresh_backstory,
    refresh_weapons, Choice, GenerationRequest,
};
use crate::locks::{LockField, LockSet};
use crate::rules::{Occupation, RaceId, RuleTables};
use crate::skills::Skill;
use crate::spellcasting::character_spellcasting;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors from inline edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("No character has been generated yet")]
    NoCharacter,

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("{requested} skill proficiencies exceed the limit of {limit}")]
    TooManySkills { requested: usize, limit: usize },
}

/// A generation session over a set of rule tables.
pub struct GeneratorSession<'t, R: Rng = StdRng> {
    tables: &'t RuleTables,
    rng: R,
    locks: LockSet,
    request: GenerationRequest,
    current: Option<CharacterRecord>,
}

impl GeneratorSession<'static, StdRng> {
    /// Built-in tables, entropy-seeded.
    pub fn standard() -> Self {
        Self::new(RuleTables::standard(), StdRng::from_entropy())
    }
}

impl<'t> GeneratorSession<'t, StdRng> {
    /// Deterministic session: the same seed and calls give the same records.
    pub fn with_seed(tables: &'t RuleTables, seed: u64) -> Self {
        Self::new(tables, StdRng::seed_from_u64(seed))
    }
}

impl<'t, R: Rng> GeneratorSession<'t, R> {
    pub fn new(tables: &'t RuleTables, rng: R) -> Self {
        Self {
            tables,
            rng,
            locks: LockSet::new(),
            request: GenerationRequest::random(),
            current: None,
        }
    }

    pub fn tables(&self) -> &'t RuleTables {
        self.tables
    }

    /// The most recently generated or edited character.
    pub fn current(&self) -> Option<&CharacterRecord> {
        self.current.as_ref()
    }

    /// The request used by the last generation.
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Run a generation cycle, carrying locked fields over from the current
    /// record.
    pub fn generate(&mut self, request: GenerationRequest) -> &CharacterRecord {
        let record = generate(self.tables, &request, self.current.as_ref(), &self.locks, &mut self.rng);
        self.request = request;
        self.current.insert(record)
    }

    /// Generate again with the last request.
    pub fn reroll(&mut self) -> &CharacterRecord {
        let request = self.request.clone();
        self.generate(request)
    }

    // ========================================================================
    // Locks
    // ========================================================================

    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    /// Flip a lock and return whether it is now held.
    pub fn toggle_lock(&mut self, field: LockField) -> bool {
        let locked = self.locks.toggle(field);
        tracing::debug!(field = %field, locked, "Toggled lock");
        locked
    }

    pub fn lock(&mut self, field: LockField) {
        self.locks.lock(field);
    }

    pub fn unlock(&mut self, field: LockField) {
        self.locks.unlock(field);
    }

    // ========================================================================
    // Inline edits
    // ========================================================================

    /// Set one ability score (clamped to 1..=30) and refresh what reads it.
    pub fn edit_ability(&mut self, ability: Ability, score: i32) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.abilities.set(ability, score.clamp(1, 30) as u8);

        match ability {
            Ability::Constitution => {
                if !record.custom_hit_points {
                    record.hit_points = hit_points(
                        tables,
                        &record.classes,
                        record.abilities.modifier(Ability::Constitution),
                    );
                }
                refresh_armor_class(tables, record);
            }
            Ability::Dexterity => {
                record.initiative = record.abilities.modifier(Ability::Dexterity);
                refresh_armor_class(tables, record);
            }
            Ability::Wisdom => {
                record.passive_perception =
                    passive_perception(&record.abilities, &record.skills, record.proficiency_bonus);
                refresh_armor_class(tables, record);
            }
            _ => {}
        }

        if matches!(ability, Ability::Strength | Ability::Dexterity) && !self.locks.is_locked(LockField::Weapons) {
            refresh_weapons(tables, record);
        }

        let proficiency = record.proficiency_bonus;
        if let Some(profile) = record.spellcasting.as_mut().filter(|p| p.ability == ability) {
            profile.refresh_bonuses(&record.abilities, proficiency);
        }

        tracing::debug!(ability = %ability, score = record.abilities.score(ability), "Edited ability");
        Ok(&*record)
    }

    /// Manual hit points (clamped to 1..=999). Survives later recomputes.
    pub fn set_hit_points(&mut self, hit_points: i32) -> Result<&CharacterRecord, EditError> {
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.hit_points = hit_points.clamp(1, 999);
        record.custom_hit_points = true;
        Ok(&*record)
    }

    /// Manual armor class (clamped to 1..=99). Survives later recomputes.
    pub fn set_armor_class(&mut self, armor_class: i32) -> Result<&CharacterRecord, EditError> {
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.armor_class = armor_class.clamp(1, 99);
        record.custom_armor_class = true;
        Ok(&*record)
    }

    pub fn set_age(&mut self, age: u32) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.age = age;
        record.age_category = classify_age(age, &race_definition(tables, &record.race));
        if record.age_category == AgeCategory::Infant && record.classes.has_adventuring() {
            tracing::warn!(
                age,
                classes = %record.class_summary(),
                "Age edit makes an adventurer an infant; classes, weapons and spells are kept until the next generation"
            );
        }
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }
        Ok(&*record)
    }

    /// Replace the class list and recompute everything derived from it.
    ///
    /// Subclasses are re-resolved per entry: a given id is kept, a missing
    /// one is drawn, and entries below their unlock level get none.
    pub fn set_class_entries(&mut self, mut entries: ClassEntries) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        for entry in entries.iter_mut() {
            let choice = Choice::from(entry.subclass.take());
            entry.subclass = resolve_subclass(tables, entry.class, entry.level, &choice, &mut self.rng);
        }
        record.classes = entries;

        if !record.classes.has_commoner() {
            record.occupation = Occupation::Adventurer;
        } else if !record.occupation.is_trade() && !record.is_infant() {
            record.occupation = random_trade(tables, &mut self.rng);
        }
        if !self.locks.is_locked(LockField::Equipment) {
            record.equipment = occupation_equipment(tables, &record.occupation);
        }

        let race = race_definition(tables, &record.race);
        record.skills = combined_skills(tables, &record.classes, &race, &record.occupation);
        apply_class_derivations(tables, record);

        if !self.locks.is_locked(LockField::Spells) {
            record.spellcasting = character_spellcasting(
                tables,
                &record.classes,
                &record.abilities,
                record.proficiency_bonus,
                &mut self.rng,
            );
        }
        if !self.locks.is_locked(LockField::Weapons) {
            refresh_weapons(tables, record);
        }
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }

        tracing::debug!(classes = %record.class_summary(), "Replaced class entries");
        Ok(&*record)
    }

    pub fn set_race(&mut self, race: RaceId) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        let definition = race_definition(tables, &race);

        record.race = race;
        record.race_name = definition.name.clone();
        record.size = definition.size;
        record.speed = definition.speed;
        record.traits = definition.traits.clone();
        record.senses = definition.senses.clone();
        if !self.locks.is_locked(LockField::Languages) {
            record.languages = definition.languages.clone();
        }
        if !self.locks.is_locked(LockField::Skills) {
            record.skills = combined_skills(tables, &record.classes, &definition, &record.occupation);
            record.passive_perception =
                passive_perception(&record.abilities, &record.skills, record.proficiency_bonus);
        }
        record.age_category = classify_age(record.age, &definition);
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }
        Ok(&*record)
    }

    pub fn set_occupation(&mut self, occupation: Occupation) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.occupation = occupation;

        if !self.locks.is_locked(LockField::Equipment) {
            record.equipment = occupation_equipment(tables, &record.occupation);
        }
        let race = race_definition(tables, &record.race);
        record.skills = combined_skills(tables, &record.classes, &race, &record.occupation);
        record.passive_perception = passive_perception(&record.abilities, &record.skills, record.proficiency_bonus);
        if !self.locks.is_locked(LockField::Weapons) {
            refresh_weapons(tables, record);
        }
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }
        Ok(&*record)
    }

    /// Replace the skill proficiencies. Duplicates are dropped; more skills
    /// than the class, race and trade allow are rejected.
    pub fn set_skills(&mut self, skills: impl IntoIterator<Item = Skill>) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;

        let mut unique: Vec<Skill> = Vec::new();
        for skill in skills {
            if !unique.contains(&skill) {
                unique.push(skill);
            }
        }
        let race = race_definition(tables, &record.race);
        let limit = skill_limit(tables, &record.classes, &race, &record.occupation);
        if unique.len() > limit {
            return Err(EditError::TooManySkills {
                requested: unique.len(),
                limit,
            });
        }

        record.skills = unique;
        record.passive_perception = passive_perception(&record.abilities, &record.skills, record.proficiency_bonus);
        Ok(&*record)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&CharacterRecord, EditError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EditError::EmptyValue("Name"));
        }
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.name = name.trim().to_string();
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }
        Ok(&*record)
    }

    pub fn set_gender(&mut self, gender: Gender) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.gender = gender;
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }
        Ok(&*record)
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> Result<&CharacterRecord, EditError> {
        let tables = self.tables;
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.alignment = alignment;
        if !self.locks.is_locked(LockField::Backstory) {
            refresh_backstory(tables, record, &mut self.rng);
        }
        Ok(&*record)
    }

    pub fn set_backstory(&mut self, text: impl Into<String>) -> Result<&CharacterRecord, EditError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EditError::EmptyValue("Backstory"));
        }
        let record = self.current.as_mut().ok_or(EditError::NoCharacter)?;
        record.backstory = text;
        Ok(&*record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age::AgeCategory;
    use crate::composition::ClassEntry;
    use crate::rules::CharacterClass;

    fn session() -> GeneratorSession<'static> {
        GeneratorSession::with_seed(RuleTables::standard(), 42)
    }

    fn fighter() -> GenerationRequest {
        GenerationRequest::random()
            .with_race("human")
            .with_class(CharacterClass::Fighter)
            .with_level(4)
            .with_age(AgeCategory::Adult)
    }

    #[test]
    fn test_edit_without_character() {
        let mut session = session();
        assert_eq!(
            session.edit_ability(Ability::Strength, 12).unwrap_err(),
            EditError::NoCharacter
        );
        assert_eq!(session.set_hit_points(5).unwrap_err(), EditError::NoCharacter);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let mut a = session();
        let mut b = session();
        assert_eq!(a.generate(fighter()), b.generate(fighter()));
    }

    #[test]
    fn test_edit_constitution_recomputes_hit_points() {
        let mut session = session();
        session.generate(fighter());
        let record = session.edit_ability(Ability::Constitution, 14).unwrap();
        // fighter 4: 10 + 3 * 6 + 4 * 2
        assert_eq!(record.hit_points, 36);
        assert_eq!(record.abilities.modifier(Ability::Constitution), 2);
    }

    #[test]
    fn test_custom_hit_points_survive_edits() {
        let mut session = session();
        session.generate(fighter());
        session.set_hit_points(5000).unwrap();
        let record = session.edit_ability(Ability::Constitution, 20).unwrap();
        assert_eq!(record.hit_points, 999);
        assert!(record.custom_hit_points);
    }

    #[test]
    fn test_ability_edit_clamps() {
        let mut session = session();
        session.generate(fighter());
        let record = session.edit_ability(Ability::Dexterity, 45).unwrap();
        assert_eq!(record.abilities.score(Ability::Dexterity), 30);
        assert_eq!(record.initiative, 10);
        let record = session.edit_ability(Ability::Dexterity, -3).unwrap();
        assert_eq!(record.abilities.score(Ability::Dexterity), 1);
        assert_eq!(record.initiative, -5);
    }

    #[test]
    fn test_spell_bonuses_follow_casting_ability() {
        let mut session = session();
        session.generate(
            GenerationRequest::random()
                .with_class(CharacterClass::Wizard)
                .with_level(5)
                .with_age(AgeCategory::Adult),
        );
        let record = session.edit_ability(Ability::Intelligence, 18).unwrap();
        let spells = record.spellcasting.as_ref().unwrap();
        assert_eq!(spells.save_dc, 8 + 3 + 4);
        assert_eq!(spells.attack_bonus, 3 + 4);
    }

    #[test]
    fn test_set_class_entries_recomputes() {
        let mut session = session();
        session.generate(fighter());
        let entries = ClassEntries::commoner().with(ClassEntry::new(CharacterClass::Wizard, 3));
        let record = session.set_class_entries(entries).unwrap();
        assert_eq!(record.total_level, 3);
        assert!(record.occupation.is_trade());
        // commoner primary: the wizard training does not cast
        assert!(record.spellcasting.is_none());
        assert!(!record.backstory.is_empty());

        let record = session
            .set_class_entries(ClassEntries::new(ClassEntry::new(CharacterClass::Wizard, 3)))
            .unwrap();
        assert_eq!(record.occupation, Occupation::Adventurer);
        assert_eq!(record.spellcasting.as_ref().unwrap().class, CharacterClass::Wizard);
    }

    #[test]
    fn test_set_class_entries_resolves_subclasses() {
        let mut session = session();
        session.generate(fighter());
        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Fighter, 5))
            .with(ClassEntry::new(CharacterClass::Wizard, 1).with_subclass("evocation"));
        let record = session.set_class_entries(entries).unwrap();

        let drawn = record.classes.primary().subclass.clone().unwrap();
        assert!(session
            .tables()
            .subclass_option(CharacterClass::Fighter, &drawn)
            .is_some());
        assert_eq!(session.current().unwrap().classes.multiclass()[0].subclass, None);

        let entries = ClassEntries::new(ClassEntry::new(CharacterClass::Fighter, 5).with_subclass("champion"));
        let record = session.set_class_entries(entries).unwrap();
        assert_eq!(record.classes.primary().subclass.as_deref(), Some("champion"));
    }

    #[test]
    fn test_custom_overrides_survive_class_and_constitution_edits() {
        let mut session = session();
        session.generate(fighter());
        session.set_hit_points(77).unwrap();
        session.set_armor_class(19).unwrap();

        let record = session
            .set_class_entries(ClassEntries::new(ClassEntry::new(CharacterClass::Wizard, 6)))
            .unwrap();
        assert_eq!(record.hit_points, 77);
        assert_eq!(record.armor_class, 19);

        let record = session.edit_ability(Ability::Constitution, 18).unwrap();
        assert_eq!(record.hit_points, 77);
        assert_eq!(record.armor_class, 19);
        assert!(record.custom_hit_points && record.custom_armor_class);
    }

    #[test]
    fn test_locked_backstory_survives_class_edit() {
        let mut session = session();
        let before = session.generate(fighter()).backstory.clone();
        session.lock(LockField::Backstory);
        let entries = ClassEntries::commoner().with(ClassEntry::new(CharacterClass::Rogue, 2));
        let record = session.set_class_entries(entries).unwrap();
        assert!(record.occupation.is_trade());
        assert_eq!(record.backstory, before);
    }

    #[test]
    fn test_set_skills_respects_limit() {
        let mut session = session();
        session.generate(fighter());
        let tables = session.tables();
        // fighter picks plus the human Extra Skill
        let limit = tables.class(CharacterClass::Fighter).unwrap().skill_choices + 1;

        let too_many: Vec<Skill> = Skill::all().iter().copied().take(limit + 1).collect();
        assert_eq!(
            session.set_skills(too_many).unwrap_err(),
            EditError::TooManySkills {
                requested: limit + 1,
                limit
            }
        );

        let record = session
            .set_skills([Skill::Perception, Skill::Perception])
            .unwrap();
        assert_eq!(record.skills, vec![Skill::Perception]);
        let expected = 10 + record.abilities.modifier(Ability::Wisdom) as i32 + record.proficiency_bonus as i32;
        assert_eq!(record.passive_perception, expected);
    }

    #[test]
    fn test_set_race_grants_trait_skills() {
        let mut session = session();
        session.generate(fighter());
        let record = session.set_race(RaceId::new("half-orc")).unwrap();
        assert!(record.skills.contains(&Skill::Intimidation));
        assert_eq!(record.race_name, "Half-Orc");
    }

    #[test]
    fn test_locked_backstory_survives_edits() {
        let mut session = session();
        let before = session.generate(fighter()).backstory.clone();
        session.lock(LockField::Backstory);
        let record = session.set_gender(Gender::NonBinary).unwrap();
        assert_eq!(record.backstory, before);
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut session = session();
        session.generate(fighter());
        assert_eq!(session.set_backstory("   ").unwrap_err(), EditError::EmptyValue("Backstory"));
        assert_eq!(session.set_name("").unwrap_err(), EditError::EmptyValue("Name"));
        assert_eq!(session.set_name("  Brann  ").unwrap().name, "Brann");
    }

    #[test]
    fn test_set_age_reclassifies() {
        let mut session = session();
        session.generate(fighter());
        let record = session.set_age(79).unwrap();
        assert_eq!(record.age_category, AgeCategory::Elderly);
    }

    #[test]
    fn test_infant_age_edit_keeps_classes() {
        let mut session = session();
        session.generate(fighter());
        let record = session.set_age(0).unwrap();
        assert_eq!(record.age_category, AgeCategory::Infant);
        assert_eq!(record.classes.primary().class, CharacterClass::Fighter);
        assert!(!record.weapons.is_empty());
    }

    #[test]
    fn test_locked_fields_carried_by_reroll() {
        let mut session = session();
        let first = session.generate(fighter()).clone();
        session.toggle_lock(LockField::Name);
        session.toggle_lock(LockField::Stats);
        let second = session.reroll();
        assert_eq!(second.name, first.name);
        assert_eq!(second.abilities, first.abilities);
        assert_ne!(second.id, first.id);
    }
}
