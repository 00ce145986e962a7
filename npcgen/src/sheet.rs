//! Plain-text character sheet.

use npcgen_core::abilities::format_modifier;
use npcgen_core::{Ability, CharacterRecord, RuleTables};
use std::fmt::Write;

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn spell_names(tables: &RuleTables, ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| tables.spell(id).map(|s| s.name.clone()).unwrap_or_else(|| id.clone()))
        .collect()
}

/// Render a record as the multi-section sheet printed by the binary.
pub fn render_sheet(tables: &RuleTables, record: &CharacterRecord) -> String {
    let mut out = String::new();

    let classes: Vec<String> = if record.classes.is_pure_commoner() {
        vec!["Commoner".to_string()]
    } else {
        record
            .classes
            .adventuring()
            .map(|e| format!("{} {}", e.describe(tables), e.level))
            .collect()
    };

    let _ = writeln!(out, "=== {} ===", record.name);
    let _ = writeln!(
        out,
        "{} {}, {} ({} years, {})",
        record.gender,
        record.race_name,
        record.alignment,
        record.age,
        record.age_category
    );
    let _ = writeln!(out, "Class: {}", classes.join(" / "));
    let _ = writeln!(out, "Occupation: {}", record.occupation.title());
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "HP {}{}  AC {} ({}{})  Initiative {}  Speed {} ft.  Size {}",
        record.hit_points,
        if record.hit_dice.is_empty() {
            String::new()
        } else {
            format!(" ({})", record.hit_dice)
        },
        record.armor_class,
        record.armor,
        if record.custom_armor_class { ", custom" } else { "" },
        format_modifier(record.initiative as i32),
        record.speed,
        record.size.name(),
    );
    let _ = writeln!(
        out,
        "Level {}  Proficiency {}  Passive Perception {}",
        record.total_level,
        format_modifier(record.proficiency_bonus as i32),
        record.passive_perception
    );

    let scores: Vec<String> = Ability::all()
        .into_iter()
        .map(|a| {
            format!(
                "{} {} ({})",
                a.abbreviation(),
                record.abilities.score(a),
                format_modifier(record.abilities.modifier(a) as i32)
            )
        })
        .collect();
    let _ = writeln!(out, "{}", scores.join("  "));
    let _ = writeln!(out);

    let saves: Vec<String> = record.saving_throws.iter().map(|a| a.name().to_string()).collect();
    let skills: Vec<String> = record
        .skills
        .iter()
        .map(|s| {
            let bonus = s.bonus(&record.abilities, &record.skills, record.proficiency_bonus);
            format!("{} {}", s, format_modifier(bonus))
        })
        .collect();
    let _ = writeln!(out, "Saving Throws: {}", list(&saves));
    let _ = writeln!(out, "Skills: {}", list(&skills));
    let _ = writeln!(out, "Languages: {}", list(&record.languages));
    let _ = writeln!(out, "Senses: {}", list(&record.senses));
    let _ = writeln!(out, "Traits: {}", list(&record.traits));
    let _ = writeln!(out, "Equipment: {}", list(&record.equipment));

    if !record.features.is_empty() {
        let features: Vec<String> = record.features.iter().map(|f| f.to_string()).collect();
        let _ = writeln!(out, "Features: {}", list(&features));
    }

    if let Some(background) = &record.background {
        let _ = writeln!(out);
        let _ = writeln!(out, "Background: {}", background.name);
        let _ = writeln!(out, "  Personality: {}", background.personality_trait);
        let _ = writeln!(out, "  Ideal: {}", background.ideal);
        let _ = writeln!(out, "  Bond: {}", background.bond);
        let _ = writeln!(out, "  Flaw: {}", background.flaw);
    }

    if !record.weapons.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Weapons:");
        for weapon in &record.weapons {
            let _ = writeln!(out, "  {weapon}");
        }
    }

    if let Some(spells) = &record.spellcasting {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Spellcasting ({} {}, {}): save DC {}, attack {}",
            spells.class,
            spells.caster_level,
            spells.ability.name(),
            spells.save_dc,
            format_modifier(spells.attack_bonus)
        );
        let slots: Vec<String> = spells
            .slot_summary()
            .into_iter()
            .map(|(level, count)| format!("{level}: {count}"))
            .collect();
        let _ = writeln!(out, "  Slots: {}", list(&slots));
        let _ = writeln!(out, "  Cantrips: {}", list(&spell_names(tables, &spells.cantrips)));
        let _ = writeln!(out, "  Spells: {}", list(&spell_names(tables, &spells.spells)));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.backstory);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcgen_core::skills::Skill;
    use npcgen_core::{AgeCategory, CharacterClass, Choice, GenerationRequest, GeneratorSession};

    #[test]
    fn test_sheet_sections() {
        let tables = RuleTables::standard();
        let mut session = GeneratorSession::with_seed(tables, 11);
        let record = session.generate(
            GenerationRequest::random()
                .with_class(CharacterClass::Wizard)
                .with_level(5)
                .with_age(AgeCategory::Adult),
        );
        let sheet = render_sheet(tables, record);
        assert!(sheet.starts_with(&format!("=== {} ===", record.name)));
        assert!(sheet.contains("Spellcasting (Wizard 5, Intelligence)"));
        assert!(sheet.contains("Weapons:"));
        assert!(sheet.contains("Features: Spellcasting (Wizard 1)"));
        assert!(!sheet.contains("Background:"));
        assert!(sheet.contains(&record.backstory));
    }

    #[test]
    fn test_skills_show_modifiers() {
        let tables = RuleTables::standard();
        let mut session = GeneratorSession::with_seed(tables, 12);
        session.generate(
            GenerationRequest::random()
                .with_race("human")
                .with_class(CharacterClass::Rogue)
                .with_level(5)
                .with_age(AgeCategory::Adult)
                .with_background(Choice::Fixed("sage".into())),
        );
        let record = session.set_skills([Skill::Stealth]).unwrap();
        let stealth = 3 + record.abilities.modifier(Skill::Stealth.ability()) as i32;
        let sheet = render_sheet(tables, record);
        assert!(sheet.contains(&format!("Skills: Stealth {}", format_modifier(stealth))));
        assert!(sheet.contains("Background: Sage"));
        assert!(sheet.contains("  Flaw: "));
    }

    #[test]
    fn test_infant_sheet_has_no_weapons() {
        let tables = RuleTables::standard();
        let mut session = GeneratorSession::with_seed(tables, 3);
        let record = session.generate(GenerationRequest::random().with_age(AgeCategory::Infant));
        let sheet = render_sheet(tables, record);
        assert!(sheet.contains("Class: Commoner"));
        assert!(!sheet.contains("Weapons:"));
    }
}
