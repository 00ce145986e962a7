//! Headless mode for the NPC generator.
//!
//! A line-oriented loop over one [`GeneratorSession`]: blank lines and
//! `#reroll` generate again, `#`-commands toggle locks and edit fields.

use crate::sheet::render_sheet;
use npcgen_core::skills::Skill;
use npcgen_core::{
    Ability, AbilityMethod, AgeCategory, Alignment, CharacterClass, CharacterRecord, Choice, ClassEntries, ClassEntry,
    EditError, Gender, GenerationRequest, GeneratorSession, LockField, Occupation, RaceId, RuleTables,
};
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub request: GenerationRequest,
    pub seed: Option<u64>,
    pub rules_path: Option<PathBuf>,
    pub json: bool,
    pub count: usize,
    pub interactive: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            request: GenerationRequest::random(),
            seed: None,
            rules_path: None,
            json: false,
            count: 1,
            interactive: false,
        }
    }
}

/// Run the interactive loop until `#quit` or end of input.
pub fn run_headless<R: Rng>(session: &mut GeneratorSession<'_, R>, config: &CliConfig) -> io::Result<()> {
    println!("=== NPC Generator Headless Mode ===");
    print_help();
    println!();

    let tables = session.tables();
    print_record(tables, session.generate(config.request.clone()), config.json);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };
        let line = line.trim();

        let command = line.strip_prefix('#').unwrap_or(line);
        let (verb, rest) = match command.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (command, ""),
        };

        match verb {
            "" | "reroll" | "r" => {
                print_record(tables, session.reroll(), config.json);
            }
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "lock" | "unlock" => match rest.parse::<LockField>() {
                Ok(field) => {
                    if verb == "lock" {
                        session.lock(field);
                    } else {
                        session.unlock(field);
                    }
                    print_locks(session);
                }
                Err(e) => println!("[ERROR] {e}"),
            },
            "toggle" => match rest.parse::<LockField>() {
                Ok(field) => {
                    let locked = session.toggle_lock(field);
                    println!("[LOCK] {field}: {}", if locked { "locked" } else { "unlocked" });
                }
                Err(e) => println!("[ERROR] {e}"),
            },
            "locks" => print_locks(session),
            "set" => match rest.split_once(char::is_whitespace) {
                Some((field, value)) => report(apply_set(session, field, value.trim())),
                None => println!("[ERROR] Usage: #set <field> <value>"),
            },
            "hp" => match rest.parse::<i32>() {
                Ok(hp) => report(
                    session
                        .set_hit_points(hp)
                        .map(|r| format!("HP {}", r.hit_points))
                        .map_err(|e| e.to_string()),
                ),
                Err(_) => println!("[ERROR] Usage: #hp <number>"),
            },
            "ac" => match rest.parse::<i32>() {
                Ok(ac) => report(
                    session
                        .set_armor_class(ac)
                        .map(|r| format!("AC {}", r.armor_class))
                        .map_err(|e| e.to_string()),
                ),
                Err(_) => println!("[ERROR] Usage: #ac <number>"),
            },
            "show" => match session.current() {
                Some(record) => println!("{}", render_sheet(session.tables(), record)),
                None => println!("[ERROR] {}", EditError::NoCharacter),
            },
            "json" => match session.current().map(|r| serde_json::to_string_pretty(r)) {
                Some(Ok(json)) => println!("{json}"),
                Some(Err(e)) => println!("[ERROR] {e}"),
                None => println!("[ERROR] {}", EditError::NoCharacter),
            },
            "help" => print_help(),
            _ => println!("[ERROR] Unknown command. Type #help for help."),
        }
        stdout.flush().ok();
    }

    Ok(())
}

/// Print a record as a sheet, or as pretty JSON.
pub fn print_record(tables: &RuleTables, record: &CharacterRecord, json: bool) {
    if json {
        match serde_json::to_string_pretty(record) {
            Ok(text) => println!("{text}"),
            Err(e) => println!("[ERROR] {e}"),
        }
    } else {
        println!("{}", render_sheet(tables, record));
    }
}

fn print_locks<R: Rng>(session: &GeneratorSession<'_, R>) {
    let locked: Vec<String> = session.locks().iter().map(|f| f.to_string()).collect();
    if locked.is_empty() {
        println!("[LOCKS] none");
    } else {
        println!("[LOCKS] {}", locked.join(", "));
    }
}

fn report(result: Result<String, String>) {
    match result {
        Ok(summary) => println!("[OK] {summary}"),
        Err(e) => println!("[ERROR] {e}"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  #reroll (or blank)    - Generate again, keeping locked fields");
    println!("  #lock <field>         - Lock a field (name, race, class, occupation, age, gender,");
    println!("                          alignment, stats, skills, equipment, languages, backstory,");
    println!("                          spells, weapons)");
    println!("  #unlock <field>       - Unlock a field");
    println!("  #toggle <field>       - Flip a lock");
    println!("  #locks                - List locked fields");
    println!("  #set <field> <value>  - Edit name, age, race, gender, alignment, occupation,");
    println!("                          backstory, class (class:level[:subclass],...), skills");
    println!("                          (comma-separated) or an ability (str, dex, con, int,");
    println!("                          wis, cha)");
    println!("  #hp <n> / #ac <n>     - Override hit points / armor class");
    println!("  #show / #json         - Print the current character");
    println!("  #help / #quit");
}

fn apply_set<R: Rng>(session: &mut GeneratorSession<'_, R>, field: &str, value: &str) -> Result<String, String> {
    fn done(
        result: Result<&CharacterRecord, EditError>,
        summary: impl Fn(&CharacterRecord) -> String,
    ) -> Result<String, String> {
        result.map(summary).map_err(|e| e.to_string())
    }

    if let Some(ability) = Ability::parse(field) {
        let score: i32 = value.parse().map_err(|_| format!("Not a number: {value}"))?;
        return done(session.edit_ability(ability, score), |r| {
            format!("{} {}", ability.abbreviation(), r.abilities.score(ability))
        });
    }

    match field.to_lowercase().as_str() {
        "name" => done(session.set_name(value), |r| format!("Name {}", r.name)),
        "age" => {
            let age: u32 = value.parse().map_err(|_| format!("Not an age: {value}"))?;
            done(session.set_age(age), |r| format!("Age {} ({})", r.age, r.age_category))
        }
        "race" => done(session.set_race(RaceId::new(value.to_lowercase())), |r| {
            format!("Race {}", r.race_name)
        }),
        "gender" => {
            let gender = value.parse::<Gender>()?;
            done(session.set_gender(gender), |r| format!("Gender {}", r.gender))
        }
        "alignment" => {
            let alignment = value.parse::<Alignment>()?;
            done(session.set_alignment(alignment), |r| format!("Alignment {}", r.alignment))
        }
        "occupation" => done(session.set_occupation(Occupation::from_id(&value.to_lowercase())), |r| {
            format!("Occupation {}", r.occupation.title())
        }),
        "backstory" => done(session.set_backstory(value), |_| "Backstory updated".to_string()),
        "class" | "classes" => {
            let entries = parse_class_entries(value)?;
            done(session.set_class_entries(entries), |r| format!("Class {}", r.class_summary()))
        }
        "skills" => {
            let skills = parse_skills(value)?;
            done(session.set_skills(skills), |r| {
                let names: Vec<&str> = r.skills.iter().map(|s| s.name()).collect();
                format!("Skills {}", names.join(", "))
            })
        }
        other => Err(format!("Unknown field: {other}")),
    }
}

// ============================================================================
// Argument parsing
// ============================================================================

/// Parse `class[:level[:subclass]]`.
fn parse_class_spec(spec: &str) -> Result<(CharacterClass, u8, Option<String>), String> {
    let mut parts = spec.trim().splitn(3, ':');
    let class = parts.next().unwrap_or_default().parse::<CharacterClass>()?;
    let level = match parts.next() {
        Some(level) => level
            .parse::<u8>()
            .map_err(|_| format!("Invalid level in {spec}"))?
            .clamp(1, 20),
        None => 1,
    };
    let subclass = parts.next().map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    Ok((class, level, subclass))
}

/// Parse a comma-separated class list; the first entry is primary.
pub fn parse_class_entries(value: &str) -> Result<ClassEntries, String> {
    let mut entries: Option<ClassEntries> = None;
    for spec in value.split(',').filter(|s| !s.trim().is_empty()) {
        let (class, level, subclass) = parse_class_spec(spec)?;
        let entry = if class.is_commoner() {
            ClassEntry::commoner()
        } else {
            ClassEntry {
                class,
                level,
                subclass,
            }
        };
        match entries.as_mut() {
            Some(entries) => entries.push(entry),
            None => entries = Some(ClassEntries::new(entry)),
        }
    }
    entries.ok_or_else(|| "At least one class is required".to_string())
}

/// Parse a comma-separated skill list.
pub fn parse_skills(value: &str) -> Result<Vec<Skill>, String> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<Skill>)
        .collect()
}

fn parse_ability_method(s: &str) -> Result<AbilityMethod, String> {
    match s.to_lowercase().as_str() {
        "rolled" | "roll" => Ok(AbilityMethod::Rolled),
        "standard" | "standard-array" | "array" => Ok(AbilityMethod::StandardArray),
        _ => Err(format!("Unknown ability method: {s}")),
    }
}

/// Parse generator options from command line arguments. `random` as a
/// value leaves that selector random.
pub fn parse_config_from_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();
    let mut request = GenerationRequest::random();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let takes_value = !matches!(flag, "--json" | "--standard-array" | "--interactive" | "-i");
        let value = if takes_value {
            i += 1;
            args.get(i).map(String::as_str).ok_or_else(|| format!("Missing value for {flag}"))?
        } else {
            ""
        };
        let random = value.eq_ignore_ascii_case("random");

        match flag {
            "--race" if !random => request = request.with_race(value.to_lowercase().as_str()),
            "--class" if !random => request = request.with_class(value.parse()?),
            "--level" => {
                let level = value.parse::<u8>().map_err(|_| format!("Invalid level: {value}"))?;
                request = request.with_level(level);
            }
            "--subclass" if !random => request = request.with_subclass(value.to_lowercase()),
            "--multiclass" => {
                let (class, level, subclass) = parse_class_spec(value)?;
                request = request.with_multiclass(class, level, Choice::from(subclass));
            }
            "--occupation" if !random => request = request.with_occupation(Occupation::from_id(&value.to_lowercase())),
            "--age" if !random => request = request.with_age(value.parse::<AgeCategory>()?),
            "--gender" if !random => request = request.with_gender(value.parse()?),
            "--alignment" if !random => request = request.with_alignment(value.parse()?),
            "--background" => {
                let background = if random {
                    Choice::Random
                } else {
                    Choice::Fixed(value.to_lowercase())
                };
                request = request.with_background(background);
            }
            "--abilities" => request = request.with_ability_method(parse_ability_method(value)?),
            "--standard-array" => request = request.with_ability_method(AbilityMethod::StandardArray),
            "--seed" => {
                config.seed = Some(value.parse().map_err(|_| format!("Invalid seed: {value}"))?);
            }
            "--rules" => config.rules_path = Some(PathBuf::from(value)),
            "--count" | "-n" => {
                config.count = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid count: {value}"))?
                    .max(1);
            }
            "--json" => config.json = true,
            "--interactive" | "-i" => config.interactive = true,
            "--race" | "--class" | "--subclass" | "--occupation" | "--age" | "--gender" | "--alignment" => {}
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 1;
    }

    config.request = request;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("npcgen")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        let config = parse_config_from_args(&args("")).unwrap();
        assert_eq!(config.request, GenerationRequest::random());
        assert_eq!(config.count, 1);
        assert!(!config.json);
    }

    #[test]
    fn test_parse_full_request() {
        let config = parse_config_from_args(&args(
            "--race elf --class Wizard --level 5 --subclass evocation --age adult --gender female \
             --alignment lawful-good --multiclass fighter:3:champion --seed 9 --json --count 3",
        ))
        .unwrap();
        let expected = GenerationRequest::random()
            .with_race("elf")
            .with_class(CharacterClass::Wizard)
            .with_level(5)
            .with_subclass("evocation")
            .with_age(AgeCategory::Adult)
            .with_gender(Gender::Female)
            .with_alignment(Alignment::LawfulGood)
            .with_multiclass(CharacterClass::Fighter, 3, Choice::Fixed("champion".to_string()));
        assert_eq!(config.request, expected);
        assert_eq!(config.seed, Some(9));
        assert!(config.json);
        assert_eq!(config.count, 3);
    }

    #[test]
    fn test_random_keeps_selector_random() {
        let config = parse_config_from_args(&args("--race random --class random")).unwrap();
        assert!(config.request.race.is_random());
        assert!(config.request.class.is_random());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_config_from_args(&args("--class necromancer")).is_err());
        assert!(parse_config_from_args(&args("--level")).is_err());
        assert!(parse_config_from_args(&args("--frobnicate")).is_err());
    }

    #[test]
    fn test_class_entries() {
        let entries = parse_class_entries("commoner, wizard:3:evocation").unwrap();
        assert!(entries.is_hidden_life());
        assert_eq!(entries.multiclass()[0].level, 3);
        assert_eq!(entries.multiclass()[0].subclass.as_deref(), Some("evocation"));
        assert!(parse_class_entries("").is_err());
    }

    #[test]
    fn test_background_switches_on_player_mode() {
        let config = parse_config_from_args(&args("--background random")).unwrap();
        assert_eq!(config.request.background, Some(Choice::Random));
        let config = parse_config_from_args(&args("--background Sage")).unwrap();
        assert_eq!(config.request.background, Some(Choice::Fixed("sage".to_string())));
        assert_eq!(parse_config_from_args(&args("")).unwrap().request.background, None);
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(
            parse_skills("stealth, sleight of hand").unwrap(),
            vec![Skill::Stealth, Skill::SleightOfHand]
        );
        assert!(parse_skills("stealth, basket weaving").is_err());
    }

    #[test]
    fn test_set_skills_over_limit_reports_error() {
        let mut session = GeneratorSession::with_seed(RuleTables::standard(), 5);
        session.generate(
            GenerationRequest::random()
                .with_race("dwarf")
                .with_class(CharacterClass::Wizard)
                .with_age(AgeCategory::Adult),
        );
        let all: Vec<&str> = Skill::all().iter().map(|s| s.name()).collect();
        let err = apply_set(&mut session, "skills", &all.join(",")).unwrap_err();
        assert!(err.contains("exceed the limit"));
        assert!(apply_set(&mut session, "skills", "arcana").is_ok());
    }
}
