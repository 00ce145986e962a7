//! NPC generator command line.
//!
//! Generates one or more characters from the flags given and prints them
//! as text sheets or JSON.
//!
//! # Headless Mode
//!
//! Run with `--interactive` for a line-oriented session with locks and
//! inline edits:
//!
//! ```bash
//! cargo run -p npcgen -- --interactive --race dwarf --class cleric --level 3
//! ```

mod headless;
mod sheet;

use npcgen_core::{GeneratorSession, RuleTables};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "npcgen=info,npcgen_core=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = match headless::parse_config_from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    let rules_path = config
        .rules_path
        .clone()
        .or_else(|| std::env::var("NPCGEN_RULES").ok().map(PathBuf::from));
    let loaded = match rules_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading rule tables");
            Some(RuleTables::load(&path)?)
        }
        None => None,
    };
    let tables = loaded.as_ref().unwrap_or_else(|| RuleTables::standard());

    let seed = match config.seed {
        Some(seed) => seed,
        None => match std::env::var("NPCGEN_SEED") {
            Ok(value) => value.trim().parse()?,
            Err(_) => rand::random(),
        },
    };
    tracing::info!(seed, "Starting generator");

    let mut session = GeneratorSession::with_seed(tables, seed);

    if config.interactive {
        headless::run_headless(&mut session, &config)?;
        return Ok(());
    }

    if config.json && config.count > 1 {
        let records: Vec<_> = (0..config.count)
            .map(|_| session.generate(config.request.clone()).clone())
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for _ in 0..config.count {
        headless::print_record(tables, session.generate(config.request.clone()), config.json);
    }

    Ok(())
}

fn print_help() {
    println!("npcgen - procedural NPC generator for 5e-style games");
    println!();
    println!("USAGE:");
    println!("  npcgen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help                 Show this help message");
    println!("  --race <RACE>              Race id (default: random)");
    println!("  --class <CLASS>            Primary class, or commoner (default: random adventurer)");
    println!("  --level <N>                Primary class level, 1-20 (default: 1)");
    println!("  --subclass <ID>            Subclass id (needs a high enough level)");
    println!("  --multiclass <C:L[:SUB]>   Add a class entry; repeatable");
    println!("  --occupation <ID>          Trade occupation for commoners");
    println!("  --age <CATEGORY>           infant, child, young-adult, adult, mature, elderly");
    println!("  --gender <GENDER>          male, female, non-binary");
    println!("  --alignment <ALIGNMENT>    e.g. lawful-good, neutral, CE");
    println!("  --background <ID>          Player-character mode with this background (or random)");
    println!("  --abilities <METHOD>       rolled or standard");
    println!("  --standard-array           Same as --abilities standard");
    println!("  --seed <N>                 Random seed (or NPCGEN_SEED)");
    println!("  --rules <PATH>             JSON rule tables (or NPCGEN_RULES)");
    println!("  --count, -n <N>            Number of characters to generate");
    println!("  --json                     Print JSON instead of a text sheet");
    println!("  --interactive, -i          Start a headless session with locks and edits");
    println!();
    println!("Any selector accepts `random`. Logging follows RUST_LOG (default: {DEFAULT_FILTER}).");
    println!();
    println!("EXAMPLES:");
    println!("  npcgen                                         # One random NPC");
    println!("  npcgen --class commoner --occupation blacksmith --count 5");
    println!("  npcgen --class wizard --level 5 --race elf --json");
    println!("  npcgen --class commoner --multiclass rogue:4   # A hidden-life commoner");
    println!("  npcgen --class rogue --level 3 --background random");
}
