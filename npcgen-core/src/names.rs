//! Name generation from the race name tables.

use crate::character::Gender;
use crate::rules::{RaceId, RuleTables};
use rand::seq::SliceRandom;
use rand::Rng;

const NAMELESS: &str = "Nameless";

/// `First Last` from the race's table (human table for unknown races).
/// Non-binary characters draw a first name from both lists.
pub fn generate_name<R: Rng>(tables: &RuleTables, race: &RaceId, gender: Gender, rng: &mut R) -> String {
    let Some(table) = tables.names(race) else {
        tracing::warn!(race = %race, "No name table available");
        return NAMELESS.to_string();
    };

    let first = match gender {
        Gender::Male => table.male.choose(rng),
        Gender::Female => table.female.choose(rng),
        Gender::NonBinary => {
            let both: Vec<&String> = table.male.iter().chain(table.female.iter()).collect();
            both.choose(rng).copied()
        }
    };

    match (first, table.surnames.choose(rng)) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.clone(),
        (None, Some(last)) => last.clone(),
        (None, None) => NAMELESS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gendered_first_names() {
        let tables = RuleTables::standard();
        let elf = RaceId::new("elf");
        let table = tables.names(&elf).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let name = generate_name(tables, &elf, Gender::Female, &mut rng);
            let (first, last) = name.split_once(' ').unwrap();
            assert!(table.female.iter().any(|n| n == first));
            assert!(table.surnames.iter().any(|n| n == last));
        }
    }

    #[test]
    fn test_non_binary_draws_from_both() {
        let tables = RuleTables::standard();
        let human = RaceId::new("human");
        let table = tables.names(&human).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let name = generate_name(tables, &human, Gender::NonBinary, &mut rng);
            let first = name.split(' ').next().unwrap();
            assert!(table.male.iter().chain(table.female.iter()).any(|n| n == first));
        }
    }

    #[test]
    fn test_unknown_race_uses_human_table() {
        let tables = RuleTables::standard();
        let human = tables.names(&RaceId::new("human")).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let name = generate_name(tables, &RaceId::new("sea-folk"), Gender::Male, &mut rng);
        let first = name.split(' ').next().unwrap();
        assert!(human.male.iter().any(|n| n == first));
    }
}
