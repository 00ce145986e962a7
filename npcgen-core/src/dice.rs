//! Dice pools used by the ability score tiers.
//!
//! Supports `XdY` and `XdYkhN` notation: roll X dice with Y sides and
//! keep the N highest.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
    #[error("Cannot keep {keep} dice when only rolling {count} (in {notation})")]
    InvalidKeepCount {
        keep: u32,
        count: u32,
        notation: String,
    },
}

/// Standard D&D die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            _ => None,
        }
    }

    /// Fixed hit points gained per level after the first (half the die, plus one).
    pub fn average(&self) -> u32 {
        self.sides() / 2 + 1
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A homogeneous pool of dice, optionally keeping only the highest results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    pub count: u32,
    pub die_type: DieType,
    pub keep_highest: Option<u32>,
}

impl DicePool {
    pub const fn new(count: u32, die_type: DieType) -> Self {
        Self {
            count,
            die_type,
            keep_highest: None,
        }
    }

    pub const fn keep_highest(count: u32, die_type: DieType, keep: u32) -> Self {
        Self {
            count,
            die_type,
            keep_highest: Some(keep),
        }
    }

    /// Parse a dice notation string such as `4d6kh3` or `1d4`.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let notation = notation.trim().to_lowercase();
        if notation.is_empty() {
            return Err(DiceError::NoDice);
        }

        let d_pos = notation
            .find('d')
            .ok_or_else(|| DiceError::InvalidNotation(notation.clone()))?;
        let count_str = &notation[..d_pos];
        let rest = &notation[d_pos + 1..];

        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DiceError::InvalidNotation(notation.clone()))?
        };
        if count == 0 {
            return Err(DiceError::NoDice);
        }

        let (sides_str, keep_highest) = match rest.find("kh") {
            Some(kh_pos) => {
                let keep: u32 = rest[kh_pos + 2..]
                    .parse()
                    .map_err(|_| DiceError::InvalidNotation(notation.clone()))?;
                (&rest[..kh_pos], Some(keep))
            }
            None => (rest, None),
        };

        let sides: u32 = sides_str
            .parse()
            .map_err(|_| DiceError::InvalidNotation(notation.clone()))?;
        let die_type = DieType::from_sides(sides).ok_or(DiceError::InvalidDieSize(sides))?;

        if let Some(keep) = keep_highest {
            if keep > count {
                return Err(DiceError::InvalidKeepCount {
                    keep,
                    count,
                    notation,
                });
            }
        }

        Ok(DicePool {
            count,
            die_type,
            keep_highest,
        })
    }

    /// Roll the pool and return the sum of the kept dice.
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> u32 {
        let mut rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.gen_range(1..=self.die_type.sides()))
            .collect();

        if let Some(keep) = self.keep_highest {
            rolls.sort_by(|a, b| b.cmp(a));
            rolls.truncate(keep as usize);
        }

        rolls.iter().sum()
    }

    /// Smallest possible total.
    pub fn min(&self) -> u32 {
        self.kept()
    }

    /// Largest possible total.
    pub fn max(&self) -> u32 {
        self.kept() * self.die_type.sides()
    }

    fn kept(&self) -> u32 {
        self.keep_highest.unwrap_or(self.count)
    }
}

impl FromStr for DicePool {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DicePool::parse(s)
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.die_type)?;
        if let Some(keep) = self.keep_highest {
            write!(f, "kh{keep}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_simple() {
        let pool = DicePool::parse("1d4").unwrap();
        assert_eq!(pool.count, 1);
        assert_eq!(pool.die_type, DieType::D4);
        assert_eq!(pool.keep_highest, None);
    }

    #[test]
    fn test_parse_keep_highest() {
        let pool = DicePool::parse("4d6kh3").unwrap();
        assert_eq!(pool.count, 4);
        assert_eq!(pool.keep_highest, Some(3));
        assert_eq!(pool.to_string(), "4d6kh3");
    }

    #[test]
    fn test_invalid_keep_count() {
        // Can't keep more dice than you roll
        let result = DicePool::parse("4d6kh5");
        assert!(matches!(
            result,
            Err(DiceError::InvalidKeepCount { keep: 5, count: 4, .. })
        ));
    }

    #[test]
    fn test_invalid_notation() {
        assert_eq!(DicePool::parse(""), Err(DiceError::NoDice));
        assert_eq!(DicePool::parse("0d6"), Err(DiceError::NoDice));
        assert_eq!(DicePool::parse("3d7"), Err(DiceError::InvalidDieSize(7)));
        assert!(matches!(
            DicePool::parse("abc"),
            Err(DiceError::InvalidNotation(_))
        ));
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for notation in ["4d6kh3", "4d4kh3", "1d4"] {
            let pool = DicePool::parse(notation).unwrap();
            for _ in 0..500 {
                let total = pool.roll_with_rng(&mut rng);
                assert!(total >= pool.min() && total <= pool.max(), "{notation}: {total}");
            }
        }
    }

    #[test]
    fn test_hit_die_average() {
        assert_eq!(DieType::D6.average(), 4);
        assert_eq!(DieType::D8.average(), 5);
        assert_eq!(DieType::D12.average(), 7);
    }
}
