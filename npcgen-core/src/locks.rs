//! Per-field locks that carry values across re-generation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A lockable generation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockField {
    Name,
    Race,
    Class,
    Occupation,
    Age,
    Gender,
    Alignment,
    Stats,
    Skills,
    Equipment,
    Languages,
    Backstory,
    Spells,
    Weapons,
}

impl LockField {
    pub fn all() -> [LockField; 14] {
        [
            LockField::Name,
            LockField::Race,
            LockField::Class,
            LockField::Occupation,
            LockField::Age,
            LockField::Gender,
            LockField::Alignment,
            LockField::Stats,
            LockField::Skills,
            LockField::Equipment,
            LockField::Languages,
            LockField::Backstory,
            LockField::Spells,
            LockField::Weapons,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            LockField::Name => "name",
            LockField::Race => "race",
            LockField::Class => "class",
            LockField::Occupation => "occupation",
            LockField::Age => "age",
            LockField::Gender => "gender",
            LockField::Alignment => "alignment",
            LockField::Stats => "stats",
            LockField::Skills => "skills",
            LockField::Equipment => "equipment",
            LockField::Languages => "languages",
            LockField::Backstory => "backstory",
            LockField::Spells => "spells",
            LockField::Weapons => "weapons",
        }
    }
}

impl fmt::Display for LockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for LockField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let lower = match lower.as_str() {
            "abilities" | "scores" => "stats",
            "classes" => "class",
            other => other,
        };
        LockField::all()
            .into_iter()
            .find(|f| f.id() == lower)
            .ok_or_else(|| format!("Unknown lock field: {s}"))
    }
}

/// The set of locked fields. Unlisted fields are unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSet {
    locked: HashSet<LockField>,
}

impl LockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: LockField) -> Self {
        self.lock(field);
        self
    }

    pub fn lock(&mut self, field: LockField) {
        self.locked.insert(field);
    }

    pub fn unlock(&mut self, field: LockField) {
        self.locked.remove(&field);
    }

    /// Flip a field and return its new state.
    pub fn toggle(&mut self, field: LockField) -> bool {
        if !self.locked.remove(&field) {
            self.locked.insert(field);
            true
        } else {
            false
        }
    }

    pub fn is_locked(&self, field: LockField) -> bool {
        self.locked.contains(&field)
    }

    /// Locked fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = LockField> + '_ {
        LockField::all().into_iter().filter(|f| self.is_locked(*f))
    }

    pub fn is_empty(&self) -> bool {
        self.locked.is_empty()
    }

    pub fn clear(&mut self) {
        self.locked.clear();
    }
}

impl FromIterator<LockField> for LockSet {
    fn from_iter<I: IntoIterator<Item = LockField>>(iter: I) -> Self {
        Self {
            locked: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut locks = LockSet::new();
        assert!(locks.toggle(LockField::Name));
        assert!(locks.is_locked(LockField::Name));
        assert!(!locks.toggle(LockField::Name));
        assert!(locks.is_empty());
    }

    #[test]
    fn test_iter_in_declaration_order() {
        let locks: LockSet = [LockField::Weapons, LockField::Name, LockField::Stats]
            .into_iter()
            .collect();
        assert_eq!(
            locks.iter().collect::<Vec<_>>(),
            vec![LockField::Name, LockField::Stats, LockField::Weapons]
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Abilities".parse::<LockField>(), Ok(LockField::Stats));
        assert_eq!("spells".parse::<LockField>(), Ok(LockField::Spells));
        assert!("hair".parse::<LockField>().is_err());
    }
}
