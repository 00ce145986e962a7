//! Procedural NPC generator for 5e-style tabletop games.
//!
//! This crate provides:
//! - Rule tables for races, classes, subclasses, occupations, spells and weapons
//! - Age-aware ability rolling and class composition, including multiclass
//!   and "hidden life" commoners
//! - Spellcasting profiles, weapon attacks and templated backstories
//! - Class features by level, racial skill grants and player-character
//!   backgrounds
//! - A session API with per-field locks and inline edits
//!
//! # Quick Start
//!
//! ```
//! use npcgen_core::{AgeCategory, CharacterClass, GenerationRequest, GeneratorSession, LockField, RuleTables};
//!
//! let mut session = GeneratorSession::with_seed(RuleTables::standard(), 7);
//! let request = GenerationRequest::random()
//!     .with_class(CharacterClass::Wizard)
//!     .with_level(5)
//!     .with_age(AgeCategory::Adult);
//!
//! let name = session.generate(request).name.clone();
//! session.lock(LockField::Name);
//! assert_eq!(session.reroll().name, name);
//! ```

pub mod abilities;
pub mod age;
pub mod background;
pub mod backstory;
pub mod character;
pub mod composition;
pub mod dice;
pub mod equipment;
pub mod generator;
pub mod locks;
pub mod names;
pub mod rules;
pub mod session;
pub mod skills;
pub mod spellcasting;

// Primary public API
pub use abilities::{Ability, AbilityBlock, AbilityMethod, AbilityScores};
pub use age::AgeCategory;
pub use character::{Alignment, CharacterId, CharacterRecord, Gender};
pub use background::BackgroundProfile;
pub use composition::{CharacterFeature, ClassEntries, ClassEntry};
pub use generator::{generate, Choice, GenerationRequest, MulticlassRequest};
pub use locks::{LockField, LockSet};
pub use rules::{CharacterClass, Occupation, RaceId, RuleTables, RulesError};
pub use session::{EditError, GeneratorSession};
