//! Pokemon records - the single entity of the collection
//!
//! A record is made of:
//! - `id`: unique integer, assigned on creation
//! - `name`: four language variants, all required
//! - `types`: non-empty list of type tags from a closed set of 18
//! - `base`: six required base stats
//!
//! The field names on disk follow the document layout (`type`, `HP`,
//! `SpAttack`, ...), not Rust naming.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Pokemon type tags - a closed set of 18 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl PokemonType {
    /// Get the tag as it appears in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Normal => "Normal",
            PokemonType::Fighting => "Fighting",
            PokemonType::Flying => "Flying",
            PokemonType::Poison => "Poison",
            PokemonType::Ground => "Ground",
            PokemonType::Rock => "Rock",
            PokemonType::Bug => "Bug",
            PokemonType::Ghost => "Ghost",
            PokemonType::Steel => "Steel",
            PokemonType::Fire => "Fire",
            PokemonType::Water => "Water",
            PokemonType::Grass => "Grass",
            PokemonType::Electric => "Electric",
            PokemonType::Psychic => "Psychic",
            PokemonType::Ice => "Ice",
            PokemonType::Dragon => "Dragon",
            PokemonType::Dark => "Dark",
            PokemonType::Fairy => "Fairy",
        }
    }

    /// Get all type tags
    pub fn all() -> &'static [PokemonType] {
        &[
            PokemonType::Normal,
            PokemonType::Fighting,
            PokemonType::Flying,
            PokemonType::Poison,
            PokemonType::Ground,
            PokemonType::Rock,
            PokemonType::Bug,
            PokemonType::Ghost,
            PokemonType::Steel,
            PokemonType::Fire,
            PokemonType::Water,
            PokemonType::Grass,
            PokemonType::Electric,
            PokemonType::Psychic,
            PokemonType::Ice,
            PokemonType::Dragon,
            PokemonType::Dark,
            PokemonType::Fairy,
        ]
    }
}

impl FromStr for PokemonType {
    type Err = Error;

    /// Case-insensitive, so `water` and `WATER` both parse.
    fn from_str(s: &str) -> Result<Self> {
        PokemonType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation(format!("Unknown pokemon type: {}", s)))
    }
}

impl std::fmt::Display for PokemonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name of a pokemon in four languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonName {
    pub english: String,
    pub japanese: String,
    pub chinese: String,
    pub french: String,
}

/// Base stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonBase {
    #[serde(rename = "HP")]
    pub hp: i64,
    #[serde(rename = "Attack")]
    pub attack: i64,
    #[serde(rename = "Defense")]
    pub defense: i64,
    #[serde(rename = "SpAttack")]
    pub sp_attack: i64,
    #[serde(rename = "SpDefense")]
    pub sp_defense: i64,
    #[serde(rename = "Speed")]
    pub speed: i64,
}

impl PokemonBase {
    /// Sum of all six stats, widened to `i128` so it never overflows
    pub fn total(&self) -> i128 {
        [self.hp, self.attack, self.defense, self.sp_attack, self.sp_defense, self.speed]
            .into_iter()
            .map(i128::from)
            .sum()
    }
}

/// A pokemon in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: i64,
    pub name: PokemonName,
    #[serde(rename = "type")]
    pub types: Vec<PokemonType>,
    pub base: PokemonBase,
}

impl Pokemon {
    /// Check the record invariants that the type system does not carry:
    /// every name variant is non-empty and the type list is non-empty.
    pub fn validate(&self) -> Result<()> {
        let name = &self.name;
        for (field, value) in [
            ("english", &name.english),
            ("japanese", &name.japanese),
            ("chinese", &name.chinese),
            ("french", &name.french),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("name.{} must not be empty", field)));
            }
        }

        if self.types.is_empty() {
            return Err(Error::Validation("types must not be empty".to_string()));
        }

        Ok(())
    }

    /// True if the record shares at least one type with `types`
    pub fn has_any_type(&self, types: &[PokemonType]) -> bool {
        self.types.iter().any(|t| types.contains(t))
    }

    /// Apply a partial update in place.
    ///
    /// Only fields present in `update` are touched. A present value always
    /// wins, including `0` and `""`; the result is not validated here.
    pub fn apply(&mut self, update: &PokemonUpdate) {
        if let Some(name) = &update.name {
            merge(&mut self.name.english, &name.english);
            merge(&mut self.name.japanese, &name.japanese);
            merge(&mut self.name.chinese, &name.chinese);
            merge(&mut self.name.french, &name.french);
        }

        if let Some(types) = &update.types {
            self.types = types.clone();
        }

        if let Some(base) = &update.base {
            merge(&mut self.base.hp, &base.hp);
            merge(&mut self.base.attack, &base.attack);
            merge(&mut self.base.defense, &base.defense);
            merge(&mut self.base.sp_attack, &base.sp_attack);
            merge(&mut self.base.sp_defense, &base.sp_defense);
            merge(&mut self.base.speed, &base.speed);
        }
    }
}

fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Input for a new pokemon. The id is assigned by the mutation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPokemon {
    pub name: PokemonName,
    #[serde(alias = "type")]
    pub types: Vec<PokemonType>,
    pub base: PokemonBase,
}

impl NewPokemon {
    /// Build the record under the given id
    pub fn into_pokemon(self, id: i64) -> Pokemon {
        Pokemon {
            id,
            name: self.name,
            types: self.types,
            base: self.base,
        }
    }
}

/// Partial name update; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonNameUpdate {
    pub english: Option<String>,
    pub japanese: Option<String>,
    pub chinese: Option<String>,
    pub french: Option<String>,
}

/// Partial base stats update; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonBaseUpdate {
    #[serde(rename = "HP")]
    pub hp: Option<i64>,
    #[serde(rename = "Attack")]
    pub attack: Option<i64>,
    #[serde(rename = "Defense")]
    pub defense: Option<i64>,
    #[serde(rename = "SpAttack")]
    pub sp_attack: Option<i64>,
    #[serde(rename = "SpDefense")]
    pub sp_defense: Option<i64>,
    #[serde(rename = "Speed")]
    pub speed: Option<i64>,
}

/// Partial update of a pokemon.
///
/// `types`, when present, replaces the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonUpdate {
    pub name: Option<PokemonNameUpdate>,
    #[serde(alias = "type")]
    pub types: Option<Vec<PokemonType>>,
    pub base: Option<PokemonBaseUpdate>,
}

impl PokemonUpdate {
    /// Set the english name
    pub fn with_english_name(mut self, english: impl Into<String>) -> Self {
        self.name.get_or_insert_with(Default::default).english = Some(english.into());
        self
    }

    /// Replace the type list
    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = Some(types);
        self
    }

    /// Set the HP stat
    pub fn with_hp(mut self, hp: i64) -> Self {
        self.base.get_or_insert_with(Default::default).hp = Some(hp);
        self
    }

    /// True if the update carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.types.is_none() && self.base.is_none()
    }
}
