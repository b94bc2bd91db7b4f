//! GraphQL object and input types
//!
//! Kept apart from the record model so that storage and the engines stay
//! free of GraphQL concerns. Names follow the published schema.

use async_graphql::{Enum, InputObject, SimpleObject};
use crate::pokemon::{
    NewPokemon, Pokemon, PokemonBase, PokemonBaseUpdate, PokemonName, PokemonNameUpdate,
    PokemonType, PokemonUpdate,
};
use crate::query::PokemonFilter;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(
    name = "PokemonType",
    remote = "crate::pokemon::PokemonType",
    rename_items = "PascalCase"
)]
pub enum PokemonTypeValue {
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

fn to_types(values: Vec<PokemonTypeValue>) -> Vec<PokemonType> {
    values.into_iter().map(Into::into).collect()
}

#[derive(SimpleObject)]
#[graphql(name = "PokemonName")]
pub struct PokemonNameObject {
    pub english: String,
    pub japanese: String,
    pub chinese: String,
    pub french: String,
}

#[derive(SimpleObject)]
#[graphql(name = "PokemonBase")]
pub struct PokemonBaseObject {
    #[graphql(name = "HP")]
    pub hp: i64,
    #[graphql(name = "Attack")]
    pub attack: i64,
    #[graphql(name = "Defense")]
    pub defense: i64,
    #[graphql(name = "SpAttack")]
    pub sp_attack: i64,
    #[graphql(name = "SpDefense")]
    pub sp_defense: i64,
    #[graphql(name = "Speed")]
    pub speed: i64,
}

/// A pokemon
#[derive(SimpleObject)]
#[graphql(name = "Pokemon")]
pub struct PokemonObject {
    pub id: i64,
    pub name: PokemonNameObject,
    pub types: Vec<PokemonTypeValue>,
    pub base: PokemonBaseObject,
}

impl From<Pokemon> for PokemonObject {
    fn from(p: Pokemon) -> Self {
        Self {
            id: p.id,
            name: PokemonNameObject {
                english: p.name.english,
                japanese: p.name.japanese,
                chinese: p.name.chinese,
                french: p.name.french,
            },
            types: p.types.into_iter().map(Into::into).collect(),
            base: PokemonBaseObject {
                hp: p.base.hp,
                attack: p.base.attack,
                defense: p.base.defense,
                sp_attack: p.base.sp_attack,
                sp_defense: p.base.sp_defense,
                speed: p.base.speed,
            },
        }
    }
}

#[derive(InputObject)]
pub struct FilterGetAllPokemons {
    /// Filter by types
    pub types: Option<Vec<PokemonTypeValue>>,
    /// Filter by name
    pub name: Option<String>,
}

impl From<FilterGetAllPokemons> for PokemonFilter {
    fn from(f: FilterGetAllPokemons) -> Self {
        Self {
            name: f.name,
            types: f.types.map(to_types),
        }
    }
}

#[derive(InputObject)]
pub struct AddPokemonNameInput {
    pub english: String,
    pub japanese: String,
    pub chinese: String,
    pub french: String,
}

#[derive(InputObject)]
pub struct AddPokemonBaseInput {
    #[graphql(name = "HP")]
    pub hp: i64,
    #[graphql(name = "Attack")]
    pub attack: i64,
    #[graphql(name = "Defense")]
    pub defense: i64,
    #[graphql(name = "SpAttack")]
    pub sp_attack: i64,
    #[graphql(name = "SpDefense")]
    pub sp_defense: i64,
    #[graphql(name = "Speed")]
    pub speed: i64,
}

#[derive(InputObject)]
pub struct AddPokemon {
    pub name: AddPokemonNameInput,
    pub types: Vec<PokemonTypeValue>,
    pub base: AddPokemonBaseInput,
}

impl From<AddPokemon> for NewPokemon {
    fn from(input: AddPokemon) -> Self {
        Self {
            name: PokemonName {
                english: input.name.english,
                japanese: input.name.japanese,
                chinese: input.name.chinese,
                french: input.name.french,
            },
            types: to_types(input.types),
            base: PokemonBase {
                hp: input.base.hp,
                attack: input.base.attack,
                defense: input.base.defense,
                sp_attack: input.base.sp_attack,
                sp_defense: input.base.sp_defense,
                speed: input.base.speed,
            },
        }
    }
}

#[derive(InputObject)]
pub struct EditPokemonNameInput {
    pub english: Option<String>,
    pub japanese: Option<String>,
    pub chinese: Option<String>,
    pub french: Option<String>,
}

#[derive(InputObject)]
pub struct EditPokemonBaseInput {
    #[graphql(name = "HP")]
    pub hp: Option<i64>,
    #[graphql(name = "Attack")]
    pub attack: Option<i64>,
    #[graphql(name = "Defense")]
    pub defense: Option<i64>,
    #[graphql(name = "SpAttack")]
    pub sp_attack: Option<i64>,
    #[graphql(name = "SpDefense")]
    pub sp_defense: Option<i64>,
    #[graphql(name = "Speed")]
    pub speed: Option<i64>,
}

#[derive(InputObject)]
pub struct EditPokemon {
    pub name: Option<EditPokemonNameInput>,
    pub types: Option<Vec<PokemonTypeValue>>,
    pub base: Option<EditPokemonBaseInput>,
}

impl From<EditPokemon> for PokemonUpdate {
    fn from(input: EditPokemon) -> Self {
        Self {
            name: input.name.map(|n| PokemonNameUpdate {
                english: n.english,
                japanese: n.japanese,
                chinese: n.chinese,
                french: n.french,
            }),
            types: input.types.map(to_types),
            base: input.base.map(|b| PokemonBaseUpdate {
                hp: b.hp,
                attack: b.attack,
                defense: b.defense,
                sp_attack: b.sp_attack,
                sp_defense: b.sp_defense,
                speed: b.speed,
            }),
        }
    }
}
