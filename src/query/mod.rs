pub mod engine;

pub use engine::{PokedexStats, PokemonFilter, QueryEngine};
