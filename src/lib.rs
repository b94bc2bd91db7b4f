//! # Pokedex - GraphQL API over a flat-file Pokémon collection
//!
//! The whole collection lives in a single JSON document. Every operation
//! loads it fresh, transforms it in memory and (for mutations) writes it back.
//!
//! Pokedex provides:
//! - A typed record model with validation of record invariants
//! - A document store with atomic whole-file rewrites
//! - Query operations (by id, filtered listing)
//! - Mutation operations (add, partial-merge edit, delete)
//! - An async-graphql schema served over axum

pub mod pokemon;
pub mod storage;
pub mod query;
pub mod mutation;
pub mod server;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use pokemon::{
    NewPokemon, Pokemon, PokemonBase, PokemonBaseUpdate, PokemonName, PokemonNameUpdate,
    PokemonType, PokemonUpdate,
};
pub use query::{PokemonFilter, QueryEngine};
pub use mutation::MutationEngine;
pub use storage::{DocumentStore, JsonFileStore, MemoryStore};

/// Result type alias for Pokedex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Pokedex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document: {0}")]
    Format(#[from] serde_json::Error),

    #[error("No pokemon found with id {0}")]
    NotFound(i64),

    #[error("No pokemon found")]
    NoMatches,

    #[error("Invalid pokemon: {0}")]
    Validation(String),
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Stable machine-readable code, used as the GraphQL error extension
    /// and in JSON CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Io { .. } => "IO",
            Error::Format(_) => "FORMAT",
            Error::NotFound(_) | Error::NoMatches => "NOT_FOUND",
            Error::Validation(_) => "VALIDATION",
        }
    }

    /// True for the not-found class of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::NoMatches)
    }
}
