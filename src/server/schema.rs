//! GraphQL schema: query and mutation roots
//!
//! Resolvers are thin: they convert inputs, call the engines and map
//! [`crate::Error`] to a GraphQL error carrying a `code` extension.

use std::sync::Arc;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use crate::Error;
use crate::mutation::MutationEngine;
use crate::query::{PokemonFilter, QueryEngine};
use crate::storage::DocumentStore;
use super::types::{AddPokemon, EditPokemon, FilterGetAllPokemons, PokemonObject};

pub type PokedexSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over a document store
pub fn build_schema(store: Arc<dyn DocumentStore>) -> PokedexSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        if self.is_not_found() {
            tracing::debug!("{}", self);
        } else {
            tracing::warn!("Request failed: {}", self);
        }

        let code = self.code().to_string();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

fn store<'c>(ctx: &Context<'c>) -> async_graphql::Result<&'c dyn DocumentStore> {
    Ok(ctx.data::<Arc<dyn DocumentStore>>()?.as_ref())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a pokemon by id
    async fn get_pokemon(&self, ctx: &Context<'_>, id: i64) -> async_graphql::Result<PokemonObject> {
        let pokemon = QueryEngine::new(store(ctx)?)
            .get(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(pokemon.into())
    }

    /// Get all pokemon
    async fn get_all_pokemons(
        &self,
        ctx: &Context<'_>,
        filter: Option<FilterGetAllPokemons>,
    ) -> async_graphql::Result<Vec<PokemonObject>> {
        let filter = filter.map(PokemonFilter::from);
        let records = QueryEngine::new(store(ctx)?)
            .get_all(filter.as_ref())
            .await
            .map_err(|e| e.extend())?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Edit a pokemon
    async fn edit_pokemon(
        &self,
        ctx: &Context<'_>,
        id: i64,
        updates: EditPokemon,
    ) -> async_graphql::Result<PokemonObject> {
        let pokemon = MutationEngine::new(store(ctx)?)
            .edit(id, &updates.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(pokemon.into())
    }

    /// Add a pokemon
    async fn add_pokemon(
        &self,
        ctx: &Context<'_>,
        pokemon: AddPokemon,
    ) -> async_graphql::Result<PokemonObject> {
        let pokemon = MutationEngine::new(store(ctx)?)
            .add(pokemon.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(pokemon.into())
    }

    /// Delete a pokemon
    async fn delete_pokemon(&self, ctx: &Context<'_>, id: i64) -> async_graphql::Result<PokemonObject> {
        let pokemon = MutationEngine::new(store(ctx)?)
            .remove(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(pokemon.into())
    }
}
