//! Mutation engine implementation
//!
//! Every mutation is one load -> transform -> save cycle over the whole
//! document, run under the store's write lock so concurrent writers cannot
//! lose each other's updates.

use crate::{Error, Result};
use crate::pokemon::{NewPokemon, Pokemon, PokemonUpdate};
use crate::storage::DocumentStore;

/// Next free id: one past the largest id in the collection
pub fn next_id(records: &[Pokemon]) -> Result<i64> {
    records
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| Error::Validation("id space exhausted".to_string()))
}

/// Mutation engine for write operations
pub struct MutationEngine<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> MutationEngine<'a> {
    /// Create a new mutation engine
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Add a pokemon under a fresh id and return it
    pub async fn add(&self, input: NewPokemon) -> Result<Pokemon> {
        let _guard = self.store.write_lock().lock().await;
        let mut records = self.store.load_all().await?;

        let pokemon = input.into_pokemon(next_id(&records)?);
        pokemon.validate()?;

        records.push(pokemon.clone());
        self.store.save_all(&records).await?;

        tracing::info!("Added pokemon {} ({})", pokemon.id, pokemon.name.english);
        Ok(pokemon)
    }

    /// Merge `updates` into the pokemon with `id` and return the result.
    ///
    /// Nothing is written if the merged record fails validation.
    pub async fn edit(&self, id: i64, updates: &PokemonUpdate) -> Result<Pokemon> {
        let _guard = self.store.write_lock().lock().await;
        let mut records = self.store.load_all().await?;

        let index = position(&records, id)?;
        let mut pokemon = records[index].clone();
        pokemon.apply(updates);
        pokemon.validate()?;

        records[index] = pokemon.clone();
        self.store.save_all(&records).await?;

        tracing::info!("Edited pokemon {}", id);
        Ok(pokemon)
    }

    /// Delete the pokemon with `id`, returning its last value
    pub async fn remove(&self, id: i64) -> Result<Pokemon> {
        let _guard = self.store.write_lock().lock().await;
        let mut records = self.store.load_all().await?;

        let index = position(&records, id)?;
        let removed = records.remove(index);
        self.store.save_all(&records).await?;

        tracing::info!("Deleted pokemon {} ({})", id, removed.name.english);
        Ok(removed)
    }
}

fn position(records: &[Pokemon], id: i64) -> Result<usize> {
    records
        .iter()
        .position(|p| p.id == id)
        .ok_or(Error::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::pokemon::{PokemonBaseUpdate, PokemonNameUpdate, PokemonType, fixtures};
    use crate::query::QueryEngine;
    use crate::storage::MemoryStore;

    fn seeded() -> MemoryStore {
        MemoryStore::with_records(&fixtures::seed()).unwrap()
    }

    fn new_pokemon(english: &str) -> NewPokemon {
        NewPokemon {
            name: fixtures::name(english),
            types: vec![PokemonType::Dragon],
            base: fixtures::base(41),
        }
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[]).unwrap(), 1);
        assert_eq!(next_id(&fixtures::seed()).unwrap(), 131);
    }

    #[tokio::test]
    async fn test_add_with_max_id_in_document() {
        let mut seed = fixtures::seed();
        seed[0].id = i64::MAX;
        let store = MemoryStore::with_records(&seed).unwrap();
        let before = store.contents();

        let result = MutationEngine::new(&store).add(new_pokemon("Dratini")).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(store.contents(), before);
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);

        let added = mutations.add(new_pokemon("Dratini")).await.unwrap();
        assert_eq!(added.id, 131);

        let fetched = QueryEngine::new(&store).get_by_id(added.id).await.unwrap();
        assert_eq!(fetched, Some(added));
        assert_eq!(store.load_all().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_types() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);
        let before = store.contents();

        let mut input = new_pokemon("Missingno");
        input.types.clear();

        assert!(matches!(mutations.add(input).await, Err(Error::Validation(_))));
        assert_eq!(store.contents(), before);
    }

    #[tokio::test]
    async fn test_remove_then_get() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);
        let queries = QueryEngine::new(&store);

        let removed = mutations.remove(7).await.unwrap();
        assert_eq!(removed.name.english, "Squirtle");

        assert!(queries.get_by_id(7).await.unwrap().is_none());
        assert!(matches!(queries.get(7).await, Err(Error::NotFound(7))));
        assert!(matches!(mutations.remove(7).await, Err(Error::NotFound(7))));
    }

    #[tokio::test]
    async fn test_edit_english_name_only() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);
        let before = QueryEngine::new(&store).get(4).await.unwrap();

        let edited = mutations
            .edit(4, &PokemonUpdate::default().with_english_name("X"))
            .await
            .unwrap();

        let mut expected = before.clone();
        expected.name.english = "X".to_string();
        assert_eq!(edited, expected);
        assert_eq!(QueryEngine::new(&store).get(4).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_edit_stat_to_zero() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);

        let edited = mutations.edit(25, &PokemonUpdate::default().with_hp(0)).await.unwrap();

        assert_eq!(edited.base.hp, 0);
        assert_eq!(QueryEngine::new(&store).get(25).await.unwrap().base.hp, 0);
    }

    #[tokio::test]
    async fn test_edit_keeps_position_and_other_records() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);
        let update = PokemonUpdate {
            name: Some(PokemonNameUpdate {
                french: Some("Carapuce".to_string()),
                ..Default::default()
            }),
            types: Some(vec![PokemonType::Water, PokemonType::Ice]),
            base: Some(PokemonBaseUpdate {
                speed: Some(43),
                ..Default::default()
            }),
        };

        mutations.edit(7, &update).await.unwrap();

        let records = store.load_all().await.unwrap();
        let seed = fixtures::seed();
        assert_eq!(records[2].id, 7);
        assert_eq!(records[2].name.french, "Carapuce");
        assert_eq!(records[2].types, vec![PokemonType::Water, PokemonType::Ice]);
        assert_eq!(records[2].base.speed, 43);
        assert_eq!(records[2].base.hp, seed[2].base.hp);
        for i in [0, 1, 3, 4] {
            assert_eq!(records[i], seed[i]);
        }
    }

    #[tokio::test]
    async fn test_edit_missing_id() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);

        let result = mutations.edit(999, &PokemonUpdate::default().with_hp(1)).await;
        assert!(matches!(result, Err(Error::NotFound(999))));
    }

    #[tokio::test]
    async fn test_edit_rejects_unsetting_fields() {
        let store = seeded();
        let mutations = MutationEngine::new(&store);
        let before = store.contents();

        let result = mutations
            .edit(1, &PokemonUpdate::default().with_english_name(""))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = mutations
            .edit(1, &PokemonUpdate::default().with_types(Vec::new()))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));

        assert_eq!(store.contents(), before);
    }

    #[tokio::test]
    async fn test_concurrent_adds_get_distinct_ids() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                MutationEngine::new(store.as_ref())
                    .add(new_pokemon(&format!("Clone{}", i)))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();

        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        assert_eq!(store.load_all().await.unwrap().len(), 16);
    }
}
