//! Query engine implementation
//!
//! Provides the read operations:
//! - Lookup by id
//! - Filtered listing (english name substring, type overlap)
//! - Collection statistics

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::pokemon::{Pokemon, PokemonType};
use crate::storage::DocumentStore;

/// Optional predicates narrowing a listing.
///
/// Both predicates combine with AND semantics. An empty `name` counts as not
/// given; an empty `types` list shares no type with any record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonFilter {
    /// Case-sensitive substring of the english name
    pub name: Option<String>,
    /// Keep records sharing at least one of these types
    pub types: Option<Vec<PokemonType>>,
}

impl PokemonFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            types: None,
        }
    }

    pub fn by_types(types: Vec<PokemonType>) -> Self {
        Self {
            name: None,
            types: Some(types),
        }
    }

    /// Apply the predicates in sequence: name first, then types
    pub fn apply(&self, mut records: Vec<Pokemon>) -> Vec<Pokemon> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            records.retain(|p| p.name.english.contains(name));
        }
        if let Some(types) = self.types.as_deref() {
            records.retain(|p| p.has_any_type(types));
        }
        records
    }
}

/// Summary of the collection
#[derive(Debug, Clone, Serialize)]
pub struct PokedexStats {
    pub records: usize,
    pub by_type: BTreeMap<PokemonType, usize>,
}

impl std::fmt::Display for PokedexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  Records: {}", self.records)?;
        for (kind, count) in &self.by_type {
            writeln!(f, "  {}: {}", kind, count)?;
        }
        Ok(())
    }
}

/// Query engine for read operations
pub struct QueryEngine<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Find a pokemon by id, `None` if absent
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Pokemon>> {
        let records = self.store.load_all().await?;
        Ok(records.into_iter().find(|p| p.id == id))
    }

    /// Find a pokemon by id, failing with `NotFound` if absent
    pub async fn get(&self, id: i64) -> Result<Pokemon> {
        self.get_by_id(id).await?.ok_or(Error::NotFound(id))
    }

    /// List the collection, optionally filtered.
    ///
    /// An empty result is an error (`NoMatches`), with or without a filter.
    pub async fn get_all(&self, filter: Option<&PokemonFilter>) -> Result<Vec<Pokemon>> {
        let mut records = self.store.load_all().await?;
        if let Some(filter) = filter {
            records = filter.apply(records);
        }

        if records.is_empty() {
            return Err(Error::NoMatches);
        }
        Ok(records)
    }

    /// Record count and per-type counts
    pub async fn stats(&self) -> Result<PokedexStats> {
        let records = self.store.load_all().await?;
        let mut by_type = BTreeMap::new();
        for kind in records.iter().flat_map(|p| p.types.iter()) {
            *by_type.entry(*kind).or_insert(0) += 1;
        }

        Ok(PokedexStats {
            records: records.len(),
            by_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::fixtures;
    use crate::storage::MemoryStore;
    use crate::pokemon::PokemonType::*;

    fn seeded() -> MemoryStore {
        MemoryStore::with_records(&fixtures::seed()).unwrap()
    }

    fn names(records: &[Pokemon]) -> Vec<&str> {
        records.iter().map(|p| p.name.english.as_str()).collect()
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let found = engine.get_by_id(25).await.unwrap().unwrap();
        assert_eq!(found.name.english, "Pikachu");

        assert!(engine.get_by_id(999).await.unwrap().is_none());
        assert!(matches!(engine.get(999).await, Err(Error::NotFound(999))));
    }

    #[tokio::test]
    async fn test_get_all_unfiltered_keeps_document_order() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let all = engine.get_all(None).await.unwrap();
        assert_eq!(
            names(&all),
            ["Bulbasaur", "Charmander", "Squirtle", "Pikachu", "Gyarados"]
        );
    }

    #[tokio::test]
    async fn test_name_filter_is_case_sensitive_substring() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let results = engine.get_all(Some(&PokemonFilter::by_name("Char"))).await.unwrap();
        assert_eq!(names(&results), ["Charmander"]);

        let results = engine.get_all(Some(&PokemonFilter::by_name("ar"))).await.unwrap();
        assert_eq!(names(&results), ["Charmander", "Gyarados"]);

        // "char" does not match "Charmander"
        let result = engine.get_all(Some(&PokemonFilter::by_name("char"))).await;
        assert!(matches!(result, Err(Error::NoMatches)));
    }

    #[tokio::test]
    async fn test_types_filter_matches_any_overlap() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let water = engine
            .get_all(Some(&PokemonFilter::by_types(vec![Water])))
            .await
            .unwrap();
        assert_eq!(names(&water), ["Squirtle", "Gyarados"]);

        let mixed = engine
            .get_all(Some(&PokemonFilter::by_types(vec![Poison, Electric])))
            .await
            .unwrap();
        assert_eq!(names(&mixed), ["Bulbasaur", "Pikachu"]);
    }

    #[tokio::test]
    async fn test_filters_combine_with_and() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let filter = PokemonFilter {
            name: Some("a".to_string()),
            types: Some(vec![Water]),
        };
        let results = engine.get_all(Some(&filter)).await.unwrap();
        assert_eq!(names(&results), ["Gyarados"]);

        let filter = PokemonFilter {
            name: Some("Pika".to_string()),
            types: Some(vec![Water]),
        };
        assert!(matches!(engine.get_all(Some(&filter)).await, Err(Error::NoMatches)));
    }

    #[tokio::test]
    async fn test_empty_name_is_ignored() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let filter = PokemonFilter::by_name("");
        assert_eq!(engine.get_all(Some(&filter)).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_types_list_matches_nothing() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let filter = PokemonFilter::by_types(Vec::new());
        assert!(matches!(engine.get_all(Some(&filter)).await, Err(Error::NoMatches)));
    }

    #[tokio::test]
    async fn test_empty_collection_is_no_matches() {
        let store = MemoryStore::new();
        let engine = QueryEngine::new(&store);

        assert!(matches!(engine.get_all(None).await, Err(Error::NoMatches)));
    }

    #[tokio::test]
    async fn test_stats() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let stats = engine.stats().await.unwrap();
        assert_eq!(stats.records, 5);
        assert_eq!(stats.by_type[&Water], 2);
        assert_eq!(stats.by_type[&Flying], 1);
        assert!(!stats.by_type.contains_key(&Dragon));
    }
}
