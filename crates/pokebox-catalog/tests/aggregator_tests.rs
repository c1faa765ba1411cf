//! CatalogAggregator Tests
//!
//! Fan-out, partial move failure and page behavior against an in-memory catalog.
//!
use async_trait::async_trait;
use mockall::mock;
use pokebox_catalog::prelude::*;
use pokebox_test_utils::{
    catalog_with_moves, move_record, numbered_moves, pokemon_record, species_record, FakeCatalog,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

fn aggregator(catalog: FakeCatalog) -> (CatalogAggregator, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    (CatalogAggregator::new(catalog.clone()), catalog)
}

#[tokio::test]
async fn test_fetch_creature_builds_composite() {
    let catalog = FakeCatalog::new()
        .with_creature(
            pokemon_record("pikachu", 25, &["electric"], &["thunder-shock", "growl"]),
            species_record("pikachu"),
        )
        .with_move(move_record("thunder-shock", "electric", Some(40)))
        .with_move(move_record("growl", "normal", None));
    let (aggregator, _) = aggregator(catalog);

    let creature = aggregator.fetch_creature("pikachu").await.unwrap();

    assert_eq!(creature.id, 25);
    assert_eq!(creature.name, "Pikachu");
    assert_eq!(creature.description, "Pikachu stores electricity in its cheeks.");
    assert_eq!(creature.elements.len(), 1);
    assert_eq!(creature.elements[0].name, "ELECTRIC");
    assert_eq!(creature.elements[0].color, resolve("electric"));

    assert_eq!(creature.abilities.len(), 2);
    assert_eq!(creature.abilities[0].name, "Thunder Shock");
    assert_eq!(creature.abilities[0].power, Some(40));
    assert_eq!(creature.abilities[1].name, "Growl");
    assert_eq!(creature.abilities[1].power, None);
    assert_eq!(creature.abilities[1].element.name, "NORMAL");

    assert_eq!(creature.stats.hp, 35);
    assert_eq!(creature.stats.special_attack, 50);
    assert_eq!(creature.stats.speed, 90);
    assert_eq!(
        creature.sprites.front_default.as_deref(),
        Some("https://sprites.test/25.png")
    );
    assert_eq!(creature.sprites.front_shiny, None);
}

#[tokio::test]
async fn test_name_is_normalized() {
    let (aggregator, _) = aggregator(catalog_with_moves("pikachu", 25, 1));

    let creature = aggregator.fetch_creature("  PIKACHU ").await.unwrap();
    assert_eq!(creature.id, 25);
}

#[tokio::test]
async fn test_only_first_ten_moves_are_attempted() {
    let (aggregator, catalog) = aggregator(catalog_with_moves("pikachu", 25, 12));

    let creature = aggregator.fetch_creature("pikachu").await.unwrap();

    assert_eq!(creature.abilities.len(), MOVE_CANDIDATE_LIMIT);
    let mut calls = catalog.move_calls();
    calls.sort();
    let mut expected = numbered_moves(MOVE_CANDIDATE_LIMIT);
    expected.sort();
    assert_eq!(calls, expected);
}

#[tokio::test]
async fn test_failing_moves_are_dropped_in_order() {
    let catalog = catalog_with_moves("pikachu", 25, 12)
        .with_broken("move-2")
        .with_broken("move-7");
    let (aggregator, catalog) = aggregator(catalog);

    let creature = aggregator.fetch_creature("pikachu").await.unwrap();

    assert_eq!(catalog.move_calls().len(), MOVE_CANDIDATE_LIMIT);
    let names: Vec<&str> = creature.abilities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Move 1", "Move 3", "Move 4", "Move 5", "Move 6", "Move 8", "Move 9", "Move 10"]
    );
}

#[tokio::test]
async fn test_failures_beyond_the_cap_are_never_seen() {
    let catalog = catalog_with_moves("pikachu", 25, 12)
        .with_broken("move-11")
        .with_broken("move-12");
    let (aggregator, _) = aggregator(catalog);

    let creature = aggregator.fetch_creature("pikachu").await.unwrap();
    assert_eq!(creature.abilities.len(), 10);
}

#[tokio::test]
async fn test_missing_move_records_are_dropped() {
    let catalog = FakeCatalog::new()
        .with_creature(
            pokemon_record("eevee", 133, &["normal"], &["tackle", "unreleased-move"]),
            species_record("eevee"),
        )
        .with_move(move_record("tackle", "normal", Some(40)));
    let (aggregator, _) = aggregator(catalog);

    let creature = aggregator.fetch_creature("eevee").await.unwrap();
    assert_eq!(creature.abilities.len(), 1);
    assert_eq!(creature.abilities[0].name, "Tackle");
}

#[tokio::test]
async fn test_unknown_creature_is_not_found() {
    let (aggregator, _) = aggregator(FakeCatalog::new());

    let err = aggregator.fetch_creature("missingno").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(ApiError::from(err).kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_missing_species_is_not_found() {
    let catalog = FakeCatalog::new().with_base_only(pokemon_record("porygon", 137, &["normal"], &[]));
    let (aggregator, _) = aggregator(catalog);

    let err = aggregator.fetch_creature("porygon").await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { resource: "pokemon-species", .. }));
}

#[tokio::test]
async fn test_transport_failure_is_internal() {
    let catalog = catalog_with_moves("pikachu", 25, 1).with_broken("pikachu");
    let (aggregator, _) = aggregator(catalog);

    let err = aggregator.fetch_creature("pikachu").await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
    assert_eq!(ApiError::from(err).kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_page_preserves_upstream_order() {
    let catalog = FakeCatalog::new()
        .with_creature(pokemon_record("bulbasaur", 1, &["grass", "poison"], &[]), species_record("bulbasaur"))
        .with_creature(pokemon_record("ivysaur", 2, &["grass", "poison"], &[]), species_record("ivysaur"))
        .with_creature(pokemon_record("venusaur", 3, &["grass", "poison"], &[]), species_record("venusaur"))
        .with_creature(pokemon_record("charmander", 4, &["fire"], &[]), species_record("charmander"));
    let (aggregator, _) = aggregator(catalog);

    let page = aggregator.fetch_page(1, 2).await.unwrap();
    let ids: Vec<u32> = page.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(page[0].elements[1].name, "POISON");
}

#[tokio::test]
async fn test_page_fails_if_any_creature_fails() {
    let catalog = FakeCatalog::new()
        .with_creature(pokemon_record("bulbasaur", 1, &["grass"], &[]), species_record("bulbasaur"))
        .with_base_only(pokemon_record("ivysaur", 2, &["grass"], &[]))
        .with_creature(pokemon_record("venusaur", 3, &["grass"], &[]), species_record("venusaur"));
    let (aggregator, _) = aggregator(catalog);

    let result = aggregator.fetch_page(0, 3).await;
    assert!(matches!(result, Err(CatalogError::NotFound { .. })));
}

#[tokio::test]
async fn test_empty_page() {
    let (aggregator, _) = aggregator(catalog_with_moves("pikachu", 25, 0));

    let page = aggregator.fetch_page(50, 10).await.unwrap();
    assert!(page.is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

/// Catalog whose calls block on a shared barrier; completes only if every
/// gated call is in flight at once
struct GatedCatalog {
    gate: Barrier,
    gate_moves: bool,
    moves: Vec<String>,
    names: Vec<String>,
}

impl GatedCatalog {
    fn gating_moves(count: usize) -> Self {
        Self {
            gate: Barrier::new(count),
            gate_moves: true,
            moves: numbered_moves(count),
            names: Vec::new(),
        }
    }

    fn gating_creatures(names: &[&str]) -> Self {
        Self {
            gate: Barrier::new(names.len()),
            gate_moves: false,
            moves: Vec::new(),
            names: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }
}

#[async_trait]
impl CatalogClient for GatedCatalog {
    async fn pokemon(&self, name: &str) -> Result<PokemonRecord, CatalogError> {
        if !self.gate_moves {
            self.gate.wait().await;
        }
        let moves: Vec<&str> = self.moves.iter().map(String::as_str).collect();
        Ok(pokemon_record(name, 25, &["electric"], &moves))
    }

    async fn species(&self, name: &str) -> Result<SpeciesRecord, CatalogError> {
        Ok(species_record(name))
    }

    async fn move_record(&self, name: &str) -> Result<MoveRecord, CatalogError> {
        if self.gate_moves {
            self.gate.wait().await;
        }
        Ok(move_record(name, "normal", Some(40)))
    }

    async fn page(&self, _offset: u32, _limit: u32) -> Result<Vec<String>, CatalogError> {
        Ok(self.names.clone())
    }
}

#[tokio::test]
async fn test_move_fetches_overlap() {
    let catalog = GatedCatalog::gating_moves(MOVE_CANDIDATE_LIMIT);
    let aggregator = CatalogAggregator::new(Arc::new(catalog));

    let creature = tokio::time::timeout(Duration::from_secs(5), aggregator.fetch_creature("pikachu"))
        .await
        .expect("move fetches ran one after another")
        .unwrap();

    assert_eq!(creature.abilities.len(), MOVE_CANDIDATE_LIMIT);
    assert_eq!(creature.abilities[0].name, "Move 1");
}

#[tokio::test]
async fn test_page_fetches_overlap() {
    let names = ["bulbasaur", "ivysaur", "venusaur", "charmander"];
    let aggregator = CatalogAggregator::new(Arc::new(GatedCatalog::gating_creatures(&names)));

    let page = tokio::time::timeout(Duration::from_secs(5), aggregator.fetch_page(0, 4))
        .await
        .expect("page creatures were fetched one after another")
        .unwrap();

    let fetched: Vec<&str> = page.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(fetched, vec!["Bulbasaur", "Ivysaur", "Venusaur", "Charmander"]);
}

mock! {
    Catalog {}

    #[async_trait]
    impl CatalogClient for Catalog {
        async fn pokemon(&self, name: &str) -> Result<PokemonRecord, CatalogError>;
        async fn species(&self, name: &str) -> Result<SpeciesRecord, CatalogError>;
        async fn move_record(&self, name: &str) -> Result<MoveRecord, CatalogError>;
        async fn page(&self, offset: u32, limit: u32) -> Result<Vec<String>, CatalogError>;
    }
}

#[tokio::test]
async fn test_creature_without_moves_fetches_no_moves() {
    let mut mock = MockCatalog::new();
    mock.expect_pokemon()
        .times(1)
        .returning(|name| Ok(pokemon_record(name, 132, &["normal"], &[])));
    mock.expect_species()
        .times(1)
        .returning(|_| Ok(SpeciesRecord::default()));
    mock.expect_move_record().never();

    let aggregator = CatalogAggregator::new(Arc::new(mock));
    let creature = aggregator.fetch_creature("ditto").await.unwrap();

    assert_eq!(creature.name, "ditto");
    assert_eq!(creature.description, DESCRIPTION_PLACEHOLDER);
    assert!(creature.abilities.is_empty());
}

#[tokio::test]
async fn test_decode_failure_on_species_is_internal() {
    let mut mock = MockCatalog::new();
    mock.expect_pokemon()
        .returning(|name| Ok(pokemon_record(name, 25, &["electric"], &["tackle"])));
    mock.expect_species()
        .returning(|name| Err(CatalogError::Decode(format!("pokemon-species '{name}': eof"))));
    mock.expect_move_record()
        .returning(|name| Ok(move_record(name, "normal", Some(40))));

    let aggregator = CatalogAggregator::new(Arc::new(mock));
    let err = aggregator.fetch_creature("pikachu").await.unwrap_err();

    assert_eq!(ApiError::from(err).kind(), ErrorKind::Internal);
}
