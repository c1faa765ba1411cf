//! Testing utilities for the pokebox workspace
//!
//! Shared fakes, fixtures, and payload builders.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pokebox_catalog::records::{
    FlavorText, LocalizedName, MoveSlot, NamedResource, SpriteSet, StatSlot, TypeSlot,
};
use pokebox_catalog::{CatalogClient, CatalogError, MoveRecord, PokemonRecord, SpeciesRecord};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// In-memory catalog with failure injection and call recording
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pokemon: HashMap<String, PokemonRecord>,
    species: HashMap<String, SpeciesRecord>,
    moves: HashMap<String, MoveRecord>,
    order: Vec<String>,
    broken: HashSet<String>,
    move_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creature (base + species) under its record name
    pub fn with_creature(mut self, base: PokemonRecord, species: SpeciesRecord) -> Self {
        let name = base.name.clone();
        self.order.push(name.clone());
        self.pokemon.insert(name.clone(), base);
        self.species.insert(name, species);
        self
    }

    /// Register a base record without a species record
    pub fn with_base_only(mut self, base: PokemonRecord) -> Self {
        let name = base.name.clone();
        self.order.push(name.clone());
        self.pokemon.insert(name, base);
        self
    }

    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.moves.insert(record.name.clone(), record);
        self
    }

    /// Make every request for `name` (creature, species or move) fail with a transport error
    pub fn with_broken(mut self, name: impl Into<String>) -> Self {
        self.broken.insert(name.into());
        self
    }

    /// Move names requested so far, in request order
    pub fn move_calls(&self) -> Vec<String> {
        self.move_calls.lock().clone()
    }

    fn check_broken(&self, name: &str) -> Result<(), CatalogError> {
        if self.broken.contains(name) {
            Err(CatalogError::Transport(format!("connection reset fetching {name}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn pokemon(&self, name: &str) -> Result<PokemonRecord, CatalogError> {
        self.check_broken(name)?;
        self.pokemon
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("pokemon", name))
    }

    async fn species(&self, name: &str) -> Result<SpeciesRecord, CatalogError> {
        self.check_broken(name)?;
        self.species
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("pokemon-species", name))
    }

    async fn move_record(&self, name: &str) -> Result<MoveRecord, CatalogError> {
        self.move_calls.lock().push(name.to_string());
        self.check_broken(name)?;
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("move", name))
    }

    async fn page(&self, offset: u32, limit: u32) -> Result<Vec<String>, CatalogError> {
        Ok(self
            .order
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

fn english(name: &str) -> LocalizedName {
    LocalizedName {
        name: name.to_string(),
        language: NamedResource::named("en"),
    }
}

/// `thunder-shock` → `Thunder Shock`
pub fn display_name(canonical: &str) -> String {
    canonical
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base record with the given elements, moves and a full stat block
pub fn pokemon_record(name: &str, id: u32, elements: &[&str], moves: &[&str]) -> PokemonRecord {
    let stat = |key: &str, value: i64| StatSlot {
        base_stat: value,
        stat: NamedResource::named(key),
    };

    PokemonRecord {
        id,
        name: name.to_string(),
        types: elements
            .iter()
            .enumerate()
            .map(|(i, e)| TypeSlot {
                slot: u32::try_from(i + 1).unwrap_or(u32::MAX),
                element: NamedResource::named(*e),
            })
            .collect(),
        moves: moves
            .iter()
            .map(|m| MoveSlot {
                move_ref: NamedResource::named(*m),
            })
            .collect(),
        sprites: SpriteSet {
            front_default: Some(format!("https://sprites.test/{id}.png")),
            back_default: Some(format!("https://sprites.test/back/{id}.png")),
            front_shiny: None,
            back_shiny: None,
        },
        stats: vec![
            stat("hp", 35),
            stat("attack", 55),
            stat("defense", 40),
            stat("special-attack", 50),
            stat("special-defense", 50),
            stat("speed", 90),
        ],
    }
}

/// Species record with English name and a multi-line English flavor text
pub fn species_record(name: &str) -> SpeciesRecord {
    SpeciesRecord {
        flavor_text_entries: vec![
            FlavorText {
                flavor_text: "Texte en français".to_string(),
                language: NamedResource::named("fr"),
            },
            FlavorText {
                flavor_text: format!("{} stores\nelectricity\u{c}in its cheeks.", display_name(name)),
                language: NamedResource::named("en"),
            },
        ],
        names: vec![english(&display_name(name))],
    }
}

/// Move record with an English display name
pub fn move_record(name: &str, element: &str, power: Option<i64>) -> MoveRecord {
    MoveRecord {
        name: name.to_string(),
        names: vec![english(&display_name(name))],
        power,
        element: Some(NamedResource::named(element)),
    }
}

/// Canonical names `move-1` .. `move-n`
pub fn numbered_moves(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("move-{i}")).collect()
}

/// Catalog with `name` knowing `numbered_moves(move_count)`, every move fetchable
pub fn catalog_with_moves(name: &str, id: u32, move_count: usize) -> FakeCatalog {
    let moves = numbered_moves(move_count);
    let refs: Vec<&str> = moves.iter().map(String::as_str).collect();
    let mut catalog = FakeCatalog::new().with_creature(
        pokemon_record(name, id, &["electric"], &refs),
        species_record(name),
    );
    for (i, m) in moves.iter().enumerate() {
        let power = if i % 2 == 0 { Some(40) } else { None };
        catalog = catalog.with_move(move_record(m, "normal", power));
    }
    catalog
}

/// Valid create payload
pub fn entry_payload() -> Value {
    json!({
        "createdAt": "2024-05-01T10:00:00Z",
        "level": 12,
        "location": "Viridian Forest",
        "notes": "caught at dusk",
        "pokemonId": 25
    })
}

/// Valid create payload without notes
pub fn entry_payload_without_notes() -> Value {
    json!({
        "createdAt": "2024-05-02T08:30:00+02:00",
        "level": 5,
        "location": "Route 1",
        "pokemonId": 16
    })
}
