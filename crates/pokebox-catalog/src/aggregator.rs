//! Composite creature aggregation
//!
//! Fans out to the upstream catalog and merges the answers into one
//! [`Creature`]:
//! - base and species records are fetched concurrently; either failing fails the call
//! - up to [`MOVE_CANDIDATE_LIMIT`] move records are fetched concurrently; each
//!   failure only drops that move
//! - the page variant aggregates every name of an upstream page concurrently
//!   and is all-or-nothing

use crate::client::CatalogClient;
use crate::colors;
use crate::error::CatalogError;
use crate::records::{MoveRecord, PokemonRecord, SpeciesRecord};
use futures::future::{join_all, try_join_all};
use pokebox_core::{Ability, Creature, Sprites, Stats};
use std::fmt;
use std::sync::Arc;

/// Number of upstream move references considered per creature
pub const MOVE_CANDIDATE_LIMIT: usize = 10;

/// Description used when the species has no English flavor text
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// Element name used when a move record has no type
const UNKNOWN_ELEMENT: &str = "unknown";

/// Builds composite creature records from the upstream catalog
#[derive(Clone)]
pub struct CatalogAggregator {
    client: Arc<dyn CatalogClient>,
}

impl CatalogAggregator {
    /// Create aggregator over a shared catalog client
    #[inline]
    #[must_use]
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Aggregate one creature by canonical name
    ///
    /// # Errors
    /// - `CatalogError::NotFound` if the base or species record does not exist
    /// - any other `CatalogError` from the base or species fetch
    ///
    /// Move fetch failures are never returned.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch_creature(&self, name: &str) -> Result<Creature, CatalogError> {
        let canonical = name.trim().to_lowercase();
        if canonical.is_empty() {
            return Err(CatalogError::not_found("pokemon", canonical));
        }

        let (base, species) = futures::try_join!(
            self.client.pokemon(&canonical),
            self.client.species(&canonical)
        )?;

        let abilities = self.fetch_abilities(&base).await;
        tracing::debug!(
            id = base.id,
            abilities = abilities.len(),
            "aggregated creature"
        );

        Ok(assemble(&canonical, &base, &species, abilities))
    }

    /// Aggregate a page of creatures
    ///
    /// Result order follows the upstream page. If any single creature fails
    /// the whole page fails.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Vec<Creature>, CatalogError> {
        let names = self.client.page(offset, limit).await?;
        tracing::debug!(count = names.len(), "aggregating page");

        try_join_all(names.iter().map(|name| self.fetch_creature(name))).await
    }

    /// Fetch the first move candidates concurrently, keeping successes in order
    async fn fetch_abilities(&self, base: &PokemonRecord) -> Vec<Ability> {
        let fetches = base
            .move_names()
            .take(MOVE_CANDIDATE_LIMIT)
            .map(|move_name| async move {
                let result = self.client.move_record(move_name).await;
                (move_name, result)
            });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(move_name, result)| match result {
                Ok(record) => Some(build_ability(move_name, &record)),
                Err(err) => {
                    tracing::debug!(move_name, error = %err, "dropping move");
                    None
                }
            })
            .collect()
    }
}

impl fmt::Debug for CatalogAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogAggregator").finish_non_exhaustive()
    }
}

fn assemble(
    canonical: &str,
    base: &PokemonRecord,
    species: &SpeciesRecord,
    abilities: Vec<Ability>,
) -> Creature {
    let description = species
        .english_flavor_text()
        .map_or_else(|| DESCRIPTION_PLACEHOLDER.to_string(), single_line);

    Creature {
        id: base.id,
        name: species.english_name().unwrap_or(canonical).to_string(),
        description,
        elements: base
            .types
            .iter()
            .map(|slot| colors::element(&slot.element.name))
            .collect(),
        abilities,
        sprites: Sprites {
            front_default: base.sprites.front_default.clone(),
            back_default: base.sprites.back_default.clone(),
            front_shiny: base.sprites.front_shiny.clone(),
            back_shiny: base.sprites.back_shiny.clone(),
        },
        stats: Stats {
            hp: base.base_stat("hp"),
            attack: base.base_stat("attack"),
            defense: base.base_stat("defense"),
            special_attack: base.base_stat("special-attack"),
            special_defense: base.base_stat("special-defense"),
            speed: base.base_stat("speed"),
        },
    }
}

fn build_ability(canonical: &str, record: &MoveRecord) -> Ability {
    let element_name = record
        .element
        .as_ref()
        .map(|e| e.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_ELEMENT);

    Ability {
        name: record.english_name().unwrap_or(canonical).to_string(),
        power: record.positive_power(),
        element: colors::element(element_name),
    }
}

/// Flavor text arrives with form feeds and hard line breaks
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{LocalizedName, NamedResource};

    #[test]
    fn single_line_replaces_control_characters() {
        assert_eq!(
            single_line("When several of\nthese POKéMON\u{c}gather"),
            "When several of these POKéMON gather"
        );
        assert_eq!(single_line("a\r\nb"), "a  b");
    }

    #[test]
    fn ability_falls_back_to_canonical_name() {
        let record = MoveRecord {
            name: "thunder-shock".to_string(),
            names: vec![LocalizedName {
                name: "Éclair".to_string(),
                language: NamedResource::named("fr"),
            }],
            power: Some(40),
            element: Some(NamedResource::named("electric")),
        };

        let ability = build_ability("thunder-shock", &record);
        assert_eq!(ability.name, "thunder-shock");
        assert_eq!(ability.power, Some(40));
        assert_eq!(ability.element.name, "ELECTRIC");
    }

    #[test]
    fn ability_without_type_uses_fallback_color() {
        let ability = build_ability("struggle", &MoveRecord::default());
        assert_eq!(ability.element.name, "UNKNOWN");
        assert_eq!(ability.element.color, colors::FALLBACK_COLOR);
        assert_eq!(ability.power, None);
    }

    #[test]
    fn assemble_uses_placeholders() {
        let creature = assemble(
            "missingno",
            &PokemonRecord {
                id: 0,
                ..PokemonRecord::default()
            },
            &SpeciesRecord::default(),
            Vec::new(),
        );

        assert_eq!(creature.name, "missingno");
        assert_eq!(creature.description, DESCRIPTION_PLACEHOLDER);
        assert_eq!(creature.stats, Stats::default());
        assert_eq!(creature.sprites, Sprites::default());
    }
}
