//! Upstream record views
//!
//! Narrow read-only views over the catalog's JSON. Every field is optional or
//! defaulted; the accessors here encode the fallback rules so the aggregator
//! never has to assume presence.

use serde::{Deserialize, Serialize};

/// Language tag used for display strings
pub const DISPLAY_LANGUAGE: &str = "en";

/// `{ name, url }` reference to another catalog resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NamedResource {
    /// Reference by name only
    #[inline]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// Localized display name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language: NamedResource,
}

/// Localized flavor text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub language: NamedResource,
}

/// Element slot on a creature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type", default)]
    pub element: NamedResource,
}

/// Move reference on a creature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move", default)]
    pub move_ref: NamedResource,
}

/// Base stat entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    #[serde(default)]
    pub base_stat: i64,
    #[serde(default)]
    pub stat: NamedResource,
}

/// Sprite URLs as reported upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
}

/// Base creature record (`/pokemon/{name}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub sprites: SpriteSet,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

impl PokemonRecord {
    /// Base stat by upstream key, 0 when absent or negative
    #[must_use]
    pub fn base_stat(&self, key: &str) -> u32 {
        self.stats
            .iter()
            .find(|s| s.stat.name == key)
            .and_then(|s| u32::try_from(s.base_stat).ok())
            .unwrap_or(0)
    }

    /// Canonical move names in upstream order
    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(|m| m.move_ref.name.as_str())
    }
}

/// Species record (`/pokemon-species/{name}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

impl SpeciesRecord {
    /// First English flavor text
    #[must_use]
    pub fn english_flavor_text(&self) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|e| e.language.name == DISPLAY_LANGUAGE)
            .map(|e| e.flavor_text.as_str())
    }

    /// First English display name
    #[must_use]
    pub fn english_name(&self) -> Option<&str> {
        english_name(&self.names)
    }
}

/// Move record (`/move/{name}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub power: Option<i64>,
    #[serde(rename = "type", default)]
    pub element: Option<NamedResource>,
}

impl MoveRecord {
    /// First English display name
    #[must_use]
    pub fn english_name(&self) -> Option<&str> {
        english_name(&self.names)
    }

    /// Power, only when strictly positive
    #[must_use]
    pub fn positive_power(&self) -> Option<u32> {
        self.power
            .filter(|p| *p > 0)
            .and_then(|p| u32::try_from(p).ok())
    }
}

/// Page of names (`/pokemon?offset=&limit=`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePage {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

fn english_name(names: &[LocalizedName]) -> Option<&str> {
    names
        .iter()
        .find(|n| n.language.name == DISPLAY_LANGUAGE)
        .map(|n| n.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_pokemon_record_decodes() {
        let record: PokemonRecord = serde_json::from_value(json!({ "id": 25 })).unwrap();
        assert_eq!(record.id, 25);
        assert!(record.types.is_empty());
        assert_eq!(record.sprites.front_default, None);
        assert_eq!(record.base_stat("hp"), 0);
    }

    #[test]
    fn pokemon_record_decodes_upstream_shape() {
        let record: PokemonRecord = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "types": [
                { "slot": 1, "type": { "name": "grass", "url": "https://x/type/12/" } },
                { "slot": 2, "type": { "name": "poison", "url": "https://x/type/4/" } }
            ],
            "moves": [{ "move": { "name": "razor-wind" }, "version_group_details": [] }],
            "sprites": { "front_default": "https://img/1.png", "back_default": null, "other": {} },
            "stats": [{ "base_stat": 45, "effort": 0, "stat": { "name": "hp" } }],
            "height": 7
        }))
        .unwrap();

        assert_eq!(record.types[1].element.name, "poison");
        assert_eq!(record.move_names().collect::<Vec<_>>(), vec!["razor-wind"]);
        assert_eq!(record.sprites.front_default.as_deref(), Some("https://img/1.png"));
        assert_eq!(record.base_stat("hp"), 45);
        assert_eq!(record.base_stat("speed"), 0);
    }

    #[test]
    fn english_entries_picked_first() {
        let species: SpeciesRecord = serde_json::from_value(json!({
            "flavor_text_entries": [
                { "flavor_text": "Une graine", "language": { "name": "fr" } },
                { "flavor_text": "A strange seed", "language": { "name": "en" } },
                { "flavor_text": "Second english", "language": { "name": "en" } }
            ],
            "names": [{ "name": "Bulbizarre", "language": { "name": "fr" } }]
        }))
        .unwrap();

        assert_eq!(species.english_flavor_text(), Some("A strange seed"));
        assert_eq!(species.english_name(), None);
    }

    #[test]
    fn move_power_only_when_positive() {
        let mut record = MoveRecord {
            power: Some(40),
            ..MoveRecord::default()
        };
        assert_eq!(record.positive_power(), Some(40));

        record.power = Some(0);
        assert_eq!(record.positive_power(), None);

        record.power = None;
        assert_eq!(record.positive_power(), None);
    }

    #[test]
    fn move_record_null_power() {
        let record: MoveRecord = serde_json::from_value(json!({
            "name": "growl",
            "power": null,
            "type": { "name": "normal" }
        }))
        .unwrap();
        assert_eq!(record.positive_power(), None);
        assert_eq!(record.element.unwrap().name, "normal");
    }
}
