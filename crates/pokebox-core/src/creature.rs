//! Composite creature types
//!
//! These are the UI-facing shapes built by the catalog aggregator. They are
//! rebuilt on every request and never persisted.

use serde::{Deserialize, Serialize};

/// Creature element (type) with its display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Upper-cased display name
    pub name: String,
    /// Hex color, e.g. `#EE8130`
    pub color: String,
}

/// A move the creature can learn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Localized display name
    pub name: String,
    /// Base power, only present when upstream reports a positive value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
    /// Element of the move
    #[serde(rename = "type")]
    pub element: Element,
}

/// Sprite URLs, each `null` when the catalog has none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
}

/// Base stats; absent upstream stats are reported as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

/// Composite creature record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Upstream catalog id
    pub id: u32,
    /// Localized display name
    pub name: String,
    /// Single-line flavor text
    pub description: String,
    /// Elements in upstream declaration order
    pub elements: Vec<Element>,
    /// Successfully fetched moves, upstream order preserved
    pub abilities: Vec<Ability>,
    pub sprites: Sprites,
    pub stats: Stats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fire() -> Element {
        Element {
            name: "FIRE".to_string(),
            color: "#EE8130".to_string(),
        }
    }

    #[test]
    fn ability_without_power_omits_field() {
        let ability = Ability {
            name: "Growl".to_string(),
            power: None,
            element: fire(),
        };

        let value = serde_json::to_value(&ability).unwrap();
        assert!(value.get("power").is_none());
        assert_eq!(value["type"]["name"], "FIRE");
    }

    #[test]
    fn sprites_serialize_missing_as_null() {
        let sprites = Sprites {
            front_default: Some("https://img/front.png".to_string()),
            ..Sprites::default()
        };

        let value = serde_json::to_value(&sprites).unwrap();
        assert_eq!(
            value,
            json!({
                "frontDefault": "https://img/front.png",
                "backDefault": null,
                "frontShiny": null,
                "backShiny": null,
            })
        );
    }

    #[test]
    fn stats_use_camel_case() {
        let stats = Stats {
            special_attack: 65,
            ..Stats::default()
        };

        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["specialAttack"], 65);
        assert_eq!(value["specialDefense"], 0);
    }
}
