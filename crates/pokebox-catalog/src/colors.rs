//! Element display colors

use pokebox_core::Element;

/// Color for element names not in the table
pub const FALLBACK_COLOR: &str = "#68A090";

const TYPE_COLORS: [(&str, &str); 18] = [
    ("normal", "#A8A77A"),
    ("fire", "#EE8130"),
    ("water", "#6390F0"),
    ("electric", "#F7D02C"),
    ("grass", "#7AC74C"),
    ("ice", "#96D9D6"),
    ("fighting", "#C22E28"),
    ("poison", "#A33EA1"),
    ("ground", "#E2BF65"),
    ("flying", "#A98FF3"),
    ("psychic", "#F95587"),
    ("bug", "#A6B91A"),
    ("rock", "#B6A136"),
    ("ghost", "#735797"),
    ("dragon", "#6F35FC"),
    ("dark", "#705746"),
    ("steel", "#B7B7CE"),
    ("fairy", "#D685AD"),
];

/// Display color for an element name
#[must_use]
pub fn resolve(element_name: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(element_name))
        .map_or(FALLBACK_COLOR, |&(_, color)| color)
}

/// Build the display element for an upstream element name
#[must_use]
pub fn element(element_name: &str) -> Element {
    Element {
        name: element_name.to_uppercase(),
        color: resolve(element_name).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(resolve("fire"), "#EE8130");
        assert_eq!(resolve("Water"), "#6390F0");
        assert_eq!(resolve("FAIRY"), "#D685AD");
    }

    #[test]
    fn unknown_falls_back() {
        assert_eq!(resolve("shadow"), FALLBACK_COLOR);
        assert_eq!(resolve(""), FALLBACK_COLOR);
    }

    #[test]
    fn element_is_upper_cased() {
        let el = element("grass");
        assert_eq!(el.name, "GRASS");
        assert_eq!(el.color, "#7AC74C");
    }
}
