//! Arena descriptors
//!
//! Purely visual: the physics only ever sees the arena's width and height,
//! never which arena was picked.

use serde::Serialize;

/// Ambient effect drawn over the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    /// Speckled dirt texture
    Dust,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    pub id: &'static str,
    pub name: &'static str,
    pub ground_color: &'static str,
    /// Sky gradient, top then bottom
    pub sky_colors: [&'static str; 2],
    pub grass_blades: bool,
    pub weather: Weather,
}

pub const ARENAS: &[Arena] = &[
    Arena {
        id: "grassField",
        name: "Grass Field",
        ground_color: "#4a7c2c",
        sky_colors: ["#87CEEB", "#4A90E2"],
        grass_blades: true,
        weather: Weather::Clear,
    },
    Arena {
        id: "dirtPatch",
        name: "Dirt Patch",
        ground_color: "#8B6914",
        sky_colors: ["#CD853F", "#8B6914"],
        grass_blades: false,
        weather: Weather::Dust,
    },
    Arena {
        id: "leafArena",
        name: "Leaf Arena",
        ground_color: "#6B8E23",
        sky_colors: ["#90EE90", "#228B22"],
        grass_blades: true,
        weather: Weather::Clear,
    },
];

pub const DEFAULT_ARENA: &str = "grassField";

pub fn arena_by_id(id: &str) -> Option<&'static Arena> {
    ARENAS.iter().find(|arena| arena.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(arena_by_id("leafArena").map(|a| a.name), Some("Leaf Arena"));
        assert!(arena_by_id(DEFAULT_ARENA).is_some());
        assert!(arena_by_id("moon").is_none());
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in ARENAS.iter().enumerate() {
            assert!(ARENAS[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_serializes_for_front_end() {
        let json = serde_json::to_value(&ARENAS[1]).unwrap();
        assert_eq!(json["groundColor"], "#8B6914");
        assert_eq!(json["weather"], "dust");
    }
}
