//! Static destination catalog
//!
//! The catalog is the only source of place coordinates: names are trimmed and
//! lowercased, then matched exactly against each destination's display name
//! and aliases. Browsing and search work on the same table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::TravelMapError;
use crate::models::Coordinate;

/// World region a destination belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Usa,
    Europe,
    Asia,
    MiddleEast,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Usa,
        Region::Europe,
        Region::Asia,
        Region::MiddleEast,
        Region::Oceania,
    ];
}

impl FromStr for Region {
    type Err = TravelMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s).replace(['-', '_'], " ");
        Region::ALL
            .into_iter()
            .find(|region| region.to_string().to_lowercase() == wanted)
            .ok_or_else(|| {
                TravelMapError::validation(format!(
                    "unknown region '{s}', expected one of: usa, europe, asia, middle-east, oceania"
                ))
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Usa => "USA",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::MiddleEast => "Middle East",
            Region::Oceania => "Oceania",
        };
        f.write_str(name)
    }
}

/// A browsable destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub name: &'static str,
    /// Extra lookup names, already normalized
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    pub region: Region,
    pub description: &'static str,
    pub coordinate: Coordinate,
}

impl Destination {
    /// Whether a normalized name refers to this destination
    fn answers_to(&self, normalized: &str) -> bool {
        self.name.to_lowercase() == normalized || self.aliases.iter().any(|alias| *alias == normalized)
    }
}

const fn destination(
    name: &'static str,
    aliases: &'static [&'static str],
    region: Region,
    description: &'static str,
    latitude: f64,
    longitude: f64,
) -> Destination {
    Destination {
        name,
        aliases,
        region,
        description,
        coordinate: Coordinate::new(latitude, longitude),
    }
}

static DESTINATIONS: [Destination; 19] = [
    destination("New York City", &["new york"], Region::Usa, "Times Square, Central Park, Statue of Liberty", 40.7128, -74.0060),
    destination("Los Angeles", &[], Region::Usa, "Hollywood, Beverly Hills, Santa Monica Pier", 34.0522, -118.2437),
    destination("Miami Beach", &[], Region::Usa, "South Beach, Art Deco District, Ocean Drive", 25.7617, -80.1918),
    destination("Las Vegas", &[], Region::Usa, "The Strip, Fremont Street, Grand Canyon", 36.1699, -115.1398),
    destination("Paris", &[], Region::Europe, "Eiffel Tower, Louvre Museum, Notre-Dame", 48.8566, 2.3522),
    destination("London", &[], Region::Europe, "Big Ben, Buckingham Palace, Tower Bridge", 51.5074, -0.1278),
    destination("Rome", &[], Region::Europe, "Colosseum, Vatican City, Trevi Fountain", 41.9028, 12.4964),
    destination("Madrid", &[], Region::Europe, "Prado Museum, Plaza Mayor, Royal Palace", 40.4168, -3.7038),
    destination("Berlin", &[], Region::Europe, "Brandenburg Gate, Berlin Wall, Museum Island", 52.5200, 13.4050),
    destination("Vienna", &[], Region::Europe, "Schönbrunn Palace, St. Stephen's Cathedral", 48.2082, 16.3738),
    destination("Tokyo", &[], Region::Asia, "Shibuya Crossing, Senso-ji Temple, Tokyo Tower", 35.6762, 139.6503),
    destination("Hong Kong", &[], Region::Asia, "Victoria Peak, Tsim Sha Tsui, Lantau Island", 22.3193, 114.1694),
    destination("Singapore", &[], Region::Asia, "Marina Bay Sands, Gardens by the Bay, Sentosa", 1.3521, 103.8198),
    destination("Bangkok", &[], Region::Asia, "Grand Palace, Wat Phra Kaew, Chatuchak Market", 13.7563, 100.5018),
    destination("Dubai", &[], Region::MiddleEast, "Burj Khalifa, Palm Jumeirah, Dubai Mall", 25.2048, 55.2708),
    destination("Mecca", &[], Region::MiddleEast, "Kaaba, Masjid al-Haram, Mount Arafat", 21.4225, 39.8262),
    destination("Sydney", &[], Region::Oceania, "Sydney Opera House, Bondi Beach, Harbour Bridge", -33.8688, 151.2093),
    destination("Melbourne", &[], Region::Oceania, "Federation Square, Great Ocean Road, Yarra Valley", -37.8136, 144.9631),
    destination("Auckland", &[], Region::Oceania, "Sky Tower, Waiheke Island, Waitakere Ranges", -36.8485, 174.7633),
];

/// Trim and lowercase a place name for lookup
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read-only view over the static destination table
#[derive(Debug, Clone, Copy)]
pub struct LocationCatalog {
    entries: &'static [Destination],
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: &DESTINATIONS,
        }
    }

    /// Coordinate for a place name, or `None` when the name is not in the catalog
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Coordinate> {
        let found = self.get(name).map(|d| d.coordinate);
        debug!(name, found = found.is_some(), "Catalog lookup");
        found
    }

    /// The destination a place name refers to
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static Destination> {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return None;
        }
        self.entries.iter().find(|d| d.answers_to(&normalized))
    }

    /// All destinations in catalog order
    #[must_use]
    pub fn destinations(&self) -> &'static [Destination] {
        self.entries
    }

    /// Destinations of one region in catalog order
    pub fn by_region(&self, region: Region) -> impl Iterator<Item = &'static Destination> {
        self.entries.iter().filter(move |d| d.region == region)
    }

    /// Destinations whose display name contains the query, ignoring case
    pub fn search(&self, query: &str) -> crate::Result<Vec<&'static Destination>> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Err(TravelMapError::empty_input("query"));
        }

        let hits: Vec<_> = self
            .entries
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .collect();
        debug!(query, hits = hits.len(), "Catalog search");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case("Paris")]
    #[case(" paris ")]
    #[case("PARIS")]
    #[case("\tParis\n")]
    fn test_resolve_normalizes(#[case] input: &str) {
        let catalog = LocationCatalog::new();
        assert_eq!(catalog.resolve(input), Some(Coordinate::new(48.8566, 2.3522)));
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let catalog = LocationCatalog::new();
        assert_eq!(catalog.resolve("Atlantis"), None);
        assert_eq!(catalog.resolve(""), None);
        assert_eq!(catalog.resolve("   "), None);
    }

    #[test]
    fn test_resolve_requires_exact_match() {
        let catalog = LocationCatalog::new();
        assert_eq!(catalog.resolve("Pari"), None);
        assert_eq!(catalog.resolve("Paris France"), None);
    }

    #[test]
    fn test_new_york_aliases() {
        let catalog = LocationCatalog::new();
        let expected = Some(Coordinate::new(40.7128, -74.0060));
        assert_eq!(catalog.resolve("New York"), expected);
        assert_eq!(catalog.resolve("new york city"), expected);
    }

    #[test]
    fn test_names_unique_under_normalization() {
        let catalog = LocationCatalog::new();
        let mut seen = HashSet::new();
        for destination in catalog.destinations() {
            assert!(seen.insert(normalize(destination.name)));
            for alias in destination.aliases {
                assert_eq!(*alias, normalize(alias));
                assert!(seen.insert((*alias).to_string()));
            }
        }
        assert_eq!(catalog.destinations().len(), 19);
    }

    #[test]
    fn test_catalog_coordinates_are_valid() {
        for destination in LocationCatalog::new().destinations() {
            assert!(destination.coordinate.is_valid(), "{}", destination.name);
        }
    }

    #[test]
    fn test_every_region_is_populated() {
        let catalog = LocationCatalog::new();
        for region in Region::ALL {
            assert!(catalog.by_region(region).count() > 0, "{region}");
        }
        let europe: Vec<_> = catalog.by_region(Region::Europe).map(|d| d.name).collect();
        assert_eq!(
            europe,
            ["Paris", "London", "Rome", "Madrid", "Berlin", "Vienna"]
        );
    }

    #[rstest]
    #[case("usa", Region::Usa)]
    #[case("Middle East", Region::MiddleEast)]
    #[case("middle-east", Region::MiddleEast)]
    #[case(" OCEANIA ", Region::Oceania)]
    fn test_region_from_str(#[case] input: &str, #[case] expected: Region) {
        assert_eq!(input.parse::<Region>().unwrap(), expected);
    }

    #[test]
    fn test_region_from_str_unknown() {
        assert!("antarctica".parse::<Region>().is_err());
    }

    #[test]
    fn test_search_substring_ignores_case() {
        let catalog = LocationCatalog::new();
        let hits = catalog.search("ON").unwrap();
        let names: Vec<_> = hits.iter().map(|d| d.name).collect();
        assert_eq!(names, ["London", "Hong Kong"]);
    }

    #[test]
    fn test_search_miss_and_empty_query() {
        let catalog = LocationCatalog::new();
        assert!(catalog.search("Atlantis").unwrap().is_empty());
        assert!(matches!(
            catalog.search("  "),
            Err(TravelMapError::EmptyInput { .. })
        ));
    }
}
