use std::collections::BTreeMap;
use std::path::Path;

use harbourguide_common::{GeoPoint, HarbourGuideError};

/// Built-in district centres. Several aliases may share one coordinate.
const HONG_KONG_DISTRICTS: &[(&str, f64, f64)] = &[
    ("mong kok", 22.318, 114.1708),
    ("mongkok", 22.318, 114.1708),
    ("kowloon", 22.3193, 114.1694),
    ("central", 22.2819, 114.158),
    ("tsim sha tsui", 22.2976, 114.1722),
    ("causeway bay", 22.2803, 114.1849),
    ("wan chai", 22.2776, 114.1751),
    ("yau ma tei", 22.3126, 114.1707),
    ("sham shui po", 22.3307, 114.1622),
    ("sheung wan", 22.2866, 114.1502),
    ("admiralty", 22.2793, 114.1651),
];

/// Static mapping from lower-cased place-name alias to a coordinate.
///
/// Aliases are held in a `BTreeMap`, so iteration is lexicographic by alias.
/// That order is the tie-break when several aliases occur in one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Gazetteer {
    entries: BTreeMap<String, GeoPoint>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::hong_kong()
    }
}

impl Gazetteer {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, GeoPoint)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(alias, point)| (alias.as_ref().trim().to_lowercase(), point))
                .filter(|(alias, point)| !alias.is_empty() && point.is_valid())
                .collect(),
        }
    }

    pub fn hong_kong() -> Self {
        Self::new(
            HONG_KONG_DISTRICTS
                .iter()
                .map(|(alias, lat, lon)| (*alias, GeoPoint::new(*lat, *lon))),
        )
    }

    /// Parse a JSON object of `alias -> {"lat": .., "lon": ..}`.
    pub fn from_json(raw: &str) -> Result<Self, HarbourGuideError> {
        let entries: BTreeMap<String, GeoPoint> = serde_json::from_str(raw)
            .map_err(|e| HarbourGuideError::malformed("gazetteer", e))?;
        Ok(Self::new(entries))
    }

    pub fn from_file(path: &Path) -> Result<Self, HarbourGuideError> {
        let raw = std::fs::read_to_string(path).map_err(|source| HarbourGuideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn get(&self, alias: &str) -> Option<GeoPoint> {
        self.entries.get(alias).copied()
    }

    /// Aliases with their coordinates, in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, GeoPoint)> {
        self.entries.iter().map(|(alias, point)| (alias.as_str(), *point))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_aliases_share_coordinates() {
        let g = Gazetteer::hong_kong();
        assert_eq!(g.get("mong kok"), g.get("mongkok"));
        assert_eq!(g.get("central"), Some(GeoPoint::new(22.2819, 114.158)));
        assert_eq!(g.len(), HONG_KONG_DISTRICTS.len());
    }

    #[test]
    fn iteration_is_lexicographic() {
        let g = Gazetteer::hong_kong();
        let aliases: Vec<&str> = g.iter().map(|(a, _)| a).collect();
        let mut sorted = aliases.clone();
        sorted.sort_unstable();
        assert_eq!(aliases, sorted);
        assert_eq!(aliases.first(), Some(&"admiralty"));
    }

    #[test]
    fn from_json_lowercases_and_skips_blank_aliases() {
        let g = Gazetteer::from_json(
            r#"{"Stanley": {"lat": 22.2187, "lon": 114.2131}, " ": {"lat": 1.0, "lon": 1.0}}"#,
        )
        .unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(g.get("stanley"), Some(GeoPoint::new(22.2187, 114.2131)));
    }

    #[test]
    fn from_json_rejects_non_object() {
        assert!(matches!(
            Gazetteer::from_json("[]"),
            Err(HarbourGuideError::MalformedPayload { dataset: "gazetteer", .. })
        ));
    }
}
