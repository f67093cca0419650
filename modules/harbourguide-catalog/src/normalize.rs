//! Record normalization.
//!
//! Maps one row/feature from each of the three source shapes onto a canonical
//! [`Place`]. Rows whose coordinates do not parse as finite numbers yield `None`
//! and are dropped silently; garbage rows are expected in open datasets.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use sha2::{Digest, Sha256};

use harbourguide_common::{Place, PlaceSource};

static RE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

const OUTDOOR: &str = "outdoor";

// --- Raw shapes ---

/// One unnormalized record, tagged with the dataset it came from.
#[derive(Debug, Clone)]
pub enum RawRecord {
    /// CSV row keyed by header name.
    Tabular(BTreeMap<String, String>),
    /// GeoJSON feature; fields live under `properties`.
    Park(Value),
    /// Flat per-route record.
    Fitness(Value),
}

/// Normalize one raw record. `None` means the record has unusable coordinates.
pub fn normalize(raw: &RawRecord) -> Option<Place> {
    match raw {
        RawRecord::Tabular(row) => normalize_tabular(row),
        RawRecord::Park(feature) => normalize_park(feature),
        RawRecord::Fitness(record) => normalize_fitness(record),
    }
}

// --- Per-source mappings ---

fn normalize_tabular(row: &BTreeMap<String, String>) -> Option<Place> {
    let field = |keys: &[&str]| -> Option<String> {
        keys.iter()
            .filter_map(|k| row.get(*k))
            .find(|v| !v.trim().is_empty())
            .cloned()
    };

    let latitude = row.get("Latitude").and_then(|v| parse_coord_str(v))?;
    let longitude = row.get("Longitude").and_then(|v| parse_coord_str(v))?;

    let name = field(&["Attraction", "Name"]);
    let description = field(&["Description", "FacilityType"]).unwrap_or_default();
    let address = field(&["Address"]).unwrap_or_default();

    let id_body = match &name {
        Some(name) => name.clone(),
        None => fallback_token(&[&address, &description], latitude, longitude),
    };

    Some(Place {
        id: format!("{}-{}", PlaceSource::Tabular.id_prefix(), id_body),
        source: PlaceSource::Tabular,
        name: name.unwrap_or_default(),
        description: clean_markup(&description),
        address,
        latitude,
        longitude,
        website: field(&["Website", "WebsiteEN"]),
        category: field(&["Type"]).map(|t| t.trim().to_lowercase()),
    })
}

fn normalize_park(feature: &Value) -> Option<Place> {
    let empty = Value::Object(Default::default());
    let props = feature
        .get("properties")
        .filter(|p| p.is_object())
        .unwrap_or(&empty);

    let latitude = props.get("LATITUDE").and_then(parse_coord)?;
    let longitude = props.get("LONGITUDE").and_then(parse_coord)?;

    let name = text_field(props, &["NameEN", "DATASET_EN"]).unwrap_or_else(|| "Park".to_string());
    let description = text_field(props, &["FacilityTypeEN"]).unwrap_or_default();
    let address = text_field(props, &["AddressEN"]).unwrap_or_default();

    let id_body = match text_field(props, &["OBJECTID"]) {
        Some(object_id) => object_id,
        None => fallback_token(&[&name, &address], latitude, longitude),
    };

    Some(Place {
        id: format!("{}-{}", PlaceSource::Park.id_prefix(), id_body),
        source: PlaceSource::Park,
        name,
        description: clean_markup(&description),
        address,
        latitude,
        longitude,
        website: text_field(props, &["WebsiteEN"]),
        category: Some(OUTDOOR.to_string()),
    })
}

fn normalize_fitness(record: &Value) -> Option<Place> {
    // Feature-collection payloads wrap the flat record in `properties`.
    let fields = record
        .get("properties")
        .filter(|p| p.is_object())
        .unwrap_or(record);

    let latitude = fields.get("Latitude").and_then(parse_coord)?;
    let longitude = fields.get("Longitude").and_then(parse_coord)?;

    let title = text_field(fields, &["Title_en"]);
    let route = text_field(fields, &["Route_en"]).unwrap_or_default();
    let address = text_field(fields, &["HowToAccess_en"]).unwrap_or_default();

    let id_body = match &title {
        Some(title) => slugify(title),
        None => fallback_token(&[&route, &address], latitude, longitude),
    };

    Some(Place {
        id: format!("{}-{}", PlaceSource::Fitness.id_prefix(), id_body),
        source: PlaceSource::Fitness,
        name: title.unwrap_or_default(),
        description: clean_markup(&route),
        address,
        latitude,
        longitude,
        website: text_field(fields, &["MapURL_en"]),
        category: Some(OUTDOOR.to_string()),
    })
}

// --- Field helpers ---

/// First of `keys` holding a non-blank string or a number.
fn text_field(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn parse_coord(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_coord_str(s),
        _ => None,
    }
}

fn parse_coord_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Line breaks become spaces; any other tag is removed.
pub fn clean_markup(text: &str) -> String {
    let spaced = RE_LINE_BREAK.replace_all(text, " ");
    RE_TAG.replace_all(&spaced, "").into_owned()
}

/// Lower-case, whitespace runs collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Deterministic stand-in for a missing natural id: the first 8 hex chars of a
/// SHA-256 over the record's remaining content.
fn fallback_token(parts: &[&str], latitude: f64, longitude: f64) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0x1f]);
    }
    hasher.update(latitude.to_le_bytes());
    hasher.update(longitude.to_le_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..8].to_string()
}
