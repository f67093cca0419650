//! Raw dataset payloads and their container-level parsing.
//!
//! Only the container shape is validated here (CSV with a header row, a JSON
//! object, a JSON array). Individual rows are never rejected at this stage.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use harbourguide_common::HarbourGuideError;

use crate::normalize::RawRecord;

pub const TABULAR_FILE: &str = "tourism1.csv";
pub const PARK_FILE: &str = "park.json";
pub const FITNESS_FILE: &str = "facility.json";

const PREVIEW_CHARS: usize = 200;

/// The three raw dataset payloads as read from disk.
#[derive(Debug, Clone, Default)]
pub struct DatasetPayloads {
    pub tabular: String,
    pub parks: String,
    pub fitness: String,
}

impl DatasetPayloads {
    /// Read `tourism1.csv`, `park.json` and `facility.json` from `dir`.
    pub fn read_dir(dir: &Path) -> Result<Self, HarbourGuideError> {
        info!(dir = %dir.display(), "Loading datasets");
        Ok(Self {
            tabular: read_file(&dir.join(TABULAR_FILE))?,
            parks: read_file(&dir.join(PARK_FILE))?,
            fitness: read_file(&dir.join(FITNESS_FILE))?,
        })
    }
}

fn read_file(path: &Path) -> Result<String, HarbourGuideError> {
    let raw = fs::read_to_string(path).map_err(|source| HarbourGuideError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        preview = %raw.chars().take(PREVIEW_CHARS).collect::<String>(),
        "Read dataset file"
    );
    Ok(raw)
}

/// Parse the attractions CSV. Ragged rows are accepted; columns a row lacks are
/// absent from its map.
pub fn parse_tabular(raw: &str) -> Result<Vec<RawRecord>, HarbourGuideError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| HarbourGuideError::malformed("tabular", e))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| HarbourGuideError::malformed("tabular", e))?;
        let row: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(RawRecord::Tabular(row));
    }
    Ok(rows)
}

/// Parse the parks feature collection. A document without `features` holds no parks.
pub fn parse_parks(raw: &str) -> Result<Vec<RawRecord>, HarbourGuideError> {
    let doc: Value =
        serde_json::from_str(raw.trim()).map_err(|e| HarbourGuideError::malformed("park", e))?;
    let Value::Object(obj) = doc else {
        return Err(HarbourGuideError::malformed("park", "expected a JSON object"));
    };
    Ok(features(&obj).into_iter().map(RawRecord::Park).collect())
}

/// Parse the fitness routes: a bare array, or an object carrying `features`.
pub fn parse_fitness(raw: &str) -> Result<Vec<RawRecord>, HarbourGuideError> {
    let doc: Value = serde_json::from_str(raw.trim())
        .map_err(|e| HarbourGuideError::malformed("fitness", e))?;
    let records = match doc {
        Value::Array(items) => items,
        Value::Object(obj) => features(&obj),
        _ => {
            return Err(HarbourGuideError::malformed(
                "fitness",
                "expected a JSON array or object",
            ))
        }
    };
    Ok(records.into_iter().map(RawRecord::Fitness).collect())
}

fn features(obj: &serde_json::Map<String, Value>) -> Vec<Value> {
    match obj.get("features") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
