use std::collections::HashMap;

use tracing::{debug, info};

use harbourguide_common::{HarbourGuideError, Place, Pool};

use crate::normalize::{normalize, RawRecord};
use crate::payload::{parse_fitness, parse_parks, parse_tabular, DatasetPayloads};

/// Immutable, process-lifetime collection of normalized places.
///
/// Built once at startup; afterwards it is only read, so any number of
/// retrievals can share it behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    general: Vec<Place>,
    fitness: Vec<Place>,
}

/// Per-dataset ingestion counts, logged at startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub rows: usize,
    pub kept: usize,
    pub dropped: usize,
}

impl Catalog {
    /// Parse and normalize all three payloads. Fails only when a payload is not
    /// its expected container shape.
    pub fn build(payloads: &DatasetPayloads) -> Result<Self, HarbourGuideError> {
        let tabular = parse_tabular(&payloads.tabular)?;
        let parks = parse_parks(&payloads.parks)?;
        let fitness = parse_fitness(&payloads.fitness)?;

        let (tabular, tabular_stats) = normalize_all(&tabular);
        let (parks, park_stats) = normalize_all(&parks);
        let (fitness, fitness_stats) = normalize_all(&fitness);

        for (dataset, stats) in [
            ("tabular", tabular_stats),
            ("park", park_stats),
            ("fitness", fitness_stats),
        ] {
            info!(
                dataset,
                rows = stats.rows,
                kept = stats.kept,
                dropped = stats.dropped,
                "Normalized dataset"
            );
        }

        Ok(Self::from_places(
            tabular.into_iter().chain(parks).collect(),
            fitness,
        ))
    }

    /// Assemble a catalog from already-normalized places. Places with
    /// non-finite coordinates are discarded and duplicate ids are suffixed
    /// (`-2`, `-3`, ...) in input order so every id is unique catalog-wide.
    pub fn from_places(general: Vec<Place>, fitness: Vec<Place>) -> Self {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut admit = |places: Vec<Place>| -> Vec<Place> {
            places
                .into_iter()
                .filter(|p| p.location().is_valid())
                .map(|mut p| {
                    p.id = unique_id(&mut seen, &p.id);
                    p
                })
                .collect()
        };

        let general = admit(general);
        let fitness = admit(fitness);
        Self { general, fitness }
    }

    /// Read-only view of one partition.
    pub fn pool(&self, pool: Pool) -> &[Place] {
        match pool {
            Pool::Attractions => &self.general,
            Pool::Fitness => &self.fitness,
        }
    }

    pub fn len(&self) -> usize {
        self.general.len() + self.fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.general
            .iter()
            .chain(self.fitness.iter())
            .find(|p| p.id == id)
    }
}

fn normalize_all(records: &[RawRecord]) -> (Vec<Place>, IngestStats) {
    let places: Vec<Place> = records.iter().filter_map(normalize).collect();
    let stats = IngestStats {
        rows: records.len(),
        kept: places.len(),
        dropped: records.len() - places.len(),
    };
    if stats.dropped > 0 {
        debug!(
            dropped = stats.dropped,
            "Dropped records with unusable coordinates"
        );
    }
    (places, stats)
}

fn unique_id(seen: &mut HashMap<String, usize>, id: &str) -> String {
    let mut count = seen.get(id).copied().unwrap_or(0);
    if count == 0 {
        seen.insert(id.to_string(), 1);
        return id.to_string();
    }
    loop {
        count += 1;
        let candidate = format!("{id}-{count}");
        if !seen.contains_key(&candidate) {
            seen.insert(id.to_string(), count);
            seen.insert(candidate.clone(), 1);
            return candidate;
        }
    }
}
