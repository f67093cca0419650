use serde::Serialize;

use harbourguide_common::GeoPoint;

use crate::gazetteer::Gazetteer;

/// Where a resolved origin came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OriginKind {
    /// A gazetteer alias found in the query text.
    Gazetteer { alias: String },
    /// The caller's own coordinates.
    Caller,
}

/// Reference point distances are measured from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Origin {
    pub point: GeoPoint,
    pub kind: OriginKind,
}

/// Resolve the origin for a query.
///
/// A gazetteer alias contained in the lower-cased query wins; the first match in
/// the gazetteer's lexicographic alias order is used even when several aliases
/// match. Otherwise the caller's coordinates are used when both are present and
/// finite. Otherwise there is no origin and ranking is text-only.
pub fn resolve_origin(
    gazetteer: &Gazetteer,
    query: &str,
    caller_lat: Option<f64>,
    caller_lon: Option<f64>,
) -> Option<Origin> {
    let q = query.to_lowercase();

    if let Some((alias, point)) = gazetteer.iter().find(|(alias, _)| q.contains(*alias)) {
        return Some(Origin {
            point,
            kind: OriginKind::Gazetteer {
                alias: alias.to_string(),
            },
        });
    }

    match (caller_lat, caller_lon) {
        (Some(lat), Some(lon)) if GeoPoint::new(lat, lon).is_valid() => Some(Origin {
            point: GeoPoint::new(lat, lon),
            kind: OriginKind::Caller,
        }),
        _ => None,
    }
}
