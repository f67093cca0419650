//! Map-panel listing: everything within walking radius of a point.

use harbourguide_common::{GeoPoint, Place, PlaceView};

/// Filters for [`nearby`]. Text terms match case-insensitively as substrings.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyFilter {
    pub radius_km: f64,
    /// Must appear in the name or the address.
    pub query: Option<String>,
    /// Must appear in the address.
    pub district: Option<String>,
    /// Keep only places tagged "indoor" (used while it is raining).
    pub indoor_only: bool,
}

impl Default for NearbyFilter {
    fn default() -> Self {
        Self {
            radius_km: 3.0,
            query: None,
            district: None,
            indoor_only: false,
        }
    }
}

/// Places within `filter.radius_km` of `origin`, nearest first.
pub fn nearby(pool: &[Place], origin: GeoPoint, filter: &NearbyFilter) -> Vec<PlaceView> {
    let query = normalized_term(filter.query.as_deref());
    let district = normalized_term(filter.district.as_deref());

    let mut hits: Vec<(&Place, f64)> = pool
        .iter()
        .filter(|p| {
            let name = p.name.to_lowercase();
            let address = p.address.to_lowercase();
            query
                .as_deref()
                .map_or(true, |q| name.contains(q) || address.contains(q))
                && district.as_deref().map_or(true, |d| address.contains(d))
                && (!filter.indoor_only || p.category.as_deref() == Some("indoor"))
        })
        .map(|p| (p, origin.distance_km(&p.location())))
        .filter(|(_, d)| *d <= filter.radius_km)
        .collect();

    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits.into_iter()
        .map(|(p, d)| PlaceView::from_place(p, Some(d)))
        .collect()
}

fn normalized_term(term: Option<&str>) -> Option<String> {
    term.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty())
}
