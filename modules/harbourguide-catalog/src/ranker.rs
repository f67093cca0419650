//! Ranked retrieval over one catalog pool.
//!
//! Each place is scored for distance from the origin (if any) and lexical
//! coverage of the query, ordered by a two-tier comparator, truncated to
//! `limit`, then distance-capped.

use std::cmp::Ordering;

use harbourguide_common::{Place, PlaceView};

use crate::planner::Origin;

/// Distances closer than this are treated as ties and ordered by text score.
pub const DISTANCE_TOLERANCE_KM: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrieveParams {
    pub limit: usize,
    pub max_distance_km: f64,
}

impl Default for RetrieveParams {
    fn default() -> Self {
        Self {
            limit: 6,
            max_distance_km: 25.0,
        }
    }
}

/// A place scored against one query. Lives only for the duration of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub place: &'a Place,
    pub distance_km: Option<f64>,
    pub text_score: f64,
}

impl ScoredCandidate<'_> {
    pub fn to_view(&self) -> PlaceView {
        PlaceView::from_place(self.place, self.distance_km)
    }
}

/// Lexical relevance in `[0, 1]` of a lower-cased query against a lower-cased
/// haystack: 1.0 for a whole-query substring match, otherwise the fraction of
/// whitespace-separated query tokens found as substrings. Blank queries score 0.
pub fn text_score(query: &str, haystack: &str) -> f64 {
    if query.trim().is_empty() {
        return 0.0;
    }
    if haystack.contains(query) {
        return 1.0;
    }
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let matches = tokens.iter().filter(|t| haystack.contains(**t)).count();
    matches as f64 / tokens.len() as f64
}

/// Score, order, truncate and distance-cap a pool.
pub fn rank<'a>(
    pool: &'a [Place],
    query: &str,
    origin: Option<&Origin>,
    params: RetrieveParams,
) -> Vec<ScoredCandidate<'a>> {
    let q = query.to_lowercase();

    let scored: Vec<ScoredCandidate<'a>> = pool
        .iter()
        .map(|place| ScoredCandidate {
            place,
            distance_km: origin.map(|o| o.point.distance_km(&place.location())),
            text_score: text_score(&q, &place.haystack()),
        })
        .collect();

    merge_sort_by(scored, &compare)
        .into_iter()
        .take(params.limit)
        .filter(|c| c.distance_km.map_or(true, |d| d <= params.max_distance_km))
        .collect()
}

/// Ranked shortlist projected to display records.
pub fn retrieve(
    pool: &[Place],
    query: &str,
    origin: Option<&Origin>,
    params: RetrieveParams,
) -> Vec<PlaceView> {
    rank(pool, query, origin, params)
        .iter()
        .map(ScoredCandidate::to_view)
        .collect()
}

/// Distance ascending when both distances are known and differ by more than the
/// tolerance; text score descending otherwise.
fn compare(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    if let (Some(da), Some(db)) = (a.distance_km, b.distance_km) {
        if (da - db).abs() > DISTANCE_TOLERANCE_KM {
            return da.total_cmp(&db);
        }
    }
    b.text_score.total_cmp(&a.text_score)
}

/// Stable top-down merge sort.
///
/// `compare` is not transitive (tolerance bands overlap), and `slice::sort_by`
/// may panic on an inconsistent ordering. Merging only ever asks "is the right
/// element strictly smaller", so any comparator yields some permutation.
fn merge_sort_by<T, F>(mut items: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, cmp);
    let right = merge_sort_by(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::OriginKind;
    use harbourguide_common::{GeoPoint, PlaceSource};

    fn place(id: &str, name: &str, lat: f64, lon: f64) -> Place {
        Place {
            id: id.to_string(),
            source: PlaceSource::Tabular,
            name: name.to_string(),
            description: String::new(),
            address: String::new(),
            latitude: lat,
            longitude: lon,
            website: None,
            category: None,
        }
    }

    fn caller(lat: f64, lon: f64) -> Origin {
        Origin {
            point: GeoPoint::new(lat, lon),
            kind: OriginKind::Caller,
        }
    }

    #[test]
    fn text_score_empty_query_is_zero() {
        assert_eq!(text_score("", "anything at all"), 0.0);
        assert_eq!(text_score("   ", "anything at all"), 0.0);
    }

    #[test]
    fn text_score_blank_query_never_matches_haystack_spaces() {
        assert_eq!(text_score(" ", "anything at all"), 0.0);
        assert_eq!(text_score("\t ", "two  spaces\tand a tab"), 0.0);
    }

    #[test]
    fn text_score_whole_query_match_is_one() {
        assert_eq!(text_score("night market", "temple street night market"), 1.0);
    }

    #[test]
    fn text_score_is_token_coverage() {
        assert_eq!(text_score("night museum", "temple street night market"), 0.5);
        assert_eq!(text_score("peak tram ride", "the peak tram"), 2.0 / 3.0);
        assert_eq!(text_score("aquarium", "the peak tram"), 0.0);
    }

    #[test]
    fn near_ties_break_on_text_score() {
        let a = place("a", "a", 0.0, 0.0);
        let b = place("b", "b", 0.0, 0.0);
        let weak = ScoredCandidate { place: &a, distance_km: Some(5.00), text_score: 0.2 };
        let strong = ScoredCandidate { place: &b, distance_km: Some(5.05), text_score: 0.9 };
        let sorted = merge_sort_by(vec![weak, strong], &compare);
        assert_eq!(sorted[0].place.id, "b");
        assert_eq!(sorted[1].place.id, "a");
    }

    #[test]
    fn clear_distance_gap_beats_text_score() {
        let a = place("a", "a", 0.0, 0.0);
        let b = place("b", "b", 0.0, 0.0);
        let near = ScoredCandidate { place: &a, distance_km: Some(1.0), text_score: 0.0 };
        let far = ScoredCandidate { place: &b, distance_km: Some(2.0), text_score: 1.0 };
        let sorted = merge_sort_by(vec![far, near], &compare);
        assert_eq!(sorted[0].place.id, "a");
    }

    #[test]
    fn merge_sort_is_stable_for_equal_keys() {
        let places: Vec<Place> = (0..8).map(|i| place(&i.to_string(), "x", 0.0, 0.0)).collect();
        let candidates: Vec<ScoredCandidate> = places
            .iter()
            .map(|p| ScoredCandidate { place: p, distance_km: None, text_score: 0.5 })
            .collect();
        let ids: Vec<&str> = merge_sort_by(candidates, &compare)
            .iter()
            .map(|c| c.place.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn never_exceeds_limit() {
        let pool: Vec<Place> = (0..20)
            .map(|i| place(&format!("p{i}"), "harbour view", 22.30, 114.17))
            .collect();
        assert_eq!(rank(&pool, "harbour", None, RetrieveParams::default()).len(), 6);
        let params = RetrieveParams { limit: 3, ..Default::default() };
        assert_eq!(rank(&pool, "harbour", None, params).len(), 3);
        let params = RetrieveParams { limit: 0, ..Default::default() };
        assert!(rank(&pool, "harbour", None, params).is_empty());
    }

    #[test]
    fn cap_applies_after_truncation() {
        // Eight places 30+ km away and nothing nearby: the top six are all dropped.
        let pool: Vec<Place> = (0..8)
            .map(|i| place(&format!("far{i}"), "far", 22.30 + 0.3 + i as f64 * 0.01, 114.17))
            .collect();
        let origin = caller(22.30, 114.17);
        assert!(rank(&pool, "", Some(&origin), RetrieveParams::default()).is_empty());
    }

    #[test]
    fn cap_is_inclusive_at_max_distance() {
        let origin = caller(22.30, 114.17);
        let edge = place("edge", "edge", 22.33, 114.17);
        let beyond = place("beyond", "beyond", 22.3301, 114.17);
        let max_distance_km = origin.point.distance_km(&edge.location());

        let params = RetrieveParams { max_distance_km, ..Default::default() };
        let pool = vec![beyond, edge];
        let out = rank(&pool, "", Some(&origin), params);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].place.id, "edge");
        assert_eq!(out[0].distance_km, Some(max_distance_km));
    }

    #[test]
    fn smaller_cap_drops_farther_places() {
        let origin = caller(22.30, 114.17);
        // ~1.1 km, ~3.3 km, ~5.6 km north.
        let pool = vec![
            place("one", "one", 22.31, 114.17),
            place("three", "three", 22.33, 114.17),
            place("five", "five", 22.35, 114.17),
        ];
        let params = RetrieveParams { max_distance_km: 4.0, ..Default::default() };
        let ids: Vec<&str> = rank(&pool, "", Some(&origin), params)
            .iter()
            .map(|c| c.place.id.as_str())
            .collect();
        assert_eq!(ids, vec!["one", "three"]);
    }

    #[test]
    fn near_tie_in_distance_ranks_better_text_match_first() {
        // 5.00 km and 5.05 km north of the caller; the farther one names the query.
        let origin = caller(22.30, 114.17);
        let pool = vec![
            place("closer", "quiet lane", 22.30 + 5.00 / 111.195, 114.17),
            place("farther", "temple street night market", 22.30 + 5.05 / 111.195, 114.17),
        ];
        let out = rank(&pool, "night market", Some(&origin), RetrieveParams::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].place.id, "farther");
        assert_eq!(out[1].place.id, "closer");

        let near = out[1].distance_km.unwrap();
        let far = out[0].distance_km.unwrap();
        assert!((near - 5.00).abs() < 0.01, "expected ~5.00 km, got {near}");
        assert!((far - 5.05).abs() < 0.01, "expected ~5.05 km, got {far}");
    }

    #[test]
    fn distance_less_candidates_survive_cap() {
        let pool = vec![place("a", "Ocean Park", -10.0, 20.0)];
        let out = rank(&pool, "ocean", None, RetrieveParams::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].distance_km, None);
        assert_eq!(out[0].text_score, 1.0);
    }

    #[test]
    fn empty_pool_returns_empty() {
        let origin = caller(22.3, 114.17);
        assert!(retrieve(&[], "anything", Some(&origin), RetrieveParams::default()).is_empty());
        assert!(retrieve(&[], "", None, RetrieveParams::default()).is_empty());
    }

    #[test]
    fn no_origin_orders_by_text_score() {
        let pool = vec![
            place("weak", "temple street", 22.3, 114.17),
            place("strong", "temple street night market", 22.3, 114.17),
        ];
        let out = retrieve(&pool, "night market", None, RetrieveParams::default());
        assert_eq!(out[0].id, "strong");
        assert_eq!(out[0].distance_km, None);
    }
}
