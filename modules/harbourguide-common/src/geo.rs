const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two lat/lng points in kilometers.
///
/// Uses the `atan2` form so near-identical and antipodal points stay stable;
/// `a` is clamped to `[0, 1]` against rounding drift.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = ((d_lat / 2.0).sin().powi(2)
        + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Round a distance to 2 decimal places (10 m precision) for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
