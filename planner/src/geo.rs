use shared::Coordinate;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Great-circle length of each consecutive leg. Informational only: the
/// route itself always comes from the backend.
pub fn legs(coords: &[Coordinate]) -> Vec<f64> {
    coords.windows(2).map(|w| haversine_km(w[0], w[1])).collect()
}

pub fn total_km(coords: &[Coordinate]) -> f64 {
    legs(coords).iter().sum()
}
