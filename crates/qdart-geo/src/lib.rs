use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// A circular area of responsibility around a base position. The boundary is
/// inclusive: a point exactly `radius_km` away is inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageArea {
    pub center: Coordinate,
    pub radius_km: f64,
}

impl CoverageArea {
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        haversine_km(self.center, point) <= self.radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAMPALIT: Coordinate = Coordinate {
        latitude: 14.6944,
        longitude: 120.9324,
    };

    // One kilometre due north of DAMPALIT along the meridian: the haversine
    // reduces to R * dlat there, so the distance is exact up to rounding.
    fn one_km_north() -> Coordinate {
        let dlat_deg = (1.0 / EARTH_RADIUS_KM).to_degrees();
        Coordinate::new(DAMPALIT.latitude + dlat_deg, DAMPALIT.longitude)
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(DAMPALIT, DAMPALIT), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let other = Coordinate::new(14.7546, 120.9466);
        let forward = haversine_km(DAMPALIT, other);
        let backward = haversine_km(other, DAMPALIT);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn meridian_kilometre_measures_one() {
        let d = haversine_km(DAMPALIT, one_km_north());
        assert!((d - 1.0).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn boundary_is_inclusive() {
        let point = one_km_north();
        let exact = haversine_km(DAMPALIT, point);
        // Radius equal to the measured distance: the boundary itself.
        assert!(CoverageArea::new(DAMPALIT, exact).contains(point));
    }

    #[test]
    fn just_outside_is_excluded() {
        let dlat_deg = (1.001 / EARTH_RADIUS_KM).to_degrees();
        let point = Coordinate::new(DAMPALIT.latitude + dlat_deg, DAMPALIT.longitude);
        assert!(!CoverageArea::new(DAMPALIT, 1.0).contains(point));
    }
}
