//! Great-circle math for guess feedback: distance, bearing, compass sectors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two coordinates, in miles.
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Initial great-circle bearing from point 1 toward point 2, in [0, 360).
pub fn bearing_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// One of the eight compass points used for direction hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

const SECTORS: [CompassPoint; 8] = [
    CompassPoint::North,
    CompassPoint::Northeast,
    CompassPoint::East,
    CompassPoint::Southeast,
    CompassPoint::South,
    CompassPoint::Southwest,
    CompassPoint::West,
    CompassPoint::Northwest,
];

impl CompassPoint {
    /// Maps a bearing to its 45° sector. Sector boundaries sit at 22.5°
    /// increments; a boundary value belongs to the sector it opens, so
    /// North covers [337.5, 360) ∪ [0, 22.5).
    pub fn from_bearing(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0) as usize % 8;
        SECTORS[sector]
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassPoint::North => "North",
            CompassPoint::Northeast => "Northeast",
            CompassPoint::East => "East",
            CompassPoint::Southeast => "Southeast",
            CompassPoint::South => "South",
            CompassPoint::Southwest => "Southwest",
            CompassPoint::West => "West",
            CompassPoint::Northwest => "Northwest",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            CompassPoint::North => "↑",
            CompassPoint::Northeast => "↗",
            CompassPoint::East => "→",
            CompassPoint::Southeast => "↘",
            CompassPoint::South => "↓",
            CompassPoint::Southwest => "↙",
            CompassPoint::West => "←",
            CompassPoint::Northwest => "↖",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOS_ANGELES: (f64, f64) = (34.05, -118.24);
    const FRESNO: (f64, f64) = (36.75, -119.77);

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_miles(LOS_ANGELES.0, LOS_ANGELES.1, FRESNO.0, FRESNO.1);
        let ba = distance_miles(FRESNO.0, FRESNO.1, LOS_ANGELES.0, LOS_ANGELES.1);
        assert!((ab - ba).abs() < 1e-6, "expected symmetry, got {ab} vs {ba}");
    }

    #[test]
    fn distance_to_self_is_zero() {
        let d = distance_miles(LOS_ANGELES.0, LOS_ANGELES.1, LOS_ANGELES.0, LOS_ANGELES.1);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn fresno_to_los_angeles_distance() {
        let d = distance_miles(FRESNO.0, FRESNO.1, LOS_ANGELES.0, LOS_ANGELES.1);
        assert!((d - 205.5).abs() < 1.0, "unexpected distance {d}");
    }

    #[test]
    fn fresno_to_los_angeles_heads_southeast() {
        let bearing = bearing_degrees(FRESNO.0, FRESNO.1, LOS_ANGELES.0, LOS_ANGELES.1);
        assert!(bearing >= 112.5 && bearing < 157.5, "bearing was {bearing}");
        assert_eq!(CompassPoint::from_bearing(bearing), CompassPoint::Southeast);
    }

    #[test]
    fn bearing_stays_normalized() {
        for (from, to) in [
            (LOS_ANGELES, FRESNO),
            (FRESNO, LOS_ANGELES),
            ((0.0, 179.5), (0.0, -179.5)),
            ((10.0, 0.0), (-10.0, 0.0)),
        ] {
            let b = bearing_degrees(from.0, from.1, to.0, to.1);
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
        }
    }

    #[test]
    fn sector_boundaries_open_the_next_sector() {
        assert_eq!(CompassPoint::from_bearing(0.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(22.4), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(22.5), CompassPoint::Northeast);
        assert_eq!(CompassPoint::from_bearing(67.5), CompassPoint::East);
        assert_eq!(CompassPoint::from_bearing(112.5), CompassPoint::Southeast);
        assert_eq!(CompassPoint::from_bearing(157.5), CompassPoint::South);
        assert_eq!(CompassPoint::from_bearing(202.5), CompassPoint::Southwest);
        assert_eq!(CompassPoint::from_bearing(247.5), CompassPoint::West);
        assert_eq!(CompassPoint::from_bearing(292.5), CompassPoint::Northwest);
        assert_eq!(CompassPoint::from_bearing(337.5), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(359.99), CompassPoint::North);
    }

    #[test]
    fn sectors_partition_the_circle_evenly() {
        let mut counts = [0u32; 8];
        for tenth in 0..3600 {
            let degrees = tenth as f64 / 10.0;
            let sector = SECTORS
                .iter()
                .position(|&p| p == CompassPoint::from_bearing(degrees))
                .expect("sector table is total");
            counts[sector] += 1;
        }
        assert_eq!(counts, [450; 8], "each 45° sector covers 450 tenths of a degree");
    }
}
