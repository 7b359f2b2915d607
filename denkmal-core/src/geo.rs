//! Geographic primitives for the map view.

use serde::{Deserialize, Serialize};

/// A map coordinate. Latitude spans [-90, 90], longitude [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// The visual state of the map: center coordinate plus zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapView {
    pub fn new(lat: f64, lng: f64, zoom: f64) -> Self {
        Self {
            center: LatLng { lat, lng },
            zoom,
        }
    }

    /// The view snapped to display precision: 4 decimals for the center,
    /// 0.1 steps for the zoom.
    pub fn rounded(&self) -> Self {
        Self {
            center: LatLng {
                lat: round_coord(self.center.lat),
                lng: round_coord(self.center.lng),
            },
            zoom: round_zoom(self.zoom),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Map center shown when no shared view state is present.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 51.0526,
    lng: 13.6811,
};

/// Zoom level shown when no shared view state is present.
pub const DEFAULT_ZOOM: f64 = 8.0;

/// Pan limits of the map, south-west corner first. Static configuration,
/// never derived from a shared view state.
pub const MAX_BOUNDS: [LatLng; 2] = [
    LatLng {
        lat: 35.0,
        lng: -10.0,
    },
    LatLng {
        lat: 65.0,
        lng: 30.0,
    },
];

/// Round a coordinate to 4 decimal digits (roughly 11m at the equator).
pub fn round_coord(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Round a zoom level to the nearest 0.1.
pub fn round_zoom(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_coord_to_four_decimals() {
        assert_eq!(round_coord(13.68114999), 13.6811);
        assert_eq!(round_coord(13.68115001), 13.6812);
        assert_eq!(round_coord(-10.0), -10.0);
    }

    #[test]
    fn test_round_zoom_to_tenths() {
        assert_eq!(round_zoom(8.0), 8.0);
        assert_eq!(round_zoom(8.04), 8.0);
        assert_eq!(round_zoom(8.05), 8.1);
        assert_eq!(round_zoom(17.96), 18.0);
    }

    #[test]
    fn test_rounded_is_idempotent() {
        let view = MapView::new(51.05261234, 13.68119876, 8.34);
        let once = view.rounded();
        assert_eq!(once, once.rounded());
    }

    #[test]
    fn test_default_view_matches_constants() {
        let view = MapView::default();
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.zoom, DEFAULT_ZOOM);
    }
}
