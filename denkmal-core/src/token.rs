//! Encoding between a map view and its URL path token.
//!
//! The token reads `@{lng},{lat},{zoom}z` with the longitude first. The
//! field order differs from the `lat`/`lng` naming of [`LatLng`] but is part
//! of the shared link format; links in circulation depend on it.

use crate::error::TokenError;
use crate::geo::{round_coord, round_zoom, LatLng, MapView};

/// Encode a map view as a path token.
///
/// The center is rounded to 4 decimal digits and the zoom to 0.1 before
/// formatting. Numbers render in their shortest decimal form, so an integral
/// zoom of `8.0` reads `8` and no trailing zeros appear.
pub fn encode(view: &MapView) -> String {
    let lng = round_coord(view.center.lng);
    let lat = round_coord(view.center.lat);
    let zoom = round_zoom(view.zoom);
    format!("@{},{},{}z", lng, lat, zoom)
}

/// Decode a path token back into a map view.
///
/// The token must start with `@`, end with `z` and carry exactly three
/// comma-separated finite numbers. Geographic bounds are not validated here;
/// an out-of-range center passes through and is clamped visually by the map.
pub fn decode(token: &str) -> Result<MapView, TokenError> {
    let trimmed = token.trim();
    let inner = trimmed
        .strip_prefix('@')
        .and_then(|rest| rest.strip_suffix('z'))
        .ok_or_else(|| TokenError::MissingDelimiters {
            token: trimmed.to_string(),
        })?;

    let fields: Vec<&str> = inner.split(',').collect();
    if fields.len() != 3 {
        return Err(TokenError::FieldCount {
            token: trimmed.to_string(),
            count: fields.len(),
        });
    }

    let lng = parse_field(trimmed, "lng", fields[0])?;
    let lat = parse_field(trimmed, "lat", fields[1])?;
    let zoom = parse_field(trimmed, "zoom", fields[2])?;

    Ok(MapView {
        center: LatLng { lat, lng },
        zoom,
    })
}

fn parse_field(token: &str, field: &'static str, raw: &str) -> Result<f64, TokenError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TokenError::InvalidNumber {
            token: token.to_string(),
            field,
        })?;
    if !value.is_finite() {
        return Err(TokenError::InvalidNumber {
            token: token.to_string(),
            field,
        });
    }
    Ok(value)
}
