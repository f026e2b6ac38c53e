//! # Polyline Decoder
//!
//! Turns the provider's encoded polyline (Google's "Encoded Polyline Algorithm
//! Format", precision 1e5) into an ordered list of [`Waypoint`]s.
//!
//! Each coordinate is stored as a zig-zag encoded delta from the previous one,
//! split into 5-bit chunks offset by 63 so that every byte is printable ASCII.
//! Latitude and longitude alternate.
//!
//! [`decode`] is the lenient entry point used by the session: a malformed
//! geometry degrades to an empty sequence (a "no route available" display
//! state) and is logged. [`try_decode`] exposes the underlying [`DecodeError`].

use crate::model::Waypoint;
use thiserror::Error;
use tracing::warn;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const MAX_SHIFT: u32 = 30;

/// Reasons an encoded geometry string cannot be decoded.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    /// A byte outside the `'?'..='~'` alphabet.
    #[error("invalid character {ch:?} at byte {index}")]
    InvalidCharacter { index: usize, ch: char },

    /// The string ended in the middle of a value, or after a latitude with no longitude.
    #[error("geometry truncated at byte {index}")]
    Truncated { index: usize },

    /// A single value used more chunks than a 32-bit coordinate can need.
    #[error("value starting near byte {index} overflows")]
    Overflow { index: usize },

    /// A decoded coordinate is not a valid latitude/longitude.
    #[error("coordinate ({lat}, {lng}) out of range")]
    OutOfRange { lat: f64, lng: f64 },
}

/// Decodes `encoded`, yielding an empty sequence when it is empty or malformed.
pub fn decode(encoded: &str) -> Vec<Waypoint> {
    match try_decode(encoded) {
        Ok(points) => points,
        Err(e) => {
            warn!(error = %e, len = encoded.len(), "Malformed route geometry, no route available");
            Vec::new()
        }
    }
}

/// Strict decoder. Identical input always yields an identical sequence.
pub fn try_decode(encoded: &str) -> Result<Vec<Waypoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += next_value(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(DecodeError::Truncated { index });
        }
        lng += next_value(bytes, &mut index)?;

        let point = Waypoint::new(lat as f64 / PRECISION, lng as f64 / PRECISION);
        if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
            return Err(DecodeError::OutOfRange {
                lat: point.lat,
                lng: point.lng,
            });
        }
        points.push(point);
    }

    Ok(points)
}

/// Reads one zig-zag encoded delta starting at `*index`, advancing past it.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::Truncated { index: *index });
        };
        if !(CHUNK_OFFSET..=b'~').contains(&byte) {
            // Multi-byte UTF-8 lands here too; report the char it starts.
            let ch = std::str::from_utf8(&bytes[*index..])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(DecodeError::InvalidCharacter { index: *index, ch });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow { index: start });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(
            points,
            vec![
                Waypoint::new(38.5, -120.2),
                Waypoint::new(40.7, -120.95),
                Waypoint::new(43.252, -126.453),
            ]
        );
    }

    #[test]
    fn test_decode_negative_coordinates() {
        let points = decode("bbycCjzqgGbBjCfEbBfEjH");
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Waypoint::new(-21.7605, -43.3503));
        assert_eq!(points[3], Waypoint::new(-21.763, -43.353));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let encoded = "??_ibE_ibE_ibE_ibE";
        let first = decode(encoded);
        let second = decode(encoded);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                Waypoint::new(0.0, 0.0),
                Waypoint::new(1.0, 1.0),
                Waypoint::new(2.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_empty_geometry_yields_no_waypoints() {
        assert_eq!(try_decode(""), Ok(vec![]));
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_truncated_geometry() {
        // Continuation chunk with nothing after it.
        assert!(matches!(try_decode("_"), Err(DecodeError::Truncated { .. })));
        // Latitude without longitude.
        assert_eq!(try_decode("??_ibE"), Err(DecodeError::Truncated { index: 6 }));
        assert!(decode("??_ibE").is_empty());
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            try_decode("?? "),
            Err(DecodeError::InvalidCharacter { index: 2, ch: ' ' })
        );
        assert!(matches!(
            try_decode("é?"),
            Err(DecodeError::InvalidCharacter { index: 0, ch: 'é' })
        ));
    }

    #[test]
    fn test_overflowing_value() {
        let endless = "~".repeat(12);
        assert!(matches!(
            try_decode(&endless),
            Err(DecodeError::Overflow { index: 0 })
        ));
    }

    #[test]
    fn test_out_of_range_coordinate() {
        // 100 degrees latitude: a well-formed value that is not a coordinate.
        let encoded = "_gjaR?";
        assert!(matches!(try_decode(encoded), Err(DecodeError::OutOfRange { .. })));
    }
}
