//! Birth and chart identity metadata.
//!
//! All sources are top-level payload fields, so this section can populate
//! even when no yoga verdict was located.

use crate::record::{Degree, Meta};
use crate::resolve::{as_number, as_text, first_text, lookup, FieldChain, FieldPath, Object};
use crate::sections::as_degree;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref COORDINATE_TEXT: Regex = Regex::new(
        r"(?i)lat(?:itude)?\s*:\s*(-?\d+(?:\.\d+)?)\s*,\s*lon(?:gitude)?\s*:\s*(-?\d+(?:\.\d+)?)"
    )
    .expect("coordinate pattern is valid");
}

enum AscendantSource {
    /// A sign string, or an object with `sign` and `degree` (plus an optional
    /// alternate degree field).
    Entry {
        path: FieldPath,
        alt_degree: Option<&'static str>,
    },
    /// Separate sign and degree fields.
    Pair { sign: FieldPath, degree: FieldPath },
}

const ASCENDANT_SOURCES: &[AscendantSource] = &[
    AscendantSource::Entry { path: &["ascendant"], alt_degree: Some("longitude") },
    AscendantSource::Entry { path: &["chart_info", "ascendant"], alt_degree: Some("longitude") },
    AscendantSource::Entry { path: &["birth_details", "ascendant"], alt_degree: Some("longitude") },
    AscendantSource::Entry { path: &["lagna"], alt_degree: Some("longitude") },
    AscendantSource::Entry { path: &["planetary_positions", "Ascendant"], alt_degree: None },
    AscendantSource::Entry { path: &["planet_positions", "Ascendant"], alt_degree: None },
    AscendantSource::Pair { sign: &["ascendant_sign"], degree: &["ascendant_degree"] },
    AscendantSource::Pair {
        sign: &["chart_info", "ascendant_sign"],
        degree: &["chart_info", "ascendant_degree"],
    },
];

const NAME: FieldChain = &[&["name"], &["birth_details", "name"]];
const DATE: FieldChain = &[&["birth_date"], &["date"], &["birth_details", "date"]];
const TIME: FieldChain = &[&["birth_time"], &["time"], &["birth_details", "time"]];
const PLACE: FieldChain = &[&["place"], &["birth_details", "place"]];
const AYANAMSA: FieldChain = &[&["ayanamsa"], &["chart_info", "ayanamsa"]];
const AYANAMSA_VALUE: FieldChain = &[&["ayanamsa_value"], &["chart_info", "ayanamsa_value"]];
const HOUSE_SYSTEM: FieldChain = &[&["house_system"], &["chart_info", "house_system"]];
const CHART_TYPE: FieldChain = &[&["chart_type"], &["chart_info", "chart_type"]];
const ANALYSIS_TYPE: FieldChain = &[&["analysis_type"], &["chart_info", "analysis_type"]];

pub fn extract_meta(payload: &Object) -> Option<Meta> {
    let (ascendant_sign, ascendant_degree) = match resolve_ascendant(payload) {
        Some((sign, degree)) => (Some(sign), degree),
        None => (None, None),
    };
    let (latitude, longitude) = match resolve_coordinates(payload) {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };

    let meta = Meta {
        name: first_text(payload, NAME),
        date: first_text(payload, DATE),
        time: first_text(payload, TIME),
        place: first_text(payload, PLACE),
        ascendant_sign,
        ascendant_degree,
        latitude,
        longitude,
        ayanamsa: first_text(payload, AYANAMSA),
        ayanamsa_value: first_text(payload, AYANAMSA_VALUE).and_then(|raw| strip_degree_symbol(&raw)),
        house_system: first_text(payload, HOUSE_SYSTEM),
        chart_type: first_text(payload, CHART_TYPE),
        analysis_type: first_text(payload, ANALYSIS_TYPE),
    };

    if meta.is_empty() {
        None
    } else {
        Some(meta)
    }
}

/// First source that names a sign; that source also supplies the degree.
fn resolve_ascendant(payload: &Object) -> Option<(String, Option<Degree>)> {
    ASCENDANT_SOURCES.iter().find_map(|source| match source {
        AscendantSource::Entry { path, alt_degree } => match lookup(payload, path)? {
            Value::Object(entry) => {
                let sign = entry.get("sign").and_then(as_text)?;
                let degree = entry
                    .get("degree")
                    .and_then(as_degree)
                    .or_else(|| alt_degree.and_then(|field| entry.get(field)).and_then(as_degree));
                Some((sign, degree))
            }
            other => as_text(other).map(|sign| (sign, None)),
        },
        AscendantSource::Pair { sign, degree } => {
            let sign = lookup(payload, sign).and_then(as_text)?;
            Some((sign, lookup(payload, degree).and_then(as_degree)))
        }
    })
}

fn resolve_coordinates(payload: &Object) -> Option<(f64, f64)> {
    structured_pair(payload, &["latitude"], &["longitude"])
        .or_else(|| {
            structured_pair(
                payload,
                &["birth_details", "latitude"],
                &["birth_details", "longitude"],
            )
        })
        .or_else(|| match lookup(payload, &["coordinates"])? {
            Value::String(text) => parse_coordinate_text(text),
            Value::Object(coords) => structured_pair(coords, &["latitude"], &["longitude"])
                .or_else(|| structured_pair(coords, &["lat"], &["lon"])),
            _ => None,
        })
}

fn structured_pair(root: &Object, lat: &[&str], lon: &[&str]) -> Option<(f64, f64)> {
    let lat = lookup(root, lat).and_then(as_number)?;
    let lon = lookup(root, lon).and_then(as_number)?;
    Some((lat, lon))
}

/// `Lat: 28.61, Lon: 77.21` -> `(28.61, 77.21)`.
pub(crate) fn parse_coordinate_text(text: &str) -> Option<(f64, f64)> {
    let caps = COORDINATE_TEXT.captures(text)?;
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lon = caps.get(2)?.as_str().parse().ok()?;
    Some((lat, lon))
}

fn strip_degree_symbol(raw: &str) -> Option<String> {
    let stripped = raw.trim_end().trim_end_matches('°').trim_end();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
