//! Planet positions and house placements.
//!
//! Both come from the top level of the payload, not from the analysis
//! object.

use crate::keys::planet_detail_name;
use crate::record::{HousePlacement, PlanetPosition, PlanetPositions};
use crate::resolve::{
    as_flag, as_house, as_text, capitalize, first_present, first_text, lookup, parse_house_label,
    FieldChain, Object,
};
use crate::sections::as_degree;
use serde_json::Value;
use std::collections::BTreeMap;

const PLANET_GRIDS: FieldChain = &[
    &["planetary_positions"],
    &["planet_positions"],
    &["chart_info", "planets"],
];
const PLANET_NAME: FieldChain = &[&["planet"], &["name"]];
const SIGN: FieldChain = &[&["sign"], &["rashi"]];
const RETROGRADE: FieldChain = &[&["retrograde"], &["is_retrograde"]];
const NAKSHATRA_LORD: FieldChain = &[&["nakshatra_lord"], &["star_lord"], &["nakshatra", "lord"]];

const HOUSE_MAPS: FieldChain = &[&["house_signs"], &["houses"]];
const HOUSE_NUMBER: FieldChain = &[&["house"], &["house_number"], &["number"]];
const INLINE_LORD: FieldChain = &[&["lord"], &["ruler"]];
const LORD_MAPS: FieldChain = &[
    &["house_lords"],
    &["house_rulers"],
    &["lords"],
    &["chart_info", "house_lords"],
];

pub fn extract_planet_positions(payload: &Object) -> Option<PlanetPositions> {
    let from_grid = PLANET_GRIDS
        .iter()
        .filter_map(|path| lookup(payload, path))
        .map(grid_positions)
        .find(|positions| !positions.is_empty());
    if from_grid.is_some() {
        return from_grid;
    }

    let assembled: PlanetPositions = payload
        .iter()
        .filter_map(|(key, value)| {
            let planet = planet_detail_name(key)?;
            Some((capitalize(planet), position(value.as_object()?)))
        })
        .collect();
    if assembled.is_empty() {
        None
    } else {
        Some(assembled)
    }
}

/// A grid is either `{ "Sun": {...} }` or `[{ "planet": "Sun", ... }]`.
fn grid_positions(grid: &Value) -> PlanetPositions {
    match grid {
        Value::Object(entries) => entries
            .iter()
            .filter_map(|(name, entry)| Some((name.clone(), position(entry.as_object()?))))
            .collect(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|entry| Some((first_text(entry, PLANET_NAME)?, position(entry))))
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn position(entry: &Object) -> PlanetPosition {
    let nakshatra = match entry.get("nakshatra") {
        Some(Value::Object(star)) => star.get("name").and_then(as_text),
        Some(other) => as_text(other),
        None => None,
    };
    PlanetPosition {
        sign: first_text(entry, SIGN),
        house: entry.get("house").and_then(as_house),
        degree: entry
            .get("degree")
            .and_then(as_degree)
            .or_else(|| entry.get("degree_formatted").and_then(as_degree)),
        retrograde: first_present(entry, RETROGRADE, as_flag).unwrap_or(false),
        nakshatra,
        nakshatra_lord: first_text(entry, NAKSHATRA_LORD),
        sub_lord: entry.get("sub_lord").and_then(as_text),
        sub_sub_lord: entry.get("sub_sub_lord").and_then(as_text),
    }
}

pub fn extract_house_placements(payload: &Object) -> Option<Vec<HousePlacement>> {
    let placements = HOUSE_MAPS
        .iter()
        .filter_map(|path| lookup(payload, path))
        .map(|houses| house_entries(payload, houses))
        .find(|placements| !placements.is_empty())?;
    Some(placements.into_values().collect())
}

/// Keyed by house number, so iteration is ascending and duplicates collapse
/// onto the first entry seen.
fn house_entries(payload: &Object, houses: &Value) -> BTreeMap<u8, HousePlacement> {
    let mut placements = BTreeMap::new();
    let mut insert = |number: u8, entry: &Value| {
        if placements.contains_key(&number) {
            return;
        }
        let (sign, inline_lord) = match entry {
            Value::Object(fields) => (first_text(fields, SIGN), first_text(fields, INLINE_LORD)),
            other => (as_text(other), None),
        };
        if let Some(sign) = sign {
            let lord = inline_lord.or_else(|| lord_for(payload, number));
            placements.insert(
                number,
                HousePlacement {
                    house_number: number,
                    sign,
                    lord,
                },
            );
        }
    };

    match houses {
        Value::Object(entries) => {
            for (key, entry) in entries {
                if let Some(number) = house_number_from_key(key) {
                    insert(number, entry);
                }
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                let number = entry
                    .as_object()
                    .and_then(|fields| first_present(fields, HOUSE_NUMBER, as_house));
                if let Some(number) = number {
                    insert(number, entry);
                }
            }
        }
        _ => {}
    }
    placements
}

fn house_number_from_key(key: &str) -> Option<u8> {
    parse_house_label(key)
        .filter(|n| (1..=12).contains(n))
        .map(|n| n as u8)
}

fn lord_for(payload: &Object, house: u8) -> Option<String> {
    let keys = [house.to_string(), format!("house_{house}")];
    LORD_MAPS.iter().find_map(|path| {
        let lords = lookup(payload, path)?.as_object()?;
        keys.iter().find_map(|key| lords.get(key).and_then(as_text))
    })
}
