//! Top-level key registries shared by the locator and the assembler.

/// Top-level keys that carry chart metadata or payload bookkeeping rather
/// than a yoga verdict. Never treated as the primary analysis and never
/// routed to passthrough.
pub const KNOWN_NON_ANALYSIS_KEYS: &[&str] = &[
    "name",
    "date",
    "time",
    "place",
    "birth_date",
    "birth_time",
    "birth_details",
    "ascendant",
    "ascendant_sign",
    "ascendant_degree",
    "lagna",
    "latitude",
    "longitude",
    "coordinates",
    "timezone",
    "ayanamsa",
    "ayanamsa_value",
    "house_system",
    "chart_type",
    "analysis_type",
    "chart_info",
    "planetary_positions",
    "planet_positions",
    "houses",
    "house_signs",
    "house_lords",
    "house_rulers",
    "lords",
    "remedies",
    "recommendations",
    "final_recommendation",
    "dosha_severity",
    "severity_description",
    "technical_notes",
    "calculation_notes",
    "methodology_notes",
    "success",
    "status",
    "message",
    "timestamp",
];

/// Dedicated key for the multi-yoga raj yoga list.
pub const RAJ_YOGA_KEY: &str = "raj_yogas";

/// Fields whose presence marks an object as a yoga verdict.
pub const ANALYSIS_MARKER_FIELDS: &[&str] = &["is_present", "total_found", "yogas_found", "summary"];

pub const PLANETS: &[&str] = &[
    "sun", "moon", "mars", "mercury", "jupiter", "venus", "saturn", "rahu", "ketu",
];

const PLANET_DETAIL_SUFFIX: &str = "_details";

pub fn is_known_non_analysis_key(key: &str) -> bool {
    KNOWN_NON_ANALYSIS_KEYS.contains(&key)
}

/// Planet name for `<planet>_details` keys such as `jupiter_details`.
pub fn planet_detail_name(key: &str) -> Option<&str> {
    let planet = key.strip_suffix(PLANET_DETAIL_SUFFIX)?;
    PLANETS.contains(&planet).then_some(planet)
}

pub fn is_planet_detail_key(key: &str) -> bool {
    planet_detail_name(key).is_some()
}
