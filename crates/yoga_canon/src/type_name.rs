//! Display names derived from located analysis keys.

use crate::resolve::humanize;

pub const FALLBACK_TYPE_NAME: &str = "Yoga Analysis";

/// Most specific first; each is stripped at most once.
const STRIPPED_SUFFIXES: &[&str] = &[
    "_comprehensive_analysis",
    "_permutations",
    "_comprehensive",
    "_analysis",
];
const STRIPPED_PREFIXES: &[&str] = &["comprehensive_", "traditional_"];

/// `comprehensive_gaja_kesari_yoga_analysis` -> `Gaja Kesari Yoga`.
pub fn normalize_type_name(key: Option<&str>) -> String {
    let Some(key) = key else {
        return FALLBACK_TYPE_NAME.to_string();
    };

    let mut core = key;
    for suffix in STRIPPED_SUFFIXES {
        if let Some(stripped) = core.strip_suffix(suffix) {
            core = stripped;
        }
    }
    for prefix in STRIPPED_PREFIXES {
        if let Some(stripped) = core.strip_prefix(prefix) {
            core = stripped;
        }
    }

    let name = humanize(core);
    if name.is_empty() {
        FALLBACK_TYPE_NAME.to_string()
    } else {
        name
    }
}
