use crate::record::Timing;
use crate::resolve::{first_present, non_empty_list, FieldChain, Object};
use serde_json::Value;

const PEAK_EFFECTS: FieldChain = &[&["peak_effects"], &["peak_period"]];
const REMEDIAL_TIMING: FieldChain = &[&["remedial_timing"], &["remedy_timing"]];

/// `timing_analysis` is the only known location.
pub fn extract_timing(analysis: &Object) -> Option<Timing> {
    let source = analysis.get("timing_analysis")?.as_object()?;
    let timing = Timing {
        best_periods: source.get("best_periods").and_then(non_empty_list),
        activation_transits: source.get("activation_transits").and_then(non_empty_list),
        peak_effects: first_present(source, PEAK_EFFECTS, joined_text),
        remedial_timing: first_present(source, REMEDIAL_TIMING, joined_text),
    };
    let empty = timing.best_periods.is_none()
        && timing.activation_transits.is_none()
        && timing.peak_effects.is_none()
        && timing.remedial_timing.is_none();
    if empty {
        None
    } else {
        Some(timing)
    }
}

/// A string, or a list of strings joined with `; `.
fn joined_text(value: &Value) -> Option<String> {
    non_empty_list(value).map(|parts| parts.join("; "))
}
