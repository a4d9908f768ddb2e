use crate::locator::Located;
use crate::record::{Header, RajYogaSet};
use crate::resolve::{as_count, as_flag, as_number, first_number, first_present, first_text, FieldChain};
use crate::type_name::normalize_type_name;

const PRESENCE_FLAG: FieldChain = &[&["is_present"], &["formation_analysis", "yoga_formed"]];
const TOTAL_FOUND: FieldChain = &[&["total_found"], &["total_yogas_found"]];
const STRENGTH_LABEL: FieldChain = &[
    &["strength"],
    &["overall_strength"],
    &["strength_analysis", "strength_label"],
    &["strength_assessment", "label"],
];
/// Same order as the strength section's final score.
const STRENGTH_SCORE: FieldChain = &[
    &["final_strength"],
    &["strength_score"],
    &["strength_analysis", "final_score"],
    &["strength_assessment", "score"],
];
const SUBTITLE: FieldChain = &[
    &["summary"],
    &["reason"],
    &["explanation"],
    &["formation_analysis", "rule"],
];
const OVERALL_RATING: FieldChain = &[&["overall_rating"], &["strength_analysis", "overall_rating"]];

pub fn extract_header(located: &Located<'_>, raj: Option<&RajYogaSet>) -> Option<Header> {
    if located.is_empty() {
        return None;
    }
    let analysis = located.analysis();

    let total_found = analysis.and_then(|a| first_present(a, TOTAL_FOUND, as_count));
    let generic_presence = analysis.and_then(|a| {
        first_present(a, PRESENCE_FLAG, as_flag)
            .or_else(|| first_present(a, TOTAL_FOUND, as_number).map(|total| total > 0.0))
    });
    let generic_score = analysis.and_then(|a| first_number(a, STRENGTH_SCORE));

    // A raj yoga list speaks for the whole record.
    let (is_present, strength_score, total_count) = match raj {
        Some(raj) => (raj.total_count > 0, Some(raj.average_strength), Some(raj.total_count)),
        None => (generic_presence.unwrap_or(false), generic_score, total_found),
    };

    Some(Header {
        title: normalize_type_name(located.display_key()),
        subtitle: analysis.and_then(|a| first_text(a, SUBTITLE)),
        is_present,
        strength: analysis.and_then(|a| first_text(a, STRENGTH_LABEL)),
        strength_score,
        overall_rating: analysis.and_then(|a| first_text(a, OVERALL_RATING)),
        total_count,
    })
}
