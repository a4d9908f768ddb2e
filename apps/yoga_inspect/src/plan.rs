use std::fmt;
use yoga_canon::{CanonicalYoga, Remedies, SectionKey};
use yoga_config::InspectSettings;

/// One renderable section and a short summary of what it holds.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanLine {
    pub key: SectionKey,
    pub priority: Option<u8>,
    pub summary: String,
}

impl fmt::Display for PlanLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.priority {
            Some(p) => write!(f, "{:>2}  {:<20} {}", p, self.key, self.summary),
            None => write!(f, " -  {:<20} {}", self.key, self.summary),
        }
    }
}

/// Meta first when enabled, then the render order, then passthrough when
/// enabled. Hidden sections are skipped everywhere.
pub(crate) fn render_plan(record: &CanonicalYoga, settings: &InspectSettings) -> Vec<PlanLine> {
    let mut keys = Vec::new();
    if settings.include_meta && record.has_content(SectionKey::Meta) {
        keys.push(SectionKey::Meta);
    }
    keys.extend(record.renderable_sections());
    if settings.include_passthrough && record.has_content(SectionKey::Passthrough) {
        keys.push(SectionKey::Passthrough);
    }

    keys.into_iter()
        .filter(|key| !settings.is_hidden(*key))
        .map(|key| PlanLine {
            key,
            priority: key.priority(),
            summary: summarize(record, key),
        })
        .collect()
}

/// Record with the sections the settings leave out removed.
pub(crate) fn filtered(record: &CanonicalYoga, settings: &InspectSettings) -> CanonicalYoga {
    let mut out = record.clone();
    if !settings.include_meta {
        out.clear(SectionKey::Meta);
    }
    if !settings.include_passthrough {
        out.clear(SectionKey::Passthrough);
    }
    for key in &settings.hidden_sections {
        out.clear(*key);
    }
    out
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn summarize(record: &CanonicalYoga, key: SectionKey) -> String {
    match key {
        SectionKey::Header => record
            .header
            .as_ref()
            .map(|h| {
                let verdict = if h.is_present { "present" } else { "not present" };
                format!("{} ({verdict})", h.title)
            })
            .unwrap_or_default(),
        SectionKey::Meta => record
            .meta
            .as_ref()
            .and_then(|m| m.ascendant_sign.clone().or_else(|| m.name.clone()))
            .unwrap_or_default(),
        SectionKey::Strength => record
            .strength
            .as_ref()
            .map(|s| match &s.label {
                Some(label) => format!("{label} ({})", s.final_score),
                None => s.final_score.to_string(),
            })
            .unwrap_or_default(),
        SectionKey::Conditions => record
            .conditions
            .as_ref()
            .map(|c| format!("{} met, {} failed", c.met.len(), c.failed.len()))
            .unwrap_or_default(),
        SectionKey::Description => record
            .description
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_default(),
        SectionKey::RajYogaSet => record
            .raj_yoga_set
            .as_ref()
            .map(|r| count(r.yogas.len(), "yoga"))
            .unwrap_or_default(),
        SectionKey::Effects => record
            .effects
            .as_ref()
            .map(|e| count(e.specific.len(), "effect"))
            .unwrap_or_default(),
        SectionKey::Combinations => count(record.combinations.as_ref().map_or(0, Vec::len), "combination"),
        SectionKey::Timing => record
            .timing
            .as_ref()
            .and_then(|t| t.peak_effects.clone())
            .unwrap_or_default(),
        SectionKey::PlanetPositions => {
            count(record.planet_positions.as_ref().map_or(0, |p| p.len()), "planet")
        }
        SectionKey::HousePlacements => count(record.house_placements.as_ref().map_or(0, Vec::len), "house"),
        SectionKey::CancellationFactors => {
            count(record.cancellation_factors.as_ref().map_or(0, Vec::len), "factor")
        }
        SectionKey::DoshaSeverity => record
            .dosha_severity
            .as_ref()
            .map(|d| d.level.clone())
            .unwrap_or_default(),
        SectionKey::Technical => record
            .technical
            .as_ref()
            .map(|t| count(t.rules.len(), "rule"))
            .unwrap_or_default(),
        SectionKey::Remedies => match &record.remedies {
            Some(Remedies::Flat(items)) => count(items.len(), "remedy item"),
            Some(Remedies::Categorized(groups)) => count(groups.len(), "remedy category"),
            None => String::new(),
        },
        SectionKey::Passthrough => count(record.passthrough.as_ref().map_or(0, |p| p.len()), "key"),
    }
}
