//! Section render registry.
//!
//! Renderers walk [`RENDER_ORDER`] and show every section that has content.
//! `meta` and `passthrough` are addressable but not part of the default
//! order.

use crate::error::CanonError;
use crate::record::CanonicalYoga;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Header,
    Strength,
    Conditions,
    Description,
    RajYogaSet,
    Effects,
    Combinations,
    Timing,
    PlanetPositions,
    HousePlacements,
    CancellationFactors,
    DoshaSeverity,
    Technical,
    Remedies,
    Meta,
    Passthrough,
}

/// Highest priority first.
pub const RENDER_ORDER: &[SectionKey] = &[
    SectionKey::Header,
    SectionKey::Strength,
    SectionKey::Conditions,
    SectionKey::Description,
    SectionKey::RajYogaSet,
    SectionKey::Effects,
    SectionKey::Combinations,
    SectionKey::Timing,
    SectionKey::PlanetPositions,
    SectionKey::HousePlacements,
    SectionKey::CancellationFactors,
    SectionKey::DoshaSeverity,
    SectionKey::Technical,
    SectionKey::Remedies,
];

const ALL_SECTIONS: &[SectionKey] = &[
    SectionKey::Header,
    SectionKey::Strength,
    SectionKey::Conditions,
    SectionKey::Description,
    SectionKey::RajYogaSet,
    SectionKey::Effects,
    SectionKey::Combinations,
    SectionKey::Timing,
    SectionKey::PlanetPositions,
    SectionKey::HousePlacements,
    SectionKey::CancellationFactors,
    SectionKey::DoshaSeverity,
    SectionKey::Technical,
    SectionKey::Remedies,
    SectionKey::Meta,
    SectionKey::Passthrough,
];

impl SectionKey {
    /// Canonical (camelCase) key, as serialized in the record.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Header => "header",
            SectionKey::Strength => "strength",
            SectionKey::Conditions => "conditions",
            SectionKey::Description => "description",
            SectionKey::RajYogaSet => "rajYogaSet",
            SectionKey::Effects => "effects",
            SectionKey::Combinations => "combinations",
            SectionKey::Timing => "timing",
            SectionKey::PlanetPositions => "planetPositions",
            SectionKey::HousePlacements => "housePlacements",
            SectionKey::CancellationFactors => "cancellationFactors",
            SectionKey::DoshaSeverity => "doshaSeverity",
            SectionKey::Technical => "technical",
            SectionKey::Remedies => "remedies",
            SectionKey::Meta => "meta",
            SectionKey::Passthrough => "passthrough",
        }
    }

    /// Render priority, higher first. `None` for sections outside the
    /// default order.
    pub fn priority(self) -> Option<u8> {
        RENDER_ORDER
            .iter()
            .position(|key| *key == self)
            .map(|index| (RENDER_ORDER.len() - index) as u8)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = CanonError;

    /// Accepts the camelCase key or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.trim().chars().filter(|c| *c != '_').collect();
        ALL_SECTIONS
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CanonError::UnknownSection(s.to_string()))
    }
}

impl CanonicalYoga {
    /// Present and, for list or map sections, non-empty.
    pub fn has_content(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Header => self.header.is_some(),
            SectionKey::Strength => self.strength.is_some(),
            SectionKey::Conditions => self
                .conditions
                .as_ref()
                .is_some_and(|c| !c.met.is_empty() || !c.failed.is_empty()),
            SectionKey::Description => self.description.is_some(),
            SectionKey::RajYogaSet => self.raj_yoga_set.as_ref().is_some_and(|r| !r.yogas.is_empty()),
            SectionKey::Effects => self.effects.is_some(),
            SectionKey::Combinations => self.combinations.as_ref().is_some_and(|c| !c.is_empty()),
            SectionKey::Timing => self.timing.is_some(),
            SectionKey::PlanetPositions => self.planet_positions.as_ref().is_some_and(|p| !p.is_empty()),
            SectionKey::HousePlacements => self.house_placements.as_ref().is_some_and(|h| !h.is_empty()),
            SectionKey::CancellationFactors => self
                .cancellation_factors
                .as_ref()
                .is_some_and(|c| !c.is_empty()),
            SectionKey::DoshaSeverity => self.dosha_severity.is_some(),
            SectionKey::Technical => self.technical.is_some(),
            SectionKey::Remedies => self.remedies.as_ref().is_some_and(|r| !r.is_empty()),
            SectionKey::Meta => self.meta.is_some(),
            SectionKey::Passthrough => self.passthrough.as_ref().is_some_and(|p| !p.is_empty()),
        }
    }

    /// Sections from [`RENDER_ORDER`] that have content, highest priority
    /// first.
    pub fn renderable_sections(&self) -> Vec<SectionKey> {
        RENDER_ORDER
            .iter()
            .copied()
            .filter(|key| self.has_content(*key))
            .collect()
    }

    /// Drop one section from the record.
    pub fn clear(&mut self, key: SectionKey) {
        match key {
            SectionKey::Header => self.header = None,
            SectionKey::Strength => self.strength = None,
            SectionKey::Conditions => self.conditions = None,
            SectionKey::Description => self.description = None,
            SectionKey::RajYogaSet => self.raj_yoga_set = None,
            SectionKey::Effects => self.effects = None,
            SectionKey::Combinations => self.combinations = None,
            SectionKey::Timing => self.timing = None,
            SectionKey::PlanetPositions => self.planet_positions = None,
            SectionKey::HousePlacements => self.house_placements = None,
            SectionKey::CancellationFactors => self.cancellation_factors = None,
            SectionKey::DoshaSeverity => self.dosha_severity = None,
            SectionKey::Technical => self.technical = None,
            SectionKey::Remedies => self.remedies = None,
            SectionKey::Meta => self.meta = None,
            SectionKey::Passthrough => self.passthrough = None,
        }
    }

    /// `false` when the payload could not be interpreted.
    pub fn is_recognized(&self) -> bool {
        self.header.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Conditions, Header};

    #[test]
    fn test_priorities_descend() {
        assert_eq!(SectionKey::Header.priority(), Some(14));
        assert_eq!(SectionKey::Remedies.priority(), Some(1));
        assert_eq!(SectionKey::Meta.priority(), None);
        let priorities: Vec<u8> = RENDER_ORDER.iter().filter_map(|k| k.priority()).collect();
        assert!(priorities.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_parse_section_names() {
        assert_eq!("rajYogaSet".parse::<SectionKey>().unwrap(), SectionKey::RajYogaSet);
        assert_eq!("raj_yoga_set".parse::<SectionKey>().unwrap(), SectionKey::RajYogaSet);
        assert_eq!("META".parse::<SectionKey>().unwrap(), SectionKey::Meta);
        assert!("horoscope".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_empty_lists_not_renderable() {
        let record = CanonicalYoga {
            header: Some(Header {
                title: "Dhana Yoga".to_string(),
                subtitle: None,
                is_present: true,
                strength: None,
                strength_score: None,
                overall_rating: None,
                total_count: None,
            }),
            conditions: Some(Conditions::default()),
            combinations: Some(Vec::new()),
            ..CanonicalYoga::default()
        };
        assert_eq!(record.renderable_sections(), vec![SectionKey::Header]);
    }

    #[test]
    fn test_clear_removes_only_that_section() {
        let mut record = CanonicalYoga {
            conditions: Some(Conditions {
                met: vec!["Moon in kendra".to_string()],
                failed: Vec::new(),
            }),
            combinations: Some(Vec::new()),
            ..CanonicalYoga::default()
        };
        record.clear(SectionKey::Conditions);
        assert!(record.conditions.is_none());
        assert!(record.combinations.is_some());
    }
}
