use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use yoga_canon::SectionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Canonical record as JSON.
    #[default]
    Json,
    /// One line per renderable section.
    Sections,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectSettings {
    pub format: OutputFormat,
    pub pretty: bool,
    pub include_meta: bool,
    pub include_passthrough: bool,
    pub hidden_sections: Vec<SectionKey>,
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            include_meta: true,
            include_passthrough: false,
            hidden_sections: Vec::new(),
        }
    }
}

impl InspectSettings {
    pub fn is_hidden(&self, key: SectionKey) -> bool {
        self.hidden_sections.contains(&key)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct InspectToml {
    #[serde(default)]
    format: OutputFormat,
    #[serde(default = "default_true")]
    pretty: bool,
    #[serde(default = "default_true")]
    include_meta: bool,
    #[serde(default)]
    include_passthrough: bool,
    #[serde(default)]
    hidden_sections: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    inspect: Option<InspectToml>,
}

/// Same lookup as the other workspace tools: the repo root, or two levels up
/// when run from inside a crate.
pub const SEARCH_PATHS: &[&str] = &["configs/yoga_inspect.toml", "../../configs/yoga_inspect.toml"];

/// Load settings from `explicit` if given, otherwise from the first search
/// path that exists. No file at all means defaults; an explicit path must
/// exist.
pub fn load_inspect_settings(explicit: Option<&Path>) -> anyhow::Result<InspectSettings> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        return parse_inspect_settings(&text)
            .with_context(|| format!("Invalid config {}", path.display()));
    }
    for p in SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return parse_inspect_settings(&text).with_context(|| format!("Invalid config {p}"));
        }
    }
    Ok(InspectSettings::default())
}

pub fn parse_inspect_settings(text: &str) -> anyhow::Result<InspectSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse yoga_inspect.toml: {e}"))?;
    let Some(cfg) = root.inspect else {
        return Ok(InspectSettings::default());
    };
    let InspectToml {
        format,
        pretty,
        include_meta,
        include_passthrough,
        hidden_sections,
    } = cfg;

    let hidden_sections = hidden_sections
        .iter()
        .map(|name| {
            name.parse::<SectionKey>()
                .map_err(|e| anyhow::anyhow!("inspect.hidden_sections: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(InspectSettings {
        format,
        pretty,
        include_meta,
        include_passthrough,
        hidden_sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_table_gives_defaults() {
        let settings = parse_inspect_settings("").unwrap();
        assert_eq!(settings, InspectSettings::default());
    }

    #[test]
    fn test_full_table() {
        let settings = parse_inspect_settings(
            r#"
            [inspect]
            format = "sections"
            pretty = false
            include_meta = false
            include_passthrough = true
            hidden_sections = ["technical", "raj_yoga_set"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.format, OutputFormat::Sections);
        assert!(!settings.pretty);
        assert!(!settings.include_meta);
        assert!(settings.include_passthrough);
        assert!(settings.is_hidden(SectionKey::RajYogaSet));
        assert!(!settings.is_hidden(SectionKey::Header));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse_inspect_settings("[inspect]\nhidden_sections = [\"horoscope\"]").unwrap_err();
        assert!(err.to_string().contains("horoscope"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(parse_inspect_settings("[inspect]\nformat = \"yaml\"").is_err());
    }

    #[test]
    fn test_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[inspect]\nformat = \"sections\"").unwrap();
        let settings = load_inspect_settings(Some(file.path())).unwrap();
        assert_eq!(settings.format, OutputFormat::Sections);
        assert!(settings.pretty);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        assert!(load_inspect_settings(Some(Path::new("/nonexistent/yoga_inspect.toml"))).is_err());
    }
}
