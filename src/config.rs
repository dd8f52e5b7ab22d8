//! Widget display configuration.
//!
//! Settings can be built in code or read from YAML. The YAML keys are
//! kebab-case and all optional:
//!
//! ```yaml
//! language: fr
//! height: 480
//! width: 100%      # or a pixel count: 800
//! readonly: true
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JmonError;

/// Interface language of the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }
}

impl FromStr for Language {
    type Err = JmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            "es" => Ok(Language::Es),
            other => Err(JmonError::LanguageError(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Settings handed to the renderer alongside the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetConfig {
    pub language: Language,
    /// Height in pixels.
    pub height: u32,
    /// CSS width, e.g. `"100%"` or `"800"`.
    pub width: String,
    pub readonly: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            language: Language::En,
            height: 600,
            width: "100%".to_string(),
            readonly: false,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawWidgetConfig {
    language: Option<String>,
    height: Option<u32>,
    width: Option<RawWidth>,
    readonly: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawWidth {
    Pixels(u32),
    Css(String),
}

impl WidgetConfig {
    /// Parse YAML settings, filling unspecified keys with defaults.
    pub fn from_yaml(content: &str) -> Result<Self, JmonError> {
        let raw: RawWidgetConfig = if content.trim().is_empty() {
            RawWidgetConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| JmonError::ConfigError(e.to_string()))?
        };
        let defaults = WidgetConfig::default();

        let language = match raw.language.as_deref() {
            Some(code) => code.parse()?,
            None => defaults.language,
        };

        let height = raw.height.unwrap_or(defaults.height);
        if height == 0 {
            return Err(JmonError::ConfigError("height must be positive".to_string()));
        }

        let width = match raw.width {
            Some(RawWidth::Pixels(px)) => px.to_string(),
            Some(RawWidth::Css(css)) if css.trim().is_empty() => {
                return Err(JmonError::ConfigError("width must not be empty".to_string()));
            }
            Some(RawWidth::Css(css)) => css,
            None => defaults.width,
        };

        Ok(WidgetConfig {
            language,
            height,
            width,
            readonly: raw.readonly.unwrap_or(defaults.readonly),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.height, 600);
        assert_eq!(config.width, "100%");
        assert!(!config.readonly);
        assert_eq!(WidgetConfig::from_yaml("").unwrap(), config);
    }

    #[test]
    fn test_from_yaml() {
        let config = WidgetConfig::from_yaml("language: fr\nheight: 480\nwidth: 800\nreadonly: true\n")
            .unwrap();
        assert_eq!(config.language, Language::Fr);
        assert_eq!(config.height, 480);
        assert_eq!(config.width, "800");
        assert!(config.readonly);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = WidgetConfig::from_yaml("width: 75%").unwrap();
        assert_eq!(config.width, "75%");
        assert_eq!(config.height, 600);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn test_unsupported_language() {
        match WidgetConfig::from_yaml("language: de") {
            Err(JmonError::LanguageError(code)) => assert_eq!(code, "de"),
            other => panic!("Expected LanguageError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            WidgetConfig::from_yaml("height: tall"),
            Err(JmonError::ConfigError(_))
        ));
        assert!(matches!(
            WidgetConfig::from_yaml("colour: red"),
            Err(JmonError::ConfigError(_))
        ));
        assert!(matches!(
            WidgetConfig::from_yaml("height: 0"),
            Err(JmonError::ConfigError(_))
        ));
    }

    #[test]
    fn test_language_round_trip() {
        for language in [Language::En, Language::Fr, Language::Es] {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
        }
        assert!("EN".parse::<Language>().is_err());
    }
}
