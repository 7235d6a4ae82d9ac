//! Localization data as handed to the wizard by the localization service.
//!
//! Languages are grouped by language id (`cs`, `en`, ...); every group lists
//! the concrete locales (`cs_CZ.UTF-8`, ...). The selected language is stored
//! as a locale id.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub locale_id: String,
    pub native_name: String,
    pub english_name: String,
}

impl Locale {
    fn new(locale_id: &str, native_name: &str, english_name: &str) -> Self {
        Self {
            locale_id: locale_id.to_string(),
            native_name: native_name.to_string(),
            english_name: english_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageGroup {
    pub native_name: String,
    pub english_name: String,
    #[serde(default)]
    pub locales: Vec<Locale>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCatalog {
    /// Language groups keyed by language id.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageGroup>,
    /// Locale id of the currently selected language.
    #[serde(default)]
    pub language: String,
    /// Locale ids offered at the top of the language list.
    #[serde(default)]
    pub common_locales: Vec<String>,
}

impl LanguageCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read localization data: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse localization data: {}", path.display()))
    }

    /// Small catalog used when the localization service provides nothing.
    pub fn builtin() -> Self {
        let groups = [
            (
                "cs",
                "Čeština",
                "Czech",
                vec![Locale::new(
                    "cs_CZ.UTF-8",
                    "Čeština (Česko)",
                    "Czech (Czechia)",
                )],
            ),
            (
                "de",
                "Deutsch",
                "German",
                vec![
                    Locale::new("de_DE.UTF-8", "Deutsch (Deutschland)", "German (Germany)"),
                    Locale::new("de_AT.UTF-8", "Deutsch (Österreich)", "German (Austria)"),
                ],
            ),
            (
                "en",
                "English",
                "English",
                vec![
                    Locale::new(
                        "en_US.UTF-8",
                        "English (United States)",
                        "English (United States)",
                    ),
                    Locale::new(
                        "en_GB.UTF-8",
                        "English (United Kingdom)",
                        "English (United Kingdom)",
                    ),
                ],
            ),
            (
                "es",
                "Español",
                "Spanish",
                vec![Locale::new(
                    "es_ES.UTF-8",
                    "Español (España)",
                    "Spanish (Spain)",
                )],
            ),
            (
                "fr",
                "Français",
                "French",
                vec![Locale::new(
                    "fr_FR.UTF-8",
                    "Français (France)",
                    "French (France)",
                )],
            ),
        ];
        let languages = groups
            .into_iter()
            .map(|(id, native, english, locales)| {
                (
                    id.to_string(),
                    LanguageGroup {
                        native_name: native.to_string(),
                        english_name: english.to_string(),
                        locales,
                    },
                )
            })
            .collect();
        Self {
            languages,
            language: "en_US.UTF-8".to_string(),
            common_locales: vec!["en_US.UTF-8".to_string()],
        }
    }

    /// All locales across every language group, in catalog order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.languages.values().flat_map(|group| group.locales.iter())
    }

    /// Locales as offered in the language list: common locales first, in
    /// the order given, then every other locale in catalog order.
    pub fn ordered_locales(&self) -> Vec<&Locale> {
        let common = self
            .common_locales
            .iter()
            .filter_map(|id| self.locales().find(|locale| &locale.locale_id == id));
        let rest = self
            .locales()
            .filter(|locale| !self.common_locales.contains(&locale.locale_id));
        common.chain(rest).collect()
    }

    /// The locale matching the selected language, if any group lists it.
    pub fn resolve_language(&self) -> Option<&Locale> {
        self.locales().find(|locale| locale.locale_id == self.language)
    }

    pub fn select(&mut self, locale_id: &str) {
        self.language = locale_id.to_string();
    }
}
