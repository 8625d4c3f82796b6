//! Language codes, locale paths, and initial language resolution.

use serde::{Deserialize, Serialize};

/// Locale identifier (e.g., `"es"`, `"en"`).
pub type Locale = String;

/// Localization settings.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use landing_i18n::I18nConfig;
///
/// let config: I18nConfig = serde_json::from_str(r#"{ "default_language": "en" }"#).unwrap();
/// assert_eq!(config.default_language, "en");
/// assert_eq!(config.supported, vec!["es".to_string(), "en".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Codes that may become active.
    pub supported: Vec<Locale>,
    /// Code used when nothing else applies or a load fails.
    pub default_language: Locale,
    /// Resource path with a `{code}` placeholder.
    pub path_template: String,
    /// Key of the persisted preference entry.
    pub preference_key: String,
    /// Attribute naming a node's translation key.
    pub key_attribute: String,
    /// Class shared by language switcher controls.
    pub switcher_class: String,
    /// Prefix stripped from a switcher control's id to yield its code.
    pub switcher_id_prefix: String,
    /// Class marking the control of the active language.
    pub switcher_active_class: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            supported: vec!["es".into(), "en".into()],
            default_language: "es".into(),
            path_template: "./locales/{code}.json".into(),
            preference_key: "preferred-language".into(),
            key_attribute: "data-i18n".into(),
            switcher_class: "lang-btn".into(),
            switcher_id_prefix: "lang-".into(),
            switcher_active_class: "active".into(),
        }
    }
}

impl I18nConfig {
    /// Whether `code` may become the active language.
    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|supported| supported == code)
    }

    /// Resource path for `code`.
    #[must_use]
    pub fn path_for(&self, code: &str) -> String {
        locale_path(&self.path_template, code)
    }
}

/// Substitute `code` into a path template such as `./locales/{code}.json`.
#[must_use]
pub fn locale_path(template: &str, code: &str) -> String {
    template.replace("{code}", code)
}

/// Primary subtag of a BCP 47 tag: `"es-ES"` → `"es"`.
#[must_use]
pub fn primary_subtag(tag: &str) -> &str {
    tag.split_once('-').map_or(tag, |(primary, _)| primary)
}

/// Pick the language to load at startup.
///
/// The persisted preference wins, then the browser's primary subtag. Only the
/// chosen candidate is validated: an unsupported choice resolves to the
/// default rather than to the next candidate.
#[must_use]
pub fn resolve_initial_language(
    saved: Option<&str>,
    browser_tag: Option<&str>,
    config: &I18nConfig,
) -> Locale {
    let candidate = saved
        .filter(|saved| !saved.is_empty())
        .or_else(|| browser_tag.map(primary_subtag))
        .filter(|candidate| !candidate.is_empty());
    match candidate {
        Some(code) if config.is_supported(code) => code.to_owned(),
        _ => config.default_language.clone(),
    }
}
