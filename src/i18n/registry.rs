//! Language registry: the configured languages and the default (fallback) language.
//!
//! The set of languages and the default are fixed when the registry is built.
//! Display names sit behind a lock so that labels rendered later see renames
//! made after schema compilation.

use crate::error::{ConfigurationError, Result};
use crate::i18n::locale::{is_valid_tag, to_locale};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// A configured language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
    /// Language tag as configured (e.g. "en", "pt-br")
    pub code: String,

    /// Human readable name (e.g. "English", "Brazilian Portuguese")
    pub name: String,
}

impl LanguageConfig {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug)]
pub struct LanguageRegistry {
    /// Configured codes, in order
    codes: Vec<String>,

    /// Default language code as configured
    default_code: String,

    /// Display names keyed by locale token
    names: RwLock<HashMap<String, String>>,
}

/// Process-wide registry for hosts that configure languages once at startup
static REGISTRY: OnceLock<Arc<LanguageRegistry>> = OnceLock::new();

impl LanguageRegistry {
    /// Build a registry from an ordered language list and the default code.
    ///
    /// # Errors
    /// * `NoLanguages` if `languages` is empty
    /// * `InvalidLanguageCode` if a code is not a language tag
    /// * `UnknownDefaultLanguage` if `default_code` is not configured
    pub fn new(languages: Vec<LanguageConfig>, default_code: &str) -> Result<Self> {
        if languages.is_empty() {
            return Err(ConfigurationError::NoLanguages);
        }

        let mut codes = Vec::with_capacity(languages.len());
        let mut names = HashMap::with_capacity(languages.len());
        for lang in languages {
            if !is_valid_tag(&lang.code) {
                return Err(ConfigurationError::InvalidLanguageCode { code: lang.code });
            }
            names.insert(to_locale(&lang.code), lang.name);
            codes.push(lang.code);
        }

        let default_token = to_locale(default_code);
        let Some(default) = codes.iter().find(|c| to_locale(c) == default_token) else {
            return Err(ConfigurationError::UnknownDefaultLanguage {
                code: default_code.to_string(),
            });
        };
        let default_code = default.clone();

        Ok(Self {
            codes,
            default_code,
            names: RwLock::new(names),
        })
    }

    /// Install the process-wide registry.
    ///
    /// Only the first call installs; later calls return the registry already in place.
    pub fn install(registry: Arc<Self>) -> Arc<Self> {
        REGISTRY.get_or_init(|| registry).clone()
    }

    /// The process-wide registry, if one was installed.
    pub fn global() -> Option<Arc<Self>> {
        REGISTRY.get().cloned()
    }

    /// Configured language codes, in configuration order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Configured languages with their current display names.
    pub fn languages(&self) -> Vec<LanguageConfig> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        self.codes
            .iter()
            .map(|code| LanguageConfig {
                code: code.clone(),
                name: names.get(&to_locale(code)).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// The default/fallback language code.
    pub fn default_language(&self) -> &str {
        &self.default_code
    }

    /// Check whether `code` names the default language (any tag spelling).
    pub fn is_default(&self, code: &str) -> bool {
        to_locale(code) == to_locale(&self.default_code)
    }

    /// Check whether a language is configured (any tag spelling).
    pub fn is_configured(&self, code: &str) -> bool {
        let token = to_locale(code);
        self.codes.iter().any(|c| to_locale(c) == token)
    }

    /// Look up a language by code.
    pub fn get_by_code(&self, code: &str) -> Option<LanguageConfig> {
        let token = to_locale(code);
        let name = self.display_name(code)?;
        self.codes
            .iter()
            .find(|c| to_locale(c) == token)
            .map(|c| LanguageConfig::new(c.clone(), name))
    }

    /// Current display name of a language.
    pub fn display_name(&self, code: &str) -> Option<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&to_locale(code))
            .cloned()
    }

    /// Rename a configured language. Returns false when the language is unknown.
    pub fn set_display_name(&self, code: &str, name: impl Into<String>) -> bool {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        match names.get_mut(&to_locale(code)) {
            Some(slot) => {
                *slot = name.into();
                true
            }
            None => false,
        }
    }
}
