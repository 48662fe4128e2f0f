//! Read-time resolution of a translatable field to its best available value.

use crate::i18n::{to_locale, ActiveLanguage};
use crate::schema::field::{is_truthy, ExpandedField};
use crate::schema::naming::real_name;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Stored values of one model instance, keyed by stored field name.
///
/// Translations are written under their generated names (`title_pt_BR`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInstance {
    values: HashMap<String, Value>,
}

impl ModelInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl FromIterator<(String, Value)> for ModelInstance {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Resolves a translatable field for the active language.
///
/// Lookup order: the exact locale, then its base language, then the default
/// language. The first two steps skip falsy values (empty string, zero, false)
/// as well as missing ones; the default language value is returned as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackAccessor {
    field_name: String,

    /// Generated field name by locale token
    by_locale: BTreeMap<String, String>,

    /// Generated field name of the default language
    fallback: String,
}

impl FallbackAccessor {
    /// Build the accessor for the expanded fields of one translatable field.
    pub fn new(field_name: &str, expanded: &[ExpandedField], default_language: &str) -> Self {
        let by_locale: BTreeMap<String, String> = expanded
            .iter()
            .map(|f| (to_locale(&f.language_code), f.generated_name.clone()))
            .collect();
        let fallback = by_locale
            .get(&to_locale(default_language))
            .cloned()
            .unwrap_or_else(|| real_name(field_name, default_language));

        Self {
            field_name: field_name.to_string(),
            by_locale,
            fallback,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Generated field name for a locale token, if that language is configured.
    pub fn generated_name(&self, locale: &str) -> Option<&str> {
        self.by_locale.get(&to_locale(locale)).map(String::as_str)
    }

    /// Generated field name of the default language.
    pub fn fallback_name(&self) -> &str {
        &self.fallback
    }

    /// Read the field for `active`. Never fails; an unresolved field is `None`.
    pub fn read<'a>(&self, instance: &'a ModelInstance, active: &ActiveLanguage) -> Option<&'a Value> {
        let present = |locale: &str| {
            self.by_locale
                .get(locale)
                .and_then(|name| instance.get(name))
                .filter(|value| is_truthy(value))
        };

        let value = present(active.locale())
            .or_else(|| present(active.base()))
            .or_else(|| instance.get(&self.fallback));

        if value.is_none() {
            warn!(
                field = %self.field_name,
                language = %active,
                fallback = %self.fallback,
                "No value stored for translatable field"
            );
        }
        value
    }
}
