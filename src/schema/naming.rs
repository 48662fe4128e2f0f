//! Naming scheme for generated fields: `<field>_<locale token>`.

use crate::i18n::{to_locale, LanguageRegistry};
use crate::schema::field::{ExpandedField, FieldDeclaration, ModelField};

/// Stored name of `field` in `lang` (`title`, `pt-br` -> `title_pt_BR`).
pub fn real_name(field: &str, lang: &str) -> String {
    format!("{}_{}", field, to_locale(lang))
}

/// Stored name of `field` in every configured language, in registry order.
pub fn real_names_in_each_language(field: &str, registry: &LanguageRegistry) -> Vec<String> {
    registry
        .codes()
        .iter()
        .map(|code| real_name(field, code))
        .collect()
}

/// Stored name of `field` in the default language.
pub fn fallback_name(field: &str, registry: &LanguageRegistry) -> String {
    real_name(field, registry.default_language())
}

/// Language token of a generated name, given the field it was generated from.
///
/// Returns `None` when `generated` was not built from `original`. Compiled
/// schemas keep a side table instead, see `ModelSchema::language_of`.
pub fn language_of<'a>(generated: &'a str, original: &str) -> Option<&'a str> {
    generated
        .strip_prefix(original)?
        .strip_prefix('_')
        .filter(|token| !token.is_empty())
}

/// Fields that can report the name of the field they stand for.
pub trait Canonical {
    /// `title_en` and `title_pt_BR` both answer `title`; ordinary fields answer their own name.
    fn canonical_name(&self) -> &str;
}

impl Canonical for ExpandedField {
    fn canonical_name(&self) -> &str {
        &self.original_field_name
    }
}

impl Canonical for FieldDeclaration {
    fn canonical_name(&self) -> &str {
        &self.name
    }
}

impl Canonical for ModelField {
    fn canonical_name(&self) -> &str {
        match self {
            ModelField::Plain(decl) => decl.canonical_name(),
            ModelField::Expanded(field) => field.canonical_name(),
        }
    }
}

pub fn canonical_name<F: Canonical + ?Sized>(field: &F) -> &str {
    field.canonical_name()
}
