//! Field expansion: one stored field per configured language.

use crate::i18n::LanguageRegistry;
use crate::schema::field::{ExpandedField, FieldDeclaration};
use crate::schema::label::LazyLabel;
use crate::schema::naming::real_name;
use std::sync::Arc;
use tracing::debug;

/// Expand a translatable field into one field per language of `registry`.
///
/// The default language keeps the declaration unchanged. Every other language
/// may be left blank, and may hold no value unless the field has a default.
pub fn expand(field: &FieldDeclaration, registry: &Arc<LanguageRegistry>) -> Vec<ExpandedField> {
    registry
        .codes()
        .iter()
        .map(|code| {
            let mut config = field.clone();
            if !registry.is_default(code) {
                if !config.null && config.default.is_none() {
                    config.null = true;
                }
                config.blank = true;
            }

            let generated_name = real_name(&field.name, code);
            debug!(
                field = %field.name,
                language = %code,
                generated = %generated_name,
                null = config.null,
                blank = config.blank,
                "Expanded translatable field"
            );

            ExpandedField {
                label: LazyLabel::new(
                    &field.name,
                    field.explicit_label(),
                    code,
                    Arc::clone(registry),
                ),
                generated_name,
                language_code: code.clone(),
                original_field_name: field.name.clone(),
                config,
            }
        })
        .collect()
}
