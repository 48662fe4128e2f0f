//! Deferred, language-aware labels for expanded fields.

use crate::i18n::LanguageRegistry;
use std::fmt;
use std::sync::Arc;

/// Turn an identifier into a readable label: `my_i18n_field` -> `My i18n field`.
pub fn pretty_name(ident: &str) -> String {
    let spaced = ident.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Label of an expanded field, rendered on demand.
///
/// The base label is fixed at construction. The language display name is read
/// from the registry each time the label is rendered.
#[derive(Clone)]
pub struct LazyLabel {
    base: String,
    language_code: String,
    registry: Arc<LanguageRegistry>,
}

impl LazyLabel {
    /// Build the label for `field_name` in `language_code`, using `explicit`
    /// as the base label when given and non-empty.
    pub fn new(
        field_name: &str,
        explicit: Option<&str>,
        language_code: &str,
        registry: Arc<LanguageRegistry>,
    ) -> Self {
        let base = match explicit.filter(|l| !l.is_empty()) {
            Some(label) => label.to_string(),
            None => pretty_name(field_name),
        };
        Self {
            base,
            language_code: language_code.to_string(),
            registry,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }
}

impl fmt::Display for LazyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let language = self
            .registry
            .display_name(&self.language_code)
            .unwrap_or_else(|| self.language_code.clone());
        write!(f, "{}", format!("{} {}", self.base, language).to_lowercase())
    }
}

impl fmt::Debug for LazyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyLabel")
            .field("base", &self.base)
            .field("language_code", &self.language_code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LanguageConfig;

    fn registry() -> Arc<LanguageRegistry> {
        Arc::new(
            LanguageRegistry::new(
                vec![
                    LanguageConfig::new("en", "English"),
                    LanguageConfig::new("pt-br", "Brazilian Portuguese"),
                ],
                "en",
            )
            .expect("valid registry"),
        )
    }

    // ==================== pretty_name Tests ====================

    #[test]
    fn test_pretty_name() {
        assert_eq!(pretty_name("my_i18n_field"), "My i18n field");
        assert_eq!(pretty_name("title"), "Title");
        assert_eq!(pretty_name(""), "");
    }

    // ==================== Rendering Tests ====================

    #[test]
    fn test_label_from_field_name() {
        let label = LazyLabel::new("my_i18n_field", None, "en", registry());
        assert_eq!(label.to_string(), "my i18n field english");
    }

    #[test]
    fn test_label_from_explicit_label() {
        let label = LazyLabel::new("title", Some("Headline"), "pt-br", registry());
        assert_eq!(label.base(), "Headline");
        assert_eq!(label.to_string(), "headline brazilian portuguese");
    }

    #[test]
    fn test_empty_explicit_label_uses_field_name() {
        let label = LazyLabel::new("sub_title", Some(""), "en", registry());
        assert_eq!(label.to_string(), "sub title english");
    }

    #[test]
    fn test_label_reads_registry_at_render_time() {
        let registry = registry();
        let label = LazyLabel::new("title", None, "pt-br", Arc::clone(&registry));
        registry.set_display_name("pt-br", "Português");
        assert_eq!(label.to_string(), "title português");
    }
}
