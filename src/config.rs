use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Languages
    pub languages: Vec<LanguageConfig>,
    pub default_language: String,

    // Models
    pub models_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let languages = match std::env::var("TRANSMETA_LANGUAGES") {
            Ok(raw) => parse_languages(&raw).context("TRANSMETA_LANGUAGES is malformed")?,
            Err(_) => vec![LanguageConfig::new("en", "English")],
        };

        // TRANSMETA_DEFAULT_LANGUAGE, then LANGUAGE_CODE, then the first configured language
        let default_language = std::env::var("TRANSMETA_DEFAULT_LANGUAGE")
            .or_else(|_| std::env::var("LANGUAGE_CODE"))
            .ok()
            .or_else(|| languages.first().map(|lang| lang.code.clone()))
            .context("no default language configured")?;

        Ok(Self {
            languages,
            default_language,
            models_file: std::env::var("TRANSMETA_MODELS").ok(),
        })
    }

    /// Build the language registry described by this configuration.
    pub fn registry(&self) -> Result<LanguageRegistry> {
        LanguageRegistry::new(self.languages.clone(), &self.default_language)
            .context("invalid language configuration")
    }
}

/// Parse `"en:English,pt-br:Brazilian Portuguese"` into language entries.
fn parse_languages(raw: &str) -> Result<Vec<LanguageConfig>> {
    let mut languages = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((code, name)) = entry.split_once(':') else {
            bail!("expected <code>:<name>, got '{}'", entry);
        };
        languages.push(LanguageConfig::new(code.trim(), name.trim()));
    }
    if languages.is_empty() {
        bail!("no languages listed");
    }
    Ok(languages)
}
