//! Languages: the configured registry, locale tokens and the active language.
//!
//! # Architecture
//!
//! - `registry`: configured languages, their display names and the default language
//! - `locale`: normalisation of language tags into the tokens used in field names
//! - `language`: the active language of a read, explicit or thread-scoped
//!
//! # Example
//!
//! ```rust,ignore
//! use transmeta::i18n::{ActiveLanguage, LanguageConfig, LanguageRegistry};
//!
//! let registry = LanguageRegistry::new(
//!     vec![LanguageConfig::new("en", "English"), LanguageConfig::new("pt-br", "Portuguese")],
//!     "en",
//! )?;
//! let active = ActiveLanguage::new("pt-br");
//! ```

mod language;
pub mod locale;
mod registry;

pub use language::ActiveLanguage;
pub use locale::{base_language, to_locale};
pub use registry::{LanguageConfig, LanguageRegistry};
