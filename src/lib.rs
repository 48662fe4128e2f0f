//! Per-language storage for translatable model fields.
//!
//! A field declared translatable is expanded into one stored field per
//! configured language (`title_en`, `title_pt_BR`, ...). Reading the field by
//! its original name resolves to the active language, its base language, or
//! the default language, in that order.

pub mod config;
pub mod error;
pub mod i18n;
pub mod schema;

pub use error::{ConfigurationError, Result};
