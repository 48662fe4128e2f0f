//! Configuration errors raised while compiling model schemas.
//!
//! Every variant is fatal for the model being registered: the compiler never
//! publishes a partial schema.

use thiserror::Error;

/// Result type for schema compilation.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `translate` was given a single name instead of a collection of names
    #[error("translate attribute of model '{model}' must be a collection of field names, got '{found}'")]
    TranslateNotCollection { model: String, found: String },

    /// A translatable name has no matching field declaration
    #[error("There is no field {field} in model {model}, as specified in the translate attribute")]
    UnknownField { model: String, field: String },

    #[error("no languages configured")]
    NoLanguages,

    #[error("default language '{code}' is not one of the configured languages")]
    UnknownDefaultLanguage { code: String },

    #[error("invalid language code '{code}'")]
    InvalidLanguageCode { code: String },

    #[error("model '{model}' is already registered")]
    DuplicateModel { model: String },

    #[error("model '{model}' inherits from unregistered model '{parent}'")]
    UnknownParent { model: String, parent: String },

    /// A model definition document could not be parsed
    #[error("invalid model definition: {0}")]
    InvalidDefinition(String),

    /// A plain field has the name of a translatable field read through an accessor
    #[error("field '{field}' of model '{model}' shadows the translatable field of the same name")]
    FieldShadowsTranslation { model: String, field: String },

    /// Two fields of one model ended up with the same stored name
    #[error("field name '{name}' is generated more than once in model '{model}'")]
    GeneratedNameCollision { model: String, name: String },
}
