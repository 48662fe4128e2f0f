//! Field declarations, expanded fields and stored values.

use crate::schema::label::LazyLabel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value type of a declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Char { max_length: u32 },
    Text,
    Integer,
    Float,
    Boolean,
    Date,
}

/// A declared field and its base configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,

    #[serde(flatten)]
    pub kind: FieldKind,

    /// May hold no value
    #[serde(default)]
    pub null: bool,

    /// May be left empty
    #[serde(default)]
    pub blank: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Human readable label; empty or absent means "derive from the name"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldDeclaration {
    /// Create a required, non-blank declaration with no default and no label.
    ///
    /// # Arguments
    /// * `name` - Field name as declared on the model (e.g. "title")
    /// * `kind` - Value type of the field
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            null: false,
            blank: false,
            default: None,
            label: None,
        }
    }

    /// Shorthand for a character field of at most `max_length` characters.
    pub fn char(name: impl Into<String>, max_length: u32) -> Self {
        Self::new(name, FieldKind::Char { max_length })
    }

    /// Set whether the field may hold no value.
    pub fn with_null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    /// Set whether the field may be left empty.
    pub fn with_blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    /// Set the default value. Non-default languages of a field with a default stay not-null.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the human readable label used as the base of every language label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Explicit label, ignoring empty strings.
    pub fn explicit_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

/// One stored field generated for a translatable field and a language.
#[derive(Debug, Clone)]
pub struct ExpandedField {
    /// Stored field name, e.g. `title_pt_BR`
    pub generated_name: String,

    /// Configured language code
    pub language_code: String,

    /// Name of the translatable field this was generated from
    pub original_field_name: String,

    /// Copy of the original declaration, possibly relaxed
    pub config: FieldDeclaration,

    pub label: LazyLabel,
}

/// A field of a compiled model: either declared as-is or generated per language.
#[derive(Debug, Clone)]
pub enum ModelField {
    Plain(FieldDeclaration),
    Expanded(ExpandedField),
}

impl ModelField {
    /// Stored name of the field.
    pub fn name(&self) -> &str {
        match self {
            ModelField::Plain(decl) => &decl.name,
            ModelField::Expanded(field) => &field.generated_name,
        }
    }

    /// Declaration of the field; for expanded fields this is the relaxed per-language copy.
    pub fn config(&self) -> &FieldDeclaration {
        match self {
            ModelField::Plain(decl) => decl,
            ModelField::Expanded(field) => &field.config,
        }
    }

    /// The expanded field, or `None` for a plain field.
    pub fn as_expanded(&self) -> Option<&ExpandedField> {
        match self {
            ModelField::Expanded(field) => Some(field),
            ModelField::Plain(_) => None,
        }
    }
}

/// Whether a stored value counts as present for fallback resolution.
///
/// Null, false, zero, empty strings and empty collections all count as absent,
/// so a stored `""` falls through to the next language.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
