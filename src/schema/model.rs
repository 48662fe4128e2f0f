//! Model definitions (input) and compiled model schemas (output).

use crate::i18n::{to_locale, ActiveLanguage};
use crate::schema::accessor::{FallbackAccessor, ModelInstance};
use crate::schema::field::{ExpandedField, FieldDeclaration, ModelField};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Which declared fields are translatable.
///
/// A bare string is accepted by the parser only so that it can be reported
/// as a configuration error rather than read as a list of characters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranslateDeclaration {
    Names(Vec<String>),
    Single(String),
}

impl From<Vec<String>> for TranslateDeclaration {
    fn from(names: Vec<String>) -> Self {
        TranslateDeclaration::Names(names)
    }
}

impl From<&[&str]> for TranslateDeclaration {
    fn from(names: &[&str]) -> Self {
        TranslateDeclaration::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

/// A model as declared by the host, before expansion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelDefinition {
    pub name: String,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Parent models, which must be registered first
    #[serde(default)]
    pub parents: Vec<String>,

    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,

    #[serde(default)]
    pub translate: Option<TranslateDeclaration>,
}

impl ModelDefinition {
    /// Create a concrete model with no parents, fields or translations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            parents: Vec::new(),
            fields: Vec::new(),
            translate: None,
        }
    }

    /// Mark the model abstract: children inherit its fields and translations.
    pub fn abstract_model(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Add a parent model. Parents must be registered before this model.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Declare a field, keeping declaration order.
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the translatable field names, replacing any previous declaration.
    ///
    /// # Arguments
    /// * `translate` - Names of declared fields to expand per language
    pub fn translate(mut self, translate: impl Into<TranslateDeclaration>) -> Self {
        self.translate = Some(translate.into());
        self
    }
}

/// The compiled, immutable schema of a model.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    pub(crate) name: String,
    pub(crate) is_abstract: bool,
    pub(crate) parents: Vec<String>,

    /// Stored fields, in declaration order, including those inherited from abstract parents
    pub(crate) fields: Vec<ModelField>,

    pub(crate) translatable_fields: BTreeSet<String>,

    /// Accessors by original field name, including those of every parent
    pub(crate) accessors: BTreeMap<String, FallbackAccessor>,

    /// (original field, locale token) -> generated name
    pub(crate) generated: HashMap<(String, String), String>,

    /// generated name -> (original field, language code)
    pub(crate) origins: HashMap<String, (String, String)>,
}

impl ModelSchema {
    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the model only exists to hand its fields down.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Parent model names, in declaration order.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Stored fields in declaration order, abstract parents' fields first.
    pub fn fields(&self) -> &[ModelField] {
        &self.fields
    }

    /// Look up a stored field by its stored name (`title_en`, `slug`).
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Stored field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(ModelField::name).collect()
    }

    /// Only the fields generated per language.
    pub fn expanded_fields(&self) -> impl Iterator<Item = &ExpandedField> {
        self.fields.iter().filter_map(ModelField::as_expanded)
    }

    /// Translatable field names of this model.
    ///
    /// # Returns
    /// The model's own declaration when it has one, otherwise the union of the
    /// sets of its abstract parents.
    pub fn translatable_fields(&self) -> &BTreeSet<String> {
        &self.translatable_fields
    }

    /// Fallback accessor of a translatable field, own or inherited.
    pub fn accessor(&self, name: &str) -> Option<&FallbackAccessor> {
        self.accessors.get(name)
    }

    /// All accessors keyed by original field name.
    pub fn accessors(&self) -> &BTreeMap<String, FallbackAccessor> {
        &self.accessors
    }

    /// Stored name of `field` in `lang`, if that field is expanded on this model.
    pub fn generated_name(&self, field: &str, lang: &str) -> Option<&str> {
        self.generated
            .get(&(field.to_string(), to_locale(lang)))
            .map(String::as_str)
    }

    /// Language code of a generated field name.
    pub fn language_of(&self, generated: &str) -> Option<&str> {
        self.origins.get(generated).map(|(_, code)| code.as_str())
    }

    /// Original field name of a generated field name; other names pass through.
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.origins
            .get(name)
            .map_or(name, |(original, _)| original.as_str())
    }

    /// Read `name` for `active`: translatable fields go through their accessor,
    /// anything else is read as stored.
    pub fn get_translated<'a>(
        &self,
        instance: &'a ModelInstance,
        name: &str,
        active: &ActiveLanguage,
    ) -> Option<&'a Value> {
        match self.accessors.get(name) {
            Some(accessor) => accessor.read(instance, active),
            None => instance.get(name),
        }
    }
}
