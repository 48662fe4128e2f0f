//! Schema compiler: registers model definitions and expands their translatable fields.
//!
//! Models are registered explicitly, parents before children. Each model is
//! compiled exactly once into an immutable [`ModelSchema`]; on any error the
//! model is not registered at all.

use crate::error::{ConfigurationError, Result};
use crate::i18n::{to_locale, LanguageRegistry};
use crate::schema::accessor::FallbackAccessor;
use crate::schema::expand::expand;
use crate::schema::field::ModelField;
use crate::schema::inherit;
use crate::schema::model::{ModelDefinition, ModelSchema, TranslateDeclaration};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of compiled model schemas sharing one language registry.
pub struct SchemaCompiler {
    registry: Arc<LanguageRegistry>,

    /// Compiled models by name
    models: HashMap<String, Arc<ModelSchema>>,

    /// Registration order
    order: Vec<String>,
}

impl SchemaCompiler {
    /// Create an empty compiler expanding fields into the languages of `registry`.
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self {
            registry,
            models: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry the models are expanded against.
    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// A registered model by name.
    pub fn get(&self, name: &str) -> Option<Arc<ModelSchema>> {
        self.models.get(name).cloned()
    }

    /// Registered models, in registration order.
    pub fn models(&self) -> Vec<Arc<ModelSchema>> {
        self.order
            .iter()
            .filter_map(|name| self.models.get(name).cloned())
            .collect()
    }

    /// Every translatable field reachable from a registered model.
    ///
    /// # Arguments
    /// * `name` - Registered model name
    /// * `column_in_current_table` - Follow only abstract parents, whose fields live in the model's own table
    ///
    /// # Returns
    /// * `Some(set)` for a registered model
    /// * `None` if no model of that name is registered
    pub fn all_translatable_fields(
        &self,
        name: &str,
        column_in_current_table: bool,
    ) -> Option<BTreeSet<String>> {
        let model = self.get(name)?;
        let lookup = |parent: &str| self.get(parent);
        Some(inherit::all_translatable_fields(
            &model,
            &lookup,
            column_in_current_table,
        ))
    }

    /// Register every model of a JSON array of definitions, in order.
    pub fn load_json(&mut self, json: &str) -> Result<Vec<Arc<ModelSchema>>> {
        let definitions: Vec<ModelDefinition> = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidDefinition(e.to_string()))?;
        definitions
            .into_iter()
            .map(|definition| self.register(definition))
            .collect()
    }

    /// Compile and register one model.
    ///
    /// # Arguments
    /// * `definition` - The model as declared; its parents must already be registered
    ///
    /// # Returns
    /// * `Ok(schema)` with the immutable compiled schema
    /// * `Err(ConfigurationError)` if the definition is invalid; nothing is registered then
    pub fn register(&mut self, definition: ModelDefinition) -> Result<Arc<ModelSchema>> {
        if self.models.contains_key(&definition.name) {
            return Err(ConfigurationError::DuplicateModel {
                model: definition.name,
            });
        }

        let schema = Arc::new(self.compile(definition)?);
        info!(
            model = %schema.name,
            fields = schema.fields.len(),
            translatable = schema.translatable_fields.len(),
            "Compiled model schema"
        );

        self.order.push(schema.name.clone());
        self.models.insert(schema.name.clone(), Arc::clone(&schema));
        Ok(schema)
    }

    fn compile(&self, definition: ModelDefinition) -> Result<ModelSchema> {
        let ModelDefinition {
            name,
            is_abstract,
            parents: parent_names,
            fields: declared,
            translate,
        } = definition;

        let parents = parent_names
            .iter()
            .map(|parent| {
                self.get(parent).ok_or_else(|| ConfigurationError::UnknownParent {
                    model: name.clone(),
                    parent: parent.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let own = match translate {
            None => None,
            Some(TranslateDeclaration::Single(found)) => {
                return Err(ConfigurationError::TranslateNotCollection { model: name, found });
            }
            Some(TranslateDeclaration::Names(names)) => {
                if let Some(missing) = names
                    .iter()
                    .find(|n| !declared.iter().any(|field| &field.name == *n))
                {
                    return Err(ConfigurationError::UnknownField {
                        model: name,
                        field: missing.clone(),
                    });
                }
                Some(names)
            }
        };

        let mut schema = ModelSchema {
            translatable_fields: inherit::resolve(own.as_deref(), &parents),
            name,
            is_abstract,
            parents: parent_names,
            fields: Vec::new(),
            accessors: BTreeMap::new(),
            generated: HashMap::new(),
            origins: HashMap::new(),
        };

        // Abstract parents hand their stored fields down; every parent hands down its accessors.
        for parent in &parents {
            if parent.is_abstract() {
                schema.fields.extend(parent.fields.iter().cloned());
                schema
                    .generated
                    .extend(parent.generated.iter().map(|(k, v)| (k.clone(), v.clone())));
                schema
                    .origins
                    .extend(parent.origins.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            schema
                .accessors
                .extend(parent.accessors.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let translated: HashSet<&str> = own
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();

        for field in declared {
            if !translated.contains(field.name.as_str()) {
                schema.fields.push(ModelField::Plain(field));
                continue;
            }

            let expanded = expand(&field, &self.registry);
            schema.accessors.insert(
                field.name.clone(),
                FallbackAccessor::new(&field.name, &expanded, self.registry.default_language()),
            );
            for lang_field in expanded {
                schema.generated.insert(
                    (field.name.clone(), to_locale(&lang_field.language_code)),
                    lang_field.generated_name.clone(),
                );
                schema.origins.insert(
                    lang_field.generated_name.clone(),
                    (field.name.clone(), lang_field.language_code.clone()),
                );
                schema.fields.push(ModelField::Expanded(lang_field));
            }
            debug!(model = %schema.name, field = %field.name, "Installed fallback accessor");
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = schema.fields.iter().find(|f| !seen.insert(f.name())) {
            return Err(ConfigurationError::GeneratedNameCollision {
                model: schema.name.clone(),
                name: duplicate.name().to_string(),
            });
        }

        if let Some(shadowing) = schema
            .fields
            .iter()
            .filter(|f| matches!(f, ModelField::Plain(_)))
            .find(|f| schema.accessors.contains_key(f.name()))
        {
            return Err(ConfigurationError::FieldShadowsTranslation {
                model: schema.name.clone(),
                field: shadowing.name().to_string(),
            });
        }

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{ActiveLanguage, LanguageConfig};
    use crate::schema::accessor::ModelInstance;
    use crate::schema::field::FieldDeclaration;
    use crate::schema::naming::canonical_name;
    use serde_json::json;

    fn compiler() -> SchemaCompiler {
        let registry = LanguageRegistry::new(
            vec![
                LanguageConfig::new("en", "English"),
                LanguageConfig::new("pt-br", "Brazilian Portuguese"),
            ],
            "en",
        )
        .expect("valid registry");
        SchemaCompiler::new(Arc::new(registry))
    }

    fn test_model() -> ModelDefinition {
        ModelDefinition::new("TestModel")
            .field(FieldDeclaration::char("i18n_field", 255))
            .translate(&["i18n_field"][..])
    }

    // ==================== Expansion Tests ====================

    #[test]
    fn test_fields_created_for_each_language() {
        let mut compiler = compiler();
        let schema = compiler.register(test_model()).expect("should compile");
        assert_eq!(schema.field_names(), vec!["i18n_field_en", "i18n_field_pt_BR"]);
        assert!(schema.field("i18n_field").is_none());
        assert!(schema.accessor("i18n_field").is_some());
        assert_eq!(
            schema.translatable_fields().iter().collect::<Vec<_>>(),
            vec!["i18n_field"]
        );
    }

    #[test]
    fn test_plain_fields_kept_in_order() {
        let mut compiler = compiler();
        let schema = compiler
            .register(
                ModelDefinition::new("Article")
                    .field(FieldDeclaration::char("slug", 50))
                    .field(FieldDeclaration::char("title", 100))
                    .field(FieldDeclaration::char("author", 50))
                    .translate(&["title"][..]),
            )
            .expect("should compile");
        assert_eq!(
            schema.field_names(),
            vec!["slug", "title_en", "title_pt_BR", "author"]
        );
        assert_eq!(canonical_name(schema.field("slug").expect("slug")), "slug");
        assert_eq!(canonical_name(schema.field("title_pt_BR").expect("title")), "title");
    }

    #[test]
    fn test_side_tables() {
        let mut compiler = compiler();
        let schema = compiler.register(test_model()).expect("should compile");
        assert_eq!(schema.generated_name("i18n_field", "pt-br"), Some("i18n_field_pt_BR"));
        assert_eq!(schema.generated_name("i18n_field", "fr"), None);
        assert_eq!(schema.language_of("i18n_field_pt_BR"), Some("pt-br"));
        assert_eq!(schema.language_of("unknown"), None);
        assert_eq!(schema.canonical_name("i18n_field_en"), "i18n_field");
        assert_eq!(schema.canonical_name("other"), "other");
    }

    #[test]
    fn test_model_without_translations() {
        let mut compiler = compiler();
        let schema = compiler
            .register(ModelDefinition::new("Plain").field(FieldDeclaration::char("name", 10)))
            .expect("should compile");
        assert_eq!(schema.field_names(), vec!["name"]);
        assert!(schema.translatable_fields().is_empty());
        assert!(schema.accessors().is_empty());
    }

    // ==================== Error Tests ====================

    #[test]
    fn test_single_name_instead_of_collection() {
        let mut compiler = compiler();
        let result = compiler.register(ModelDefinition {
            translate: Some(TranslateDeclaration::Single("i18n_field".to_string())),
            ..test_model()
        });
        assert!(matches!(
            result,
            Err(ConfigurationError::TranslateNotCollection { .. })
        ));
        assert!(compiler.get("TestModel").is_none());
    }

    #[test]
    fn test_unknown_translatable_field() {
        let mut compiler = compiler();
        let result = compiler.register(test_model().translate(&["missing"][..]));
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::UnknownField {
                model: "TestModel".to_string(),
                field: "missing".to_string(),
            }
        );
        assert!(compiler.models().is_empty());
    }

    #[test]
    fn test_inherited_field_is_not_declared_here() {
        let mut compiler = compiler();
        compiler
            .register(
                ModelDefinition::new("Base")
                    .abstract_model()
                    .field(FieldDeclaration::char("x", 10)),
            )
            .expect("base should compile");
        let result = compiler.register(ModelDefinition::new("Child").parent("Base").translate(&["x"][..]));
        assert!(matches!(result, Err(ConfigurationError::UnknownField { .. })));
    }

    #[test]
    fn test_duplicate_model() {
        let mut compiler = compiler();
        compiler.register(test_model()).expect("should compile");
        assert!(matches!(
            compiler.register(test_model()),
            Err(ConfigurationError::DuplicateModel { .. })
        ));
    }

    #[test]
    fn test_unknown_parent() {
        let mut compiler = compiler();
        let result = compiler.register(test_model().parent("Missing"));
        assert!(matches!(result, Err(ConfigurationError::UnknownParent { .. })));
    }

    #[test]
    fn test_generated_name_collision() {
        let mut compiler = compiler();
        let result = compiler.register(
            test_model().field(FieldDeclaration::char("i18n_field_en", 10)),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::GeneratedNameCollision {
                model: "TestModel".to_string(),
                name: "i18n_field_en".to_string(),
            }
        );
    }

    #[test]
    fn test_plain_field_cannot_shadow_inherited_translation() {
        let mut compiler = compiler();
        compiler
            .register(
                ModelDefinition::new("Base")
                    .abstract_model()
                    .field(FieldDeclaration::char("x", 10))
                    .translate(&["x"][..]),
            )
            .expect("base should compile");
        let result = compiler.register(
            ModelDefinition::new("Child")
                .parent("Base")
                .field(FieldDeclaration::char("x", 10)),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::FieldShadowsTranslation {
                model: "Child".to_string(),
                field: "x".to_string(),
            }
        );
        assert!(compiler.get("Child").is_none());
    }

    #[test]
    fn test_plain_field_cannot_shadow_concrete_parent_translation() {
        let mut compiler = compiler();
        compiler.register(test_model()).expect("should compile");
        let result = compiler.register(
            ModelDefinition::new("InheritedTestModel")
                .parent("TestModel")
                .field(FieldDeclaration::char("i18n_field", 255)),
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::FieldShadowsTranslation { field, .. }) if field == "i18n_field"
        ));
    }

    // ==================== Inheritance Tests ====================

    #[test]
    fn test_abstract_parent_translations_inherited() {
        let mut compiler = compiler();
        compiler
            .register(
                ModelDefinition::new("Base")
                    .abstract_model()
                    .field(FieldDeclaration::char("x", 10))
                    .translate(&["x"][..]),
            )
            .expect("base should compile");
        let child = compiler
            .register(
                ModelDefinition::new("Child")
                    .parent("Base")
                    .field(FieldDeclaration::char("other", 10)),
            )
            .expect("child should compile");

        assert!(child.translatable_fields().contains("x"));
        assert_eq!(child.field_names(), vec!["x_en", "x_pt_BR", "other"]);
        assert_eq!(child.language_of("x_en"), Some("en"));

        let instance = ModelInstance::new().with("x_en", "value").with("x_pt_BR", "valor");
        assert_eq!(
            child.get_translated(&instance, "x", &ActiveLanguage::new("pt-br")),
            Some(&json!("valor"))
        );
    }

    #[test]
    fn test_multi_level_abstract_inheritance() {
        let mut compiler = compiler();
        compiler
            .register(
                ModelDefinition::new("Root")
                    .abstract_model()
                    .field(FieldDeclaration::char("x", 10))
                    .translate(&["x"][..]),
            )
            .expect("root should compile");
        compiler
            .register(ModelDefinition::new("Middle").abstract_model().parent("Root"))
            .expect("middle should compile");
        let leaf = compiler
            .register(ModelDefinition::new("Leaf").parent("Middle"))
            .expect("leaf should compile");

        assert!(leaf.translatable_fields().contains("x"));
        assert!(leaf.field("x_pt_BR").is_some());
    }

    #[test]
    fn test_concrete_parent_keeps_its_fields() {
        let mut compiler = compiler();
        compiler.register(test_model()).expect("should compile");
        let child = compiler
            .register(
                ModelDefinition::new("InheritedTestModel")
                    .parent("TestModel")
                    .field(FieldDeclaration::char("noni18n_field", 255)),
            )
            .expect("child should compile");

        assert_eq!(child.field_names(), vec!["noni18n_field"]);
        assert!(child.translatable_fields().is_empty());
        assert!(child.accessor("i18n_field").is_some());
        assert_eq!(
            compiler.all_translatable_fields("InheritedTestModel", false),
            Some(BTreeSet::from(["i18n_field".to_string()]))
        );
    }

    // ==================== load_json Tests ====================

    #[test]
    fn test_load_json() {
        let mut compiler = compiler();
        let schemas = compiler
            .load_json(
                r#"[
                    {"name": "Base", "abstract": true,
                     "fields": [{"name": "title", "type": "char", "max_length": 100}],
                     "translate": ["title"]},
                    {"name": "Article", "parents": ["Base"],
                     "fields": [{"name": "body", "type": "text"}],
                     "translate": ["body"]}
                ]"#,
            )
            .expect("should load");
        assert_eq!(schemas.len(), 2);
        let article = compiler.get("Article").expect("registered");
        assert_eq!(
            article.field_names(),
            vec!["title_en", "title_pt_BR", "body_en", "body_pt_BR"]
        );
        assert_eq!(
            article.translatable_fields().iter().collect::<Vec<_>>(),
            vec!["body"]
        );
    }

    #[test]
    fn test_load_json_rejects_single_string_translate() {
        let mut compiler = compiler();
        let result = compiler.load_json(
            r#"[{"name": "M", "fields": [{"name": "title", "type": "text"}], "translate": "title"}]"#,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::TranslateNotCollection { found, .. }) if found == "title"
        ));
    }

    #[test]
    fn test_load_json_invalid_document() {
        let mut compiler = compiler();
        assert!(matches!(
            compiler.load_json("{not json"),
            Err(ConfigurationError::InvalidDefinition(_))
        ));
    }
}
