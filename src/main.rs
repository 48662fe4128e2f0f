use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use transmeta::config::Config;
use transmeta::i18n::LanguageRegistry;
use transmeta::schema::{ModelField, SchemaCompiler};

/// Models compiled when TRANSMETA_MODELS is not set
const DEMO_MODELS: &str = include_str!("../demos/models.json");

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("transmeta=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let registry = LanguageRegistry::install(Arc::new(config.registry()?));
    info!(
        languages = registry.codes().len(),
        default = registry.default_language(),
        "Language registry configured"
    );

    let models = match &config.models_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model file '{}'", path))?,
        None => DEMO_MODELS.to_string(),
    };

    let mut compiler = SchemaCompiler::new(Arc::clone(&registry));
    compiler
        .load_json(&models)
        .context("model schema compilation failed")?;

    for schema in compiler.models() {
        let kind = if schema.is_abstract() { " (abstract)" } else { "" };
        println!("{}{}", schema.name(), kind);
        for field in schema.fields() {
            let config = field.config();
            match field {
                ModelField::Expanded(expanded) => println!(
                    "  {:<24} null={:<5} blank={:<5} label=\"{}\"",
                    expanded.generated_name, config.null, config.blank, expanded.label
                ),
                ModelField::Plain(decl) => println!(
                    "  {:<24} null={:<5} blank={:<5}",
                    decl.name, config.null, config.blank
                ),
            }
        }
        for (name, accessor) in schema.accessors() {
            println!("  {:<24} -> falls back to {}", name, accessor.fallback_name());
        }
        if !schema.translatable_fields().is_empty() {
            let fields: Vec<_> = schema.translatable_fields().iter().cloned().collect();
            println!("  translatable: {}", fields.join(", "));
        }
    }

    info!(models = compiler.models().len(), "Schema compilation finished");
    Ok(())
}
