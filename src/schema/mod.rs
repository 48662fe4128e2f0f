//! Model schemas with per-language field expansion.
//!
//! - `field`: declarations, expanded fields and stored values
//! - `naming`: generated field names and canonical names
//! - `label`: deferred labels of expanded fields
//! - `expand`: one field per configured language
//! - `inherit`: translatable-field sets across inheritance
//! - `accessor`: fallback reads of translatable fields
//! - `model`: model definitions and compiled schemas
//! - `compiler`: model registration

pub mod accessor;
pub mod compiler;
pub mod expand;
pub mod field;
pub mod inherit;
pub mod label;
pub mod model;
pub mod naming;

pub use accessor::{FallbackAccessor, ModelInstance};
pub use compiler::SchemaCompiler;
pub use expand::expand;
pub use field::{is_truthy, ExpandedField, FieldDeclaration, FieldKind, ModelField};
pub use label::{pretty_name, LazyLabel};
pub use model::{ModelDefinition, ModelSchema, TranslateDeclaration};
pub use naming::{canonical_name, fallback_name, real_name, real_names_in_each_language, Canonical};
