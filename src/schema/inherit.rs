//! Translatable-field sets across model inheritance.

use crate::schema::model::ModelSchema;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Translatable fields of a model.
///
/// An explicit declaration is used as is. Without one, the model takes the
/// union of the sets of its abstract parents. Each parent's set was already
/// resolved the same way when the parent was compiled, so abstract ancestry
/// of any depth is covered.
pub fn resolve(own: Option<&[String]>, parents: &[Arc<ModelSchema>]) -> BTreeSet<String> {
    match own {
        Some(names) => names.iter().cloned().collect(),
        None => parents
            .iter()
            .filter(|parent| parent.is_abstract())
            .flat_map(|parent| parent.translatable_fields().iter().cloned())
            .collect(),
    }
}

/// Every translatable field reachable from `model` through its parents.
///
/// With `column_in_current_table`, only abstract parents are followed, which
/// yields the fields stored in the model's own table.
pub fn all_translatable_fields(
    model: &ModelSchema,
    lookup: &dyn Fn(&str) -> Option<Arc<ModelSchema>>,
    column_in_current_table: bool,
) -> BTreeSet<String> {
    let mut fields = model.translatable_fields().clone();
    for parent in model.parents().iter().filter_map(|name| lookup(name.as_str())) {
        if !column_in_current_table || parent.is_abstract() {
            fields.extend(all_translatable_fields(&parent, lookup, column_in_current_table));
        }
    }
    fields
}
