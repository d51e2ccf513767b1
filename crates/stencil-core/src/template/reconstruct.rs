use serde_json::Value;

use super::check_depth;
use super::snapshot::Snapshot;
use super::spec::TemplateRegistry;
use super::types::TypeRegistry;
use crate::errors::{Result, StencilError};
use crate::model::{downcast, Associated, Attributes, Cardinality, Model, Record};

/// Transient records produced by a reconstruct
///
/// Mirrors the template it came from: one snapshot yields `One`, a sequence
/// yields `Many` in the same order.
#[derive(Debug)]
pub enum Stamped {
    One(Box<dyn Record>),
    Many(Vec<Box<dyn Record>>),
}

impl Stamped {
    pub fn len(&self) -> usize {
        match self {
            Stamped::One(_) => 1,
            Stamped::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Errors
    ///
    /// `TypeMismatch` if a sequence was stamped.
    pub fn into_one(self) -> Result<Box<dyn Record>> {
        match self {
            Stamped::One(record) => Ok(record),
            Stamped::Many(records) => Err(StencilError::TypeMismatch {
                expected: "a single record".to_string(),
                found: format!("a sequence of {} records", records.len()),
            }),
        }
    }

    pub fn into_many(self) -> Vec<Box<dyn Record>> {
        match self {
            Stamped::One(record) => vec![record],
            Stamped::Many(records) => records,
        }
    }

    /// # Errors
    ///
    /// `TypeMismatch` if a sequence was stamped or the record is not an `M`.
    pub fn downcast_one<M: Model>(self) -> Result<M> {
        downcast(self.into_one()?)
    }

    /// # Errors
    ///
    /// `TypeMismatch` if any record is not an `M`.
    pub fn downcast_many<M: Model>(self) -> Result<Vec<M>> {
        self.into_many().into_iter().map(downcast).collect()
    }
}

/// Read-only view over both registries for one reconstruct call
pub(crate) struct Reconstructor<'e> {
    pub(crate) templates: &'e TemplateRegistry,
    pub(crate) types: &'e TypeRegistry,
    pub(crate) max_depth: Option<usize>,
}

impl Reconstructor<'_> {
    /// Build a new transient `type_name` instance from `snapshot`
    pub(crate) fn reconstruct(&self, type_name: &str, snapshot: Snapshot) -> Result<Box<dyn Record>> {
        self.walk(type_name, snapshot, 0)
    }

    // Same call-depth profile as the snapshot walk: one frame per nesting level
    fn walk(&self, type_name: &str, mut snapshot: Snapshot, depth: usize) -> Result<Box<dyn Record>> {
        check_depth(type_name, depth, self.max_depth)?;
        let spec = self.templates.lookup(type_name)?;
        let model = self.types.resolve(type_name)?;

        let mut attributes = Attributes::new();
        for column in spec.columns() {
            if let Some(value) = snapshot.remove(column) {
                attributes.insert_column(column.as_str(), value);
            }
        }

        for association in spec.associations() {
            let Some(value) = snapshot.remove(association) else {
                continue;
            };
            let relation =
                model
                    .relation(association)
                    .ok_or_else(|| StencilError::UnknownAssociation {
                        type_name: type_name.to_string(),
                        association: association.clone(),
                    })?;
            let target = relation.target;
            let associated = match (relation.cardinality, value) {
                (Cardinality::One, Value::Null) => Associated::One(None),
                (Cardinality::One, Value::Object(child)) => {
                    Associated::One(Some(self.walk(target, child, depth + 1)?))
                }
                (Cardinality::Many, Value::Null) => Associated::Many(Vec::new()),
                (Cardinality::Many, Value::Array(items)) => Associated::Many(
                    items
                        .into_iter()
                        .map(|item| match item {
                            Value::Object(child) => self.walk(target, child, depth + 1),
                            other => Err(malformed(type_name, association, Cardinality::Many, &other)),
                        })
                        .collect::<Result<Vec<_>>>()?,
                ),
                (cardinality, other) => {
                    return Err(malformed(type_name, association, cardinality, &other))
                }
            };
            attributes.insert_association(association.as_str(), associated);
        }

        tracing::trace!(type_name, depth, "reconstruct");
        model.instantiate(attributes)
    }
}

fn malformed(type_name: &str, association: &str, cardinality: Cardinality, found: &Value) -> StencilError {
    StencilError::MalformedTemplate {
        type_name: type_name.to_string(),
        reason: format!(
            "{} association '{}' cannot hold {}",
            cardinality,
            association,
            value_kind(found)
        ),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
