use std::any::Any;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::attributes::{Associated, Attributes};
use super::relation::{Cardinality, Relation};
use crate::errors::{Result, StencilError};

/// Related record(s) read from an association
#[derive(Debug)]
pub enum Related<'a> {
    One(Option<&'a dyn Record>),
    Many(Vec<&'a dyn Record>),
}

impl<'a> Related<'a> {
    pub fn one<R: Record>(record: &'a R) -> Self {
        Related::One(Some(record))
    }

    pub fn optional<R: Record>(record: Option<&'a R>) -> Self {
        Related::One(record.map(|r| r as &dyn Record))
    }

    pub fn many<R, I>(records: I) -> Self
    where
        R: Record,
        I: IntoIterator<Item = &'a R>,
    {
        Related::Many(records.into_iter().map(|r| r as &dyn Record).collect())
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Related::One(_) => Cardinality::One,
            Related::Many(_) => Cardinality::Many,
        }
    }
}

/// Object-safe view of a record
///
/// Every [`Model`] is a `Record` through the blanket impl below; the engine
/// walks graphs of `&dyn Record` and hands back `Box<dyn Record>`.
pub trait Record: Any + Debug + Send + Sync {
    /// Stable tag naming the record's type; persisted in containers
    fn type_name(&self) -> &'static str;

    /// Read a column by name, `None` if the record has no such attribute
    ///
    /// # Errors
    ///
    /// `CodecFailure` if the record's fields cannot be serialized.
    fn read_attribute(&self, name: &str) -> Result<Option<Value>>;

    /// Read several columns against a single serialization of the record
    ///
    /// # Errors
    ///
    /// `CodecFailure` if the record's fields cannot be serialized,
    /// `UnknownAttribute` for the first name the record cannot read.
    fn read_attributes(&self, names: &[String]) -> Result<Map<String, Value>>;

    /// Read an association by name, `None` if the record exposes no such association
    fn read_association(&self, name: &str) -> Option<Related<'_>>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<'a> dyn Record + 'a {
    pub fn is<M: Model>(&self) -> bool {
        self.as_any().is::<M>()
    }

    pub fn downcast_ref<M: Model>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }

    pub fn downcast_mut<M: Model>(&mut self) -> Option<&mut M> {
        self.as_any_mut().downcast_mut::<M>()
    }
}

/// A concrete record type taking part in templates
///
/// Columns are read and written through the type's serde representation
/// unless [`Model::attribute`] / [`Model::instantiate`] are overridden.
/// [`Model::fields`] is computed once per record read, however many columns
/// are declared.
/// Association fields must deserialize from an absent key
/// (`#[serde(default)]`) because the default `instantiate` only sees columns
/// before attaching associations.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use stencil_core::Model;
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Site {
///     code: String,
/// }
///
/// impl Model for Site {
///     const TYPE_NAME: &'static str = "Site";
/// }
/// ```
pub trait Model: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    /// Associations this type can reconstruct, with their targets
    fn relations() -> Vec<Relation> {
        Vec::new()
    }

    /// The record's plain fields, as its serde representation
    ///
    /// A record that does not serialize to a map has no plain fields.
    ///
    /// # Errors
    ///
    /// `CodecFailure` carrying the serializer's message.
    fn fields(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(_) => Ok(Map::new()),
            Err(e) => Err(StencilError::CodecFailure {
                codec: "json".to_string(),
                message: format!("serializing {}: {}", Self::TYPE_NAME, e),
            }),
        }
    }

    /// Read one column; `fields` is the output of [`Model::fields`]
    fn attribute(&self, name: &str, fields: &Map<String, Value>) -> Option<Value> {
        fields.get(name).cloned()
    }

    fn association(&self, _name: &str) -> Option<Related<'_>> {
        None
    }

    /// Build a new, unsaved instance from reconstructed attributes
    ///
    /// # Errors
    ///
    /// `Construction` if the columns do not deserialize into `Self`, or
    /// whatever [`Model::attach`] reports for an association.
    fn instantiate(attributes: Attributes) -> Result<Self> {
        let (columns, associations) = attributes.into_parts();
        let mut instance: Self =
            serde_json::from_value(Value::Object(columns)).map_err(|e| {
                StencilError::Construction {
                    type_name: Self::TYPE_NAME.to_string(),
                    reason: e.to_string(),
                }
            })?;
        for (name, associated) in associations {
            instance.attach(&name, associated)?;
        }
        Ok(instance)
    }

    /// Wire a reconstructed association into `self`
    ///
    /// # Errors
    ///
    /// `UnknownAssociation` by default; implementations return
    /// `TypeMismatch` when the related records are of the wrong type.
    fn attach(&mut self, name: &str, _associated: Associated) -> Result<()> {
        Err(StencilError::UnknownAssociation {
            type_name: Self::TYPE_NAME.to_string(),
            association: name.to_string(),
        })
    }
}

impl<M: Model> Record for M {
    fn type_name(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn read_attribute(&self, name: &str) -> Result<Option<Value>> {
        let fields = self.fields()?;
        Ok(self.attribute(name, &fields))
    }

    fn read_attributes(&self, names: &[String]) -> Result<Map<String, Value>> {
        let fields = self.fields()?;
        names
            .iter()
            .map(|name| {
                self.attribute(name, &fields)
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| StencilError::UnknownAttribute {
                        type_name: M::TYPE_NAME.to_string(),
                        attribute: name.clone(),
                    })
            })
            .collect()
    }

    fn read_association(&self, name: &str) -> Option<Related<'_>> {
        self.association(name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
