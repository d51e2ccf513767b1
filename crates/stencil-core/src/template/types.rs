use std::collections::BTreeMap;

use crate::errors::{Result, StencilError};
use crate::model::{Attributes, Model, Record, Relation};

type Instantiate = fn(Attributes) -> Result<Box<dyn Record>>;

fn instantiate_boxed<M: Model>(attributes: Attributes) -> Result<Box<dyn Record>> {
    Ok(Box::new(M::instantiate(attributes)?))
}

/// Reconstruction entry point for one registered type
#[derive(Debug, Clone)]
pub struct ModelType {
    type_name: &'static str,
    relations: Vec<Relation>,
    instantiate: Instantiate,
}

impl ModelType {
    pub fn of<M: Model>() -> Self {
        Self {
            type_name: M::TYPE_NAME,
            relations: M::relations(),
            instantiate: instantiate_boxed::<M>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// # Errors
    ///
    /// Whatever the model's `instantiate` reports.
    pub fn instantiate(&self, attributes: Attributes) -> Result<Box<dyn Record>> {
        (self.instantiate)(attributes)
    }
}

/// Type tag -> constructor resolution
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, ModelType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<M: Model>(&mut self) {
        self.types.insert(M::TYPE_NAME, ModelType::of::<M>());
    }

    /// # Errors
    ///
    /// `UnresolvableType` if no type was registered under `type_name`.
    pub fn resolve(&self, type_name: &str) -> Result<&ModelType> {
        self.types
            .get(type_name)
            .ok_or_else(|| StencilError::UnresolvableType {
                type_name: type_name.to_string(),
            })
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
