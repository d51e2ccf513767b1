use std::collections::BTreeMap;

use crate::errors::{Result, StencilError};

/// Declared attribute and association names for one type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateSpec {
    columns: Vec<String>,
    associations: Vec<String>,
}

impl TemplateSpec {
    pub fn new<C, A>(columns: C, associations: A) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            associations: associations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn associations(&self) -> &[String] {
        &self.associations
    }
}

/// Per-type template declarations, keyed by type tag
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    specs: BTreeMap<String, TemplateSpec>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the template for `type_name`, replacing any earlier declaration
    pub fn declare<C, A>(&mut self, type_name: impl Into<String>, columns: C, associations: A)
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        self.declare_spec(type_name, TemplateSpec::new(columns, associations));
    }

    pub fn declare_spec(&mut self, type_name: impl Into<String>, spec: TemplateSpec) {
        let type_name = type_name.into();
        tracing::debug!(
            type_name = %type_name,
            columns = spec.columns.len(),
            associations = spec.associations.len(),
            "template declared"
        );
        self.specs.insert(type_name, spec);
    }

    /// # Errors
    ///
    /// `UnconfiguredType` if nothing was declared for `type_name`.
    pub fn lookup(&self, type_name: &str) -> Result<&TemplateSpec> {
        self.specs
            .get(type_name)
            .ok_or_else(|| StencilError::UnconfiguredType {
                type_name: type_name.to_string(),
            })
    }

    pub fn is_declared(&self, type_name: &str) -> bool {
        self.specs.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Declared type names in sorted order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}
