use serde_json::{Map, Value};

use super::record::{Model, Record};
use super::relation::Cardinality;
use crate::errors::{Result, StencilError};

/// Reconstructed related record(s) for one association
#[derive(Debug)]
pub enum Associated {
    One(Option<Box<dyn Record>>),
    Many(Vec<Box<dyn Record>>),
}

impl Associated {
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Associated::One(_) => Cardinality::One,
            Associated::Many(_) => Cardinality::Many,
        }
    }

    /// Take a to-one association as `M`
    ///
    /// # Errors
    ///
    /// `MalformedTemplate` if this is a to-many association, `TypeMismatch`
    /// if the related record is not an `M`.
    pub fn into_one<M: Model>(self) -> Result<Option<M>> {
        match self {
            Associated::One(None) => Ok(None),
            Associated::One(Some(record)) => downcast(record).map(Some),
            Associated::Many(_) => Err(StencilError::MalformedTemplate {
                type_name: M::TYPE_NAME.to_string(),
                reason: "expected a single related record, found a sequence".to_string(),
            }),
        }
    }

    /// Take a to-many association as `Vec<M>`, preserving order
    ///
    /// # Errors
    ///
    /// `MalformedTemplate` if this is a to-one association, `TypeMismatch`
    /// if any related record is not an `M`.
    pub fn into_many<M: Model>(self) -> Result<Vec<M>> {
        match self {
            Associated::Many(records) => records.into_iter().map(downcast).collect(),
            Associated::One(_) => Err(StencilError::MalformedTemplate {
                type_name: M::TYPE_NAME.to_string(),
                reason: "expected a sequence of related records, found a single value"
                    .to_string(),
            }),
        }
    }
}

/// Move a boxed record back into its concrete type
///
/// # Errors
///
/// `TypeMismatch` if the record is not an `M`.
pub fn downcast<M: Model>(record: Box<dyn Record>) -> Result<M> {
    let found = record.type_name();
    record
        .into_any()
        .downcast::<M>()
        .map(|boxed| *boxed)
        .map_err(|_| StencilError::TypeMismatch {
            expected: M::TYPE_NAME.to_string(),
            found: found.to_string(),
        })
}

/// Name -> value set handed to [`Model::instantiate`]
///
/// Holds the column values taken from a snapshot and the already
/// reconstructed associations, in declaration order.
#[derive(Debug, Default)]
pub struct Attributes {
    columns: Map<String, Value>,
    associations: Vec<(String, Associated)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_column(&mut self, name: impl Into<String>, value: Value) {
        self.columns.insert(name.into(), value);
    }

    pub fn insert_association(&mut self, name: impl Into<String>, associated: Associated) {
        let name = name.into();
        self.associations.retain(|(existing, _)| *existing != name);
        self.associations.push((name, associated));
    }

    pub fn column(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }

    pub fn take_column(&mut self, name: &str) -> Option<Value> {
        self.columns.remove(name)
    }

    pub fn take_association(&mut self, name: &str) -> Option<Associated> {
        let index = self.associations.iter().position(|(n, _)| n == name)?;
        Some(self.associations.remove(index).1)
    }

    pub fn association_names(&self) -> impl Iterator<Item = &str> {
        self.associations.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_parts(self) -> (Map<String, Value>, Vec<(String, Associated)>) {
        (self.columns, self.associations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Cable {
        length: u32,
    }

    impl Model for Cable {
        const TYPE_NAME: &'static str = "Cable";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rack {
        slots: u32,
    }

    impl Model for Rack {
        const TYPE_NAME: &'static str = "Rack";
    }

    #[test]
    fn test_downcast_to_wrong_type_is_mismatch() {
        let record: Box<dyn Record> = Box::new(Cable { length: 3 });
        let err = downcast::<Rack>(record).unwrap_err();
        assert_eq!(
            err,
            StencilError::TypeMismatch {
                expected: "Rack".to_string(),
                found: "Cable".to_string(),
            }
        );
    }

    #[test]
    fn test_into_many_preserves_order() {
        let associated = Associated::Many(vec![
            Box::new(Cable { length: 1 }),
            Box::new(Cable { length: 2 }),
            Box::new(Cable { length: 3 }),
        ]);
        let cables = associated.into_many::<Cable>().unwrap();
        let lengths: Vec<u32> = cables.iter().map(|c| c.length).collect();
        assert_eq!(lengths, vec![1, 2, 3]);
    }

    #[test]
    fn test_cardinality_mismatch_is_malformed() {
        let err = Associated::Many(Vec::new()).into_one::<Cable>().unwrap_err();
        assert!(matches!(err, StencilError::MalformedTemplate { .. }));

        let err = Associated::One(None).into_many::<Cable>().unwrap_err();
        assert!(matches!(err, StencilError::MalformedTemplate { .. }));

        assert_eq!(Associated::One(None).into_one::<Cable>().unwrap(), None);
    }

    #[test]
    fn test_attributes_take_and_replace() {
        let mut attributes = Attributes::new();
        attributes.insert_column("length", json!(7));
        attributes.insert_association("rack", Associated::One(None));
        attributes.insert_association("rack", Associated::Many(Vec::new()));

        assert_eq!(attributes.column("length"), Some(&json!(7)));
        assert_eq!(attributes.association_names().collect::<Vec<_>>(), vec!["rack"]);

        let rack = attributes.take_association("rack").unwrap();
        assert_eq!(rack.cardinality(), Cardinality::Many);
        assert!(attributes.take_association("rack").is_none());
        assert_eq!(attributes.take_column("length"), Some(json!(7)));
        assert!(attributes.columns().is_empty());
    }
}
