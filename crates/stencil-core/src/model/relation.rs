use super::record::Model;

/// How many records an association holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero or one related record
    One,
    /// An ordered sequence of related records
    Many,
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cardinality::One => write!(f, "to-one"),
            Cardinality::Many => write!(f, "to-many"),
        }
    }
}

/// Relation metadata: association name, target type, cardinality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: &'static str,
    pub target: &'static str,
    pub cardinality: Cardinality,
}

impl Relation {
    pub fn new(name: &'static str, target: &'static str, cardinality: Cardinality) -> Self {
        Self {
            name,
            target,
            cardinality,
        }
    }

    /// To-one association targeting `M`
    pub fn has_one<M: Model>(name: &'static str) -> Self {
        Self::new(name, M::TYPE_NAME, Cardinality::One)
    }

    /// To-many association targeting `M`
    pub fn has_many<M: Model>(name: &'static str) -> Self {
        Self::new(name, M::TYPE_NAME, Cardinality::Many)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::One.to_string(), "to-one");
        assert_eq!(Cardinality::Many.to_string(), "to-many");
    }

    #[test]
    fn test_new_relation() {
        let relation = Relation::new("interfaces", "Interface", Cardinality::Many);
        assert_eq!(relation.name, "interfaces");
        assert_eq!(relation.target, "Interface");
        assert_eq!(relation.cardinality, Cardinality::Many);
    }
}
