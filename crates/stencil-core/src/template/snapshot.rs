use serde_json::{Map, Value};

use super::check_depth;
use super::spec::TemplateRegistry;
use crate::errors::{Result, StencilError};
use crate::model::{Record, Related};

/// Declared state of one record: column and association names to values
pub type Snapshot = Map<String, Value>;

/// Snapshot `record` and its declared associations, recursively
pub(crate) fn snapshot(
    templates: &TemplateRegistry,
    record: &dyn Record,
    max_depth: Option<usize>,
) -> Result<Snapshot> {
    walk(templates, record, 0, max_depth)
}

// One stack frame per association level. A cyclic graph recurses until the
// stack is exhausted unless `max_depth` is set.
fn walk(
    templates: &TemplateRegistry,
    record: &dyn Record,
    depth: usize,
    max_depth: Option<usize>,
) -> Result<Snapshot> {
    let type_name = record.type_name();
    check_depth(type_name, depth, max_depth)?;
    let spec = templates.lookup(type_name)?;

    let mut out = record.read_attributes(spec.columns())?;

    for association in spec.associations() {
        let related =
            record
                .read_association(association)
                .ok_or_else(|| StencilError::UnknownAssociation {
                    type_name: type_name.to_string(),
                    association: association.clone(),
                })?;
        let value = match related {
            Related::One(None) => Value::Null,
            Related::One(Some(child)) => {
                Value::Object(walk(templates, child, depth + 1, max_depth)?)
            }
            Related::Many(children) => Value::Array(
                children
                    .into_iter()
                    .map(|child| walk(templates, child, depth + 1, max_depth).map(Value::Object))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        out.insert(association.clone(), value);
    }

    tracing::trace!(type_name, depth, keys = out.len(), "snapshot");
    Ok(out)
}
