//! Text encodings for templates
//!
//! Containers store templates as opaque text; a [`TemplateCodec`] is the
//! only component that knows the format.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::template::Snapshot;

/// The unit the codec carries: one snapshot or an ordered sequence of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Template {
    One(Snapshot),
    Many(Vec<Snapshot>),
}

impl Template {
    pub fn is_sequence(&self) -> bool {
        matches!(self, Template::Many(_))
    }
}

impl From<Snapshot> for Template {
    fn from(snapshot: Snapshot) -> Self {
        Template::One(snapshot)
    }
}

impl From<Vec<Snapshot>> for Template {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Template::Many(snapshots)
    }
}

/// Reversible template <-> text encoding
///
/// Implementations hold no per-call state, so one codec serves concurrent
/// callers.
pub trait TemplateCodec: Send + Sync + std::fmt::Debug {
    /// Short name recorded in logs and codec errors
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// `CodecFailure` if the template cannot be represented.
    fn encode(&self, template: &Template) -> Result<String>;

    /// # Errors
    ///
    /// `CodecFailure` if `text` is not a valid encoding of a template.
    fn decode(&self, text: &str) -> Result<Template>;
}

/// JSON via serde_json; the default
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl TemplateCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, template: &Template) -> Result<String> {
        Ok(serde_json::to_string(template)?)
    }

    fn decode(&self, text: &str) -> Result<Template> {
        Ok(serde_json::from_str(text)?)
    }
}

/// YAML via serde_yaml
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl TemplateCodec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, template: &Template) -> Result<String> {
        Ok(serde_yaml::to_string(template)?)
    }

    fn decode(&self, text: &str) -> Result<Template> {
        Ok(serde_yaml::from_str(text)?)
    }
}
