//! Opaque holder of one encoded template plus the origin's type tag

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::TemplateEngine;
use crate::errors::{Result, StencilError};
use crate::model::{downcast, Model, Record};
use crate::template::Stamped;
use crate::{log_op_end, log_op_error, log_op_start};

/// A stored template that can be stamped into new record graphs
///
/// `origin_type` and `template` are always set together; the container never
/// looks inside the encoded template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Optional human-readable label
    pub label: Option<String>,

    origin_type: Option<String>,

    template: Option<String>,

    /// Millisecond precision, matching what the store keeps
    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Create an empty container with a fresh id
    pub fn new() -> Self {
        let now = now_millis();
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            label: None,
            origin_type: None,
            template: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new()
        }
    }

    /// Rebuild a container from stored columns
    pub fn from_parts(
        id: String,
        label: Option<String>,
        origin_type: String,
        template: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            label,
            origin_type: Some(origin_type),
            template: Some(template),
            created_at,
            updated_at,
        }
    }

    pub fn origin_type(&self) -> Option<&str> {
        self.origin_type.as_deref()
    }

    /// Encoded template text, as produced by the engine's codec
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn is_populated(&self) -> bool {
        self.origin_type.is_some() && self.template.is_some()
    }

    /// Snapshot `origin` and store its type tag and encoded template
    ///
    /// Replaces whatever the container held before. On failure the container
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Any snapshot error for `origin`'s type, or `CodecFailure`.
    pub fn set_origin(&mut self, engine: &TemplateEngine, origin: &dyn Record) -> Result<()> {
        log_op_start!(
            "container.set_origin",
            container_id = %self.id,
            type_name = origin.type_name()
        );
        let start = std::time::Instant::now();

        let encoded = Self::encode_origin(engine, origin).map_err(|e| {
            log_op_error!(
                "container.set_origin",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                container_id = %self.id
            );
            e
        })?;

        let template_len = encoded.len() as u64;
        self.origin_type = Some(origin.type_name().to_string());
        self.template = Some(encoded);
        self.updated_at = now_millis();

        log_op_end!(
            "container.set_origin",
            duration_ms = start.elapsed().as_millis() as u64,
            container_id = %self.id,
            codec = engine.codec().name(),
            template_len = template_len
        );
        Ok(())
    }

    fn encode_origin(engine: &TemplateEngine, origin: &dyn Record) -> Result<String> {
        let snapshot = engine.as_template(origin)?;
        engine.codec().encode(&snapshot.into())
    }

    /// Reconstruct a new transient graph from the stored template
    ///
    /// Never modifies the container; every call yields independent records.
    ///
    /// # Errors
    ///
    /// `EmptyContainer` before any origin was set, `UnresolvableType` if the
    /// stored tag is not registered, `CodecFailure`, or any reconstruct error.
    pub fn stamp(
        &self,
        engine: &TemplateEngine,
        customize: Option<&mut dyn FnMut(&mut dyn Record)>,
    ) -> Result<Stamped> {
        log_op_start!("container.stamp", container_id = %self.id);
        let start = std::time::Instant::now();

        let result = self.stamp_impl(engine, customize).map_err(|e| {
            log_op_error!(
                "container.stamp",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                container_id = %self.id
            );
            e
        })?;

        log_op_end!(
            "container.stamp",
            duration_ms = start.elapsed().as_millis() as u64,
            container_id = %self.id,
            count = result.len() as u64
        );
        Ok(result)
    }

    fn stamp_impl(
        &self,
        engine: &TemplateEngine,
        customize: Option<&mut dyn FnMut(&mut dyn Record)>,
    ) -> Result<Stamped> {
        let (Some(origin_type), Some(encoded)) = (self.origin_type(), self.template()) else {
            return Err(StencilError::EmptyContainer);
        };
        engine.types().resolve(origin_type)?;
        let template = engine.codec().decode(encoded)?;
        engine.from_template(origin_type, template, customize)
    }

    /// Stamp a single record of concrete type `M`
    ///
    /// # Errors
    ///
    /// As [`Container::stamp`], plus `TypeMismatch` if the container holds
    /// another type or a sequence.
    pub fn stamp_as<M: Model>(&self, engine: &TemplateEngine) -> Result<M> {
        downcast(self.stamp(engine, None)?.into_one()?)
    }

    /// Stamp a single `M` and customize it before handing it out
    ///
    /// # Errors
    ///
    /// As [`Container::stamp_as`].
    pub fn stamp_with<M, F>(&self, engine: &TemplateEngine, customize: F) -> Result<M>
    where
        M: Model,
        F: FnOnce(&mut M),
    {
        let mut stamped = self.stamp_as::<M>(engine)?;
        customize(&mut stamped);
        Ok(stamped)
    }
}
