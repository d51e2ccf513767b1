//! Template engine: registries, codec and options behind one handle

use crate::codec::{JsonCodec, Template, TemplateCodec};
use crate::errors::Result;
use crate::model::{downcast, Model, Record};
use crate::template::reconstruct::Reconstructor;
use crate::template::{snapshot, Snapshot, Stamped, TemplateRegistry, TypeRegistry};
use crate::{log_op_end, log_op_error, log_op_start};

/// Engine options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    /// Deepest association level walked; `None` walks without limit
    pub max_depth: Option<usize>,
}

/// Snapshot and reconstruct entry points
///
/// Built once with `&mut` access to declare and register types, then shared
/// read-only; wrap in `Arc` to use from several threads.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use stencil_core::{Model, TemplateEngine};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Site {
///     code: String,
///     city: String,
/// }
///
/// impl Model for Site {
///     const TYPE_NAME: &'static str = "Site";
/// }
///
/// let mut engine = TemplateEngine::new();
/// engine.declare::<Site>(&["code"], &[]);
///
/// let site = Site { code: "AMS1".into(), city: "Amsterdam".into() };
/// let snapshot = engine.as_template(&site).unwrap();
/// assert_eq!(snapshot.len(), 1);
/// ```
#[derive(Debug)]
pub struct TemplateEngine {
    templates: TemplateRegistry,
    types: TypeRegistry,
    codec: Box<dyn TemplateCodec>,
    options: EngineOptions,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self {
            templates: TemplateRegistry::new(),
            types: TypeRegistry::new(),
            codec: Box::new(JsonCodec),
            options: EngineOptions::default(),
        }
    }

    pub fn with_codec(mut self, codec: impl TemplateCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Make `M` resolvable by its type tag without declaring a template
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.types.register::<M>();
        self
    }

    /// Declare the template for `M` and register it for reconstruction
    pub fn declare<M: Model>(&mut self, columns: &[&str], associations: &[&str]) -> &mut Self {
        self.types.register::<M>();
        self.declare_named(M::TYPE_NAME, columns, associations)
    }

    /// Declare a template by type tag only
    pub fn declare_named(
        &mut self,
        type_name: &str,
        columns: &[&str],
        associations: &[&str],
    ) -> &mut Self {
        self.templates.declare(
            type_name,
            columns.iter().copied(),
            associations.iter().copied(),
        );
        self
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn codec(&self) -> &dyn TemplateCodec {
        self.codec.as_ref()
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Snapshot `record` and its declared associations
    ///
    /// # Errors
    ///
    /// `UnconfiguredType`, `UnknownAttribute`, `UnknownAssociation`, or
    /// `DepthExceeded` when a depth limit is configured.
    pub fn as_template(&self, record: &dyn Record) -> Result<Snapshot> {
        let type_name = record.type_name();
        log_op_start!("as_template", type_name = type_name);
        let start = std::time::Instant::now();

        let result = snapshot::snapshot(&self.templates, record, self.options.max_depth).map_err(
            |e| {
                log_op_error!(
                    "as_template",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            },
        )?;

        log_op_end!(
            "as_template",
            duration_ms = start.elapsed().as_millis() as u64,
            type_name = type_name
        );
        Ok(result)
    }

    /// Snapshot several records of any declared types, in order
    ///
    /// # Errors
    ///
    /// The first error raised by [`TemplateEngine::as_template`].
    pub fn as_templates(&self, records: &[&dyn Record]) -> Result<Template> {
        records
            .iter()
            .map(|record| self.as_template(*record))
            .collect::<Result<Vec<_>>>()
            .map(Template::Many)
    }

    /// Build new transient `type_name` instance(s) from `template`
    ///
    /// `customize` runs on each top-level instance after its whole graph is
    /// populated. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// `UnconfiguredType`, `UnresolvableType`, `UnknownAssociation`,
    /// `MalformedTemplate`, `Construction`, or `DepthExceeded`.
    pub fn from_template(
        &self,
        type_name: &str,
        template: Template,
        customize: Option<&mut dyn FnMut(&mut dyn Record)>,
    ) -> Result<Stamped> {
        log_op_start!(
            "from_template",
            type_name = type_name,
            sequence = template.is_sequence()
        );
        let start = std::time::Instant::now();

        let result = self
            .from_template_impl(type_name, template, customize)
            .map_err(|e| {
                log_op_error!(
                    "from_template",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "from_template",
            duration_ms = start.elapsed().as_millis() as u64,
            type_name = type_name,
            count = result.len() as u64
        );
        Ok(result)
    }

    fn from_template_impl(
        &self,
        type_name: &str,
        template: Template,
        customize: Option<&mut dyn FnMut(&mut dyn Record)>,
    ) -> Result<Stamped> {
        let reconstructor = Reconstructor {
            templates: &self.templates,
            types: &self.types,
            max_depth: self.options.max_depth,
        };

        let mut stamped = match template {
            Template::One(snapshot) => Stamped::One(reconstructor.reconstruct(type_name, snapshot)?),
            Template::Many(snapshots) => Stamped::Many(
                snapshots
                    .into_iter()
                    .map(|snapshot| reconstructor.reconstruct(type_name, snapshot))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };

        if let Some(customize) = customize {
            match &mut stamped {
                Stamped::One(record) => customize(record.as_mut()),
                Stamped::Many(records) => {
                    for record in records.iter_mut() {
                        customize(record.as_mut());
                    }
                }
            }
        }
        Ok(stamped)
    }

    /// Typed reconstruct of a single snapshot
    ///
    /// # Errors
    ///
    /// As [`TemplateEngine::from_template`], plus `TypeMismatch` if `M`'s
    /// registration builds a different type.
    pub fn from_template_as<M: Model>(&self, snapshot: Snapshot) -> Result<M> {
        let stamped = self.from_template(M::TYPE_NAME, Template::One(snapshot), None)?;
        downcast(stamped.into_one()?)
    }
}
