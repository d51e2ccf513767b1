use thiserror::Error;

/// Result type alias using StencilError
pub type Result<T> = std::result::Result<T, StencilError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in the template engine, the container and the store maps to
/// one of these kinds. Each kind has a stable code for programmatic handling
/// and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Declaration/resolution
    UnconfiguredType,
    UnresolvableType,
    UnknownAttribute,
    UnknownAssociation,

    // Container
    EmptyContainer,

    // Template contents
    CodecFailure,
    MalformedTemplate,
    TypeMismatch,
    Construction,
    DepthExceeded,

    // Store
    NotFound,
    Persistence,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnconfiguredType => "ERR_UNCONFIGURED_TYPE",
            ExErrorKind::UnresolvableType => "ERR_UNRESOLVABLE_TYPE",
            ExErrorKind::UnknownAttribute => "ERR_UNKNOWN_ATTRIBUTE",
            ExErrorKind::UnknownAssociation => "ERR_UNKNOWN_ASSOCIATION",
            ExErrorKind::EmptyContainer => "ERR_EMPTY_CONTAINER",
            ExErrorKind::CodecFailure => "ERR_CODEC_FAILURE",
            ExErrorKind::MalformedTemplate => "ERR_MALFORMED_TEMPLATE",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::Construction => "ERR_CONSTRUCTION",
            ExErrorKind::DepthExceeded => "ERR_DEPTH_EXCEEDED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification kind plus the context needed to diagnose a
/// failure: the operation, the record type and association involved, and the
/// container being worked on.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    association: Option<String>,
    container_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            association: None,
            container_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record type context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add association context
    pub fn with_association(mut self, association: impl Into<String>) -> Self {
        self.association = Some(association.into());
        self
    }

    /// Add container context
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn association(&self) -> Option<&str> {
        self.association.as_deref()
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(association) = &self.association {
            write!(f, " (association: {})", association)?;
        }
        if let Some(container_id) = &self.container_id {
            write!(f, " (container_id: {})", container_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

/// Errors raised by the template engine and the container
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StencilError {
    // ===== Declaration / Resolution =====
    /// Snapshot or reconstruct reached a type with no template declaration
    #[error("No template declared for type {type_name}")]
    UnconfiguredType { type_name: String },

    /// A type tag does not name any registered type
    #[error("Type tag does not name a registered type: {type_name}")]
    UnresolvableType { type_name: String },

    /// A declared column cannot be read from the record
    #[error("Type {type_name} has no attribute {attribute}")]
    UnknownAttribute {
        type_name: String,
        attribute: String,
    },

    /// A declared association is not exposed by the record or its relation metadata
    #[error("Type {type_name} has no association {association}")]
    UnknownAssociation {
        type_name: String,
        association: String,
    },

    // ===== Container =====
    /// Stamp attempted before an origin was set
    #[error("Container has no origin to stamp from")]
    EmptyContainer,

    // ===== Template contents =====
    /// The codec could not encode or decode a template
    #[error("Codec {codec} failed: {message}")]
    CodecFailure { codec: String, message: String },

    /// A template value does not have the shape its type declares
    #[error("Malformed template for {type_name}: {reason}")]
    MalformedTemplate { type_name: String, reason: String },

    /// A reconstructed record is not of the requested concrete type
    #[error("Expected a {expected} record but found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The model refused the assembled attributes
    #[error("Failed to construct {type_name}: {reason}")]
    Construction { type_name: String, reason: String },

    /// The association walk went deeper than the configured limit
    #[error("Association depth limit {max_depth} exceeded at type {type_name}")]
    DepthExceeded { type_name: String, max_depth: usize },
}

impl From<StencilError> for ExError {
    fn from(err: StencilError) -> Self {
        match err {
            StencilError::UnconfiguredType { type_name } => {
                ExError::new(ExErrorKind::UnconfiguredType)
                    .with_type_name(type_name)
                    .with_message("No template declared")
            }

            StencilError::UnresolvableType { type_name } => {
                ExError::new(ExErrorKind::UnresolvableType)
                    .with_type_name(type_name)
                    .with_message("Type tag does not name a registered type")
            }

            StencilError::UnknownAttribute {
                type_name,
                attribute,
            } => ExError::new(ExErrorKind::UnknownAttribute)
                .with_type_name(type_name)
                .with_message(format!("No attribute {}", attribute)),

            StencilError::UnknownAssociation {
                type_name,
                association,
            } => ExError::new(ExErrorKind::UnknownAssociation)
                .with_type_name(type_name)
                .with_association(association)
                .with_message("No such association"),

            StencilError::EmptyContainer => ExError::new(ExErrorKind::EmptyContainer)
                .with_op("stamp")
                .with_message("Container has no origin"),

            StencilError::CodecFailure { codec, message } => {
                ExError::new(ExErrorKind::CodecFailure)
                    .with_op(format!("codec:{}", codec))
                    .with_message(message)
            }

            StencilError::MalformedTemplate { type_name, reason } => {
                ExError::new(ExErrorKind::MalformedTemplate)
                    .with_type_name(type_name)
                    .with_message(reason)
            }

            StencilError::TypeMismatch { expected, found } => {
                ExError::new(ExErrorKind::TypeMismatch)
                    .with_type_name(expected)
                    .with_message(format!("Found {}", found))
            }

            StencilError::Construction { type_name, reason } => {
                ExError::new(ExErrorKind::Construction)
                    .with_type_name(type_name)
                    .with_message(reason)
            }

            StencilError::DepthExceeded {
                type_name,
                max_depth,
            } => ExError::new(ExErrorKind::DepthExceeded)
                .with_type_name(type_name)
                .with_message(format!("Depth limit {} exceeded", max_depth)),
        }
    }
}

impl From<serde_json::Error> for StencilError {
    fn from(err: serde_json::Error) -> Self {
        StencilError::CodecFailure {
            codec: "json".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StencilError {
    fn from(err: serde_yaml::Error) -> Self {
        StencilError::CodecFailure {
            codec: "yaml".to_string(),
            message: err.to_string(),
        }
    }
}
