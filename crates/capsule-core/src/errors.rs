use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every fault that leaves this crate is classified by one of these kinds.
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,

    // Key/attribute store
    /// A key or query disagrees with the table or index key schema
    KeySchemaMismatch,
    /// A query names an index the table does not declare
    UnknownIndex,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::KeySchemaMismatch => "ERR_KEY_SCHEMA_MISMATCH",
            ExErrorKind::UnknownIndex => "ERR_UNKNOWN_INDEX",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Store faults travel through the gateway and the service unmodified as
/// `ExError`. The classification fields support programmatic handling and
/// the context fields support debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain-level faults raised inside capsule-core
///
/// These never escape as-is: every public API returns `ExError`, and the
/// conversion below assigns the canonical kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapsuleError {
    /// Attribute map could not be converted to or from a Capsule
    #[error("Capsule attribute conversion failed: {reason}")]
    AttributeConversion { reason: String },

    /// A key attribute is missing from an item or is not a string
    #[error("Item is missing string key attribute '{attribute}'")]
    MissingKeyAttribute { attribute: String },

    /// Lookup key does not match the table key schema
    #[error("Key does not match schema of table {table}: {reason}")]
    KeySchemaMismatch { table: String, reason: String },

    /// Query names an undeclared index
    #[error("Index {index} is not declared on table {table}")]
    UnknownIndex { table: String, index: String },

    /// Configuration could not be read or parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<CapsuleError> for ExError {
    fn from(err: CapsuleError) -> Self {
        let kind = match &err {
            CapsuleError::AttributeConversion { .. } => ExErrorKind::Serialization,
            CapsuleError::MissingKeyAttribute { .. } => ExErrorKind::InvalidInput,
            CapsuleError::KeySchemaMismatch { .. } => ExErrorKind::KeySchemaMismatch,
            CapsuleError::UnknownIndex { .. } => ExErrorKind::UnknownIndex,
            CapsuleError::InvalidConfig { .. } => ExErrorKind::Config,
        };
        ExError::new(kind).with_message(err.to_string())
    }
}
