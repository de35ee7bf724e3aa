//! Error types for modelpath
//!
//! Unreachable targets are not errors: they surface as empty, unreachable
//! paths. Errors here are precondition violations reported by the host
//! model or invalid configuration.

mod macros;

use thiserror::Error;

/// Errors that can occur during modelpath operations
#[derive(Error, Debug)]
pub enum ModelPathError {
    #[error("object not found in model: {id}")]
    UnknownObject { id: String },

    #[error("relation not found in schema: {relation}")]
    UnknownRelation { relation: String },

    #[error("relation {relation} does not apply to object {id}")]
    RelationNotApplicable { relation: String, id: String },

    #[error("invalid weight for {relation}: {value} (must be finite and non-negative)")]
    InvalidWeight { relation: String, value: f32 },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ModelPathError {
    /// Create an error for an object the model does not know
    pub fn unknown_object(id: impl std::fmt::Display) -> Self {
        ModelPathError::UnknownObject { id: id.to_string() }
    }

    /// Create an error for a relation the schema does not know
    pub fn unknown_relation(relation: impl std::fmt::Display) -> Self {
        ModelPathError::UnknownRelation {
            relation: relation.to_string(),
        }
    }

    /// Create an error for a relation used on an object it does not apply to
    pub fn not_applicable(relation: impl std::fmt::Display, id: impl std::fmt::Display) -> Self {
        ModelPathError::RelationNotApplicable {
            relation: relation.to_string(),
            id: id.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ModelPathError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ModelPathError::UnknownObject { .. } => "unknown_object",
            ModelPathError::UnknownRelation { .. } => "unknown_relation",
            ModelPathError::RelationNotApplicable { .. } => "relation_not_applicable",
            ModelPathError::InvalidWeight { .. } => "invalid_weight",
            ModelPathError::InvalidValue { .. } => "invalid_value",
            ModelPathError::Io(_) => "io_error",
            ModelPathError::Toml(_) | ModelPathError::TomlSerialize(_) => "toml_error",
            ModelPathError::Json(_) => "json_error",
            ModelPathError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for modelpath operations
pub type Result<T> = std::result::Result<T, ModelPathError>;
