use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("unknown {field} category: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("feature shape mismatch: {0}")]
    FeatureShape(ShapeMismatch),

    #[error("failed to load model artifact {}: {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    #[error("inference failed: {0}")]
    Inference(String),
}

/// How a feature vector or model output disagrees with the artifact schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("model expects {expected} features, got {actual}")]
    Input { expected: usize, actual: usize },

    #[error("model returned {actual} probabilities for {expected} classes")]
    Output { expected: usize, actual: usize },

    #[error("schema column {0:?} has no source field")]
    UnknownColumn(String),
}

impl TriageError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Input-level errors the user can fix by editing the form.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::UnknownCategory { .. }
        )
    }

    /// Form field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } | Self::UnknownCategory { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::FeatureShape(_) => "feature_shape",
            Self::ModelLoad { .. } => "model_load",
            Self::Inference(_) => "inference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_user_correctable() {
        let err = TriageError::invalid("age", "must be greater than 0");
        assert!(err.is_user_correctable());
        assert_eq!(err.field(), Some("age"));
        assert_eq!(err.to_string(), "invalid age: must be greater than 0");

        let err = TriageError::UnknownCategory {
            field: "transport",
            value: "teleport".into(),
        };
        assert!(err.is_user_correctable());
        assert_eq!(err.code(), "unknown_category");
        assert_eq!(err.to_string(), "unknown transport category: \"teleport\"");
    }

    #[test]
    fn deployment_errors_are_fatal() {
        let err = TriageError::FeatureShape(ShapeMismatch::Input {
            expected: 20,
            actual: 19,
        });
        assert!(!err.is_user_correctable());
        assert_eq!(err.field(), None);
        assert_eq!(
            err.to_string(),
            "feature shape mismatch: model expects 20 features, got 19"
        );

        let err = TriageError::load("models/missing.json", "open: not found");
        assert!(!err.is_user_correctable());
        assert_eq!(
            err.to_string(),
            "failed to load model artifact models/missing.json: open: not found"
        );
    }
}
