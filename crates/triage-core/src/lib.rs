//! Core types for obesity triage: form input, the seven ordered categories,
//! the versioned feature schema, input normalization and result presentation.

pub mod category;
pub mod error;
pub mod form;
pub mod insights;
pub mod normalize;
pub mod present;
pub mod schema;

pub use category::{Category, RiskTier};
pub use error::{ShapeMismatch, TriageError};
pub use form::FormInput;
pub use insights::{Insight, bmi};
pub use normalize::{FeatureVector, Normalizer};
pub use present::{DisplayResult, ProbabilityBar, present};
pub use schema::{FeatureSchema, SCHEMA_VERSION};
