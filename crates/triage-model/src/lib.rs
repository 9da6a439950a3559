//! Inference layer: artifact loading, tree-ensemble evaluation, the
//! classifier adapter and the end-to-end triage pipeline.

mod adapter;
mod artifact;
mod forest;
mod labels;
mod model;
#[cfg(feature = "onnx")]
mod onnx;
mod pipeline;

pub use adapter::{Classification, ClassifierAdapter};
pub use artifact::{ArtifactSummary, ModelArtifact};
pub use forest::{Forest, ForestError, Node, Tree, TreeEnsemble};
pub use labels::{LabelEncoder, LabelError};
pub use model::ProbabilisticModel;
#[cfg(feature = "onnx")]
pub use onnx::OnnxForest;
pub use pipeline::{TriagePipeline, TriageReport};
