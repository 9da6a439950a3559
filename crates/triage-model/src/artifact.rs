//! Model artifact loading and validation.
//!
//! A JSON artifact carries the versioned [`FeatureSchema`] and the tree
//! ensemble in one document:
//!
//! ```json
//! { "schema": { "version": 1, "features": [...], "classes": [...], "encoding": {...} },
//!   "forest": { "trees": [ { "nodes": [ ... ] } ] } }
//! ```
//!
//! An `.onnx` artifact (feature `onnx`) reads its schema from a sidecar
//! document with the same stem and a `.json` extension.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use triage_core::{Category, FeatureSchema, SCHEMA_VERSION, TriageError};

use crate::forest::{Forest, TreeEnsemble};
use crate::labels::LabelEncoder;
use crate::model::ProbabilisticModel;

#[derive(Deserialize)]
struct ArtifactDocument {
    schema: FeatureSchema,
    #[serde(default)]
    forest: Option<Forest>,
}

/// Loaded, validated classifier artifact. Immutable after load.
pub struct ModelArtifact {
    path: PathBuf,
    schema: FeatureSchema,
    labels: LabelEncoder,
    model: Arc<dyn ProbabilisticModel>,
}

/// Summary of a loaded artifact.
pub struct ArtifactSummary {
    pub path: PathBuf,
    pub schema_version: u32,
    pub model: String,
    pub features: Vec<String>,
    pub classes: Vec<Category>,
}

impl ModelArtifact {
    /// Load an artifact from disk. Any failure is a [`TriageError::ModelLoad`].
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        let is_onnx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"));

        let artifact = if is_onnx {
            Self::load_onnx(path)?
        } else {
            Self::load_json(path)?
        };

        info!(
            path = %path.display(),
            model = %artifact.model.describe(),
            features = artifact.schema.width(),
            classes = artifact.labels.len(),
            "loaded model artifact"
        );
        Ok(artifact)
    }

    /// Assemble an artifact from an already-constructed model.
    pub fn from_parts(
        schema: FeatureSchema,
        model: Arc<dyn ProbabilisticModel>,
    ) -> Result<Self, TriageError> {
        let path = PathBuf::from("<in-memory>");
        let labels = check_schema(&path, &schema)?;
        check_model(&path, &schema, &labels, model.as_ref())?;
        Ok(Self {
            path,
            schema,
            labels,
            model,
        })
    }

    fn load_json(path: &Path) -> Result<Self, TriageError> {
        let doc = read_document(path)?;
        let labels = check_schema(path, &doc.schema)?;
        let forest = doc
            .forest
            .ok_or_else(|| TriageError::load(path, "document has no `forest` section"))?;

        let ensemble = TreeEnsemble::new(forest, doc.schema.width(), labels.len())
            .map_err(|e| TriageError::load(path, e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            schema: doc.schema,
            labels,
            model: Arc::new(ensemble),
        })
    }

    #[cfg(feature = "onnx")]
    fn load_onnx(path: &Path) -> Result<Self, TriageError> {
        let manifest = path.with_extension("json");
        let doc = read_document(&manifest)?;
        let labels = check_schema(&manifest, &doc.schema)?;

        let model = crate::onnx::OnnxForest::load(path, doc.schema.width(), labels.len())?;
        check_model(path, &doc.schema, &labels, &model)?;

        Ok(Self {
            path: path.to_path_buf(),
            schema: doc.schema,
            labels,
            model: Arc::new(model),
        })
    }

    #[cfg(not(feature = "onnx"))]
    fn load_onnx(path: &Path) -> Result<Self, TriageError> {
        Err(TriageError::load(
            path,
            "ONNX artifacts require building with the `onnx` feature",
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    /// Shared read-only handle to the model.
    pub fn model(&self) -> Arc<dyn ProbabilisticModel> {
        Arc::clone(&self.model)
    }

    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            path: self.path.clone(),
            schema_version: self.schema.version,
            model: self.model.describe(),
            features: self.schema.features.clone(),
            classes: self.labels.classes().to_vec(),
        }
    }
}

/// Deserialize an artifact document. The file handle lives only for the
/// duration of this call.
fn read_document(path: &Path) -> Result<ArtifactDocument, TriageError> {
    let file =
        File::open(path).map_err(|e| TriageError::load(path, format!("cannot open: {e}")))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TriageError::load(path, format!("malformed artifact: {e}")))
}

fn check_schema(path: &Path, schema: &FeatureSchema) -> Result<LabelEncoder, TriageError> {
    if !schema.is_supported() {
        return Err(TriageError::load(
            path,
            format!(
                "unsupported schema version {} (this build reads version {SCHEMA_VERSION})",
                schema.version
            ),
        ));
    }

    if schema.features.is_empty() {
        return Err(TriageError::load(path, "schema lists no features"));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = schema.features.iter().find(|f| !seen.insert(f.as_str())) {
        return Err(TriageError::load(
            path,
            format!("feature {dup:?} listed more than once"),
        ));
    }

    LabelEncoder::from_labels(&schema.classes).map_err(|e| TriageError::load(path, e.to_string()))
}

fn check_model(
    path: &Path,
    schema: &FeatureSchema,
    labels: &LabelEncoder,
    model: &dyn ProbabilisticModel,
) -> Result<(), TriageError> {
    if model.n_features() != schema.width() {
        return Err(TriageError::load(
            path,
            format!(
                "model takes {} features but schema lists {}",
                model.n_features(),
                schema.width()
            ),
        ));
    }
    if model.n_classes() != labels.len() {
        return Err(TriageError::load(
            path,
            format!(
                "model predicts {} classes but label encoder has {}",
                model.n_classes(),
                labels.len()
            ),
        ));
    }
    Ok(())
}
