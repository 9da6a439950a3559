//! End-to-end inference pipeline: normalize → classify → present.

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use triage_core::insights::{self, Insight};
use triage_core::{
    DisplayResult, FeatureSchema, FormInput, Normalizer, ShapeMismatch, TriageError, present,
};

use crate::adapter::{Classification, ClassifierAdapter};
use crate::artifact::ModelArtifact;

/// Everything shown to the user for one request.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    pub result: DisplayResult,
    /// kg/m², rounded to two decimals.
    pub bmi: f32,
    pub insights: Vec<Insight>,
}

/// Built once at startup and shared by every request.
pub struct TriagePipeline {
    schema: FeatureSchema,
    normalizer: Normalizer,
    adapter: ClassifierAdapter,
}

impl TriagePipeline {
    /// Wire the normalizer to the artifact's schema.
    ///
    /// Schema drift between the two surfaces here, before any request is
    /// served.
    pub fn new(artifact: &ModelArtifact) -> Result<Self, TriageError> {
        let normalizer = Normalizer::new(artifact.schema())?;
        let adapter = ClassifierAdapter::new(artifact);
        if normalizer.width() != adapter.n_features() {
            return Err(TriageError::FeatureShape(ShapeMismatch::Input {
                expected: adapter.n_features(),
                actual: normalizer.width(),
            }));
        }

        Ok(Self {
            schema: artifact.schema().clone(),
            normalizer,
            adapter,
        })
    }

    /// Load the artifact at `path` and build the pipeline.
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        let artifact = ModelArtifact::load(path)?;
        Self::new(&artifact)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Normalize and classify without building the display structure.
    pub fn classify(&self, input: &FormInput) -> Result<Classification, TriageError> {
        let features = self.normalizer.normalize(input)?;
        self.adapter.classify(&features)
    }

    pub fn run(&self, input: &FormInput) -> Result<TriageReport, TriageError> {
        let classification = self.classify(input)?;
        let result = present(classification.category, &classification.distribution);

        debug!(
            category = classification.category.label(),
            confidence = result.confidence,
            risk = %result.risk,
            "classified form"
        );

        Ok(TriageReport {
            result,
            bmi: round2(insights::bmi(input.weight, input.height)),
            insights: insights::assess(input),
        })
    }
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use triage_core::{Category, RiskTier};

    use crate::forest::{Forest, Node, Tree, TreeEnsemble};

    /// Single tree splitting on weight (column 3): <= 80 kg normal, else obese.
    fn pipeline() -> TriagePipeline {
        let forest = Forest {
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: 3,
                        threshold: 80.0,
                        left: 1,
                        right: 2,
                    },
                    Node::Leaf {
                        value: vec![1.0, 8.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                    },
                    Node::Leaf {
                        value: vec![0.0, 0.0, 6.0, 2.0, 1.0, 0.0, 1.0],
                    },
                ],
            }],
        };
        let schema = FeatureSchema::reference();
        let ensemble = TreeEnsemble::new(forest, schema.width(), 7).unwrap();
        let artifact = ModelArtifact::from_parts(schema, Arc::new(ensemble)).unwrap();
        TriagePipeline::new(&artifact).unwrap()
    }

    #[test]
    fn runs_end_to_end() {
        let report = pipeline().run(&FormInput::default()).unwrap();
        assert_eq!(report.result.category, Category::NormalWeight);
        assert_eq!(report.result.risk, RiskTier::Low);
        assert!((report.result.confidence - 0.8).abs() < 1e-6);
        assert!((report.bmi - 24.22).abs() < 1e-4);
        assert!(report.insights.is_empty());
    }

    #[test]
    fn heavy_patient_is_high_risk() {
        let input = FormInput {
            weight: 95.0,
            physical_activity: 0.0,
            ..FormInput::default()
        };
        let report = pipeline().run(&input).unwrap();
        assert_eq!(report.result.category, Category::ObesityTypeI);
        assert_eq!(report.result.risk, RiskTier::High);
        assert_eq!(report.insights, vec![Insight::Sedentary]);
    }

    #[test]
    fn input_errors_surface_unchanged() {
        let input = FormInput {
            age: 0.0,
            ..FormInput::default()
        };
        let err = pipeline().run(&input).unwrap_err();
        assert_eq!(err.field(), Some("age"));
        assert!(err.is_user_correctable());
    }

    #[test]
    fn report_serializes_for_the_api() {
        let report = pipeline().run(&FormInput::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["category"], "Normal_Weight");
        assert_eq!(json["result"]["diagnosis"], "Normal Weight");
        assert_eq!(json["result"]["risk"], "low");
        assert_eq!(json["result"]["bars"].as_array().unwrap().len(), 7);
    }
}
