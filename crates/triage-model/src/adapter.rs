//! Classifier adapter: feature vector → category + full distribution.

use std::collections::BTreeMap;
use std::sync::Arc;

use triage_core::{Category, FeatureVector, ShapeMismatch, TriageError};

use crate::artifact::ModelArtifact;
use crate::labels::LabelEncoder;
use crate::model::ProbabilisticModel;

/// Classification result for a single feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: Category,
    /// Probability for every category; sums to 1.
    pub distribution: BTreeMap<Category, f32>,
}

/// Wraps the shared read-only model handle and its label encoder.
#[derive(Clone)]
pub struct ClassifierAdapter {
    model: Arc<dyn ProbabilisticModel>,
    labels: LabelEncoder,
}

impl ClassifierAdapter {
    pub fn new(artifact: &ModelArtifact) -> Self {
        Self {
            model: artifact.model(),
            labels: artifact.labels().clone(),
        }
    }

    /// Expected feature vector length.
    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    /// Classify one vector.
    ///
    /// The predicted category is the first most probable class in encoder
    /// order, so it is always an argmax of the returned distribution.
    pub fn classify(&self, features: &FeatureVector) -> Result<Classification, TriageError> {
        let expected = self.model.n_features();
        if features.len() != expected {
            return Err(TriageError::FeatureShape(ShapeMismatch::Input {
                expected,
                actual: features.len(),
            }));
        }

        let proba = self.model.predict_proba(features.as_slice())?;
        if proba.len() != self.labels.len() {
            return Err(TriageError::FeatureShape(ShapeMismatch::Output {
                expected: self.labels.len(),
                actual: proba.len(),
            }));
        }

        let mut best = 0;
        for (i, &p) in proba.iter().enumerate() {
            if p > proba[best] {
                best = i;
            }
        }

        let distribution = self.labels.classes().iter().copied().zip(proba).collect();
        let category = self.labels.classes()[best];

        Ok(Classification {
            category,
            distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::FeatureSchema;

    /// Returns a fixed distribution regardless of input.
    struct FixedModel {
        n_features: usize,
        proba: Vec<f32>,
    }

    impl ProbabilisticModel for FixedModel {
        fn kind(&self) -> &'static str {
            "fixed"
        }
        fn n_features(&self) -> usize {
            self.n_features
        }
        fn n_classes(&self) -> usize {
            7
        }
        fn predict_proba(&self, _features: &[f32]) -> Result<Vec<f32>, TriageError> {
            Ok(self.proba.clone())
        }
    }

    fn adapter(proba: Vec<f32>) -> ClassifierAdapter {
        let model = FixedModel {
            n_features: 20,
            proba,
        };
        let artifact =
            ModelArtifact::from_parts(FeatureSchema::reference(), Arc::new(model)).unwrap();
        ClassifierAdapter::new(&artifact)
    }

    #[test]
    fn maps_encoder_index_to_category() {
        // Encoder order: Ins, Normal, ObI, ObII, ObIII, OwI, OwII.
        let a = adapter(vec![0.05, 0.1, 0.05, 0.0, 0.0, 0.6, 0.2]);
        let c = a.classify(&FeatureVector::new(vec![0.0; 20])).unwrap();
        assert_eq!(c.category, Category::OverweightLevelI);
        assert_eq!(c.distribution.len(), 7);
        assert!((c.distribution[&Category::OverweightLevelII] - 0.2).abs() < 1e-6);
        assert!((c.distribution[&Category::NormalWeight] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn ties_resolve_to_first_encoder_class() {
        let a = adapter(vec![0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0]);
        let c = a.classify(&FeatureVector::new(vec![0.0; 20])).unwrap();
        assert_eq!(c.category, Category::ObesityTypeI);
    }

    #[test]
    fn wrong_input_width_is_shape_error() {
        let a = adapter(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let err = a.classify(&FeatureVector::new(vec![0.0; 19])).unwrap_err();
        assert!(matches!(
            err,
            TriageError::FeatureShape(ShapeMismatch::Input {
                expected: 20,
                actual: 19
            })
        ));
        assert!(!err.is_user_correctable());
    }

    #[test]
    fn wrong_output_width_is_shape_error() {
        let a = adapter(vec![0.5, 0.5]);
        let err = a.classify(&FeatureVector::new(vec![0.0; 20])).unwrap_err();
        assert!(matches!(
            err,
            TriageError::FeatureShape(ShapeMismatch::Output {
                expected: 7,
                actual: 2
            })
        ));
    }

    #[test]
    fn from_parts_rejects_width_mismatch() {
        let model = FixedModel {
            n_features: 12,
            proba: vec![],
        };
        let err = ModelArtifact::from_parts(FeatureSchema::reference(), Arc::new(model))
            .err()
            .unwrap();
        assert!(matches!(err, TriageError::ModelLoad { .. }));
    }

    #[test]
    fn adapter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassifierAdapter>();
    }
}
