use triage_core::TriageError;

/// A trained classifier that produces per-class probabilities.
///
/// Implementations are loaded once and then shared read-only across
/// requests, hence `Send + Sync` and `&self` inference. A backend whose
/// runtime needs exclusive access must serialize calls internally.
pub trait ProbabilisticModel: Send + Sync {
    /// Short backend name for logs and summaries.
    fn kind(&self) -> &'static str;

    /// One-line description for `inspect` output.
    fn describe(&self) -> String {
        self.kind().to_string()
    }

    /// Expected input width.
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    /// Class probabilities in label-encoder order for one sample of exactly
    /// [`n_features`](Self::n_features) values.
    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, TriageError>;
}
