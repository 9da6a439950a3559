//! Label encoder recorded with the trained model.
//!
//! The model emits class indices in encoder order (alphabetical for the
//! reference training run); this maps them back onto [`Category`].

use thiserror::Error;
use triage_core::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("unknown class label {0:?}")]
    Unknown(String),
    #[error("class {0} listed more than once")]
    Duplicate(&'static str),
    #[error("class {0} missing from label encoder")]
    Missing(&'static str),
}

/// Class index → category, covering all seven categories exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<Category>,
}

impl LabelEncoder {
    /// Build from the raw labels stored in the artifact schema.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, LabelError> {
        let mut classes = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_ref();
            let category =
                Category::from_label(label).ok_or_else(|| LabelError::Unknown(label.to_string()))?;
            if classes.contains(&category) {
                return Err(LabelError::Duplicate(category.label()));
            }
            classes.push(category);
        }

        if let Some(missing) = Category::ALL.into_iter().find(|c| !classes.contains(c)) {
            return Err(LabelError::Missing(missing.label()));
        }

        Ok(Self { classes })
    }

    /// Categories in encoder order.
    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
