//! Result presentation: predicted category + distribution → display structure.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::{Category, RiskTier};

/// One bar of the probability chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityBar {
    pub category: Category,
    pub label: &'static str,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayResult {
    pub category: Category,
    pub diagnosis: &'static str,
    pub risk: RiskTier,
    /// Probability mass on the predicted category.
    pub confidence: f32,
    /// All seven categories, most probable first.
    pub bars: Vec<ProbabilityBar>,
}

/// Build the display structure for a classification.
///
/// Categories absent from `distribution` are charted at zero. Bars sort by
/// descending probability; ties keep severity order.
pub fn present(label: Category, distribution: &BTreeMap<Category, f32>) -> DisplayResult {
    let mut bars: Vec<ProbabilityBar> = Category::ALL
        .into_iter()
        .map(|category| ProbabilityBar {
            category,
            label: category.display_name(),
            probability: distribution.get(&category).copied().unwrap_or(0.0),
        })
        .collect();

    // Stable sort keeps ordinal order among equal probabilities.
    bars.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    DisplayResult {
        category: label,
        diagnosis: label.display_name(),
        risk: label.risk_tier(),
        confidence: distribution.get(&label).copied().unwrap_or(0.0),
        bars,
    }
}
