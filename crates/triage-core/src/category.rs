//! The seven obesity categories, ordered by severity, and their risk tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Obesity category predicted by the classifier.
///
/// Variants are declared in severity order, so the derived `Ord` matches the
/// clinical ordering. Serialized with the raw dataset label (`Normal_Weight`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Insufficient_Weight")]
    InsufficientWeight,
    #[serde(rename = "Normal_Weight")]
    NormalWeight,
    #[serde(rename = "Overweight_Level_I")]
    OverweightLevelI,
    #[serde(rename = "Overweight_Level_II")]
    OverweightLevelII,
    #[serde(rename = "Obesity_Type_I")]
    ObesityTypeI,
    #[serde(rename = "Obesity_Type_II")]
    ObesityTypeII,
    #[serde(rename = "Obesity_Type_III")]
    ObesityTypeIII,
}

/// Coarse severity bucket derived from a category's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl Category {
    /// All categories in severity order.
    pub const ALL: [Category; 7] = [
        Category::InsufficientWeight,
        Category::NormalWeight,
        Category::OverweightLevelI,
        Category::OverweightLevelII,
        Category::ObesityTypeI,
        Category::ObesityTypeII,
        Category::ObesityTypeIII,
    ];

    /// Raw label as written by the training label encoder.
    pub fn label(self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Insufficient_Weight",
            Self::NormalWeight => "Normal_Weight",
            Self::OverweightLevelI => "Overweight_Level_I",
            Self::OverweightLevelII => "Overweight_Level_II",
            Self::ObesityTypeI => "Obesity_Type_I",
            Self::ObesityTypeII => "Obesity_Type_II",
            Self::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    /// Parse a raw training label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Human-readable diagnosis.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Insufficient Weight",
            Self::NormalWeight => "Normal Weight",
            Self::OverweightLevelI => "Overweight Level I",
            Self::OverweightLevelII => "Overweight Level II",
            Self::ObesityTypeI => "Obesity Type I",
            Self::ObesityTypeII => "Obesity Type II",
            Self::ObesityTypeIII => "Obesity Type III (Morbid)",
        }
    }

    pub fn risk_tier(self) -> RiskTier {
        match self {
            Self::InsufficientWeight | Self::NormalWeight => RiskTier::Low,
            Self::OverweightLevelI | Self::OverweightLevelII => RiskTier::Moderate,
            Self::ObesityTypeI | Self::ObesityTypeII | Self::ObesityTypeIII => RiskTier::High,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
