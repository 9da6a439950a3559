//! Versioned feature schema shipped alongside every model artifact.
//!
//! The schema records the column order the classifier was trained on, the
//! label-encoder class order, and the exact encodings applied to boolean and
//! categorical answers. Normalization reads these instead of re-deriving them,
//! so a retrained model with a different layout cannot silently drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema version this build understands. Artifacts carrying any other
/// version are rejected at load time.
pub const SCHEMA_VERSION: u32 = 1;

/// Source column names produced by the training preprocessing.
pub mod columns {
    pub const GENDER: &str = "Gender";
    pub const AGE: &str = "Age";
    pub const HEIGHT: &str = "Height";
    pub const WEIGHT: &str = "Weight";
    pub const FAMILY_HISTORY: &str = "family_history";
    pub const HIGH_CALORIC_FOOD: &str = "FAVC";
    pub const VEGETABLES: &str = "FCVC";
    pub const MAIN_MEALS: &str = "NCP";
    pub const SNACKING: &str = "CAEC";
    pub const SMOKER: &str = "SMOKE";
    pub const WATER: &str = "CH2O";
    pub const CALORIE_MONITORING: &str = "SCC";
    pub const PHYSICAL_ACTIVITY: &str = "FAF";
    pub const TECHNOLOGY_USE: &str = "TUE";
    pub const ALCOHOL: &str = "CALC";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    /// Model input columns, in order.
    pub features: Vec<String>,
    /// Label-encoder classes; position is the model's class index.
    pub classes: Vec<String>,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub binary: BinaryEncoding,
    pub gender: BTreeMap<String, f32>,
    /// Shared by snacking and alcohol consumption.
    pub frequency: BTreeMap<String, f32>,
    pub transport: OneHot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinaryEncoding {
    pub no: f32,
    pub yes: f32,
}

/// One-hot (dummy) encoding: each category becomes a `<prefix><category>` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHot {
    pub prefix: String,
    pub categories: Vec<String>,
}

impl FeatureSchema {
    /// Schema produced by the reference training notebook: dummies for
    /// transport appended after the scalar columns, classes in label-encoder
    /// (alphabetical) order.
    pub fn reference() -> Self {
        let transport = OneHot {
            prefix: "MTRANS_".into(),
            categories: [
                "Automobile",
                "Bike",
                "Motorbike",
                "Public_Transportation",
                "Walking",
            ]
            .map(String::from)
            .to_vec(),
        };

        let mut features: Vec<String> = [
            columns::GENDER,
            columns::AGE,
            columns::HEIGHT,
            columns::WEIGHT,
            columns::FAMILY_HISTORY,
            columns::HIGH_CALORIC_FOOD,
            columns::VEGETABLES,
            columns::MAIN_MEALS,
            columns::SNACKING,
            columns::SMOKER,
            columns::WATER,
            columns::CALORIE_MONITORING,
            columns::PHYSICAL_ACTIVITY,
            columns::TECHNOLOGY_USE,
            columns::ALCOHOL,
        ]
        .map(String::from)
        .to_vec();
        features.extend(transport.categories.iter().map(|c| transport.column(c)));

        let classes = [
            "Insufficient_Weight",
            "Normal_Weight",
            "Obesity_Type_I",
            "Obesity_Type_II",
            "Obesity_Type_III",
            "Overweight_Level_I",
            "Overweight_Level_II",
        ]
        .map(String::from)
        .to_vec();

        Self {
            version: SCHEMA_VERSION,
            features,
            classes,
            encoding: Encoding {
                binary: BinaryEncoding { no: 0.0, yes: 1.0 },
                gender: BTreeMap::from([("Female".into(), 0.0), ("Male".into(), 1.0)]),
                frequency: BTreeMap::from([
                    ("no".into(), 0.0),
                    ("Sometimes".into(), 1.0),
                    ("Frequently".into(), 2.0),
                    ("Always".into(), 3.0),
                ]),
                transport,
            },
        }
    }

    /// Number of model input columns.
    pub fn width(&self) -> usize {
        self.features.len()
    }

    pub fn is_supported(&self) -> bool {
        self.version == SCHEMA_VERSION
    }
}

impl Encoding {
    /// Gender vocabulary ordered by encoded value.
    pub fn gender_options(&self) -> Vec<&str> {
        by_code(&self.gender)
    }

    /// Frequency vocabulary ordered by encoded value (`no` first).
    pub fn frequency_options(&self) -> Vec<&str> {
        by_code(&self.frequency)
    }
}

impl BinaryEncoding {
    pub fn encode(&self, value: bool) -> f32 {
        if value { self.yes } else { self.no }
    }
}

impl OneHot {
    /// Column name for a category.
    pub fn column(&self, category: &str) -> String {
        format!("{}{}", self.prefix, category)
    }

    /// Category index a dummy column stands for, if it is one of ours.
    pub fn index_of_column(&self, column: &str) -> Option<usize> {
        let category = column.strip_prefix(self.prefix.as_str())?;
        self.categories.iter().position(|c| c == category)
    }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}

fn by_code(map: &BTreeMap<String, f32>) -> Vec<&str> {
    let mut entries: Vec<(&str, f32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.into_iter().map(|(k, _)| k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_schema_has_expected_columns() {
        let schema = FeatureSchema::reference();
        assert_eq!(schema.width(), 20);
        assert_eq!(schema.features[0], "Gender");
        assert_eq!(schema.features[14], "CALC");
        assert_eq!(schema.features[15], "MTRANS_Automobile");
        assert_eq!(schema.features[19], "MTRANS_Walking");
        assert_eq!(schema.classes.len(), 7);
        assert!(schema.is_supported());
    }

    #[test]
    fn json_roundtrip_preserves_order() {
        let schema = FeatureSchema::reference();
        let json = serde_json::to_string(&schema).unwrap();
        let parsed: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schema);
    }

    #[test]
    fn one_hot_columns() {
        let schema = FeatureSchema::reference();
        let transport = &schema.encoding.transport;
        assert_eq!(transport.column("Bike"), "MTRANS_Bike");
        assert_eq!(transport.index_of_column("MTRANS_Walking"), Some(4));
        assert_eq!(transport.index_of_column("MTRANS_Teleport"), None);
        assert_eq!(transport.index_of_column("Walking"), None);
        assert_eq!(transport.index_of("Motorbike"), Some(2));
    }

    #[test]
    fn options_follow_encoded_values() {
        let schema = FeatureSchema::reference();
        assert_eq!(
            schema.encoding.frequency_options(),
            vec!["no", "Sometimes", "Frequently", "Always"]
        );
        assert_eq!(schema.encoding.gender_options(), vec!["Female", "Male"]);
    }

    #[test]
    fn binary_encoding() {
        let enc = BinaryEncoding { no: 0.0, yes: 1.0 };
        assert_eq!(enc.encode(true), 1.0);
        assert_eq!(enc.encode(false), 0.0);
    }

    #[test]
    fn other_versions_unsupported() {
        let mut schema = FeatureSchema::reference();
        schema.version = SCHEMA_VERSION + 1;
        assert!(!schema.is_supported());
    }
}
