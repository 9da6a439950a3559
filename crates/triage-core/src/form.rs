//! Raw attributes submitted for one triage request.

use serde::{Deserialize, Serialize};

/// One patient's form submission, before validation or encoding.
///
/// Categorical answers are kept as the submitted strings so that values
/// outside the trained vocabulary can be rejected by the normalizer rather
/// than silently mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub gender: String,
    /// Years.
    pub age: f32,
    /// Meters.
    pub height: f32,
    /// Kilograms.
    pub weight: f32,
    pub family_history: bool,
    /// Frequent consumption of high-caloric food.
    pub high_caloric_food: bool,
    /// Vegetable consumption frequency, 1 to 3.
    pub vegetables: f32,
    /// Number of main meals per day, 1 to 4.
    pub main_meals: f32,
    /// Eating between meals (frequency vocabulary).
    pub snacking: String,
    pub smoker: bool,
    /// Daily water intake, 1 to 3.
    pub water: f32,
    pub calorie_monitoring: bool,
    /// Physical activity frequency, 0 to 3.
    pub physical_activity: f32,
    /// Time on technology devices, 0 to 2.
    pub technology_use: f32,
    /// Alcohol consumption (frequency vocabulary).
    pub alcohol: String,
    pub transport: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            gender: "Male".into(),
            age: 25.0,
            height: 1.70,
            weight: 70.0,
            family_history: false,
            high_caloric_food: false,
            vegetables: 2.0,
            main_meals: 3.0,
            snacking: "no".into(),
            smoker: false,
            water: 2.0,
            calorie_monitoring: false,
            physical_activity: 1.0,
            technology_use: 1.0,
            alcohol: "no".into(),
            transport: "Public_Transportation".into(),
        }
    }
}
