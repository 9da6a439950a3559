//! Rule-based habit alerts and body-mass index, shown next to the prediction.
//!
//! These are simple thresholds on the raw answers; they do not involve the
//! classifier.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::form::FormInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
    /// Water intake below 2.
    LowHydration,
    /// Vegetable frequency below 2.
    LowVegetables,
    /// No physical activity at all.
    Sedentary,
    /// Technology use above 1.
    HighScreenTime,
}

impl Insight {
    pub fn code(self) -> &'static str {
        match self {
            Self::LowHydration => "low_hydration",
            Self::LowVegetables => "low_vegetables",
            Self::Sedentary => "sedentary",
            Self::HighScreenTime => "high_screen_time",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::LowHydration => "Hydration",
            Self::LowVegetables => "Nutrition",
            Self::Sedentary => "Physical activity",
            Self::HighScreenTime => "Screen time",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::LowHydration => "Water intake below the recommended level (more than 2 L/day).",
            Self::LowVegetables => "Low vegetable consumption reported.",
            Self::Sedentary => "No physical activity recorded; risk of a sedentary lifestyle.",
            Self::HighScreenTime => "High use of electronic devices.",
        }
    }
}

impl Serialize for Insight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Insight", 3)?;
        s.serialize_field("code", self.code())?;
        s.serialize_field("title", self.title())?;
        s.serialize_field("message", self.message())?;
        s.end()
    }
}

/// Habit alerts for a form, in a fixed order.
pub fn assess(input: &FormInput) -> Vec<Insight> {
    let mut alerts = Vec::new();
    if input.water < 2.0 {
        alerts.push(Insight::LowHydration);
    }
    if input.vegetables < 2.0 {
        alerts.push(Insight::LowVegetables);
    }
    if input.physical_activity == 0.0 {
        alerts.push(Insight::Sedentary);
    }
    if input.technology_use > 1.0 {
        alerts.push(Insight::HighScreenTime);
    }
    alerts
}

/// Body-mass index, kg/m².
pub fn bmi(weight: f32, height: f32) -> f32 {
    weight / (height * height)
}
