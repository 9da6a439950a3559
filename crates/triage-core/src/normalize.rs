//! Input normalization: validated form answers → model feature vector.
//!
//! The artifact schema is compiled once into a column plan, one [`Slot`] per
//! model input column. Normalizing a form then fills the plan in schema order,
//! independent of how the form lays out its fields.

use std::collections::BTreeMap;

use crate::error::{ShapeMismatch, TriageError};
use crate::form::FormInput;
use crate::schema::{Encoding, FeatureSchema, columns};

/// Numeric encoding of one form, in the artifact's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which form answer feeds a model column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Gender,
    Age,
    Height,
    Weight,
    FamilyHistory,
    HighCaloricFood,
    Vegetables,
    MainMeals,
    Snacking,
    Smoker,
    Water,
    CalorieMonitoring,
    PhysicalActivity,
    TechnologyUse,
    Alcohol,
    /// Dummy column for the transport category at this index.
    Transport(usize),
}

/// Accepted range for a numeric answer.
struct Limits {
    field: &'static str,
    min: f32,
    /// `true` when `min` itself is rejected.
    exclusive_min: bool,
    max: f32,
}

const AGE: Limits = Limits {
    field: "age",
    min: 0.0,
    exclusive_min: true,
    max: 120.0,
};
const HEIGHT: Limits = Limits {
    field: "height",
    min: 0.0,
    exclusive_min: true,
    max: 2.8,
};
const WEIGHT: Limits = Limits {
    field: "weight",
    min: 0.0,
    exclusive_min: true,
    max: 400.0,
};
const VEGETABLES: Limits = Limits {
    field: "vegetables",
    min: 1.0,
    exclusive_min: false,
    max: 3.0,
};
const MAIN_MEALS: Limits = Limits {
    field: "main_meals",
    min: 1.0,
    exclusive_min: false,
    max: 4.0,
};
const WATER: Limits = Limits {
    field: "water",
    min: 1.0,
    exclusive_min: false,
    max: 3.0,
};
const PHYSICAL_ACTIVITY: Limits = Limits {
    field: "physical_activity",
    min: 0.0,
    exclusive_min: false,
    max: 3.0,
};
const TECHNOLOGY_USE: Limits = Limits {
    field: "technology_use",
    min: 0.0,
    exclusive_min: false,
    max: 2.0,
};

impl Limits {
    fn check(&self, value: f32) -> Result<f32, TriageError> {
        if !value.is_finite() {
            return Err(TriageError::invalid(self.field, "must be a finite number"));
        }
        if self.exclusive_min && value <= self.min {
            return Err(TriageError::invalid(
                self.field,
                format!("must be greater than {}", self.min),
            ));
        }
        if !self.exclusive_min && value < self.min {
            return Err(TriageError::invalid(
                self.field,
                format!("must be at least {}", self.min),
            ));
        }
        if value > self.max {
            return Err(TriageError::invalid(
                self.field,
                format!("must be at most {}", self.max),
            ));
        }
        Ok(value)
    }
}

/// Converts [`FormInput`] into the [`FeatureVector`] a given artifact expects.
#[derive(Debug, Clone)]
pub struct Normalizer {
    encoding: Encoding,
    plan: Vec<Slot>,
}

impl Normalizer {
    /// Compile the schema into a column plan.
    ///
    /// Fails with [`TriageError::FeatureShape`] if the schema names a column
    /// no form answer can produce.
    pub fn new(schema: &FeatureSchema) -> Result<Self, TriageError> {
        let transport = &schema.encoding.transport;
        let plan = schema
            .features
            .iter()
            .map(|column| {
                slot_for(column)
                    .or_else(|| transport.index_of_column(column).map(Slot::Transport))
                    .ok_or_else(|| {
                        TriageError::FeatureShape(ShapeMismatch::UnknownColumn(column.clone()))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(columns = plan.len(), "compiled feature plan");
        Ok(Self {
            encoding: schema.encoding.clone(),
            plan,
        })
    }

    /// Number of columns produced per form.
    pub fn width(&self) -> usize {
        self.plan.len()
    }

    /// Validate and encode one form. Pure.
    pub fn normalize(&self, input: &FormInput) -> Result<FeatureVector, TriageError> {
        let age = AGE.check(input.age)?;
        let height = HEIGHT.check(input.height)?;
        let weight = WEIGHT.check(input.weight)?;
        let vegetables = VEGETABLES.check(input.vegetables)?;
        let main_meals = MAIN_MEALS.check(input.main_meals)?;
        let water = WATER.check(input.water)?;
        let physical_activity = PHYSICAL_ACTIVITY.check(input.physical_activity)?;
        let technology_use = TECHNOLOGY_USE.check(input.technology_use)?;

        let enc = &self.encoding;
        let gender = lookup(&enc.gender, "gender", &input.gender)?;
        let snacking = lookup(&enc.frequency, "snacking", &input.snacking)?;
        let alcohol = lookup(&enc.frequency, "alcohol", &input.alcohol)?;
        let transport = enc
            .transport
            .index_of(input.transport.trim())
            .ok_or_else(|| TriageError::UnknownCategory {
                field: "transport",
                value: input.transport.clone(),
            })?;

        let values = self
            .plan
            .iter()
            .map(|slot| match *slot {
                Slot::Gender => gender,
                Slot::Age => age,
                Slot::Height => height,
                Slot::Weight => weight,
                Slot::FamilyHistory => enc.binary.encode(input.family_history),
                Slot::HighCaloricFood => enc.binary.encode(input.high_caloric_food),
                Slot::Vegetables => vegetables,
                Slot::MainMeals => main_meals,
                Slot::Snacking => snacking,
                Slot::Smoker => enc.binary.encode(input.smoker),
                Slot::Water => water,
                Slot::CalorieMonitoring => enc.binary.encode(input.calorie_monitoring),
                Slot::PhysicalActivity => physical_activity,
                Slot::TechnologyUse => technology_use,
                Slot::Alcohol => alcohol,
                Slot::Transport(idx) => {
                    if idx == transport {
                        1.0
                    } else {
                        0.0
                    }
                }
            })
            .collect();

        Ok(FeatureVector(values))
    }
}

fn slot_for(column: &str) -> Option<Slot> {
    let slot = match column {
        columns::GENDER => Slot::Gender,
        columns::AGE => Slot::Age,
        columns::HEIGHT => Slot::Height,
        columns::WEIGHT => Slot::Weight,
        columns::FAMILY_HISTORY => Slot::FamilyHistory,
        columns::HIGH_CALORIC_FOOD => Slot::HighCaloricFood,
        columns::VEGETABLES => Slot::Vegetables,
        columns::MAIN_MEALS => Slot::MainMeals,
        columns::SNACKING => Slot::Snacking,
        columns::SMOKER => Slot::Smoker,
        columns::WATER => Slot::Water,
        columns::CALORIE_MONITORING => Slot::CalorieMonitoring,
        columns::PHYSICAL_ACTIVITY => Slot::PhysicalActivity,
        columns::TECHNOLOGY_USE => Slot::TechnologyUse,
        columns::ALCOHOL => Slot::Alcohol,
        _ => return None,
    };
    Some(slot)
}

fn lookup(
    vocabulary: &BTreeMap<String, f32>,
    field: &'static str,
    value: &str,
) -> Result<f32, TriageError> {
    vocabulary
        .get(value.trim())
        .copied()
        .ok_or_else(|| TriageError::UnknownCategory {
            field,
            value: value.to_string(),
        })
}
