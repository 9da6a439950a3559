//! URL-encoded form submissions.
//!
//! Browsers post every field as text, so the page form is decoded into
//! strings first and converted here. The echoed strings let the page
//! re-render exactly what the user typed when validation fails. A field
//! absent from the post decodes as empty and is reported as required.

use serde::{Deserialize, Serialize};
use triage_core::{FormInput, TriageError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub gender: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub family_history: String,
    pub high_caloric_food: String,
    pub vegetables: String,
    pub main_meals: String,
    pub snacking: String,
    pub smoker: String,
    pub water: String,
    pub calorie_monitoring: String,
    pub physical_activity: String,
    pub technology_use: String,
    pub alcohol: String,
    pub transport: String,
}

impl From<&FormInput> for FormFields {
    fn from(input: &FormInput) -> Self {
        Self {
            gender: input.gender.clone(),
            age: input.age.to_string(),
            height: format!("{:.2}", input.height),
            weight: input.weight.to_string(),
            family_history: yes_no(input.family_history).into(),
            high_caloric_food: yes_no(input.high_caloric_food).into(),
            vegetables: input.vegetables.to_string(),
            main_meals: input.main_meals.to_string(),
            snacking: input.snacking.clone(),
            smoker: yes_no(input.smoker).into(),
            water: input.water.to_string(),
            calorie_monitoring: yes_no(input.calorie_monitoring).into(),
            physical_activity: input.physical_activity.to_string(),
            technology_use: input.technology_use.to_string(),
            alcohol: input.alcohol.clone(),
            transport: input.transport.clone(),
        }
    }
}

impl FormFields {
    /// Values shown on a freshly opened page.
    pub fn initial() -> Self {
        Self::from(&FormInput::default())
    }

    /// Convert to a typed submission. Range checks stay with the normalizer;
    /// this only rejects text that is not a number or a yes/no answer.
    pub fn parse(&self) -> Result<FormInput, TriageError> {
        Ok(FormInput {
            gender: text("gender", &self.gender)?,
            age: number("age", &self.age)?,
            height: number("height", &self.height)?,
            weight: number("weight", &self.weight)?,
            family_history: flag("family_history", &self.family_history)?,
            high_caloric_food: flag("high_caloric_food", &self.high_caloric_food)?,
            vegetables: number("vegetables", &self.vegetables)?,
            main_meals: number("main_meals", &self.main_meals)?,
            snacking: text("snacking", &self.snacking)?,
            smoker: flag("smoker", &self.smoker)?,
            water: number("water", &self.water)?,
            calorie_monitoring: flag("calorie_monitoring", &self.calorie_monitoring)?,
            physical_activity: number("physical_activity", &self.physical_activity)?,
            technology_use: number("technology_use", &self.technology_use)?,
            alcohol: text("alcohol", &self.alcohol)?,
            transport: text("transport", &self.transport)?,
        })
    }
}

fn number(field: &'static str, raw: &str) -> Result<f32, TriageError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TriageError::invalid(field, "is required"));
    }
    raw.parse::<f32>()
        .map_err(|_| TriageError::invalid(field, format!("{raw:?} is not a number")))
}

fn text(field: &'static str, raw: &str) -> Result<String, TriageError> {
    match raw.trim() {
        "" => Err(TriageError::invalid(field, "is required")),
        value => Ok(value.to_string()),
    }
}

fn flag(field: &'static str, raw: &str) -> Result<bool, TriageError> {
    match raw.trim() {
        "yes" => Ok(true),
        "no" => Ok(false),
        "" => Err(TriageError::invalid(field, "is required")),
        other => Err(TriageError::invalid(
            field,
            format!("{other:?} must be \"yes\" or \"no\""),
        )),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, header};
    use axum::Form;

    async fn decode(body: &'static str) -> FormFields {
        let req = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let Form(fields) = Form::<FormFields>::from_request(req, &()).await.unwrap();
        fields
    }

    #[test]
    fn initial_values_parse_back_to_defaults() {
        let parsed = FormFields::initial().parse().unwrap();
        assert_eq!(parsed, FormInput::default());
    }

    #[test]
    fn accepts_padded_numbers_and_flags() {
        let fields = FormFields {
            age: " 41 ".into(),
            family_history: "yes".into(),
            ..FormFields::initial()
        };
        let input = fields.parse().unwrap();
        assert_eq!(input.age, 41.0);
        assert!(input.family_history);
    }

    #[test]
    fn empty_number_names_the_field() {
        let fields = FormFields {
            weight: String::new(),
            ..FormFields::initial()
        };
        let err = fields.parse().unwrap_err();
        assert_eq!(err.field(), Some("weight"));
        assert_eq!(err.to_string(), "invalid weight: is required");
    }

    #[test]
    fn rejects_non_numeric_and_bad_flags() {
        let fields = FormFields {
            height: "tall".into(),
            ..FormFields::initial()
        };
        assert_eq!(fields.parse().unwrap_err().field(), Some("height"));

        let fields = FormFields {
            smoker: "sometimes".into(),
            ..FormFields::initial()
        };
        assert_eq!(fields.parse().unwrap_err().field(), Some("smoker"));
    }

    #[tokio::test]
    async fn decodes_percent_encoded_body() {
        let fields = decode(
            "gender=Female&age=30&height=1.6&weight=55&family_history=no\
             &high_caloric_food=yes&vegetables=3&main_meals=3&snacking=Sometimes\
             &smoker=no&water=2&calorie_monitoring=no&physical_activity=2\
             &technology_use=0&alcohol=no&transport=Public%5FTransportation",
        )
        .await;
        let input = fields.parse().unwrap();
        assert_eq!(input.gender, "Female");
        assert!(input.high_caloric_food);
        assert_eq!(input.transport, "Public_Transportation");
    }

    #[tokio::test]
    async fn absent_fields_are_required_not_defaulted() {
        let fields = decode("age=40").await;
        assert_eq!(fields.age, "40");
        assert_eq!(fields.weight, "");

        let err = fields.parse().unwrap_err();
        assert_eq!(err.field(), Some("gender"));
        assert_eq!(err.to_string(), "invalid gender: is required");
    }

    #[tokio::test]
    async fn absent_categorical_is_required() {
        let fields = decode(
            "gender=Male&age=25&height=1.70&weight=70&family_history=no\
             &high_caloric_food=no&vegetables=2&main_meals=3&snacking=no\
             &smoker=no&water=2&calorie_monitoring=no&physical_activity=1\
             &technology_use=1&alcohol=no",
        )
        .await;
        let err = fields.parse().unwrap_err();
        assert_eq!(err.field(), Some("transport"));
    }
}
