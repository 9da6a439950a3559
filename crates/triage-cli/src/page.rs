//! Server-rendered triage page.

use std::collections::BTreeMap;

use minijinja::{Environment, context};
use serde::Serialize;
use triage_core::{FeatureSchema, Insight, TriageError};
use triage_model::TriageReport;

use crate::form::FormFields;

const INDEX: &str = "index.html";

/// Compiled page templates. Names ending in `.html` are auto-escaped.
pub struct Pages {
    env: Environment<'static>,
}

/// Choices offered by the form's select boxes, taken from the artifact
/// schema so the page never offers a value the model was not trained on.
#[derive(Debug, Serialize)]
struct Choices<'a> {
    gender: Vec<&'a str>,
    frequency: Vec<&'a str>,
    transport: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReportView {
    category: &'static str,
    diagnosis: &'static str,
    risk: &'static str,
    confidence: String,
    bmi: String,
    bars: Vec<BarView>,
    insights: Vec<Insight>,
}

#[derive(Debug, Serialize)]
struct BarView {
    label: &'static str,
    percent: String,
    /// Bar width in percent of the chart, 0 to 100.
    width: f32,
    predicted: bool,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    /// Render the page: the form prefilled with `form`, inline `errors`, and
    /// the report card when a prediction succeeded.
    pub fn index(
        &self,
        schema: &FeatureSchema,
        form: &FormFields,
        errors: &FieldErrors,
        report: Option<&TriageReport>,
    ) -> Result<String, minijinja::Error> {
        let choices = Choices {
            gender: schema.encoding.gender_options(),
            frequency: schema.encoding.frequency_options(),
            transport: schema
                .encoding
                .transport
                .categories
                .iter()
                .map(String::as_str)
                .collect(),
        };
        let report = report.map(ReportView::from);

        self.env.get_template(INDEX)?.render(context! {
            version => env!("CARGO_PKG_VERSION"),
            form,
            choices,
            errors => &errors.0,
            report,
        })
    }
}

/// Field name → message, for errors shown next to their inputs.
/// Errors without a field are keyed under `form`.
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn from_error(err: &TriageError) -> Self {
        let mut errors = Self::default();
        let message = match err {
            TriageError::InvalidInput { reason, .. } => reason.clone(),
            TriageError::UnknownCategory { value, .. } => {
                format!("{value:?} is not a known option")
            }
            other => other.to_string(),
        };
        errors.0.insert(err.field().unwrap_or("form"), message);
        errors
    }
}

impl From<&TriageReport> for ReportView {
    fn from(report: &TriageReport) -> Self {
        let result = &report.result;
        Self {
            category: result.category.label(),
            diagnosis: result.diagnosis,
            risk: result.risk.as_str(),
            confidence: percent(result.confidence),
            bmi: format!("{:.2}", report.bmi),
            bars: result
                .bars
                .iter()
                .map(|bar| BarView {
                    label: bar.label,
                    percent: percent(bar.probability),
                    width: (bar.probability * 100.0).clamp(0.0, 100.0),
                    predicted: bar.category == result.category,
                })
                .collect(),
            insights: report.insights.clone(),
        }
    }
}

fn percent(p: f32) -> String {
    format!("{:.1}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(form: &FormFields, errors: &FieldErrors) -> String {
        Pages::new()
            .unwrap()
            .index(&FeatureSchema::reference(), form, errors, None)
            .unwrap()
    }

    #[test]
    fn form_offers_schema_vocabularies() {
        let html = render(&FormFields::initial(), &FieldErrors::default());
        assert!(html.contains("<form"));
        assert!(html.contains("Public_Transportation"));
        assert!(html.contains("Automobile"));
        assert!(html.contains("Sometimes"));
        assert!(!html.contains("Probability distribution"));
    }

    #[test]
    fn inline_error_is_rendered_next_to_field() {
        let err = TriageError::invalid("age", "must be greater than 0");
        let errors = FieldErrors::from_error(&err);
        assert_eq!(errors.0["age"], "must be greater than 0");

        let html = render(&FormFields::initial(), &errors);
        assert!(html.contains("must be greater than 0"));
    }

    #[test]
    fn submitted_text_is_escaped() {
        let form = FormFields {
            age: "<script>".into(),
            ..FormFields::initial()
        };
        let html = render(&form, &FieldErrors::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn fieldless_errors_go_under_form() {
        let err = TriageError::Inference("session closed".into());
        let errors = FieldErrors::from_error(&err);
        assert_eq!(errors.0["form"], "inference failed: session closed");
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(percent(0.685), "68.5%");
        assert_eq!(percent(1.0), "100.0%");
    }
}
