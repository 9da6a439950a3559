//! Plain-text cards for the `inspect` and `predict` commands.

use triage_model::{ArtifactSummary, TriageReport};

// ── Public API ──

/// Print the artifact summary as a vertical card.
pub fn print_artifact_card(summary: &ArtifactSummary) {
    print!("{}", artifact_card(summary));
}

/// Print one triage report as a vertical card.
pub fn print_report_card(report: &TriageReport) {
    print!("{}", report_card(report));
}

// ── Rendering ──

fn artifact_card(summary: &ArtifactSummary) -> String {
    let mut out = format!("=== {} ===\n\n", summary.path.display());

    out.push_str("Model\n");
    row(&mut out, "backend", &summary.model);
    row(&mut out, "schema_version", &summary.schema_version.to_string());
    out.push('\n');

    out.push_str("Features\n");
    row(&mut out, "count", &summary.features.len().to_string());
    for (i, name) in summary.features.iter().enumerate() {
        row(&mut out, &format!("[{i}]"), name);
    }
    out.push('\n');

    out.push_str("Classes\n");
    for (i, class) in summary.classes.iter().enumerate() {
        row(&mut out, &format!("[{i}]"), class.label());
    }
    out.push('\n');
    out
}

fn report_card(report: &TriageReport) -> String {
    let result = &report.result;
    let mut out = format!("=== {} ===\n\n", result.diagnosis);

    out.push_str("Prediction\n");
    row(&mut out, "category", result.category.label());
    row(&mut out, "risk", result.risk.as_str());
    row(&mut out, "confidence", &format!("{:.1}%", result.confidence * 100.0));
    row(&mut out, "bmi", &format!("{:.2}", report.bmi));
    out.push('\n');

    out.push_str("Distribution\n");
    for bar in &result.bars {
        row(
            &mut out,
            bar.label,
            &format!("{:>5.1}%  {}", bar.probability * 100.0, bar_glyphs(bar.probability)),
        );
    }
    out.push('\n');

    if !report.insights.is_empty() {
        out.push_str("Habit Alerts\n");
        for insight in &report.insights {
            row(&mut out, insight.title(), insight.message());
        }
        out.push('\n');
    }
    out
}

fn row(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("  {:<26} {}\n", key, value));
}

/// Twenty-cell text bar.
fn bar_glyphs(p: f32) -> String {
    let filled = (p.clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use triage_core::{Category, Insight, present};

    #[test]
    fn report_card_lists_every_category() {
        let dist: BTreeMap<Category, f32> = Category::ALL
            .into_iter()
            .zip([0.0, 0.6, 0.1, 0.1, 0.0, 0.2, 0.0])
            .collect();
        let report = TriageReport {
            result: present(Category::NormalWeight, &dist),
            bmi: 24.22,
            insights: vec![Insight::Sedentary],
        };
        let card = report_card(&report);
        assert!(card.starts_with("=== Normal Weight ===\n"));
        assert!(card.contains(&format!("  {:<26} Normal_Weight\n", "category")));
        assert!(card.contains("60.0%  ############........"));
        assert!(card.contains("Obesity Type III (Morbid)"));
        assert!(card.contains("Habit Alerts"));
        assert!(card.contains("24.22"));
    }

    #[test]
    fn artifact_card_numbers_columns() {
        let summary = ArtifactSummary {
            path: PathBuf::from("models/demo-forest.json"),
            schema_version: 1,
            model: "random forest, 3 trees, 47 nodes".into(),
            features: vec!["Gender".into(), "Age".into()],
            classes: vec![Category::NormalWeight],
        };
        let card = artifact_card(&summary);
        assert!(card.contains("=== models/demo-forest.json ==="));
        assert!(card.contains(&format!("  {:<26} Age\n", "[1]")));
        assert!(card.contains(&format!("  {:<26} Normal_Weight\n", "[0]")));
        assert!(card.contains("random forest, 3 trees, 47 nodes"));
    }

    #[test]
    fn glyphs_are_fixed_width() {
        assert_eq!(bar_glyphs(0.0), ".".repeat(20));
        assert_eq!(bar_glyphs(1.0), "#".repeat(20));
        assert_eq!(bar_glyphs(1.5).len(), 20);
    }
}
