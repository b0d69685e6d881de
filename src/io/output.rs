use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{EvaluationReport, ReportStatus};

/// Write the machine-readable report as pretty JSON
pub fn write_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json + "\n").with_context(|| format!("Failed to write {path:?}"))?;
    Ok(())
}

/// Render a human-readable scorecard from the report
pub fn render_report_text(report: &EvaluationReport) -> String {
    let mut out = String::new();

    out.push_str("Interview Evaluation\n");
    out.push_str("====================\n");
    out.push_str(&format!("Candidate: {}\n", report.candidate_name));
    out.push_str(&format!("Interview: {}\n", report.interview_id));

    if report.status == ReportStatus::Error {
        out.push_str("Status: error\n");
        if let Some(error) = &report.error {
            out.push_str(&format!("Error: {error}\n"));
        }
        return out;
    }

    if let Some(score) = report.overall_score {
        out.push_str(&format!("Overall score: {score:.1}/10\n"));
    }
    out.push('\n');

    if !report.strengths.is_empty() {
        out.push_str("Strengths\n---------\n");
        for s in &report.strengths {
            out.push_str(&format!("- {s}\n"));
        }
        out.push('\n');
    }

    if !report.weaknesses.is_empty() {
        out.push_str("Areas for Improvement\n---------------------\n");
        for w in &report.weaknesses {
            out.push_str(&format!("- {w}\n"));
        }
        out.push('\n');
    }

    for eval in &report.criteria_evaluations {
        out.push_str(&format!("{} ({:.1}/10)\n", eval.criterion, eval.score));
        out.push_str(&format!("{}\n", eval.justification));
        for quote in &eval.supporting_quotes {
            out.push_str(&format!("  > \"{quote}\"\n"));
        }
        out.push('\n');
    }

    if let Some(summary) = &report.summary {
        out.push_str("Summary\n-------\n");
        out.push_str(summary);
        out.push('\n');
    }

    out
}
