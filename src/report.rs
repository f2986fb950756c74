//! Report formatting for headless validation.
//!
//! Pure functions: (ValidationReport, OutputFormat) → String.
//! No I/O, no side effects.

use crate::types::OutputFormat;
use crate::validation::ValidationReport;

/// Format a validation report for output.
pub fn format_report(report: &ValidationReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str("=== Fields ===\n");
    for result in &report.fields {
        let label = result.field.label();
        match result.message {
            None => out.push_str(&format!("  ✓ {}\n", label)),
            Some(message) => out.push_str(&format!("  ✗ {}: {}\n", label, message)),
        }
    }
    out.push('\n');

    let invalid = report.fields.iter().filter(|f| !f.valid).count();
    out.push_str("=== Summary ===\n");
    if report.valid {
        out.push_str("Form submitted successfully!\n");
    } else {
        out.push_str(&format!(
            "{} invalid field{}\n",
            invalid,
            if invalid == 1 { "" } else { "s" }
        ));
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(report: &ValidationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        // Plain data with string keys; serialization cannot fail
        panic!("Failed to serialize report to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================
