//! Report generation for verification results.

use serde::{Deserialize, Serialize};

use crate::verify::ClassRow;

/// A conformance report over one differential run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Reference the classifier was compared against.
    pub reference: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub rows: Vec<ClassRow>,
}

impl ConformanceReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.rows.iter().filter(|r| !r.passed()).count()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.total() - self.failed()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Status code of the first failing row in check order, or 0.
    #[must_use]
    pub fn status_code(&self) -> i32 {
        self.rows
            .iter()
            .find(|r| !r.passed())
            .map_or(0, |r| r.status_code)
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Reference: {}\n", self.reference));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.total()));
        out.push_str(&format!("- Passed: {}\n", self.passed()));
        out.push_str(&format!("- Failed: {}\n\n", self.failed()));

        out.push_str("| Class | Symbol | Members | Code | Status | First mismatch |\n");
        out.push_str("|-------|--------|---------|------|--------|----------------|\n");
        for r in &self.rows {
            let status = if r.passed() { "PASS" } else { "FAIL" };
            let first = r.mismatches.first().map_or_else(
                || "-".to_string(),
                |m| format!("{} (ref {}, got {})", m.input, m.expected, m.actual),
            );
            out.push_str(&format!(
                "| {} | `{}` | {} | {} | {} | {} |\n",
                r.class, r.symbol, r.members, r.status_code, status, first
            ));
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
