//! Reconciliation report and its tabular rendering.

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::models::{EvaluationResult, Status};

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// One result per evaluated hostname, in inventory order.
    pub results: Vec<EvaluationResult>,
    /// The results worth acting on (see [`filter_results`]).
    pub flagged: Vec<EvaluationResult>,
}

impl ReconcileReport {
    pub fn new(results: Vec<EvaluationResult>, include_unknown: bool) -> Self {
        let flagged = filter_results(&results, include_unknown);
        Self { results, flagged }
    }

    /// Number of results with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Per-status counts, e.g. `2 ok, 1 inactive, 0 unknown`.
    pub fn summary(&self) -> String {
        Status::iter()
            .map(|status| format!("{} {status}", self.count(status)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Keeps `Inactive` results, plus `Unknown` ones when asked to.
pub fn filter_results(
    results: &[EvaluationResult],
    include_unknown: bool,
) -> Vec<EvaluationResult> {
    results
        .iter()
        .filter(|r| match r.status {
            Status::Inactive => true,
            Status::Unknown => include_unknown,
            Status::Ok => false,
        })
        .cloned()
        .collect()
}

/// Renders results as a space-aligned `OWNER ID / DOMAIN / SERVER / STATUS`
/// table, header included.
pub fn render_table(results: &[EvaluationResult]) -> String {
    let header = ["OWNER ID", "DOMAIN", "SERVER", "STATUS"];
    let rows: Vec<[String; 4]> = results
        .iter()
        .map(|r| {
            [
                r.owner_id.clone(),
                r.hostname.clone(),
                r.server_name.clone(),
                r.status.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 4]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    };

    push_row(header);
    for row in &rows {
        push_row([&row[0], &row[1], &row[2], &row[3]]);
    }
    out
}
