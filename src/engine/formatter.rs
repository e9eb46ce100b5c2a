//! Table structuring: turns a detected region into named columns and rows
//!
//! Rows are normalized to the modal column count. The first row is promoted
//! to column names when it looks like a header (mostly non-numeric, followed
//! by a mostly-numeric row); otherwise columns get synthetic names.

use std::collections::{HashMap, HashSet};

use super::types::{EngineError, FormattedTable, TableRegion};

/// Formats a detected table region into a structured table.
pub trait TableFormatter: Send + Sync {
    fn format(&self, region: &TableRegion) -> Result<FormattedTable, EngineError>;
}

/// Default formatter for whitespace-grid regions.
#[derive(Debug, Clone, Default)]
pub struct GridFormatter;

impl GridFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl TableFormatter for GridFormatter {
    fn format(&self, region: &TableRegion) -> Result<FormattedTable, EngineError> {
        if region.rows.is_empty() {
            return Err(EngineError::Formatting(
                "table region has no rows".to_string(),
            ));
        }

        let width = modal_width(&region.rows).max(1);
        let rows = normalize_rows(&region.rows, width);

        if promote_header(&rows) {
            let columns = unique_columns(&rows[0]);
            Ok(FormattedTable::new(columns, rows[1..].to_vec()))
        } else {
            Ok(FormattedTable::new(synthetic_columns(width), rows))
        }
    }
}

/// Most frequent row width; ties break toward the wider row.
pub(crate) fn modal_width(rows: &[Vec<String>]) -> usize {
    let mut freq: HashMap<usize, usize> = HashMap::new();
    for row in rows {
        *freq.entry(row.len()).or_insert(0) += 1;
    }

    freq.into_iter()
        .max_by_key(|(width, count)| (*count, *width))
        .map_or(0, |(width, _)| width)
}

fn normalize_rows(rows: &[Vec<String>], width: usize) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            let mut out = row.clone();
            out.resize(width, String::new());
            out
        })
        .collect()
}

/// Header heuristic: first row mostly non-numeric, second row mostly numeric.
fn promote_header(rows: &[Vec<String>]) -> bool {
    if rows.len() < 2 {
        return false;
    }

    let first = non_numeric_ratio(&rows[0]);
    let second = non_numeric_ratio(&rows[1]);
    let confidence = (first * 0.6 + (1.0 - second) * 0.4).clamp(0.0, 1.0);

    first >= 0.6 && second <= 0.7 && confidence >= 0.55
}

fn non_numeric_ratio(cells: &[String]) -> f32 {
    if cells.is_empty() {
        return 0.0;
    }

    let non_numeric = cells.iter().filter(|cell| !is_numeric(cell)).count();
    non_numeric as f32 / cells.len() as f32
}

fn is_numeric(value: &str) -> bool {
    value.trim().replace(',', "").parse::<f64>().is_ok()
}

/// Column names from a header row. Blank cells get positional names and
/// duplicates are suffixed, so record keys never collide.
fn unique_columns(header: &[String]) -> Vec<String> {
    let mut used = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = if cell.trim().is_empty() {
                format!("column_{}", index + 1)
            } else {
                cell.trim().to_string()
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while !used.insert(name.clone()) {
                suffix += 1;
                name = format!("{}_{}", base, suffix);
            }
            name
        })
        .collect()
}

fn synthetic_columns(width: usize) -> Vec<String> {
    (1..=width).map(|index| format!("column_{}", index)).collect()
}
