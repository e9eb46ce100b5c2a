//! Table region detection over page text
//!
//! A line is a candidate table row when it splits into enough cells on tabs
//! or runs of two or more spaces (with a stricter fallback for single-space
//! layouts). Consecutive candidate rows form one region.

use super::formatter::modal_width;
use super::types::{EngineError, PageText, TableRegion};

/// Detects table regions on a single page.
pub trait TableDetector: Send + Sync {
    fn detect(&self, page: &PageText) -> Result<Vec<TableRegion>, EngineError>;
}

/// Default detector over whitespace-aligned text grids.
#[derive(Debug, Clone)]
pub struct GridDetector {
    min_columns: usize,
    min_rows: usize,
}

impl Default for GridDetector {
    fn default() -> Self {
        Self {
            min_columns: 2,
            min_rows: 2,
        }
    }
}

impl GridDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(&self, page: u32, rows: &mut Vec<Vec<String>>, regions: &mut Vec<TableRegion>) {
        if rows.len() >= self.min_rows {
            let confidence = region_confidence(rows);
            regions.push(TableRegion::new(page, std::mem::take(rows), confidence));
        } else {
            rows.clear();
        }
    }
}

impl TableDetector for GridDetector {
    fn detect(&self, page: &PageText) -> Result<Vec<TableRegion>, EngineError> {
        let mut regions = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for line in page.text.lines() {
            match row_cells(line, self.min_columns) {
                Some(cells) => rows.push(cells),
                None => self.flush(page.number, &mut rows, &mut regions),
            }
        }
        self.flush(page.number, &mut rows, &mut regions);

        Ok(regions)
    }
}

/// Split a line into cells when it plausibly belongs to a table row.
fn row_cells(line: &str, min_columns: usize) -> Option<Vec<String>> {
    let cells = split_cells(line);
    if cells.len() >= min_columns {
        return Some(cells);
    }

    // Single-space layouts: accept short or numeric-looking lines, not prose.
    let loose: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if loose.len() < min_columns {
        return None;
    }
    let prose = line.trim_end().ends_with(['.', '!', '?']);
    let numeric = loose
        .iter()
        .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
    if !prose && (numeric || loose.len() <= 6) {
        return Some(loose);
    }

    None
}

/// Split on tabs or runs of two or more whitespace characters. Single
/// internal spaces stay inside a cell.
fn split_cells(line: &str) -> Vec<String> {
    fn close(cell: &mut String, cells: &mut Vec<String>) {
        let trimmed = cell.trim();
        if !trimmed.is_empty() {
            cells.push(trimmed.to_string());
        }
        cell.clear();
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut gap = 0_usize;

    for ch in line.trim().chars() {
        if ch == '\t' {
            close(&mut cell, &mut cells);
            gap = 0;
        } else if ch.is_whitespace() {
            gap += 1;
            if gap >= 2 {
                close(&mut cell, &mut cells);
            } else {
                cell.push(' ');
            }
        } else {
            gap = 0;
            cell.push(ch);
        }
    }
    close(&mut cell, &mut cells);

    cells
}

/// Share of rows matching the modal column count, blended with how evenly
/// row widths are distributed.
fn region_confidence(rows: &[Vec<String>]) -> f32 {
    if rows.len() < 2 {
        return 0.0;
    }

    let modal = modal_width(rows);
    if modal == 0 {
        return 0.0;
    }

    let consistent = rows.iter().filter(|row| row.len() == modal).count() as f32 / rows.len() as f32;
    let widest = rows.iter().map(Vec::len).max().unwrap_or(modal);
    let narrowest = rows.iter().map(Vec::len).min().unwrap_or(modal);
    let uniformity = if widest == 0 {
        0.0
    } else {
        1.0 - (widest - narrowest) as f32 / widest as f32
    };

    (consistent * 0.75 + uniformity * 0.25).clamp(0.0, 1.0)
}
