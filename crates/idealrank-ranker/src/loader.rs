//! Decision table loader for delimited text.
//!
//! The header row names the columns. One column holds the candidate
//! identifier (the first, unless configured by name); every other column is
//! an attribute, kept in header order.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use idealrank_common::{IdealRankError, InputConfig, Result};
use tracing::{debug, info};

use crate::table::{DecisionTable, Matrix};

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    /// Cells equal to this token after trimming are missing. Blank cells always are.
    pub missing_token: String,
    /// Identifier column name; `None` means the first column.
    pub index_column: Option<String>,
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            missing_token: " ".to_string(),
            index_column: None,
            delimiter: b',',
        }
    }
}

impl From<&InputConfig> for LoaderOptions {
    fn from(input: &InputConfig) -> Self {
        Self {
            missing_token: input.missing_token.clone(),
            index_column: input.index_column.clone(),
            // RunConfig::validate guarantees an ASCII delimiter
            delimiter: u8::try_from(input.delimiter).unwrap_or(b','),
        }
    }
}

impl LoaderOptions {
    fn is_missing(&self, raw: &str) -> bool {
        let cell = raw.trim();
        cell.is_empty() || cell == self.missing_token.trim()
    }
}

/// Load a decision table from a file.
pub fn load_path(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<DecisionTable> {
    let path = path.as_ref();
    debug!("Loading decision table from {:?}", path);
    let file = File::open(path)?;
    let table = load_reader(file, options)?;
    info!(
        "Loaded {} candidates × {} attributes from {:?}",
        table.candidate_count(),
        table.attribute_count(),
        path
    );
    Ok(table)
}

/// Load a decision table from any reader.
pub fn load_reader<R: Read>(mut reader: R, options: &LoaderOptions) -> Result<DecisionTable> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        // column counts are checked here so the error names the line
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.is_empty() {
        return Err(IdealRankError::format(1, "empty header row"));
    }

    let index_pos = match options.index_column.as_deref().map(str::trim) {
        Some(name) => headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IdealRankError::format(1, format!("index column '{name}' not found in header")))?,
        None => 0,
    };
    let index_name = headers[index_pos].clone();
    let attributes: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(pos, _)| *pos != index_pos)
        .map(|(_, h)| h.clone())
        .collect();
    if attributes.is_empty() {
        return Err(IdealRankError::format(1, "header has no attribute columns"));
    }

    let mut candidates = Vec::new();
    let mut rows = Vec::new();
    // identifier -> line of first occurrence
    let mut seen: HashMap<String, u64> = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| record_line(&text, p));

        if record.len() != headers.len() {
            return Err(IdealRankError::format(
                line,
                format!("expected {} columns, found {}", headers.len(), record.len()),
            ));
        }

        let candidate = record.get(index_pos).unwrap_or_default().trim();
        if candidate.is_empty() {
            return Err(IdealRankError::format(line, "empty candidate identifier"));
        }
        if let Some(first) = seen.insert(candidate.to_string(), line) {
            debug!("'{}' first seen on line {}", candidate, first);
            return Err(IdealRankError::DuplicateKey { candidate: candidate.to_string(), line });
        }

        let mut row = Vec::with_capacity(attributes.len());
        for (pos, raw) in record.iter().enumerate() {
            if pos == index_pos {
                continue;
            }
            row.push(parse_cell(raw, options, line, &headers[pos])?);
        }

        candidates.push(candidate.to_string());
        rows.push(row);
    }

    let values = Matrix::from_rows(rows)?;
    let missing = values.missing_count();
    if missing > 0 {
        debug!("{} missing cells in decision table", missing);
    }

    DecisionTable::new(index_name, candidates, attributes, values)
}

/// 1-based line on which a record starts.
///
/// The reader stamps a record with its position before skipping blank lines,
/// so step over those to reach the first line holding data.
fn record_line(text: &str, position: &csv::Position) -> u64 {
    let mut line = position.line();
    let rest = usize::try_from(position.byte())
        .ok()
        .and_then(|byte| text.as_bytes().get(byte..))
        .unwrap_or_default();
    for &b in rest {
        match b {
            b'\n' => line += 1,
            b'\r' => {}
            _ => break,
        }
    }
    line
}

fn parse_cell(raw: &str, options: &LoaderOptions, line: u64, attribute: &str) -> Result<Option<f64>> {
    if options.is_missing(raw) {
        return Ok(None);
    }
    let value: f64 = raw.trim().parse().map_err(|_| {
        IdealRankError::format(line, format!("attribute '{attribute}': '{}' is not a number", raw.trim()))
    })?;
    if !value.is_finite() {
        return Err(IdealRankError::format(
            line,
            format!("attribute '{attribute}': '{}' is not a finite number", raw.trim()),
        ));
    }
    Ok(Some(value))
}
