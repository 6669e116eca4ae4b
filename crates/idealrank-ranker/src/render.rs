//! Output sinks for a finished ranking: aligned text table, CSV, JSON.

use std::io::Write;

use idealrank_common::{OutputConfig, OutputFormat, Result};

use crate::rank::Ranking;

const MISSING_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Decimal places for the similarity column
    pub precision: usize,
    /// Leading `rank` column in table and CSV output
    pub rank_column: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { format: OutputFormat::Table, precision: 6, rank_column: false }
    }
}

impl From<&OutputConfig> for RenderOptions {
    fn from(output: &OutputConfig) -> Self {
        Self { format: output.format, precision: output.precision, rank_column: output.rank_column }
    }
}

/// Table and CSV output is the loaded table in ranked order with a trailing
/// `similarity` column. JSON always carries the rank.
pub fn render<W: Write>(ranking: &Ranking, options: &RenderOptions, out: &mut W) -> Result<()> {
    match options.format {
        OutputFormat::Table => write_table(ranking, options, out),
        OutputFormat::Csv => write_csv(ranking, options, out),
        OutputFormat::Json => write_json(ranking, out),
    }
}

fn header(ranking: &Ranking, rank_column: bool) -> Vec<String> {
    let mut cols = Vec::with_capacity(ranking.attributes.len() + 3);
    if rank_column {
        cols.push("rank".to_string());
    }
    cols.push(ranking.index_name.clone());
    cols.extend(ranking.attributes.iter().cloned());
    cols.push("similarity".to_string());
    cols
}

fn cells(ranking: &Ranking, options: &RenderOptions, missing: &str) -> Vec<Vec<String>> {
    ranking
        .rows
        .iter()
        .map(|row| {
            let mut line = Vec::with_capacity(row.values.len() + 3);
            if options.rank_column {
                line.push(row.rank.to_string());
            }
            line.push(row.candidate.clone());
            line.extend(
                row.values
                    .iter()
                    .map(|v| v.map_or_else(|| missing.to_string(), |v| v.to_string())),
            );
            line.push(format!("{:.*}", options.precision, row.similarity));
            line
        })
        .collect()
}

fn write_table<W: Write>(ranking: &Ranking, options: &RenderOptions, out: &mut W) -> Result<()> {
    let header = header(ranking, options.rank_column);
    let body = cells(ranking, options, MISSING_CELL);
    let id_col = usize::from(options.rank_column);

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let fmt_line = |line: &[String]| -> String {
        line.iter()
            .zip(&widths)
            .enumerate()
            .map(|(k, (cell, &w))| {
                // identifier left-aligned, numbers right-aligned
                if k == id_col { format!("{cell:<w$}") } else { format!("{cell:>w$}") }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", fmt_line(&header))?;
    for line in &body {
        writeln!(out, "{}", fmt_line(line))?;
    }
    Ok(())
}

fn write_csv<W: Write>(ranking: &Ranking, options: &RenderOptions, out: &mut W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(ranking, options.rank_column))?;
    for line in cells(ranking, options, "") {
        writer.write_record(line)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(ranking: &Ranking, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, ranking)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::RankedCandidate;
    use pretty_assertions::assert_eq;

    fn ranking() -> Ranking {
        Ranking {
            index_name: "device".to_string(),
            attributes: vec!["x".to_string(), "y".to_string()],
            rows: vec![
                RankedCandidate { rank: 1, candidate: "phone".to_string(), values: vec![Some(1.5), None], similarity: 0.75 },
                RankedCandidate { rank: 2, candidate: "tv".to_string(), values: vec![Some(10.0), Some(2.0)], similarity: 0.25 },
            ],
        }
    }

    fn to_string(options: RenderOptions) -> String {
        let mut buf = Vec::new();
        render(&ranking(), &options, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_alignment_and_missing_marker() {
        let text = to_string(RenderOptions { format: OutputFormat::Table, precision: 3, rank_column: false });
        let expected = [
            "device    x  y  similarity",
            "phone   1.5  -       0.750",
            "tv       10  2       0.250",
        ];
        assert_eq!(text.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_table_with_rank_column() {
        let text = to_string(RenderOptions { format: OutputFormat::Table, precision: 3, rank_column: true });
        let expected = [
            "rank  device    x  y  similarity",
            "   1  phone   1.5  -       0.750",
            "   2  tv       10  2       0.250",
        ];
        assert_eq!(text.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_csv_is_input_table_plus_similarity() {
        let text = to_string(RenderOptions { format: OutputFormat::Csv, precision: 2, rank_column: false });
        assert_eq!(text, "device,x,y,similarity\nphone,1.5,,0.75\ntv,10,2,0.25\n");

        let ranked = to_string(RenderOptions { format: OutputFormat::Csv, precision: 2, rank_column: true });
        assert_eq!(ranked.lines().next(), Some("rank,device,x,y,similarity"));
    }

    #[test]
    fn test_json_uses_null_for_missing() {
        let text = to_string(RenderOptions { format: OutputFormat::Json, ..Default::default() });
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rows"][0]["candidate"], "phone");
        assert!(value["rows"][0]["values"][1].is_null());
        assert_eq!(value["rows"][1]["similarity"], 0.25);
    }
}
