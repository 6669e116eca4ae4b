//! Command-line arguments and their merge onto a run config file.
//! Flags win over file values; the file wins over built-in defaults.

use std::path::PathBuf;

use clap::Parser;
use idealrank_common::{OutputFormat, RunConfig};

#[cfg(test)]
mod tests;

/// Rank candidates by closeness to the ideal solution (TOPSIS)
#[derive(Debug, Parser)]
#[command(name = "idealrank")]
#[command(version)]
#[command(about = "Rank candidates by similarity to the ideal solution (TOPSIS)")]
pub struct Cli {
    /// Run config file (.toml, .yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input table (CSV with a header row)
    #[arg(short, long, env = "IDEALRANK_INPUT")]
    pub input: Option<PathBuf>,

    /// Write the ranking here instead of stdout
    #[arg(short, long, env = "IDEALRANK_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Attribute weights in column order, e.g. 0.2,0.3,0.5
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub weights: Option<Vec<f64>>,

    /// 0-based positions of cost attributes (lower is better), e.g. 0,2
    #[arg(long, value_delimiter = ',')]
    pub costs: Option<Vec<usize>>,

    /// Column holding the candidate identifier (default: first column)
    #[arg(long)]
    pub index_column: Option<String>,

    /// Token marking a missing cell; blank cells are always missing
    #[arg(long)]
    pub missing: Option<String>,

    /// Field delimiter of the input table
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Output format: table, csv or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Decimal places for similarity scores
    #[arg(long)]
    pub precision: Option<usize>,

    /// Print only the best N candidates
    #[arg(long)]
    pub top: Option<usize>,

    /// Prefix each row with its rank
    #[arg(long)]
    pub rank: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Load the config file (if any), apply flag overrides, and validate.
    pub fn resolve(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        self.apply_overrides(&mut config);

        if config.input.path.is_none() {
            anyhow::bail!(
                "No input table given. Pass --input, set IDEALRANK_INPUT, or set input.path in the config file."
            );
        }
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(ref input) = self.input {
            config.input.path = Some(input.clone());
        }
        if let Some(ref index_column) = self.index_column {
            config.input.index_column = Some(index_column.clone());
        }
        if let Some(ref missing) = self.missing {
            config.input.missing_token = missing.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = delimiter;
        }
        if let Some(ref weights) = self.weights {
            config.criteria.weights = weights.clone();
        }
        if let Some(ref costs) = self.costs {
            config.criteria.costs = costs.clone();
        }
        if let Some(ref output) = self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(precision) = self.precision {
            config.output.precision = precision;
        }
        if let Some(top) = self.top {
            config.output.top_n = Some(top);
        }
        if self.rank {
            config.output.rank_column = true;
        }
    }
}
