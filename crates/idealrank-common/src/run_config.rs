//! Run configuration for a ranking job.
//!
//! Users can describe a job in TOML, YAML or JSON; command-line flags
//! override whatever the file provides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Complete ranking job configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Where and how to read the decision table
    #[serde(default)]
    pub input: InputConfig,

    /// Attribute weights and cost directions
    #[serde(default)]
    pub criteria: CriteriaConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the delimited table
    pub path: Option<PathBuf>,

    /// Column holding the candidate identifier; first column when unset
    pub index_column: Option<String>,

    /// Token marking a missing cell (compared after trimming)
    #[serde(default = "default_missing_token")]
    pub missing_token: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_missing_token() -> String { " ".to_string() }
fn default_delimiter() -> char { ',' }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            index_column: None,
            missing_token: default_missing_token(),
            delimiter: default_delimiter(),
        }
    }
}

// ── Criteria ──────────────────────────────────────────────────────────────────

/// Per-attribute weights plus the 0-based positions of cost attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaConfig {
    #[serde(default)]
    pub weights: Vec<f64>,

    #[serde(default)]
    pub costs: Vec<usize>,
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected table, csv or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file; stdout when unset
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for printed floats
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Keep only the best N candidates
    pub top_n: Option<usize>,

    /// Prefix each row with its 1-based rank
    #[serde(default)]
    pub rank_column: bool,
}

fn default_precision() -> usize { 6 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: OutputFormat::default(),
            precision: default_precision(),
            top_n: None,
            rank_column: false,
        }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl RunConfig {
    /// Load from a file, picking the parser by extension (toml, yaml/yml, json).
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let config = match ext.as_str() {
            "toml" => Self::from_toml(path),
            "yaml" | "yml" => Self::from_yaml(path),
            "json" => Self::from_json(path),
            _ => anyhow::bail!(
                "Unsupported config extension for {}: expected .toml, .yaml, .yml or .json",
                path.display()
            ),
        }
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

        tracing::debug!("Loaded run config from {}", path.display());
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Reject settings the loader or renderer cannot honour.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.input.delimiter.is_ascii() {
            return Err(crate::IdealRankError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.input.delimiter
            )));
        }
        if self.output.precision > 17 {
            return Err(crate::IdealRankError::Config(format!(
                "precision must be at most 17, got {}",
                self.output.precision
            )));
        }
        if self.criteria.weights.is_empty() {
            return Err(crate::IdealRankError::Config(
                "no attribute weights supplied (set criteria.weights or pass --weights)".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunConfig {
        RunConfig {
            input: InputConfig {
                path: Some(PathBuf::from("data/data.csv")),
                index_column: Some("device".to_string()),
                ..Default::default()
            },
            criteria: CriteriaConfig {
                weights: vec![0.2, 0.3, 0.5],
                costs: vec![0, 1, 2],
            },
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.input.missing_token, " ");
        assert_eq!(config.input.delimiter, ',');
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.precision, 6);
        assert!(!config.output.rank_column);
        assert!(config.criteria.weights.is_empty());
    }

    #[test]
    fn test_toml_sections_fill_defaults() {
        let parsed: RunConfig = toml::from_str(
            r#"
            [criteria]
            weights = [0.5, 0.5]
            costs = [1]

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.criteria.weights, vec![0.5, 0.5]);
        assert_eq!(parsed.criteria.costs, vec![1]);
        assert_eq!(parsed.output.format, OutputFormat::Json);
        assert_eq!(parsed.output.precision, 6);
        assert_eq!(parsed.input.missing_token, " ");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = sample();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: RunConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("run.yaml");
        std::fs::write(&yaml_path, serde_yaml::to_string(&sample()).unwrap()).unwrap();
        assert_eq!(RunConfig::load(&yaml_path).unwrap(), sample());

        let json_path = dir.path().join("run.json");
        std::fs::write(&json_path, r#"{"criteria": {"weights": [1.0]}}"#).unwrap();
        assert_eq!(RunConfig::load(&json_path).unwrap().criteria.weights, vec![1.0]);

        let bad_path = dir.path().join("run.ini");
        std::fs::write(&bad_path, "").unwrap();
        assert!(RunConfig::load(&bad_path).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut no_weights = sample();
        no_weights.criteria.weights.clear();
        assert!(matches!(no_weights.validate(), Err(crate::IdealRankError::Config(_))));

        let mut wide = sample();
        wide.input.delimiter = '→';
        assert!(wide.validate().is_err());

        let mut precise = sample();
        precise.output.precision = 40;
        assert!(precise.validate().is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(" table ".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
