use super::*;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("idealrank").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_flags_only() {
    let cli = parse(&["-i", "data.csv", "-w", "0.2,0.3,0.5", "--costs", "0,2", "-f", "csv"]);
    let config = cli.resolve().unwrap();
    assert_eq!(config.input.path, Some(PathBuf::from("data.csv")));
    assert_eq!(config.criteria.weights, vec![0.2, 0.3, 0.5]);
    assert_eq!(config.criteria.costs, vec![0, 2]);
    assert_eq!(config.output.format, OutputFormat::Csv);
    assert_eq!(config.output.precision, 6);
    assert!(!config.output.rank_column);
}

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.toml");
    std::fs::write(
        &path,
        r#"
        [input]
        path = "from_file.csv"
        index_column = "device"

        [criteria]
        weights = [0.2, 0.3, 0.5]
        costs = [0, 1, 2]

        [output]
        precision = 3
        "#,
    )
    .unwrap();

    let config_arg = path.to_string_lossy().into_owned();
    let cli = parse(&["-c", &config_arg, "--costs", "1", "--top", "2", "--rank"]);
    let config = cli.resolve().unwrap();
    assert_eq!(config.input.path, Some(PathBuf::from("from_file.csv")));
    assert_eq!(config.input.index_column.as_deref(), Some("device"));
    assert_eq!(config.criteria.weights, vec![0.2, 0.3, 0.5]);
    assert_eq!(config.criteria.costs, vec![1]);
    assert_eq!(config.output.precision, 3);
    assert_eq!(config.output.top_n, Some(2));
    assert!(config.output.rank_column);
}

#[test]
fn test_missing_weights_rejected() {
    let cli = parse(&["-i", "data.csv"]);
    assert!(cli.resolve().is_err());
}

#[test]
fn test_missing_input_rejected() {
    let cli = Cli {
        input: None,
        ..parse(&["-w", "1.0"])
    };
    let err = cli.resolve().unwrap_err();
    assert!(err.to_string().contains("No input table"), "{err}");
}

#[test]
fn test_bad_format_is_a_parse_error() {
    let result = Cli::try_parse_from(["idealrank", "-i", "x.csv", "-w", "1", "-f", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_verbosity_counts() {
    assert_eq!(parse(&["-vv"]).verbose, 2);
}
