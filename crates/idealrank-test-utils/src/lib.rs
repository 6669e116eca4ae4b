//! Shared fixtures for idealrank tests.
//!
//! Fixtures are produced as CSV text so tests go through the real loader.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use pretty_assertions::{assert_eq, assert_ne};

/// Three candidates over three attributes, as used in the worked example.
pub const EXAMPLE_CSV: &str = "candidate,x,y,z\nA,1,2,3\nB,4,5,6\nC,7,8,9\n";

/// Device table shaped like `data/data.csv`, with one blank cell.
pub const DEVICES_CSV: &str = "\
device,price,weight,power
phone,699,0.17,5
tablet,329, ,9
laptop,1299,1.4,65
watch,399,0.03,1
";

/// In-memory table description that renders to CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFixture {
    pub index_name: String,
    pub attributes: Vec<String>,
    pub rows: Vec<(String, Vec<Option<f64>>)>,
}

impl TableFixture {
    pub fn new(attributes: &[&str]) -> Self {
        Self {
            index_name: "candidate".to_string(),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, candidate: &str, values: &[Option<f64>]) -> Self {
        self.rows.push((candidate.to_string(), values.to_vec()));
        self
    }

    /// Missing cells render as blank fields.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.index_name);
        for a in &self.attributes {
            out.push(',');
            out.push_str(a);
        }
        out.push('\n');
        for (candidate, values) in &self.rows {
            out.push_str(candidate);
            for v in values {
                out.push(',');
                if let Some(v) = v {
                    // {:?} keeps every digit so the loader reads back the same f64
                    out.push_str(&format!("{v:?}"));
                }
            }
            out.push('\n');
        }
        out
    }
}

fn attribute_names(n: usize) -> Vec<String> {
    (0..n).map(|j| format!("a{j}")).collect()
}

/// `m` candidates × `n` attributes of values in [0.1, 100), each cell missing
/// with probability `missing_rate`. Column 0 is never missing, so no
/// candidate can sit on both ideals; every other column keeps at least one value.
pub fn random_table(seed: u64, m: usize, n: usize, missing_rate: f64) -> TableFixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows: Vec<(String, Vec<Option<f64>>)> = (0..m)
        .map(|i| {
            let values = (0..n)
                .map(|j| {
                    if j > 0 && rng.gen_bool(missing_rate) {
                        None
                    } else {
                        Some(rng.gen_range(0.1..100.0))
                    }
                })
                .collect();
            (format!("c{i}"), values)
        })
        .collect();

    for j in 0..n {
        if rows.iter().all(|(_, values)| values[j].is_none()) {
            if let Some((_, values)) = rows.first_mut() {
                values[j] = Some(rng.gen_range(0.1..100.0));
            }
        }
    }

    TableFixture { index_name: "candidate".to_string(), attributes: attribute_names(n), rows }
}

/// Table whose candidates are totally ordered by dominance over the benefit
/// attributes: every column increases strictly from row 0 to row m-1, so the
/// last candidate is best on every attribute.
pub fn dominance_chain(seed: u64, m: usize, n: usize) -> TableFixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns: Vec<Vec<f64>> = (0..n)
        .map(|_| {
            let mut acc = rng.gen_range(0.1..10.0);
            (0..m)
                .map(|_| {
                    acc += rng.gen_range(0.5..10.0);
                    acc
                })
                .collect()
        })
        .collect();

    // shuffle row order so the best candidate is not always last in the input
    let mut order: Vec<usize> = (0..m).collect();
    for i in (1..m).rev() {
        order.swap(i, rng.gen_range(0..=i));
    }

    let rows = order
        .iter()
        .map(|&i| (format!("c{i}"), columns.iter().map(|col| Some(col[i])).collect()))
        .collect();

    TableFixture { index_name: "candidate".to_string(), attributes: attribute_names(n), rows }
}

/// Absolute-tolerance float comparison with a readable failure message.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
