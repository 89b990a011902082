//! Benchmark definitions and their targets.

use serde::Serialize;

use super::lookup::{id_cell, name_of};
use crate::api::models::{Benchmark, NamedItem};
use crate::api::{ApiClient, ApiError, Endpoint};
use crate::ui::table::Table;

#[derive(Debug, Clone, Default, Serialize)]
pub struct BenchmarksData {
    pub benchmarks: Vec<Benchmark>,
    pub targets: Vec<NamedItem>,
}

pub fn load(client: &ApiClient) -> Result<BenchmarksData, ApiError> {
    let mut c = client.fetch_all(&[Endpoint::Benchmark, Endpoint::BenchmarkTarget])?;
    Ok(BenchmarksData {
        benchmarks: c.take(Endpoint::Benchmark)?,
        targets: c.take(Endpoint::BenchmarkTarget)?,
    })
}

impl BenchmarksData {
    pub fn table(&self) -> Table {
        let mut t = Table::new(["Id", "Name", "Target"]);
        for b in &self.benchmarks {
            let target = match b.benchmark_target_id {
                Some(_) => name_of(&self.targets, b.benchmark_target_id),
                None => "-".to_string(),
            };
            t.push(vec![id_cell(b.id), b.name.clone(), target]);
        }
        t
    }

    pub fn targets_table(&self) -> Table {
        let mut t = Table::new(["Id", "Target", "Benchmarks"]);
        for target in &self.targets {
            let count = self
                .benchmarks
                .iter()
                .filter(|b| b.benchmark_target_id.is_some() && b.benchmark_target_id == target.id)
                .count();
            t.push(vec![id_cell(target.id), target.name.clone(), count.to_string()]);
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> BenchmarksData {
        BenchmarksData {
            benchmarks: vec![
                Benchmark {
                    id: Some(1),
                    name: "3DMark 2001".to_string(),
                    benchmark_target_id: Some(10),
                },
                Benchmark {
                    id: Some(2),
                    name: "SuperPi 1M".to_string(),
                    benchmark_target_id: None,
                },
            ],
            targets: vec![NamedItem {
                id: Some(10),
                name: "GPU".to_string(),
            }],
        }
    }

    #[test]
    fn untargeted_benchmarks_show_a_dash() {
        let t = data().table();
        assert_eq!(t.rows[0], vec!["1", "3DMark 2001", "GPU"]);
        assert_eq!(t.rows[1], vec!["2", "SuperPi 1M", "-"]);
    }

    #[test]
    fn targets_count_their_benchmarks() {
        assert_eq!(data().targets_table().rows[0], vec!["10", "GPU", "1"]);
    }
}
