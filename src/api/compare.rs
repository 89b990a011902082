//! Score comparison between two configurations.
//!
//! Mirrors the API's `benchmark_results/compare/configs` computation so a
//! comparison can also be done over already-fetched results.

use std::collections::BTreeMap;

use super::models::{BenchmarkResult, ComparisonEntry, Id};

/// Percent change from `old` to `new`, rounded to two decimals.
/// Zero when `old` is zero.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    round2((new - old) / old * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pair the results of `config_1` and `config_2` by benchmark.
///
/// For each result of `config_1`, the first result of `config_2` on the
/// same benchmark is its partner. When `config_1` has several results for a
/// benchmark, the last one wins. Entries are ordered by benchmark id.
pub fn compare_results(results: &[BenchmarkResult], config_1: Id, config_2: Id) -> Vec<ComparisonEntry> {
    let second: Vec<&BenchmarkResult> = results.iter().filter(|r| r.config_id == config_2).collect();

    let mut paired: BTreeMap<Id, ComparisonEntry> = BTreeMap::new();
    for r1 in results.iter().filter(|r| r.config_id == config_1) {
        let Some(r2) = second.iter().find(|r| r.benchmark_id == r1.benchmark_id) else {
            continue;
        };
        paired.insert(
            r1.benchmark_id,
            ComparisonEntry {
                benchmark_id: r1.benchmark_id,
                config_1_result: r1.result,
                config_2_result: r2.result,
                percentage_change: percentage_change(r1.result, r2.result),
            },
        );
    }

    paired.into_values().collect()
}
