//! Benchmark results: filtering, chart rows and configuration comparison.
//! This is the one public view.

use chrono::NaiveDate;
use serde::Serialize;

use super::lookup::{display_of, id_cell, opt_cell};
use crate::api::compare::compare_results;
use crate::api::models::{Benchmark, BenchmarkResult, ComparisonEntry, Configuration, Id};
use crate::api::{ApiClient, ApiError, Endpoint};
use crate::ui::table::Table;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultsData {
    pub results: Vec<BenchmarkResult>,
    pub benchmarks: Vec<Benchmark>,
    pub configurations: Vec<Configuration>,
}

/// Result filters. Unset fields match everything; the date range is
/// inclusive and compared on the calendar date of the timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFilter {
    pub benchmark: Option<Id>,
    pub configuration: Option<Id>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ResultFilter {
    /// Whether `r` passes every set filter.
    ///
    /// With either date bound set, a result without a readable timestamp
    /// is excluded: an undated score cannot be placed inside a range.
    pub fn matches(&self, r: &BenchmarkResult) -> bool {
        if self.benchmark.is_some_and(|b| r.benchmark_id != b) {
            return false;
        }
        if self.configuration.is_some_and(|c| r.config_id != c) {
            return false;
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = r.date() else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }
}

/// Parse a `YYYY-MM-DD` filter bound.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// One bar of the performance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub name: String,
    pub score: f64,
    pub date: String,
    pub benchmark: String,
    pub configuration: String,
}

pub fn load(client: &ApiClient) -> Result<ResultsData, ApiError> {
    let mut c = client.fetch_all(&[
        Endpoint::BenchmarkResults,
        Endpoint::Benchmark,
        Endpoint::Config,
    ])?;
    Ok(ResultsData {
        results: c.take(Endpoint::BenchmarkResults)?,
        benchmarks: c.take(Endpoint::Benchmark)?,
        configurations: c.take(Endpoint::Config)?,
    })
}

impl ResultsData {
    pub fn filtered(&self, filter: &ResultFilter) -> Vec<&BenchmarkResult> {
        self.results.iter().filter(|r| filter.matches(r)).collect()
    }

    fn benchmark_name(&self, id: Id) -> String {
        display_of(&self.benchmarks, Some(id), |b| b.name.clone())
    }

    fn configuration_name(&self, id: Id) -> String {
        display_of(&self.configurations, Some(id), |c| c.name.clone())
    }

    pub fn chart(&self, filter: &ResultFilter) -> Vec<ChartRow> {
        self.filtered(filter)
            .into_iter()
            .map(|r| {
                let benchmark = self.benchmark_name(r.benchmark_id);
                let configuration = self.configuration_name(r.config_id);
                ChartRow {
                    name: format!("{benchmark} - {configuration}"),
                    score: r.result,
                    date: r.date().map(|d| d.to_string()).unwrap_or_default(),
                    benchmark,
                    configuration,
                }
            })
            .collect()
    }

    pub fn table(&self, filter: &ResultFilter) -> Table {
        let mut t = Table::new(["Id", "Benchmark", "Configuration", "Score", "Date", "Notes"]);
        for r in self.filtered(filter) {
            t.push(vec![
                id_cell(r.id),
                self.benchmark_name(r.benchmark_id),
                self.configuration_name(r.config_id),
                format_score(r.result),
                opt_cell(r.timestamp.as_deref()),
                opt_cell(r.notes.as_deref()),
            ]);
        }
        t
    }

    /// Compare two configurations over the fetched results.
    pub fn compare(&self, config_1: Id, config_2: Id) -> Vec<ComparisonEntry> {
        compare_results(&self.results, config_1, config_2)
    }

    pub fn comparison_table(&self, entries: &[ComparisonEntry], config_1: Id, config_2: Id) -> Table {
        let mut t = Table::new([
            "Benchmark".to_string(),
            self.configuration_name(config_1),
            self.configuration_name(config_2),
            "Change".to_string(),
        ]);
        for e in entries {
            t.push(vec![
                self.benchmark_name(e.benchmark_id),
                format_score(e.config_1_result),
                format_score(e.config_2_result),
                format!("{:+.2}%", e.percentage_change),
            ]);
        }
        t
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ResultsData {
        let result = |id, benchmark_id, config_id, score, ts: &str| BenchmarkResult {
            id: Some(id),
            benchmark_id,
            config_id,
            result: score,
            timestamp: Some(ts.to_string()),
            notes: None,
        };
        ResultsData {
            results: vec![
                result(1, 1, 10, 100.0, "2024-01-05T12:00:00"),
                result(2, 1, 20, 125.0, "2024-02-10"),
                result(3, 2, 10, 9.5, "2024-03-01 08:00"),
            ],
            benchmarks: vec![
                Benchmark {
                    id: Some(1),
                    name: "Quake III".to_string(),
                    benchmark_target_id: None,
                },
                Benchmark {
                    id: Some(2),
                    name: "SuperPi".to_string(),
                    benchmark_target_id: None,
                },
            ],
            configurations: vec![
                Configuration {
                    id: Some(10),
                    name: "Stock".to_string(),
                    ..Default::default()
                },
                Configuration {
                    id: Some(20),
                    name: "OC".to_string(),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(data().filtered(&ResultFilter::default()).len(), 3);
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = ResultFilter {
            date_from: Some(parse_date("2024-01-05").unwrap()),
            date_to: Some(parse_date("2024-02-10").unwrap()),
            ..Default::default()
        };
        let ids: Vec<_> = data().filtered(&filter).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn undated_results_only_match_without_a_date_range() {
        let mut data = data();
        data.results[1].timestamp = None;
        assert_eq!(data.filtered(&ResultFilter::default()).len(), 3);

        let filter = ResultFilter {
            date_from: Some(parse_date("2024-01-01").unwrap()),
            ..Default::default()
        };
        let ids: Vec<_> = data.filtered(&filter).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }

    #[test]
    fn chart_rows_name_benchmark_and_configuration() {
        let filter = ResultFilter {
            configuration: Some(20),
            ..Default::default()
        };
        let chart = data().chart(&filter);
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].name, "Quake III - OC");
        assert_eq!(chart[0].date, "2024-02-10");
    }

    #[test]
    fn comparison_table_formats_change() {
        let d = data();
        let entries = d.compare(10, 20);
        let t = d.comparison_table(&entries, 10, 20);
        assert_eq!(t.headers, vec!["Benchmark", "Stock", "OC", "Change"]);
        assert_eq!(t.rows[0], vec!["Quake III", "100", "125", "+25.00%"]);
    }

    #[test]
    fn bad_dates_are_rejected() {
        assert!(parse_date("05/01/2024").is_err());
    }
}
