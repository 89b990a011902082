//! Dashboard: catalogue totals and quick actions.

use serde::Serialize;

use crate::api::{ApiClient, ApiError, Endpoint};
use crate::ui::nav::Route;
use crate::ui::table::Table;

const ENDPOINTS: [Endpoint; 5] = [
    Endpoint::Cpu,
    Endpoint::Gpu,
    Endpoint::Benchmark,
    Endpoint::BenchmarkResults,
    Endpoint::Config,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub cpus: usize,
    pub gpus: usize,
    pub benchmarks: usize,
    pub results: usize,
    pub configurations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub name: &'static str,
    pub value: usize,
    pub route: Route,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickAction {
    pub name: &'static str,
    pub route: Route,
    pub description: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        name: "Add CPU",
        route: Route::Hardware,
        description: "Add a new CPU to your hardware catalog",
    },
    QuickAction {
        name: "Add GPU",
        route: Route::Hardware,
        description: "Add a new GPU to your hardware catalog",
    },
    QuickAction {
        name: "Create Benchmark",
        route: Route::Benchmarks,
        description: "Create a new benchmark test",
    },
    QuickAction {
        name: "New Configuration",
        route: Route::Configurations,
        description: "Create a new hardware configuration",
    },
];

pub fn load(client: &ApiClient) -> Result<DashboardStats, ApiError> {
    let collections = client.fetch_all(&ENDPOINTS)?;
    Ok(DashboardStats {
        cpus: collections.len_of(Endpoint::Cpu),
        gpus: collections.len_of(Endpoint::Gpu),
        benchmarks: collections.len_of(Endpoint::Benchmark),
        results: collections.len_of(Endpoint::BenchmarkResults),
        configurations: collections.len_of(Endpoint::Config),
    })
}

impl DashboardStats {
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard { name: "CPUs", value: self.cpus, route: Route::Hardware },
            StatCard { name: "GPUs", value: self.gpus, route: Route::Hardware },
            StatCard { name: "Benchmarks", value: self.benchmarks, route: Route::Benchmarks },
            StatCard { name: "Results", value: self.results, route: Route::Results },
            StatCard {
                name: "Configurations",
                value: self.configurations,
                route: Route::Configurations,
            },
        ]
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(["Collection", "Count", "View"]);
        for card in self.cards() {
            table.push(vec![
                card.name.to_string(),
                card.value.to_string(),
                card.route.path().to_string(),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_follow_stats() {
        let stats = DashboardStats {
            cpus: 3,
            gpus: 2,
            benchmarks: 5,
            results: 40,
            configurations: 4,
        };
        let cards = stats.cards();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[3].name, "Results");
        assert_eq!(cards[3].value, 40);
        assert_eq!(cards[3].route, Route::Results);
        assert_eq!(stats.table().rows[0], vec!["CPUs", "3", "/hardware"]);
    }
}
