//! Navigation: the fixed set of named views and their access rules.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Dashboard,
    Hardware,
    Benchmarks,
    Results,
    Configurations,
}

impl Route {
    /// Sidebar order.
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Hardware,
        Route::Benchmarks,
        Route::Results,
        Route::Configurations,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Hardware => "/hardware",
            Self::Benchmarks => "/benchmarks",
            Self::Results => "/results",
            Self::Configurations => "/configurations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Hardware => "Hardware",
            Self::Benchmarks => "Benchmarks",
            Self::Results => "Results",
            Self::Configurations => "Configurations",
        }
    }

    /// Whether the view is only reachable while logged in. Results is public.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Results)
    }

    /// Look a route up by its view name (`"hardware"`) or path (`"/hardware"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim_matches('/');
        match name {
            "" | "dashboard" => Some(Self::Dashboard),
            "hardware" => Some(Self::Hardware),
            "benchmarks" => Some(Self::Benchmarks),
            "results" => Some(Self::Results),
            "configurations" | "testsystems" => Some(Self::Configurations),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
