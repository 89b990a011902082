//! Synchronous REST client for the benchmark catalogue API.
//!
//! Every request carries the `X-API-Key` header when the client has a key.
//! Failures of any kind (transport, non-2xx status, undecodable body) are
//! one [`ApiError`]; callers log them and render an empty view. There is no
//! retry and no distinction between 4xx and 5xx.

pub mod compare;
pub mod models;

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::ApiConfig;
use crate::utils::url::{build_url, with_query};
use models::{ComparisonEntry, Id};

/// Header carrying the API credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} returned HTTP {code}: {body}")]
    Status { url: String, code: u16, body: String },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Collection endpoints of the REST API, including lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Cpu,
    CpuBrand,
    CpuFamily,
    Gpu,
    GpuManufacturer,
    GpuBrand,
    GpuModel,
    GpuVramType,
    Motherboard,
    MotherboardManufacturer,
    MotherboardChipset,
    Ram,
    Disk,
    Os,
    Config,
    Benchmark,
    BenchmarkTarget,
    BenchmarkResults,
}

impl Endpoint {
    pub const ALL: [Endpoint; 18] = [
        Endpoint::Cpu,
        Endpoint::CpuBrand,
        Endpoint::CpuFamily,
        Endpoint::Gpu,
        Endpoint::GpuManufacturer,
        Endpoint::GpuBrand,
        Endpoint::GpuModel,
        Endpoint::GpuVramType,
        Endpoint::Motherboard,
        Endpoint::MotherboardManufacturer,
        Endpoint::MotherboardChipset,
        Endpoint::Ram,
        Endpoint::Disk,
        Endpoint::Os,
        Endpoint::Config,
        Endpoint::Benchmark,
        Endpoint::BenchmarkTarget,
        Endpoint::BenchmarkResults,
    ];

    /// Path relative to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::CpuBrand => "cpu/brand",
            Self::CpuFamily => "cpu/family",
            Self::Gpu => "gpu",
            Self::GpuManufacturer => "gpu/manufacturer",
            Self::GpuBrand => "gpu/brand",
            Self::GpuModel => "gpu/model",
            Self::GpuVramType => "gpu/vram_type",
            Self::Motherboard => "motherboard",
            Self::MotherboardManufacturer => "motherboard/manufacturer",
            Self::MotherboardChipset => "motherboard/chipset",
            Self::Ram => "ram",
            Self::Disk => "disk",
            Self::Os => "oses",
            Self::Config => "config",
            Self::Benchmark => "benchmark",
            Self::BenchmarkTarget => "benchmark/target",
            Self::BenchmarkResults => "benchmark_results",
        }
    }

    /// Parse an endpoint path such as `gpu/vram_type` or `/api/cpu/`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_matches('/');
        let path = path.strip_prefix("api/").unwrap_or(path);
        Self::ALL.into_iter().find(|e| e.path() == path)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// REST client bound to one base URL and (optionally) one API key.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Build a client from the resolved config. The configured key is not
    /// attached; the session decides whether one is sent (see
    /// [`ApiClient::with_api_key`]).
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        Self {
            agent: builder.build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty()).map(str::to_string);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Collection URL. The API declares its collection routes with a
    /// trailing slash, so one is appended.
    pub fn collection_url(&self, endpoint: Endpoint) -> String {
        format!("{}/", build_url(&self.base_url, endpoint.path()))
    }

    pub fn item_url(&self, endpoint: Endpoint, id: Id) -> String {
        build_url(&self.base_url, &format!("{}/{id}", endpoint.path()))
    }

    /// `GET endpoint/`: the whole collection.
    pub fn list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, ApiError> {
        let url = self.collection_url(endpoint);
        let resp = self.send("GET", &url, None::<&()>)?;
        decode(&url, resp)
    }

    /// `GET endpoint/{id}`.
    pub fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, id: Id) -> Result<T, ApiError> {
        let url = self.item_url(endpoint, id);
        let resp = self.send("GET", &url, None::<&()>)?;
        decode(&url, resp)
    }

    /// `POST endpoint/`: create a record, returning the stored copy.
    pub fn create<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.collection_url(endpoint);
        let resp = self.send("POST", &url, Some(body))?;
        decode(&url, resp)
    }

    /// `PUT endpoint/{id}`: replace a record, returning the stored copy.
    pub fn update<B, T>(&self, endpoint: Endpoint, id: Id, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.item_url(endpoint, id);
        let resp = self.send("PUT", &url, Some(body))?;
        decode(&url, resp)
    }

    /// `DELETE endpoint/{id}`.
    pub fn delete(&self, endpoint: Endpoint, id: Id) -> Result<(), ApiError> {
        let url = self.item_url(endpoint, id);
        self.send("DELETE", &url, None::<&()>)?;
        Ok(())
    }

    /// `GET benchmark_results/compare/configs`: paired scores per benchmark,
    /// ordered by benchmark id.
    pub fn compare_configs(&self, config_1: Id, config_2: Id) -> Result<Vec<ComparisonEntry>, ApiError> {
        let url = with_query(
            &build_url(&self.base_url, "benchmark_results/compare/configs"),
            &[
                ("config_id_1", config_1.to_string()),
                ("config_id_2", config_2.to_string()),
            ],
        );
        let resp = self.send("GET", &url, None::<&()>)?;
        let by_benchmark: HashMap<String, ComparisonEntry> = decode(&url, resp)?;
        let mut entries: Vec<ComparisonEntry> = by_benchmark.into_values().collect();
        entries.sort_by_key(|e| e.benchmark_id);
        Ok(entries)
    }

    /// Fetch several collections concurrently, all-or-nothing.
    pub fn fetch_all(&self, endpoints: &[Endpoint]) -> Result<Collections, ApiError> {
        let tasks: Vec<_> = endpoints
            .iter()
            .map(|&endpoint| move || self.list::<serde_json::Value>(endpoint).map(|v| (endpoint, v)))
            .collect();
        let lists = join_all(tasks)?;
        Ok(Collections {
            lists: lists.into_iter().collect(),
        })
    }

    fn send<B: Serialize + ?Sized>(
        &self,
        method: &str,
        url: &str,
        body: Option<&B>,
    ) -> Result<ureq::Response, ApiError> {
        tracing::debug!(method, url, "api request");
        let mut request = self.agent.request(method, url);
        if let Some(key) = &self.api_key {
            request = request.set(API_KEY_HEADER, key);
        }

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        result.map_err(|e| match e {
            ureq::Error::Status(code, resp) => ApiError::Status {
                url: url.to_string(),
                code,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => ApiError::Transport {
                url: url.to_string(),
                message: t.to_string(),
            },
        })
    }
}

fn decode<T: DeserializeOwned>(url: &str, resp: ureq::Response) -> Result<T, ApiError> {
    resp.into_json().map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Parallel fetch
// ---------------------------------------------------------------------------

/// Run every task on its own scoped thread and wait for all of them.
///
/// Succeeds only if every task succeeds; otherwise the error of the first
/// failing task (in input order) is returned and all other results are
/// discarded. Output order matches input order.
pub fn join_all<T, F>(tasks: Vec<F>) -> Result<Vec<T>, ApiError>
where
    T: Send,
    F: FnOnce() -> Result<T, ApiError> + Send,
{
    std::thread::scope(|scope| {
        let handles: Vec<_> = tasks.into_iter().map(|task| scope.spawn(task)).collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(ApiError::Transport {
                        url: String::new(),
                        message: "request thread panicked".to_string(),
                    })
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    })
}

/// Raw collections returned by [`ApiClient::fetch_all`], decoded on demand.
#[derive(Debug, Default)]
pub struct Collections {
    lists: HashMap<Endpoint, Vec<serde_json::Value>>,
}

impl Collections {
    /// Decode and remove one collection. A collection that was not fetched
    /// decodes as empty.
    pub fn take<T: DeserializeOwned>(&mut self, endpoint: Endpoint) -> Result<Vec<T>, ApiError> {
        let values = self.lists.remove(&endpoint).unwrap_or_default();
        values
            .into_iter()
            .map(|v| {
                serde_json::from_value(v).map_err(|e| ApiError::Decode {
                    url: endpoint.path().to_string(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    pub fn len_of(&self, endpoint: Endpoint) -> usize {
        self.lists.get(&endpoint).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::from_config(&ApiConfig {
            base_url: base.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn urls_follow_api_route_shapes() {
        let c = client("http://localhost:12345/api/");
        assert_eq!(c.collection_url(Endpoint::Cpu), "http://localhost:12345/api/cpu/");
        assert_eq!(
            c.collection_url(Endpoint::GpuVramType),
            "http://localhost:12345/api/gpu/vram_type/"
        );
        assert_eq!(c.item_url(Endpoint::Os, 7), "http://localhost:12345/api/oses/7");
    }

    #[test]
    fn endpoint_paths_round_trip() {
        for e in Endpoint::ALL {
            assert_eq!(Endpoint::from_path(e.path()), Some(e));
        }
        assert_eq!(Endpoint::from_path("/api/benchmark_results/"), Some(Endpoint::BenchmarkResults));
        assert_eq!(Endpoint::from_path("users"), None);
    }

    #[test]
    fn empty_api_key_is_not_attached() {
        let c = client("/api").with_api_key(Some(""));
        assert_eq!(c.api_key(), None);
        let c = c.with_api_key(Some("k"));
        assert_eq!(c.api_key(), Some("k"));
    }

    #[test]
    fn join_all_keeps_input_order() {
        let tasks: Vec<_> = (0..8).map(|i| move || Ok::<_, ApiError>(i * 2)).collect();
        assert_eq!(join_all(tasks).unwrap(), vec![0, 2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn join_all_fails_as_a_whole() {
        let tasks: Vec<Box<dyn FnOnce() -> Result<u32, ApiError> + Send>> = vec![
            Box::new(|| Ok(1)),
            Box::new(|| {
                Err(ApiError::Transport {
                    url: "x".to_string(),
                    message: "refused".to_string(),
                })
            }),
            Box::new(|| Ok(3)),
        ];
        let err = join_all(tasks).unwrap_err();
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn collections_decode_missing_as_empty() {
        let mut c = Collections::default();
        let cpus: Vec<models::Cpu> = c.take(Endpoint::Cpu).unwrap();
        assert!(cpus.is_empty());
    }
}
