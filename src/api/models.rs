//! Typed copies of the REST API's records.
//!
//! The API owns and validates these; the client only keeps transient copies
//! for rendering. Unknown fields are ignored and missing optional fields
//! default, so older or newer API shapes still decode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type Id = i64;

/// A name-only record: every lookup table, plus the RAM type, disk and OS
/// collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpu {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub model: String,
    pub speed: String,
    pub core_count: i64,
    pub serial: Option<String>,
    pub cpu_brand_id: Option<Id>,
    pub cpu_family_id: Option<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gpu {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub vram_size: String,
    pub serial: Option<String>,
    pub gpu_manufacturer_id: Option<Id>,
    pub gpu_brand_id: Option<Id>,
    pub gpu_model_id: Option<Id>,
    pub gpu_vram_type_id: Option<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motherboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub model: String,
    pub serial: Option<String>,
    pub motherboard_manufacturer_id: Option<Id>,
    pub motherboard_chipset_id: Option<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Benchmark {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub benchmark_target_id: Option<Id>,
}

/// A named test system: one of each component plus tuning metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
    pub cpu_id: Option<Id>,
    pub motherboard_id: Option<Id>,
    pub gpu_id: Option<Id>,
    pub disk_id: Option<Id>,
    pub os_id: Option<Id>,
    pub ram_type_id: Option<Id>,
    pub ram_size: String,
    pub cpu_driver_version: Option<String>,
    pub mb_chipset_driver_version: Option<String>,
    pub gpu_driver_version: Option<String>,
    pub cpu_overclock: bool,
    pub cpu_baseclock: Option<i64>,
    pub cpu_currentclock: Option<i64>,
    pub gpu_core_overclock: bool,
    pub gpu_core_baseclock: Option<i64>,
    pub gpu_core_currentclock: Option<i64>,
    pub gpu_vram_overclock: bool,
    pub gpu_vram_baseclock: Option<i64>,
    pub gpu_vram_currentclock: Option<i64>,
    pub notes: Option<String>,
}

/// One recorded score. Older API payloads call the fields `score` and
/// `date`; both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub benchmark_id: Id,
    pub config_id: Id,
    #[serde(alias = "score")]
    pub result: f64,
    #[serde(alias = "date")]
    pub timestamp: Option<String>,
    pub notes: Option<String>,
}

impl BenchmarkResult {
    /// Calendar date of the timestamp (`YYYY-MM-DD...`), if it has one.
    pub fn date(&self) -> Option<NaiveDate> {
        let ts = self.timestamp.as_deref()?;
        NaiveDate::parse_from_str(ts.get(..10)?, "%Y-%m-%d").ok()
    }
}

/// Paired scores of one benchmark across two configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub benchmark_id: Id,
    pub config_1_result: f64,
    pub config_2_result: f64,
    pub percentage_change: f64,
}

/// Records that carry an optional server-assigned id.
pub trait Identified {
    fn id(&self) -> Option<Id>;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> Option<Id> {
                self.id
            }
        })*
    };
}

impl_identified!(NamedItem, Cpu, Gpu, Motherboard, Benchmark, Configuration, BenchmarkResult);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_accepts_legacy_field_names() {
        let r: BenchmarkResult = serde_json::from_str(
            r#"{"id": 3, "benchmark_id": 1, "config_id": 2, "score": 812.5, "date": "2024-03-09T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(r.result, 812.5);
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2024, 3, 9));
    }

    #[test]
    fn result_without_timestamp_has_no_date() {
        let r: BenchmarkResult =
            serde_json::from_str(r#"{"benchmark_id": 1, "config_id": 2, "result": 1.0}"#).unwrap();
        assert_eq!(r.date(), None);
        assert_eq!(r.id, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let cpu: Cpu = serde_json::from_str(
            r#"{"id": 1, "model": "K6-2", "speed": "450MHz", "core_count": 1, "brand": {"id": 1}}"#,
        )
        .unwrap();
        assert_eq!(cpu.model, "K6-2");
        assert_eq!(cpu.cpu_brand_id, None);
    }

    #[test]
    fn new_records_serialize_without_id() {
        let item = NamedItem {
            id: None,
            name: "DDR4".to_string(),
        };
        assert_eq!(serde_json::to_string(&item).unwrap(), r#"{"name":"DDR4"}"#);
    }
}
