//! Form drafts: required-field checks and dependent-field resets.
//!
//! The API validates everything; the client only refuses to submit a draft
//! with an empty required field. Updates start from the stored record, so
//! an edit may carry only the fields it changes.

use serde_json::Value;

use crate::api::Endpoint;
use crate::api::models::{Cpu, Gpu, Id};

/// Fields a draft must fill before it is submitted.
pub fn required_fields(endpoint: Endpoint) -> &'static [&'static str] {
    match endpoint {
        Endpoint::Cpu => &["model", "speed", "core_count", "cpu_brand_id", "cpu_family_id"],
        Endpoint::Gpu => &[
            "gpu_manufacturer_id",
            "vram_size",
            "gpu_brand_id",
            "gpu_model_id",
            "gpu_vram_type_id",
        ],
        Endpoint::Motherboard => &["model", "motherboard_manufacturer_id", "motherboard_chipset_id"],
        Endpoint::Config => &["name", "ram_size"],
        Endpoint::BenchmarkResults => &["benchmark_id", "config_id", "result"],
        _ => &["name"],
    }
}

/// Names of required fields that are absent, null, empty strings or zero ids.
pub fn missing_fields(endpoint: Endpoint, draft: &Value) -> Vec<&'static str> {
    required_fields(endpoint)
        .iter()
        .copied()
        .filter(|field| is_blank(draft.get(field)))
        .collect()
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Overlay `edit` on the `stored` record.
///
/// For CPUs and GPUs the brand goes through [`set_cpu_brand`] /
/// [`set_gpu_brand`] first, so a new brand without a new family or model
/// leaves that field blank for [`missing_fields`] to report.
pub fn merge_edit(endpoint: Endpoint, stored: Value, edit: &Value) -> Result<Value, serde_json::Error> {
    let brand = |key: &str| -> Result<Option<Option<Id>>, serde_json::Error> {
        edit.get(key).cloned().map(serde_json::from_value).transpose()
    };

    let mut merged = match endpoint {
        Endpoint::Cpu => {
            let mut cpu: Cpu = serde_json::from_value(stored)?;
            if let Some(b) = brand("cpu_brand_id")? {
                set_cpu_brand(&mut cpu, b);
            }
            serde_json::to_value(cpu)?
        }
        Endpoint::Gpu => {
            let mut gpu: Gpu = serde_json::from_value(stored)?;
            if let Some(b) = brand("gpu_brand_id")? {
                set_gpu_brand(&mut gpu, b);
            }
            serde_json::to_value(gpu)?
        }
        _ => stored,
    };

    if let (Some(target), Some(fields)) = (merged.as_object_mut(), edit.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(merged)
}

/// Change a CPU draft's brand. A different brand invalidates the family.
pub fn set_cpu_brand(draft: &mut Cpu, brand: Option<Id>) {
    if draft.cpu_brand_id != brand {
        draft.cpu_family_id = None;
    }
    draft.cpu_brand_id = brand;
}

/// Change a GPU draft's brand. A different brand invalidates the model.
pub fn set_gpu_brand(draft: &mut Gpu, brand: Option<Id>) {
    if draft.gpu_brand_id != brand {
        draft.gpu_model_id = None;
    }
    draft.gpu_brand_id = brand;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_each_missing_field() {
        let draft = json!({"model": "Athlon", "speed": "", "core_count": 0, "cpu_brand_id": 1});
        assert_eq!(
            missing_fields(Endpoint::Cpu, &draft),
            vec!["speed", "core_count", "cpu_family_id"]
        );
    }

    #[test]
    fn lookup_tables_need_a_name() {
        assert_eq!(missing_fields(Endpoint::GpuVramType, &json!({})), vec!["name"]);
        assert!(missing_fields(Endpoint::Os, &json!({"name": "MS-DOS 6.22"})).is_empty());
    }

    #[test]
    fn results_accept_negative_scores() {
        let draft = json!({"benchmark_id": 1, "config_id": 2, "result": -3.5});
        assert!(missing_fields(Endpoint::BenchmarkResults, &draft).is_empty());
    }

    #[test]
    fn edits_overlay_the_stored_record() {
        let stored = json!({"id": 3, "name": "DDR3", "notes": "kept"});
        let merged = merge_edit(Endpoint::Ram, stored, &json!({"name": "DDR4"})).unwrap();
        assert_eq!(merged, json!({"id": 3, "name": "DDR4", "notes": "kept"}));
    }

    #[test]
    fn new_cpu_brand_needs_a_new_family() {
        let stored = json!({
            "id": 4, "model": "K6-2", "speed": "450MHz", "core_count": 1,
            "cpu_brand_id": 1, "cpu_family_id": 5
        });

        let merged = merge_edit(Endpoint::Cpu, stored.clone(), &json!({"cpu_brand_id": 2})).unwrap();
        assert_eq!(merged["cpu_family_id"], Value::Null);
        assert_eq!(missing_fields(Endpoint::Cpu, &merged), vec!["cpu_family_id"]);

        let merged = merge_edit(
            Endpoint::Cpu,
            stored.clone(),
            &json!({"cpu_brand_id": 2, "cpu_family_id": 9}),
        )
        .unwrap();
        assert_eq!(merged["cpu_family_id"], 9);
        assert_eq!(merged["model"], "K6-2");

        let merged = merge_edit(Endpoint::Cpu, stored, &json!({"cpu_brand_id": 1})).unwrap();
        assert_eq!(merged["cpu_family_id"], 5);
    }

    #[test]
    fn new_gpu_brand_clears_the_model() {
        let stored = json!({"id": 2, "vram_size": "16MB", "gpu_brand_id": 1, "gpu_model_id": 3});
        let merged = merge_edit(Endpoint::Gpu, stored, &json!({"gpu_brand_id": 7})).unwrap();
        assert_eq!(merged["gpu_brand_id"], 7);
        assert_eq!(merged["gpu_model_id"], Value::Null);
    }

    #[test]
    fn malformed_brand_is_an_error() {
        let stored = json!({"id": 4, "cpu_brand_id": 1});
        assert!(merge_edit(Endpoint::Cpu, stored, &json!({"cpu_brand_id": "two"})).is_err());
    }

    #[test]
    fn changing_brand_resets_dependents() {
        let mut cpu = Cpu {
            cpu_brand_id: Some(1),
            cpu_family_id: Some(4),
            ..Default::default()
        };
        set_cpu_brand(&mut cpu, Some(1));
        assert_eq!(cpu.cpu_family_id, Some(4));
        set_cpu_brand(&mut cpu, Some(2));
        assert_eq!(cpu.cpu_family_id, None);

        let mut gpu = Gpu {
            gpu_brand_id: Some(1),
            gpu_model_id: Some(3),
            ..Default::default()
        };
        set_gpu_brand(&mut gpu, None);
        assert_eq!(gpu.gpu_model_id, None);
        assert_eq!(gpu.gpu_brand_id, None);
    }
}
