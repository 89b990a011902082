//! Test systems: configurations with every component resolved to a name.

use serde::Serialize;

use super::lookup::{display_of, id_cell, name_of, opt_cell};
use crate::api::models::{Configuration, Cpu, Gpu, Motherboard, NamedItem};
use crate::api::{ApiClient, ApiError, Endpoint};
use crate::ui::table::Table;

const ENDPOINTS: [Endpoint; 7] = [
    Endpoint::Config,
    Endpoint::Cpu,
    Endpoint::Gpu,
    Endpoint::Motherboard,
    Endpoint::Ram,
    Endpoint::Disk,
    Endpoint::Os,
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigurationsData {
    pub configurations: Vec<Configuration>,
    pub cpus: Vec<Cpu>,
    pub gpus: Vec<Gpu>,
    pub motherboards: Vec<Motherboard>,
    pub ram_types: Vec<NamedItem>,
    pub disks: Vec<NamedItem>,
    pub oses: Vec<NamedItem>,
}

pub fn load(client: &ApiClient) -> Result<ConfigurationsData, ApiError> {
    let mut c = client.fetch_all(&ENDPOINTS)?;
    Ok(ConfigurationsData {
        configurations: c.take(Endpoint::Config)?,
        cpus: c.take(Endpoint::Cpu)?,
        gpus: c.take(Endpoint::Gpu)?,
        motherboards: c.take(Endpoint::Motherboard)?,
        ram_types: c.take(Endpoint::Ram)?,
        disks: c.take(Endpoint::Disk)?,
        oses: c.take(Endpoint::Os)?,
    })
}

impl ConfigurationsData {
    pub fn table(&self) -> Table {
        let mut t = Table::new([
            "Id",
            "Name",
            "CPU",
            "GPU",
            "Motherboard",
            "RAM",
            "Disk",
            "OS",
            "Overclock",
        ]);
        for cfg in &self.configurations {
            let ram = match cfg.ram_size.trim() {
                "" => name_of(&self.ram_types, cfg.ram_type_id),
                size => format!("{} - {size}", name_of(&self.ram_types, cfg.ram_type_id)),
            };
            t.push(vec![
                id_cell(cfg.id),
                cfg.name.clone(),
                display_of(&self.cpus, cfg.cpu_id, |c| c.model.clone()),
                display_of(&self.gpus, cfg.gpu_id, |g| g.vram_size.clone()),
                display_of(&self.motherboards, cfg.motherboard_id, |m| m.model.clone()),
                ram,
                name_of(&self.disks, cfg.disk_id),
                name_of(&self.oses, cfg.os_id),
                overclock_summary(cfg),
            ]);
        }
        t
    }

    /// Multi-line detail block for one configuration.
    pub fn detail(&self, cfg: &Configuration) -> Vec<(String, String)> {
        let clocks = |on: bool, base: Option<i64>, current: Option<i64>| {
            if !on {
                return "stock".to_string();
            }
            let fmt = |v: Option<i64>| v.map(|v| format!("{v} MHz")).unwrap_or_else(|| "?".to_string());
            format!("{} -> {}", fmt(base), fmt(current))
        };
        vec![
            ("Name".to_string(), cfg.name.clone()),
            ("CPU driver".to_string(), opt_cell(cfg.cpu_driver_version.as_deref())),
            (
                "Chipset driver".to_string(),
                opt_cell(cfg.mb_chipset_driver_version.as_deref()),
            ),
            ("GPU driver".to_string(), opt_cell(cfg.gpu_driver_version.as_deref())),
            (
                "CPU clock".to_string(),
                clocks(cfg.cpu_overclock, cfg.cpu_baseclock, cfg.cpu_currentclock),
            ),
            (
                "GPU core clock".to_string(),
                clocks(cfg.gpu_core_overclock, cfg.gpu_core_baseclock, cfg.gpu_core_currentclock),
            ),
            (
                "GPU VRAM clock".to_string(),
                clocks(cfg.gpu_vram_overclock, cfg.gpu_vram_baseclock, cfg.gpu_vram_currentclock),
            ),
            ("Notes".to_string(), opt_cell(cfg.notes.as_deref())),
        ]
    }
}

fn overclock_summary(cfg: &Configuration) -> String {
    let parts: Vec<&str> = [
        (cfg.cpu_overclock, "CPU"),
        (cfg.gpu_core_overclock, "GPU core"),
        (cfg.gpu_vram_overclock, "VRAM"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
