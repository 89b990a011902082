//! Hardware catalogue: one tab per component kind, each with its lookups.

use std::str::FromStr;

use serde::Serialize;

use super::lookup::{id_cell, name_of, opt_cell};
use crate::api::models::{Cpu, Gpu, Motherboard, NamedItem};
use crate::api::{ApiClient, ApiError, Endpoint};
use crate::ui::table::Table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareTab {
    #[default]
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Disk,
    Os,
}

impl HardwareTab {
    pub const ALL: [HardwareTab; 6] = [
        HardwareTab::Cpu,
        HardwareTab::Gpu,
        HardwareTab::Motherboard,
        HardwareTab::Ram,
        HardwareTab::Disk,
        HardwareTab::Os,
    ];

    pub fn endpoint(self) -> Endpoint {
        match self {
            Self::Cpu => Endpoint::Cpu,
            Self::Gpu => Endpoint::Gpu,
            Self::Motherboard => Endpoint::Motherboard,
            Self::Ram => Endpoint::Ram,
            Self::Disk => Endpoint::Disk,
            Self::Os => Endpoint::Os,
        }
    }

    /// Lookup tables the tab resolves names from.
    pub fn lookups(self) -> &'static [Endpoint] {
        match self {
            Self::Cpu => &[Endpoint::CpuBrand, Endpoint::CpuFamily],
            Self::Gpu => &[
                Endpoint::GpuManufacturer,
                Endpoint::GpuBrand,
                Endpoint::GpuModel,
                Endpoint::GpuVramType,
            ],
            Self::Motherboard => &[
                Endpoint::MotherboardManufacturer,
                Endpoint::MotherboardChipset,
            ],
            Self::Ram | Self::Disk | Self::Os => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPUs",
            Self::Gpu => "GPUs",
            Self::Motherboard => "Motherboards",
            Self::Ram => "RAM",
            Self::Disk => "Disks",
            Self::Os => "Operating Systems",
        }
    }
}

impl FromStr for HardwareTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" | "cpus" => Ok(Self::Cpu),
            "gpu" | "gpus" => Ok(Self::Gpu),
            "motherboard" | "motherboards" | "mb" => Ok(Self::Motherboard),
            "ram" => Ok(Self::Ram),
            "disk" | "disks" => Ok(Self::Disk),
            "os" | "oses" => Ok(Self::Os),
            other => Err(format!(
                "unknown hardware tab '{other}' (expected cpu, gpu, motherboard, ram, disk, os)"
            )),
        }
    }
}

/// Everything one hardware tab shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum HardwareData {
    Cpu {
        cpus: Vec<Cpu>,
        brands: Vec<NamedItem>,
        families: Vec<NamedItem>,
    },
    Gpu {
        gpus: Vec<Gpu>,
        manufacturers: Vec<NamedItem>,
        brands: Vec<NamedItem>,
        models: Vec<NamedItem>,
        vram_types: Vec<NamedItem>,
    },
    Motherboard {
        motherboards: Vec<Motherboard>,
        manufacturers: Vec<NamedItem>,
        chipsets: Vec<NamedItem>,
    },
    Named {
        kind: HardwareTab,
        items: Vec<NamedItem>,
    },
}

impl Default for HardwareData {
    fn default() -> Self {
        Self::empty(HardwareTab::default())
    }
}

pub fn load(client: &ApiClient, tab: HardwareTab) -> Result<HardwareData, ApiError> {
    let mut endpoints = vec![tab.endpoint()];
    endpoints.extend_from_slice(tab.lookups());
    let mut c = client.fetch_all(&endpoints)?;

    Ok(match tab {
        HardwareTab::Cpu => HardwareData::Cpu {
            cpus: c.take(Endpoint::Cpu)?,
            brands: c.take(Endpoint::CpuBrand)?,
            families: c.take(Endpoint::CpuFamily)?,
        },
        HardwareTab::Gpu => HardwareData::Gpu {
            gpus: c.take(Endpoint::Gpu)?,
            manufacturers: c.take(Endpoint::GpuManufacturer)?,
            brands: c.take(Endpoint::GpuBrand)?,
            models: c.take(Endpoint::GpuModel)?,
            vram_types: c.take(Endpoint::GpuVramType)?,
        },
        HardwareTab::Motherboard => HardwareData::Motherboard {
            motherboards: c.take(Endpoint::Motherboard)?,
            manufacturers: c.take(Endpoint::MotherboardManufacturer)?,
            chipsets: c.take(Endpoint::MotherboardChipset)?,
        },
        kind => HardwareData::Named {
            kind,
            items: c.take(kind.endpoint())?,
        },
    })
}

impl HardwareData {
    pub fn empty(tab: HardwareTab) -> Self {
        match tab {
            HardwareTab::Cpu => Self::Cpu {
                cpus: Vec::new(),
                brands: Vec::new(),
                families: Vec::new(),
            },
            HardwareTab::Gpu => Self::Gpu {
                gpus: Vec::new(),
                manufacturers: Vec::new(),
                brands: Vec::new(),
                models: Vec::new(),
                vram_types: Vec::new(),
            },
            HardwareTab::Motherboard => Self::Motherboard {
                motherboards: Vec::new(),
                manufacturers: Vec::new(),
                chipsets: Vec::new(),
            },
            kind => Self::Named {
                kind,
                items: Vec::new(),
            },
        }
    }

    pub fn tab(&self) -> HardwareTab {
        match self {
            Self::Cpu { .. } => HardwareTab::Cpu,
            Self::Gpu { .. } => HardwareTab::Gpu,
            Self::Motherboard { .. } => HardwareTab::Motherboard,
            Self::Named { kind, .. } => *kind,
        }
    }

    /// Lookup tables that must have at least one entry before a record of
    /// this kind can be created.
    pub fn missing_prerequisites(&self) -> Vec<&'static str> {
        let required: Vec<(&'static str, &Vec<NamedItem>)> = match self {
            Self::Cpu {
                brands, families, ..
            } => vec![("CPU brand", brands), ("CPU family", families)],
            Self::Gpu {
                brands,
                models,
                vram_types,
                ..
            } => vec![("GPU brand", brands), ("GPU model", models), ("VRAM type", vram_types)],
            Self::Motherboard {
                manufacturers,
                chipsets,
                ..
            } => vec![
                ("motherboard manufacturer", manufacturers),
                ("chipset", chipsets),
            ],
            _ => Vec::new(),
        };
        required
            .into_iter()
            .filter(|(_, items)| items.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn table(&self) -> Table {
        match self {
            Self::Cpu {
                cpus,
                brands,
                families,
            } => {
                let mut t = Table::new(["Id", "Brand", "Family", "Model", "Speed", "Cores", "Serial"]);
                for cpu in cpus {
                    t.push(vec![
                        id_cell(cpu.id),
                        name_of(brands, cpu.cpu_brand_id),
                        name_of(families, cpu.cpu_family_id),
                        cpu.model.clone(),
                        cpu.speed.clone(),
                        cpu.core_count.to_string(),
                        opt_cell(cpu.serial.as_deref()),
                    ]);
                }
                t
            }
            Self::Gpu {
                gpus,
                manufacturers,
                brands,
                models,
                vram_types,
            } => {
                let mut t = Table::new([
                    "Id",
                    "Manufacturer",
                    "Brand",
                    "Model",
                    "VRAM",
                    "VRAM Type",
                    "Serial",
                ]);
                for gpu in gpus {
                    t.push(vec![
                        id_cell(gpu.id),
                        name_of(manufacturers, gpu.gpu_manufacturer_id),
                        name_of(brands, gpu.gpu_brand_id),
                        name_of(models, gpu.gpu_model_id),
                        gpu.vram_size.clone(),
                        name_of(vram_types, gpu.gpu_vram_type_id),
                        opt_cell(gpu.serial.as_deref()),
                    ]);
                }
                t
            }
            Self::Motherboard {
                motherboards,
                manufacturers,
                chipsets,
            } => {
                let mut t = Table::new(["Id", "Manufacturer", "Model", "Chipset", "Serial"]);
                for mb in motherboards {
                    t.push(vec![
                        id_cell(mb.id),
                        name_of(manufacturers, mb.motherboard_manufacturer_id),
                        mb.model.clone(),
                        name_of(chipsets, mb.motherboard_chipset_id),
                        opt_cell(mb.serial.as_deref()),
                    ]);
                }
                t
            }
            Self::Named { items, .. } => {
                let mut t = Table::new(["Id", "Name"]);
                for item in items {
                    t.push(vec![id_cell(item.id), item.name.clone()]);
                }
                t
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: i64, name: &str) -> NamedItem {
        NamedItem {
            id: Some(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn tab_parsing_accepts_plurals() {
        assert_eq!("GPUs".parse::<HardwareTab>(), Ok(HardwareTab::Gpu));
        assert_eq!("oses".parse::<HardwareTab>(), Ok(HardwareTab::Os));
        assert!("psu".parse::<HardwareTab>().is_err());
    }

    #[test]
    fn cpu_rows_resolve_lookup_names() {
        let data = HardwareData::Cpu {
            cpus: vec![Cpu {
                id: Some(7),
                model: "K6-2".to_string(),
                speed: "450MHz".to_string(),
                core_count: 1,
                serial: None,
                cpu_brand_id: Some(1),
                cpu_family_id: Some(5),
            }],
            brands: vec![named(1, "AMD")],
            families: vec![named(2, "K7")],
        };
        assert_eq!(
            data.table().rows[0],
            vec!["7", "AMD", "Unknown", "K6-2", "450MHz", "1", "-"]
        );
    }

    #[test]
    fn gpu_needs_brand_model_and_vram_type() {
        let data = HardwareData::Gpu {
            gpus: Vec::new(),
            manufacturers: Vec::new(),
            brands: vec![named(1, "3dfx")],
            models: Vec::new(),
            vram_types: Vec::new(),
        };
        assert_eq!(data.missing_prerequisites(), vec!["GPU model", "VRAM type"]);
    }

    #[test]
    fn cpu_needs_brand_and_family() {
        let data = HardwareData::empty(HardwareTab::Cpu);
        assert_eq!(data.missing_prerequisites(), vec!["CPU brand", "CPU family"]);

        let data = HardwareData::Cpu {
            cpus: Vec::new(),
            brands: vec![named(1, "AMD")],
            families: vec![named(2, "K7")],
        };
        assert!(data.missing_prerequisites().is_empty());
    }

    #[test]
    fn named_tabs_have_no_prerequisites() {
        let data = HardwareData::empty(HardwareTab::Disk);
        assert_eq!(data.tab(), HardwareTab::Disk);
        assert!(data.missing_prerequisites().is_empty());
        assert!(data.table().is_empty());
    }
}
