//! Typed replies returned by storage servers.
//!
//! Field names serialize lowercased and concatenated (`pciaddr`,
//! `physicalid`) so rendered reports read the same as the server side
//! definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Management feature advertised by a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub category: String,
    pub description: String,
}

impl Feature {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Feature name to `"category <category>, <description>"`
pub type FeatureMap = BTreeMap<String, String>;

pub fn feature_map(features: &[Feature]) -> FeatureMap {
    features
        .iter()
        .map(|f| {
            (
                f.name.clone(),
                format!("category {}, {}", f.category, f.description),
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvmeNamespace {
    pub id: u32,
    pub capacity: u64,
}

/// NVMe SSD controller and its namespaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvmeController {
    pub id: i32,
    pub model: String,
    pub serial: String,
    #[serde(rename = "pciaddr")]
    pub pci_addr: String,
    #[serde(rename = "fwrev")]
    pub fw_rev: String,
    #[serde(default)]
    pub namespace: Vec<NvmeNamespace>,
}

/// Storage class memory module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmModule {
    #[serde(rename = "physicalid")]
    pub physical_id: u32,
    pub channel: u32,
    #[serde(rename = "channelpos")]
    pub channel_pos: u32,
    #[serde(rename = "memctrlr")]
    pub mem_ctrlr: u32,
    pub socket: u32,
    pub capacity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_map_formatting() {
        let fm = feature_map(&[
            Feature::new("burn-name", "nvme", "run workloads on device to test"),
            Feature::new("aaa", "scm", "list modules"),
        ]);
        assert_eq!(fm.len(), 2);
        assert_eq!(
            fm.get("burn-name").map(String::as_str),
            Some("category nvme, run workloads on device to test")
        );
        assert_eq!(fm.keys().next().map(String::as_str), Some("aaa"));
    }

    #[test]
    fn test_controller_field_names() {
        let ctrlr = NvmeController {
            id: 1,
            model: "M".into(),
            serial: "S".into(),
            pci_addr: "0000:81:00.0".into(),
            fw_rev: "1.0".into(),
            namespace: vec![],
        };
        let value = serde_json::to_value(&ctrlr).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert!(keys.iter().any(|k| k.as_str() == "pciaddr"));
        assert!(keys.iter().any(|k| k.as_str() == "fwrev"));
    }
}
