//! Configuration type definitions

use crate::graph::EdgeKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Path search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Edge weights
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Edge weight configuration.
///
/// Per-relation costs win over per-kind costs, which win over `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_cost")]
    pub default: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containment: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_reference: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<f32>,

    /// Costs keyed by relation name
    #[serde(default)]
    pub relations: HashMap<String, f32>,
}

impl WeightsConfig {
    pub fn kind_cost(&self, kind: EdgeKind) -> Option<f32> {
        match kind {
            EdgeKind::Containment => self.containment,
            EdgeKind::CrossReference => self.cross_reference,
            EdgeKind::Container => self.container,
        }
    }

    /// Configured per-kind costs
    pub fn kind_costs(&self) -> impl Iterator<Item = (EdgeKind, f32)> + '_ {
        [
            EdgeKind::CrossReference,
            EdgeKind::Containment,
            EdgeKind::Container,
        ]
        .into_iter()
        .filter_map(|kind| self.kind_cost(kind).map(|cost| (kind, cost)))
    }
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_cost() -> f32 {
    1.0
}

impl Default for WeightsConfig {
    fn default() -> Self {
        WeightsConfig {
            default: default_cost(),
            containment: None,
            cross_reference: None,
            container: None,
            relations: HashMap::new(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            version: CONFIG_FORMAT_VERSION,
            weights: WeightsConfig::default(),
        }
    }
}
