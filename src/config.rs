//! Path search configuration
//!
//! Weights are read from a TOML file:
//!
//! ```toml
//! version = 1
//!
//! [weights]
//! default = 1.0
//! container = 2.0
//!
//! [weights.relations]
//! ownedAttribute = 0.5
//! ```

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::Result;
use crate::graph::{EdgeKind, HopCost, RelationWeights};

pub use types::{PathConfig, WeightsConfig, CONFIG_FORMAT_VERSION};

impl PathConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PathConfig = toml::from_str(&content)?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            relations = config.weights.relations.len(),
            "config_loaded"
        );
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check the format version and every configured cost
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_FORMAT_VERSION {
            bail_invalid!("config version", self.version);
        }
        self.relation_weights().map(|_| ())
    }

    /// Get the cost of an edge through `relation`.
    /// Returns the relation's cost, or the cost of `kind`, or the default.
    pub fn get_relation_cost(&self, relation: &str, kind: EdgeKind) -> f32 {
        if let Some(cost) = self.weights.relations.get(relation) {
            return *cost;
        }
        if let Some(cost) = self.weights.kind_cost(kind) {
            return cost;
        }
        self.weights.default
    }

    /// Set a custom cost for a relation
    pub fn set_relation_cost(&mut self, relation: &str, cost: f32) {
        self.weights.relations.insert(relation.to_string(), cost);
    }

    /// Build the weights used by the search, rejecting invalid costs
    pub fn relation_weights(&self) -> Result<RelationWeights> {
        let default = HopCost::try_new("default", self.weights.default)?;
        let mut weights = RelationWeights::uniform().with_default(default);

        for (kind, cost) in self.weights.kind_costs() {
            let cost = HopCost::try_new(&kind.to_string(), cost)?;
            weights = weights.with_kind_cost(kind, cost);
        }
        for (relation, cost) in &self.weights.relations {
            let cost = HopCost::try_new(relation, *cost)?;
            weights = weights.with_relation_cost(relation.clone(), cost);
        }

        Ok(weights)
    }
}
