use crate::error::{ModelPathError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Represents the cost of traversing a single edge, or the accumulated
/// cost of a path. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct HopCost(f32);

impl HopCost {
    pub const ZERO: HopCost = HopCost(0.0);
    pub const DEFAULT: HopCost = HopCost(1.0);

    /// Validate a raw cost. `relation` names the weight in the error.
    pub fn try_new(relation: &str, cost: f32) -> Result<Self> {
        if cost.is_finite() && cost >= 0.0 {
            Ok(HopCost(cost))
        } else {
            Err(ModelPathError::InvalidWeight {
                relation: relation.to_string(),
                value: cost,
            })
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Total ordering, usable for heap keys.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Default for HopCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::ops::Add for HopCost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HopCost(self.0 + other.0)
    }
}

impl std::iter::Sum for HopCost {
    fn sum<I: Iterator<Item = HopCost>>(iter: I) -> Self {
        iter.fold(HopCost::ZERO, |acc, cost| acc + cost)
    }
}

impl From<u32> for HopCost {
    fn from(hops: u32) -> Self {
        HopCost(hops as f32)
    }
}

impl std::fmt::Display for HopCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which generator rule produced an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Non-containment reference from source to target
    CrossReference,
    /// Containment from a container to one of its children
    Containment,
    /// From a child up to its container, via the inverse of the containment
    Container,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::CrossReference => write!(f, "cross_reference"),
            EdgeKind::Containment => write!(f, "containment"),
            EdgeKind::Container => write!(f, "container"),
        }
    }
}

/// Counters recorded while a search runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded
    pub settled: usize,
    /// Outgoing edges produced by the generator
    pub edges_generated: usize,
    /// Successful distance improvements
    pub relaxations: usize,
    /// Relaxations that put an already visited node back on the frontier
    pub reopened: usize,
}
