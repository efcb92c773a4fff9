//! Solutions - capacity-bounded reagent mixtures

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::ReagentId;

/// A mixture of reagents with a bounded total volume
///
/// Contents are tracked per reagent; the capacity bound applies to the sum
/// across all reagents. A default solution has zero capacity and is useful
/// as a scratch batch built with unchecked adds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solution {
    contents: AHashMap<ReagentId, f32>,
    /// Maximum total volume this solution can hold (units)
    pub max_volume: f32,
}

impl Solution {
    pub fn new(max_volume: f32) -> Self {
        Self {
            contents: AHashMap::new(),
            max_volume,
        }
    }

    /// Total volume currently held across all reagents
    pub fn total_volume(&self) -> f32 {
        self.contents.values().sum()
    }

    /// Remaining room before the capacity bound
    pub fn available_volume(&self) -> f32 {
        (self.max_volume - self.total_volume()).max(0.0)
    }

    /// Amount of a single reagent currently held (0.0 if absent)
    pub fn quantity(&self, reagent: &ReagentId) -> f32 {
        self.contents.get(reagent).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of distinct reagents held
    pub fn reagent_count(&self) -> usize {
        self.contents.len()
    }

    /// Add a reagent without checking capacity
    ///
    /// Non-positive amounts are ignored, so contents only ever hold
    /// positive quantities.
    pub fn add_reagent(&mut self, reagent: ReagentId, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        *self.contents.entry(reagent).or_insert(0.0) += amount;
    }

    /// Remove up to `amount` of a reagent, returns the amount actually removed
    ///
    /// The entry is dropped once its quantity reaches zero.
    pub fn remove_reagent(&mut self, reagent: &ReagentId, amount: f32) -> f32 {
        let amount = amount.max(0.0);
        let Some(current) = self.contents.get_mut(reagent) else {
            return 0.0;
        };
        let removed = amount.min(*current);
        *current -= removed;
        if *current <= f32::EPSILON {
            self.contents.remove(reagent);
        }
        removed
    }

    /// Whether the whole of `other` fits within this solution's capacity
    ///
    /// All-or-nothing: a batch either fits completely or not at all.
    pub fn can_add_solution(&self, other: &Solution) -> bool {
        self.total_volume() + other.total_volume() <= self.max_volume
    }

    /// Merge the whole of `other` into this solution without checking capacity
    pub fn add_solution(&mut self, other: &Solution) {
        for (reagent, quantity) in other.iter() {
            self.add_reagent(reagent.clone(), quantity);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReagentId, f32)> {
        self.contents.iter().map(|(reagent, &quantity)| (reagent, quantity))
    }
}
