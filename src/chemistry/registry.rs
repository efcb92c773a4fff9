//! Per-entity solution storage
//!
//! Entities own named solutions ("stomach", "bloodstream", ...). Components
//! reference them by `(owner, name)` lookup and never hold the storage
//! themselves, so two organs of one body can address the same destination.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::chemistry::solution::Solution;
use crate::core::types::{EntityId, ReagentId};

/// Registry of all named solutions, keyed by owning entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolutionRegistry {
    solutions: AHashMap<EntityId, AHashMap<String, Solution>>,
}

impl SolutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or lazily create a named solution for an entity
    ///
    /// Idempotent: an existing solution is returned untouched, contents
    /// included.
    pub fn ensure_solution(&mut self, owner: EntityId, name: &str) -> &mut Solution {
        self.solutions
            .entry(owner)
            .or_default()
            .entry(name.to_string())
            .or_default()
    }

    pub fn try_get_solution(&self, owner: EntityId, name: &str) -> Option<&Solution> {
        self.solutions.get(&owner)?.get(name)
    }

    pub fn try_get_solution_mut(&mut self, owner: EntityId, name: &str) -> Option<&mut Solution> {
        self.solutions.get_mut(&owner)?.get_mut(name)
    }

    /// Remove a reagent amount from a named solution
    ///
    /// Returns true only if the full requested amount was removed.
    pub fn try_remove_reagent(
        &mut self,
        owner: EntityId,
        name: &str,
        reagent: &ReagentId,
        amount: f32,
    ) -> bool {
        let Some(solution) = self.try_get_solution_mut(owner, name) else {
            return false;
        };
        solution.remove_reagent(reagent, amount) >= amount
    }

    /// Add a whole batch to a named solution, enforcing its capacity
    ///
    /// The batch is applied atomically: it either fits completely or the
    /// destination is left untouched and false is returned.
    pub fn try_add_solution(&mut self, owner: EntityId, name: &str, batch: &Solution) -> bool {
        let Some(solution) = self.try_get_solution_mut(owner, name) else {
            return false;
        };
        if !solution.can_add_solution(batch) {
            return false;
        }
        solution.add_solution(batch);
        true
    }

    /// Drop every solution owned by an entity (entity despawn)
    pub fn remove_entity(&mut self, owner: EntityId) {
        self.solutions.remove(&owner);
    }
}
