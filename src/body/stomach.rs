//! Stomach component - tracks ingested reagents until they digest

use serde::{Deserialize, Serialize};

use crate::core::config::DigestionConfig;
use crate::core::types::ReagentId;

/// One ingested batch of a single reagent, aging toward digestion
///
/// Repeat ingestions of the same reagent stay separate, so one reagent may
/// have several parcels in flight with different ages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReagentParcel {
    pub reagent: ReagentId,
    /// Amount this parcel expects to recover from the stomach solution
    pub quantity: f32,
    /// Simulated seconds since ingestion, advanced by the digestion clock
    pub age: f32,
}

impl ReagentParcel {
    pub fn new(reagent: ReagentId, quantity: f32) -> Self {
        Self {
            reagent,
            quantity,
            age: 0.0,
        }
    }

    /// Advance the age by one digestion step
    pub fn increment(&mut self, interval: f32) {
        self.age += interval;
    }
}

/// Per-entity digestion state
///
/// The stomach banks frame time and digests once per update interval. Its
/// solution lives in the solution registry under [`STOMACH_SOLUTION_NAME`];
/// this component only carries timing state and parcel bookkeeping.
///
/// [`STOMACH_SOLUTION_NAME`]: crate::simulation::digestion::STOMACH_SOLUTION_NAME
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stomach {
    /// Frame time banked since the last digestion step (seconds)
    pub accumulated_time: f32,
    /// Seconds between digestion steps
    pub update_interval: f32,
    /// Minimum parcel age before its contents transfer (strict greater-than)
    pub digestion_delay: f32,
    /// Capacity applied to the stomach solution when the component attaches
    pub initial_max_volume: f32,
    /// Name of the destination solution on the parent body
    pub body_solution_name: String,
    /// Ingested batches in ingestion order
    pub parcels: Vec<ReagentParcel>,
}

impl Stomach {
    pub fn new(config: &DigestionConfig) -> Self {
        Self {
            accumulated_time: 0.0,
            update_interval: config.update_interval,
            digestion_delay: config.digestion_delay,
            initial_max_volume: config.initial_max_volume,
            body_solution_name: config.body_solution_name.clone(),
            parcels: Vec::new(),
        }
    }

    /// Scale or unscale the digestion rate
    ///
    /// Apply and revert calls must come in balanced pairs; overlapping
    /// multiplier sources are not coordinated here.
    pub fn apply_metabolic_multiplier(&mut self, factor: f32, apply: bool) {
        if apply {
            self.update_interval *= factor;
            return;
        }
        self.update_interval /= factor;
        // Reset the accumulator so a shrunk interval cannot owe a backlog
        // of digestion steps
        if self.accumulated_time >= self.update_interval {
            self.accumulated_time = self.update_interval;
        }
    }
}
