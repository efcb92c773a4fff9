//! Digestion system - moves aged reagents from stomachs into their bodies
//!
//! Each stomach banks frame time and fires one digestion step per update
//! interval. A step ages every tracked parcel by one interval and drains the
//! parcels that have aged past the digestion delay out of the stomach
//! solution into the parent body's solution, as one combined batch.

use crate::body::stomach::{ReagentParcel, Stomach};
use crate::chemistry::solution::Solution;
use crate::core::types::{EntityId, ReagentId, Tick};
use crate::ecs::world::World;

/// Name of the solution every stomach digests from
pub const STOMACH_SOLUTION_NAME: &str = "stomach";

/// Events generated during a digestion tick
///
/// Returned by the system for the host's action log; carrying them is free
/// of side effects and callers may drop them.
#[derive(Debug, Clone)]
pub enum DigestionEvent {
    /// A stomach moved digested reagents into its body's solution
    Transferred {
        stomach: EntityId,
        body: EntityId,
        tick: Tick,
        /// Reagent amounts moved this step
        reagents: Vec<(ReagentId, f32)>,
    },
    /// The destination refused the digested batch; its contents are lost
    TransferRejected {
        stomach: EntityId,
        body: EntityId,
        tick: Tick,
    },
}

/// Run one digestion pass over every entity with a stomach
///
/// Entities are processed sequentially; organs sharing a destination
/// solution (several organs of one body) must not have their transfer
/// application run concurrently, so callers must not parallelize this
/// across entities.
///
/// Per entity and tick, at most one digestion step fires regardless of how
/// much time `frame_time` banks; leftover time carries over to later ticks.
pub fn digestion_system(world: &mut World, frame_time: f32) -> Vec<DigestionEvent> {
    let mut events = Vec::new();

    let World {
        current_tick,
        stomachs,
        body_links,
        solutions,
        ..
    } = world;
    let tick = *current_tick;

    for (&entity, stomach) in stomachs.iter_mut() {
        // Detached organs do not digest and do not bank time
        let Some(&body) = body_links.get(&entity) else {
            continue;
        };

        stomach.accumulated_time += frame_time;
        if stomach.accumulated_time < stomach.update_interval {
            continue;
        }
        // Exactly one interval per firing; residual time stays banked
        stomach.accumulated_time -= stomach.update_interval;

        // The interval is already debited at this point: an unresolvable
        // solution forfeits this step's worth of digestion
        if solutions
            .try_get_solution(entity, STOMACH_SOLUTION_NAME)
            .is_none()
        {
            tracing::debug!(stomach = ?entity, "no stomach solution, digestion step skipped");
            continue;
        }
        if solutions
            .try_get_solution(body, &stomach.body_solution_name)
            .is_none()
        {
            tracing::debug!(
                stomach = ?entity,
                ?body,
                solution = %stomach.body_solution_name,
                "no body solution, digestion step skipped"
            );
            continue;
        }

        let interval = stomach.update_interval;
        let delay = stomach.digestion_delay;
        let mut transfer = Solution::default();

        stomach.parcels.retain_mut(|parcel| {
            // Ages advance on the digestion clock, not wall time
            parcel.increment(interval);
            if parcel.age <= delay {
                return true;
            }

            // Due: recover whatever is still present, capped at what this
            // parcel tracked. The parcel is dropped either way; reagents
            // already removed by other means are not owed.
            let present = solutions
                .try_get_solution(entity, STOMACH_SOLUTION_NAME)
                .map(|solution| solution.quantity(&parcel.reagent))
                .unwrap_or(0.0);
            let amount = present.min(parcel.quantity);
            if amount > 0.0 {
                solutions.try_remove_reagent(
                    entity,
                    STOMACH_SOLUTION_NAME,
                    &parcel.reagent,
                    amount,
                );
                transfer.add_reagent(parcel.reagent.clone(), amount);
            }
            false
        });

        if transfer.is_empty() {
            continue;
        }

        // One combined addition, so the destination's capacity check sees
        // the whole batch rather than reagent-by-reagent slices
        let reagents: Vec<(ReagentId, f32)> = transfer
            .iter()
            .map(|(reagent, quantity)| (reagent.clone(), quantity))
            .collect();
        if solutions.try_add_solution(body, &stomach.body_solution_name, &transfer) {
            tracing::debug!(
                stomach = ?entity,
                ?body,
                reagent_count = reagents.len(),
                "digested reagents transferred"
            );
            events.push(DigestionEvent::Transferred {
                stomach: entity,
                body,
                tick,
                reagents,
            });
        } else {
            // Accepted loss: the destination's policy decided, no re-queue
            tracing::debug!(
                stomach = ?entity,
                ?body,
                "destination rejected digested batch, contents lost"
            );
            events.push(DigestionEvent::TransferRejected {
                stomach: entity,
                body,
                tick,
            });
        }
    }

    events
}

/// Initialize digestion for an entity that just gained a stomach
///
/// Creates the stomach component if absent, ensures its solution exists and
/// applies the configured capacity. Idempotent: re-attaching never destroys
/// solution contents.
pub fn on_stomach_attached(world: &mut World, entity: EntityId) {
    let World {
        stomachs,
        solutions,
        config,
        ..
    } = world;

    let stomach = stomachs
        .entry(entity)
        .or_insert_with(|| Stomach::new(config));
    let solution = solutions.ensure_solution(entity, STOMACH_SOLUTION_NAME);
    solution.max_volume = stomach.initial_max_volume;

    tracing::debug!(?entity, max_volume = stomach.initial_max_volume, "stomach attached");
}

/// Apply or revert a metabolic rate multiplier on an entity's stomach
///
/// Entities without a stomach are ignored.
pub fn on_metabolic_multiplier(world: &mut World, entity: EntityId, factor: f32, apply: bool) {
    if let Some(stomach) = world.stomachs.get_mut(&entity) {
        stomach.apply_metabolic_multiplier(factor, apply);
    }
}

/// Whether a stomach can accept the whole batch right now
///
/// All-or-nothing: partial acceptance is never offered. Checks nothing but
/// capacity and mutates nothing.
pub fn can_ingest(world: &World, entity: EntityId, batch: &Solution) -> bool {
    match world.solutions.try_get_solution(entity, STOMACH_SOLUTION_NAME) {
        Some(stomach_solution) => stomach_solution.can_add_solution(batch),
        None => false,
    }
}

/// Move a batch into an entity's stomach and start tracking it
///
/// Fails with no state change when the entity has no stomach, its solution
/// cannot be resolved, or the batch does not fit. On success every distinct
/// reagent in the batch gets a fresh parcel at age zero; parcels never merge.
pub fn ingest(world: &mut World, entity: EntityId, batch: &Solution) -> bool {
    if !can_ingest(world, entity, batch) {
        return false;
    }

    let World {
        stomachs,
        solutions,
        ..
    } = world;
    let Some(stomach) = stomachs.get_mut(&entity) else {
        return false;
    };
    let Some(solution) = solutions.try_get_solution_mut(entity, STOMACH_SOLUTION_NAME) else {
        return false;
    };

    solution.add_solution(batch);
    for (reagent, quantity) in batch.iter() {
        stomach.parcels.push(ReagentParcel::new(reagent.clone(), quantity));
    }

    true
}
