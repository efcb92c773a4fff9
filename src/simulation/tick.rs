//! Tick system - orchestrates simulation updates
//!
//! Each frame the external scheduler calls in here once with the frame's
//! elapsed time. Digestion runs for every qualifying entity, then the world
//! clock advances.

use crate::ecs::world::World;
use crate::simulation::digestion::{digestion_system, DigestionEvent};

/// Run a single simulation tick
///
/// Returns the events that occurred during this tick for the host's
/// action log.
pub fn run_simulation_tick(world: &mut World, frame_time: f32) -> Vec<DigestionEvent> {
    let events = digestion_system(world, frame_time);
    world.tick();
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_world_clock() {
        let mut world = World::new();
        assert_eq!(world.current_tick, 0);

        run_simulation_tick(&mut world, 0.5);
        run_simulation_tick(&mut world, 0.5);
        assert_eq!(world.current_tick, 2);
    }
}
