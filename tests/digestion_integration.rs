//! Digestion system integration tests

use proptest::prelude::*;

use viscera::chemistry::Solution;
use viscera::core::config::DigestionConfig;
use viscera::core::types::{EntityId, ReagentId};
use viscera::ecs::World;
use viscera::simulation::{
    can_ingest, ingest, on_metabolic_multiplier, on_stomach_attached, run_simulation_tick,
    DigestionEvent, STOMACH_SOLUTION_NAME,
};

/// Attach a stomach to a fresh organ, linked to a fresh body with a
/// bloodstream solution
fn spawn_digesting_entity(world: &mut World) -> (EntityId, EntityId) {
    let organ = EntityId::new();
    let body = EntityId::new();
    on_stomach_attached(world, organ);
    world.set_body_link(organ, body);
    world.solutions.ensure_solution(body, "bloodstream").max_volume = 250.0;
    (organ, body)
}

fn single_reagent_batch(reagent: &str, quantity: f32) -> Solution {
    let mut batch = Solution::default();
    batch.add_reagent(ReagentId::from(reagent), quantity);
    batch
}

#[test]
fn test_end_to_end_digestion_timeline() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("viscera=debug")
        .try_init();

    let config = DigestionConfig {
        update_interval: 1.0,
        digestion_delay: 5.0,
        ..Default::default()
    };
    let mut world = World::with_config(config);
    let (organ, body) = spawn_digesting_entity(&mut world);

    assert!(ingest(&mut world, organ, &single_reagent_batch("nutriment", 10.0)));

    // t = 1s .. 5s: five steps bring the parcel to age 5.0, which is not
    // strictly past the delay, so nothing may move yet
    for _ in 0..5 {
        let events = run_simulation_tick(&mut world, 1.0);
        assert!(events.is_empty());
    }
    let destination = world.solutions.try_get_solution(body, "bloodstream").unwrap();
    assert!(destination.is_empty());
    assert_eq!(world.stomachs.get(&organ).unwrap().parcels.len(), 1);

    // t = 6s: age 6.0 > 5.0, the full amount moves in one batch
    let events = run_simulation_tick(&mut world, 1.0);
    assert!(matches!(
        events.as_slice(),
        [DigestionEvent::Transferred { .. }]
    ));

    let destination = world.solutions.try_get_solution(body, "bloodstream").unwrap();
    assert!((destination.quantity(&ReagentId::from("nutriment")) - 10.0).abs() < 0.01);
    let source = world
        .solutions
        .try_get_solution(organ, STOMACH_SOLUTION_NAME)
        .unwrap();
    assert!(source.is_empty());
    assert!(world.stomachs.get(&organ).unwrap().parcels.is_empty());
}

#[test]
fn test_interval_sized_ticks_fire_one_step_each() {
    let config = DigestionConfig {
        digestion_delay: 1e9,
        ..Default::default()
    };
    let mut world = World::with_config(config);
    let (organ, _) = spawn_digesting_entity(&mut world);
    assert!(ingest(&mut world, organ, &single_reagent_batch("water", 1.0)));

    for expected_steps in 1..=3 {
        run_simulation_tick(&mut world, 1.0);
        let age = world.stomachs.get(&organ).unwrap().parcels[0].age;
        assert!(
            (age - expected_steps as f32).abs() < 1e-6,
            "after {} interval-sized ticks, exactly {} steps must have fired",
            expected_steps,
            expected_steps
        );
    }
}

#[test]
fn test_multiplier_slows_digestion_then_revert_restores_it() {
    let mut world = World::new();
    let (organ, _) = spawn_digesting_entity(&mut world);
    assert!(ingest(&mut world, organ, &single_reagent_batch("water", 1.0)));

    on_metabolic_multiplier(&mut world, organ, 2.0, true);

    // One second is no longer a full interval
    run_simulation_tick(&mut world, 1.0);
    assert_eq!(world.stomachs.get(&organ).unwrap().parcels[0].age, 0.0);

    // The second one completes the doubled interval
    run_simulation_tick(&mut world, 1.0);
    assert!((world.stomachs.get(&organ).unwrap().parcels[0].age - 2.0).abs() < 1e-6);

    on_metabolic_multiplier(&mut world, organ, 2.0, false);
    let stomach = world.stomachs.get(&organ).unwrap();
    assert!(
        (stomach.update_interval - 1.0).abs() < 1e-6,
        "revert must restore the configured interval"
    );
}

#[test]
fn test_multiplier_revert_clamps_banked_time() {
    let mut world = World::new();
    let (organ, _) = spawn_digesting_entity(&mut world);

    on_metabolic_multiplier(&mut world, organ, 4.0, true);
    run_simulation_tick(&mut world, 3.0); // banked, below the 4.0 interval
    on_metabolic_multiplier(&mut world, organ, 4.0, false);

    let stomach = world.stomachs.get(&organ).unwrap();
    assert!((stomach.update_interval - 1.0).abs() < 1e-6);
    assert!(
        (stomach.accumulated_time - stomach.update_interval).abs() < 1e-6,
        "banked time past the reverted interval must clamp to one interval"
    );
}

#[test]
fn test_ingest_capacity_is_all_or_nothing() {
    let mut world = World::new();
    let (organ, _) = spawn_digesting_entity(&mut world);

    // Default stomach capacity is 50 units
    assert!(ingest(&mut world, organ, &single_reagent_batch("gruel", 45.0)));
    let second = single_reagent_batch("water", 10.0);
    assert!(!can_ingest(&world, organ, &second));
    assert!(!ingest(&mut world, organ, &second));

    let source = world
        .solutions
        .try_get_solution(organ, STOMACH_SOLUTION_NAME)
        .unwrap();
    assert!((source.total_volume() - 45.0).abs() < 0.01);
    assert_eq!(world.stomachs.get(&organ).unwrap().parcels.len(), 1);
}

proptest! {
    /// One digestion step fires per full interval crossed cumulatively, no
    /// matter how the frame times slice it. Frame times are quantized to
    /// sixteenths of the interval so the float bookkeeping stays exact.
    #[test]
    fn digestion_steps_track_cumulative_time(
        sixteenths in prop::collection::vec(1u32..=16, 1..80)
    ) {
        let config = DigestionConfig {
            digestion_delay: 1e9,
            ..Default::default()
        };
        let mut world = World::with_config(config);
        let (organ, _) = spawn_digesting_entity(&mut world);
        prop_assert!(ingest(&mut world, organ, &single_reagent_batch("water", 1.0)));

        let mut bank: u64 = 0;
        let mut expected_steps: u64 = 0;
        for &k in &sixteenths {
            run_simulation_tick(&mut world, k as f32 / 16.0);
            bank += u64::from(k);
            if bank >= 16 {
                bank -= 16;
                expected_steps += 1;
            }
        }

        let age = world.stomachs.get(&organ).unwrap().parcels[0].age;
        prop_assert!(
            (age - expected_steps as f32).abs() < 1e-3,
            "expected {} steps, parcel age was {}",
            expected_steps,
            age
        );
    }
}
