pub mod digestion;
pub mod tick;

pub use digestion::{
    can_ingest, digestion_system, ingest, on_metabolic_multiplier, on_stomach_attached,
    DigestionEvent, STOMACH_SOLUTION_NAME,
};
pub use tick::run_simulation_tick;
