//! Viscera - Organ-Level Digestion Simulation
//!
//! Server-side simulation layer modeling how ingested reagents move from an
//! organ's holding solution into its parent body over time. The host engine
//! supplies entity storage and scheduling; this crate owns the stomach
//! components, their solutions and the digestion step itself.

pub mod body;
pub mod chemistry;
pub mod core;
pub mod ecs;
pub mod simulation;
