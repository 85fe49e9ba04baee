//! Harrytur - a cross-border shopping arcade game
//!
//! Catch products falling into your cart, then decide how to get the haul
//! across the border: pay the toll or try your luck with the guards.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scene state machine)
//! - `render`: Drawing-surface and asset seams plus the scene painters
//! - `input`: Held-key snapshot read by the simulation once per tick
//! - `config`: Data-driven game tuning

pub mod config;
pub mod input;
pub mod render;
pub mod sim;

pub use config::{GameConfig, ScoreTable};
pub use input::{InputSnapshot, Key};
