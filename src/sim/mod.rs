//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only, driven by an external ticker
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The host draws the current state through `crate::render` and feeds input
//! back in through [`TickInput`].

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{catches, collect};
pub use state::{Cart, GameEvent, GameState, OutcomeKind, OutcomeState, Product, Scene};
pub use tick::{Command, TickInput, tick};
