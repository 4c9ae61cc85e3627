//! Arcade simulation module
//!
//! All mini-game logic lives here. This module must stay pure:
//! - One fixed tick at a time, no wall clock
//! - Randomness only through an injected `FireSource`
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{first_hit, overlaps};
pub use rng::{FireSource, ScriptedFire, SeededFire};
pub use state::{ArcadeState, Enemy, Heading, Player, Projectile};
pub use tick::{TickReport, tick};
