//! Atrium - a cassette futurism companion
//!
//! Core modules:
//! - `sim`: Arcade mini-game simulation (entities, collisions, fixed tick)
//! - `session`: Fixed-interval scheduler that drives a live arcade session
//! - `store`: Local record store (items, memories, games)
//! - `highscores`: Writing finished sessions back into game records
//! - `settings`: User preferences and data export/import
//! - `terminal`: Simulated command terminal
//! - `culture`: Static 1980s culture reference content

pub mod culture;
pub mod error;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;
pub mod store;
pub mod terminal;

pub use error::{AtriumError, Result};
pub use highscores::HighScores;
pub use session::{SessionConfig, SessionHandle, Snapshot};
pub use settings::{Settings, ThemeVariant};
pub use store::Store;
pub use terminal::Terminal;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation interval (20 Hz)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

    /// Player clamp region (normalized screen coordinates)
    pub const PLAYER_MIN_X: f64 = 0.1;
    pub const PLAYER_MAX_X: f64 = 0.9;
    pub const PLAYER_MIN_Y: f64 = 0.6;
    pub const PLAYER_MAX_Y: f64 = 0.9;
    /// Player spawn point
    pub const PLAYER_START_X: f64 = 0.5;
    pub const PLAYER_START_Y: f64 = 0.8;

    /// Enemy formation layout
    pub const ENEMY_ROWS: usize = 3;
    pub const ENEMY_COLS: usize = 5;
    pub const ENEMY_ORIGIN_X: f64 = 0.1;
    pub const ENEMY_ORIGIN_Y: f64 = 0.1;
    pub const ENEMY_COL_SPACING: f64 = 0.15;
    pub const ENEMY_ROW_SPACING: f64 = 0.10;

    /// Enemy horizontal travel per tick
    pub const ENEMY_SPEED: f64 = 0.001;
    /// Horizontal bounds at which an enemy turns around
    pub const ENEMY_MIN_X: f64 = 0.1;
    pub const ENEMY_MAX_X: f64 = 0.9;
    /// Vertical drop applied to an enemy each time it turns
    pub const ENEMY_DESCENT: f64 = 0.02;

    /// Projectile upward travel per tick
    pub const PROJECTILE_SPEED: f64 = 0.02;
    /// Per-axis half-extent of the hit box
    pub const HIT_RADIUS: f64 = 0.05;

    /// Points awarded per enemy destroyed
    pub const KILL_AWARD: u64 = 100;
    /// Auto-fire fires when a roll over 0..=FIRE_ROLL_MAX comes up zero
    pub const FIRE_ROLL_MAX: u32 = 20;
}

/// Clamp a value into `[min, max]`, mapping NaN to `min`
#[inline]
pub fn clamp_unit(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Build a normalized position
#[inline]
pub fn pos(x: f64, y: f64) -> DVec2 {
    DVec2::new(x, y)
}
