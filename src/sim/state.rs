//! Arcade state and core simulation types
//!
//! Everything a live session owns lives here. Positions are normalized
//! screen coordinates in [0, 1] on both axes, y growing downward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_unit, pos};

/// Horizontal heading of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Right,
    Left,
}

impl Heading {
    /// Sign applied to horizontal travel (+1 right, -1 left)
    pub fn sign(self) -> f64 {
        match self {
            Heading::Right => 1.0,
            Heading::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Heading::Right => Heading::Left,
            Heading::Left => Heading::Right,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: pos(PLAYER_START_X, PLAYER_START_Y),
        }
    }
}

impl Player {
    /// Move the ship to the requested point, clamped to the player region
    pub fn apply_intent(&mut self, x: f64, y: f64) {
        self.pos = pos(
            clamp_unit(x, PLAYER_MIN_X, PLAYER_MAX_X),
            clamp_unit(y, PLAYER_MIN_Y, PLAYER_MAX_Y),
        );
    }
}

/// An enemy ship in the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: DVec2,
    pub heading: Heading,
}

impl Enemy {
    /// Advance one tick horizontally. Turning at a bound drops this enemy
    /// one step; the rest of the formation is unaffected.
    ///
    /// Returns true if the enemy turned.
    pub fn advance(&mut self) -> bool {
        self.pos.x += ENEMY_SPEED * self.heading.sign();

        if self.pos.x > ENEMY_MAX_X || self.pos.x < ENEMY_MIN_X {
            self.heading = self.heading.flipped();
            self.pos.y += ENEMY_DESCENT;
            return true;
        }
        false
    }
}

/// A player projectile travelling up the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: DVec2,
}

impl Projectile {
    /// Advance one tick. Returns false once it has left the top edge.
    pub fn advance(&mut self) -> bool {
        self.pos.y -= PROJECTILE_SPEED;
        self.pos.y >= 0.0
    }
}

/// Complete arcade session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcadeState {
    /// Score for this session only
    pub score: u64,
    /// Ticks simulated since start
    pub time_ticks: u64,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Next entity ID
    next_id: u32,
}

impl Default for ArcadeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeState {
    /// Fresh session: player at its start point, full formation, zero score
    pub fn new() -> Self {
        let mut state = Self::empty();
        state.spawn_formation();
        state
    }

    /// A session with no enemies at all
    pub fn empty() -> Self {
        Self {
            score: 0,
            time_ticks: 0,
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything back to a fresh session in place
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Lay out the 3x5 enemy grid, rows top to bottom, all heading right
    pub fn spawn_formation(&mut self) {
        for row in 0..ENEMY_ROWS {
            for col in 0..ENEMY_COLS {
                let at = pos(
                    ENEMY_ORIGIN_X + col as f64 * ENEMY_COL_SPACING,
                    ENEMY_ORIGIN_Y + row as f64 * ENEMY_ROW_SPACING,
                );
                self.spawn_enemy(at, Heading::Right);
            }
        }
    }

    pub fn spawn_enemy(&mut self, at: DVec2, heading: Heading) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos: at, heading });
        id
    }

    pub fn spawn_projectile(&mut self, at: DVec2) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile { id, pos: at });
        id
    }

    /// Apply a player intent sample immediately
    pub fn set_player_intent(&mut self, x: f64, y: f64) {
        self.player.apply_intent(x, y);
    }

    pub fn enemy_positions(&self) -> Vec<DVec2> {
        self.enemies.iter().map(|e| e.pos).collect()
    }

    pub fn projectile_positions(&self) -> Vec<DVec2> {
        self.projectiles.iter().map(|p| p.pos).collect()
    }
}
