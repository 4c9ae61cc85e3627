//! Fixed timestep simulation tick
//!
//! Core game loop that advances the arcade by one interval. The order is
//! fixed: enemies move, projectiles move and collide, then auto-fire.

use super::collision::first_hit;
use super::rng::FireSource;
use super::state::ArcadeState;
use crate::consts::*;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Enemies destroyed this tick
    pub kills: u32,
    /// Score gained this tick
    pub score_delta: u64,
    /// Projectiles that left the top edge
    pub expired: u32,
    /// Whether auto-fire spawned a projectile
    pub fired: bool,
    /// Enemies that turned at a bound
    pub turns: u32,
}

/// Advance the arcade state by one fixed tick
pub fn tick(state: &mut ArcadeState, fire: &mut dyn FireSource) -> TickReport {
    let mut report = TickReport::default();

    advance_enemies(state, &mut report);
    advance_projectiles(state, &mut report);
    auto_fire(state, fire, &mut report);

    state.time_ticks += 1;
    report
}

fn advance_enemies(state: &mut ArcadeState, report: &mut TickReport) {
    for enemy in &mut state.enemies {
        if enemy.advance() {
            report.turns += 1;
        }
    }
}

fn advance_projectiles(state: &mut ArcadeState, report: &mut TickReport) {
    let enemies = &mut state.enemies;
    let score = &mut state.score;

    state.projectiles.retain_mut(|projectile| {
        if !projectile.advance() {
            report.expired += 1;
            return false;
        }

        // One enemy per projectile; earliest spawned wins ties
        match first_hit(projectile.pos, enemies.as_slice()) {
            Some(index) => {
                let enemy = enemies.remove(index);
                *score += KILL_AWARD;
                report.kills += 1;
                report.score_delta += KILL_AWARD;
                log::debug!(
                    "Projectile {} destroyed enemy {} at ({:.3}, {:.3})",
                    projectile.id,
                    enemy.id,
                    enemy.pos.x,
                    enemy.pos.y
                );
                false
            }
            None => true,
        }
    });
}

fn auto_fire(state: &mut ArcadeState, fire: &mut dyn FireSource, report: &mut TickReport) {
    if fire.roll(FIRE_ROLL_MAX) == 0 {
        let at = state.player.pos;
        state.spawn_projectile(at);
        report.fired = true;
    }
}
