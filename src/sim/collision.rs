//! Projectile/enemy collision detection
//!
//! Hit boxes are axis-aligned squares: a projectile hits an enemy when both
//! axis distances are strictly below `HIT_RADIUS`.

use glam::DVec2;

use super::state::Enemy;
use crate::consts::HIT_RADIUS;

/// Check whether two points overlap within the hit box
#[inline]
pub fn overlaps(a: DVec2, b: DVec2) -> bool {
    let d = (a - b).abs();
    d.x < HIT_RADIUS && d.y < HIT_RADIUS
}

/// Index of the first enemy (in spawn order) hit by a projectile at `point`
pub fn first_hit(point: DVec2, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| overlaps(point, e.pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;
    use crate::sim::state::Heading;

    fn enemy(id: u32, x: f64, y: f64) -> Enemy {
        Enemy {
            id,
            pos: pos(x, y),
            heading: Heading::Right,
        }
    }

    #[test]
    fn test_overlap_same_point() {
        assert!(overlaps(pos(0.4, 0.4), pos(0.4, 0.4)));
    }

    #[test]
    fn test_overlap_is_strict() {
        // Exactly at the radius on one axis is a miss
        assert!(!overlaps(pos(0.5, 0.5), pos(0.5, 0.55 + 1e-9)));
        assert!(!overlaps(pos(0.5, 0.5), pos(0.45 - 1e-9, 0.5)));
        assert!(overlaps(pos(0.5, 0.5), pos(0.53, 0.47)));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        assert!(!overlaps(pos(0.5, 0.5), pos(0.5, 0.6)));
        assert!(!overlaps(pos(0.5, 0.5), pos(0.6, 0.5)));
    }

    #[test]
    fn test_first_hit_prefers_spawn_order() {
        let enemies = vec![enemy(1, 0.2, 0.2), enemy(2, 0.51, 0.5), enemy(3, 0.5, 0.5)];
        assert_eq!(first_hit(pos(0.5, 0.5), &enemies), Some(1));
        assert_eq!(first_hit(pos(0.8, 0.8), &enemies), None);
    }
}
