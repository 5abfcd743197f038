//! Collision detection and response for player vs obstacles
//!
//! Both sides are reduced to fractional hitboxes before testing, and a hit only
//! counts once the overlap area clears a minimum, so grazing contact along an
//! edge or corner is ignored.

use glam::Vec2;
use rand::Rng;

use super::obstacle::{Obstacle, ObstacleKind};
use super::particle::ParticleSet;
use super::player::{DamageOutcome, Player};
use super::rect::Rect;
use crate::tuning::Tuning;

/// A registered hit
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Id of the obstacle that was hit (already removed)
    pub obstacle_id: u32,
    pub kind: ObstacleKind,
    /// Obstacle box center, where the destruction burst spawned
    pub center: Vec2,
    /// Overlap area of the two hitboxes
    pub overlap: f32,
    /// What the damage did to the player
    pub outcome: DamageOutcome,
}

/// Overlap area of two hitboxes when it exceeds `min_area`
///
/// Degenerate boxes never collide.
pub fn significant_overlap(a: &Rect, b: &Rect, min_area: f32) -> Option<f32> {
    let area = a.overlap_area(b);
    (area > min_area).then_some(area)
}

/// Test the player's hitbox against an obstacle's type-specific hitbox
pub fn player_obstacle_overlap(player_box: &Rect, obstacle: &Obstacle, min_area: f32) -> Option<f32> {
    significant_overlap(player_box, &obstacle.hitbox(), min_area)
}

/// Resolve at most one hit this tick.
///
/// Obstacles are tested in collection order. The first significant overlap
/// spawns a destruction burst at the obstacle center, delivers one damage unit
/// and removes the obstacle, whatever the damage outcome.
pub fn resolve<R: Rng + ?Sized>(
    player: &mut Player,
    obstacles: &mut Vec<Obstacle>,
    effects: &mut Vec<ParticleSet>,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<CollisionResult> {
    if player.is_dead() {
        return None;
    }

    let player_box = player.hitbox();
    let (index, overlap) = obstacles.iter().enumerate().find_map(|(i, obstacle)| {
        player_obstacle_overlap(&player_box, obstacle, tuning.min_overlap_area).map(|area| (i, area))
    })?;

    let obstacle = obstacles.remove(index);
    let center = obstacle.rect.center();
    effects.push(ParticleSet::burst(
        center,
        tuning.burst_count,
        tuning.burst_max_lifetime,
        rng,
    ));
    let outcome = player.take_damage(rng);

    log::debug!(
        "Hit {} (id {}) overlap {:.1}: {:?}",
        obstacle.kind.as_str(),
        obstacle.id,
        overlap,
        outcome
    );

    Some(CollisionResult {
        obstacle_id: obstacle.id,
        kind: obstacle.kind,
        center,
        overlap,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Player, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let player = Player::new(&tuning, &AssetCatalog::placeholder());
        (player, tuning, Pcg32::seed_from_u64(1))
    }

    fn obstacle_at(id: u32, kind: ObstacleKind, x: f32, tuning: &Tuning, rng: &mut Pcg32) -> Obstacle {
        let mut o = Obstacle::spawn(id, kind, kind.art_size(), x, tuning.ground_y, 4.0, rng);
        o.rect.x = x;
        o
    }

    #[test]
    fn test_corner_touch_never_hits() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert_eq!(a.overlap_area(&b), 1.0);
        assert_eq!(significant_overlap(&a, &b, 50.0), None);

        let c = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(significant_overlap(&a, &c, 50.0), Some(100.0));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 10.0, 10.0);
        assert_eq!(significant_overlap(&a, &b, 50.0), None);
        assert_eq!(significant_overlap(&a, &b, 49.9), Some(50.0));
    }

    #[test]
    fn test_degenerate_never_collides() {
        let a = Rect::new(0.0, 0.0, 0.0, 100.0);
        let b = Rect::new(-50.0, 0.0, 200.0, 200.0);
        assert_eq!(significant_overlap(&a, &b, 0.0), None);
    }

    #[test]
    fn test_hit_removes_obstacle_and_bursts() {
        let (mut player, tuning, mut rng) = setup();
        let x = player.rect.x - 20.0;
        let mut obstacles = vec![
            obstacle_at(1, ObstacleKind::Pillar, x, &tuning, &mut rng),
            obstacle_at(2, ObstacleKind::Spikes, 900.0, &tuning, &mut rng),
        ];
        let mut effects = Vec::new();

        let hit = resolve(&mut player, &mut obstacles, &mut effects, &tuning, &mut rng)
            .expect("overlapping obstacle should hit");
        assert_eq!(hit.obstacle_id, 1);
        assert_eq!(hit.outcome, DamageOutcome::Hurt);
        assert_eq!(player.health(), 2);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].len(), tuning.burst_count);
    }

    #[test]
    fn test_at_most_one_hit_per_tick() {
        let (mut player, tuning, mut rng) = setup();
        let x = player.rect.x - 20.0;
        let mut obstacles = vec![
            obstacle_at(1, ObstacleKind::Boulder, x, &tuning, &mut rng),
            obstacle_at(2, ObstacleKind::Boulder, x, &tuning, &mut rng),
        ];
        let mut effects = Vec::new();
        assert!(resolve(&mut player, &mut obstacles, &mut effects, &tuning, &mut rng).is_some());
        assert_eq!(obstacles.len(), 1);
        assert_eq!(player.health(), 2);

        // Still overlapping while hurt: obstacle is destroyed, health untouched
        let hit = resolve(&mut player, &mut obstacles, &mut effects, &tuning, &mut rng)
            .expect("second obstacle still overlaps");
        assert_eq!(hit.outcome, DamageOutcome::Ignored);
        assert!(obstacles.is_empty());
        assert_eq!(player.health(), 2);
    }

    #[test]
    fn test_dead_player_is_not_tested() {
        let (mut player, tuning, mut rng) = setup();
        for _ in 0..tuning.max_health {
            while player.is_hurt() {
                player.update(&tuning, &mut rng);
            }
            player.take_damage(&mut rng);
        }
        assert!(player.is_dead());

        let x = player.rect.x - 20.0;
        let mut obstacles = vec![obstacle_at(1, ObstacleKind::Pillar, x, &tuning, &mut rng)];
        let mut effects = Vec::new();
        assert!(resolve(&mut player, &mut obstacles, &mut effects, &tuning, &mut rng).is_none());
        assert_eq!(obstacles.len(), 1);
    }

    #[test]
    fn test_same_box_different_kinds() {
        // Identical 100x100 boxes; Spikes' hitbox starts at x=35, Boulder's at x=25
        let player_box = Rect::new(10.0, 10.0, 23.0, 80.0);
        let full = Rect::new(0.0, 0.0, 100.0, 100.0);
        let spikes = full.fraction(ObstacleKind::Spikes.hitbox());
        let boulder = full.fraction(ObstacleKind::Boulder.hitbox());
        assert_eq!(significant_overlap(&player_box, &spikes, 50.0), None);
        assert!(significant_overlap(&player_box, &boulder, 50.0).is_some());
    }
}
