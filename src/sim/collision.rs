//! Collision detection between the player and entity groups
//!
//! Everything is box overlap. Queries against empty collections are no-ops.

use super::aabb::Aabb;
use super::entities::{Coin, Enemy, Entity};

/// Remove every coin overlapping `player` and return them.
///
/// A removed coin is gone from the active set, so it can never be collected twice.
pub fn collect_coins(player: &Aabb, coins: &mut Vec<Coin>) -> Vec<Coin> {
    let mut picked = Vec::new();
    let mut i = 0;
    while i < coins.len() {
        if coins[i].bounds().overlaps(player) {
            picked.push(coins.swap_remove(i));
        } else {
            i += 1;
        }
    }
    picked
}

/// Whether any enemy overlaps `player`. One or many overlaps are the same single event.
pub fn touches_any_enemy(player: &Aabb, enemies: &[Enemy]) -> bool {
    enemies.iter().any(|e| e.bounds().overlaps(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COIN_TYPES, ENEMY_TYPES};
    use glam::Vec2;

    fn coin_at(x: f32, y: f32) -> Coin {
        Coin::new(Vec2::new(x, y), &COIN_TYPES[0])
    }

    #[test]
    fn test_collect_coins_removes_only_overlapping() {
        let player = Aabb::square(Vec2::new(100.0, 100.0), 38.0);
        let mut coins = vec![coin_at(110.0, 100.0), coin_at(500.0, 500.0), coin_at(90.0, 95.0)];

        let picked = collect_coins(&player, &mut coins);
        assert_eq!(picked.len(), 2);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].pos, Vec2::new(500.0, 500.0));

        // Second pass finds nothing new
        assert!(collect_coins(&player, &mut coins).is_empty());
    }

    #[test]
    fn test_empty_collections_are_noops() {
        let player = Aabb::square(Vec2::new(100.0, 100.0), 38.0);
        let mut coins = Vec::new();
        assert!(collect_coins(&player, &mut coins).is_empty());
        assert!(!touches_any_enemy(&player, &[]));
    }

    #[test]
    fn test_enemy_contact() {
        let player = Aabb::square(Vec2::new(100.0, 100.0), 38.0);
        let near = Enemy::new(Vec2::new(130.0, 100.0), &ENEMY_TYPES[0], Vec2::X, 1.0);
        let far = Enemy::new(Vec2::new(400.0, 300.0), &ENEMY_TYPES[0], Vec2::X, 1.0);
        assert!(touches_any_enemy(&player, &[far.clone(), near]));
        assert!(!touches_any_enemy(&player, &[far]));
    }

    #[test]
    fn test_coin_collision_uses_base_diameter() {
        // Coin edge sits 1px outside the player; a pulsed coin would reach it
        let player = Aabb::square(Vec2::new(100.0, 100.0), 38.0);
        let mut coin = coin_at(100.0 + 19.0 + 11.0 + 1.0, 100.0);
        coin.phase = std::f32::consts::FRAC_PI_2 / 6.0;
        assert!(coin.pulse_scale() > 1.05);

        let mut coins = vec![coin];
        assert!(collect_coins(&player, &mut coins).is_empty());
    }
}
