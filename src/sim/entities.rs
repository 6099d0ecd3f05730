//! Entity models and the per-tick update capability they share
//!
//! Entities only know their own fields. The controller owns every collection
//! and decides when entities are created or dropped.

use glam::Vec2;

use super::aabb::{Aabb, clamp_center_to_field};
use crate::Rgb;
use crate::consts::*;

/// Outcome of advancing an entity by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

/// Something the controller advances once per tick
pub trait Entity {
    /// Advance by `dt` seconds
    fn update(&mut self, dt: f32) -> Lifecycle;

    /// Collision box in field coordinates
    fn bounds(&self) -> Aabb;
}

/// Advance every entity in a collection, dropping the ones that expire
pub fn update_all<E: Entity>(entities: &mut Vec<E>, dt: f32) {
    entities.retain_mut(|e| e.update(dt) == Lifecycle::Alive);
}

/// Continuous directional key state, sampled during the physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Steering {
    /// Signed acceleration direction; opposite keys cancel out
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i8 - self.left as i8;
        let y = self.down as i8 - self.up as i8;
        Vec2::new(x as f32, y as f32)
    }
}

/// The player-controlled square
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub accel: f32,
    pub friction: f32,
    pub max_speed: f32,
    /// Seconds of invulnerability left, never negative
    pub grace_time: f32,
    /// Key state for the current tick
    pub steering: Steering,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            accel: PLAYER_ACCEL,
            friction: PLAYER_FRICTION,
            max_speed: PLAYER_MAX_SPEED,
            grace_time: GRACE_TIME,
            steering: Steering::default(),
        }
    }

    /// Integrate input acceleration, clamp speed, then damp.
    ///
    /// Friction runs after the clamp so it compounds every tick.
    pub fn apply_input(&mut self, dt: f32) {
        let accel = self.steering.axis() * self.accel;
        self.vel += accel * dt;
        self.vel = self.vel.clamp_length_max(self.max_speed);
        self.vel *= self.friction;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.grace_time > 0.0
    }
}

impl Entity for Player {
    fn update(&mut self, dt: f32) -> Lifecycle {
        self.apply_input(dt);
        self.pos += self.vel * dt;
        self.pos = clamp_center_to_field(self.pos, Vec2::splat(self.size * 0.5));
        self.grace_time = (self.grace_time - dt).max(0.0);
        Lifecycle::Alive
    }

    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A roaming hazard that bounces off the field walls at constant speed
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Unit-length heading
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub color: Rgb,
}

impl Enemy {
    /// Build an enemy of the given archetype; `speed_scale` is fixed for its lifetime
    pub fn new(pos: Vec2, kind: &EnemyType, dir: Vec2, speed_scale: f32) -> Self {
        Self {
            pos,
            dir: dir.normalize_or(Vec2::X),
            speed: kind.base_speed * speed_scale,
            radius: kind.radius,
            color: kind.color,
        }
    }
}

impl Entity for Enemy {
    fn update(&mut self, dt: f32) -> Lifecycle {
        self.pos += self.dir * self.speed * dt;

        // Bounce: push back inside and point the component away from the wall
        let r = self.radius;
        if self.pos.x - r <= 0.0 {
            self.pos.x = r;
            self.dir.x = self.dir.x.abs();
        } else if self.pos.x + r >= FIELD_WIDTH {
            self.pos.x = FIELD_WIDTH - r;
            self.dir.x = -self.dir.x.abs();
        }
        if self.pos.y - r <= 0.0 {
            self.pos.y = r;
            self.dir.y = self.dir.y.abs();
        } else if self.pos.y + r >= FIELD_HEIGHT {
            self.pos.y = FIELD_HEIGHT - r;
            self.dir.y = -self.dir.y.abs();
        }
        Lifecycle::Alive
    }

    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.radius * 2.0)
    }
}

/// A bonus pickup with a cosmetic pulse
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub points: u32,
    /// Base diameter; collision always uses this, never the pulsing size
    pub diameter: f32,
    pub color: Rgb,
    /// Oscillation phase (seconds)
    pub phase: f32,
}

impl Coin {
    pub fn new(pos: Vec2, kind: &CoinType) -> Self {
        Self {
            pos,
            points: kind.points,
            diameter: kind.diameter,
            color: kind.color,
            phase: 0.0,
        }
    }

    /// Rendered scale factor, `1 + 0.1 * sin(phase * 6)`
    pub fn pulse_scale(&self) -> f32 {
        1.0 + COIN_PULSE_AMPLITUDE * (self.phase * COIN_PULSE_RATE).sin()
    }
}

impl Entity for Coin {
    fn update(&mut self, dt: f32) -> Lifecycle {
        self.phase += dt;
        Lifecycle::Alive
    }

    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.diameter)
    }
}

/// A short-lived cosmetic dot
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, size: f32, color: Rgb) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            size,
            color,
        }
    }

    /// Opacity proportional to remaining life
    pub fn alpha(&self) -> u8 {
        if self.max_life <= 0.0 {
            return 0;
        }
        crate::clamp(255.0 * self.life / self.max_life, 0.0, 255.0) as u8
    }
}

impl Entity for Particle {
    fn update(&mut self, dt: f32) -> Lifecycle {
        self.pos += self.vel * dt;
        self.life -= dt;
        if self.life <= 0.0 {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn held(up: bool, down: bool, left: bool, right: bool) -> Steering {
        Steering {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_opposite_keys_cancel() {
        assert_eq!(held(true, true, false, false).axis(), Vec2::ZERO);
        assert_eq!(held(false, false, true, true).axis(), Vec2::ZERO);
        assert_eq!(held(true, false, false, true).axis(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_friction_applies_after_clamp() {
        let mut player = Player::new(Vec2::new(480.0, 270.0));
        player.vel = Vec2::new(1000.0, 0.0);
        player.apply_input(SIM_DT);
        // Clamped to 340, then damped by 0.85
        assert!((player.vel.x - PLAYER_MAX_SPEED * PLAYER_FRICTION).abs() < 1e-3);
    }

    #[test]
    fn test_player_coasts_to_rest() {
        let mut player = Player::new(Vec2::new(480.0, 270.0));
        player.vel = Vec2::new(200.0, -150.0);
        for _ in 0..120 {
            player.update(SIM_DT);
        }
        assert!(player.vel.length() < 1e-3);
    }

    #[test]
    fn test_player_stops_at_wall() {
        let mut player = Player::new(Vec2::new(30.0, 270.0));
        player.steering = held(false, false, true, false);
        for _ in 0..60 {
            player.update(SIM_DT);
        }
        assert_eq!(player.pos.x, PLAYER_SIZE / 2.0);
        assert!(player.bounds().inside_field());
    }

    #[test]
    fn test_grace_timer_floors_at_zero() {
        let mut player = Player::new(Vec2::new(480.0, 270.0));
        assert!(player.is_invulnerable());
        player.update(GRACE_TIME + 1.0);
        assert_eq!(player.grace_time, 0.0);
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_enemy_bounces_off_right_wall() {
        let kind = ENEMY_TYPES[0];
        let mut enemy = Enemy::new(
            Vec2::new(FIELD_WIDTH - kind.radius - 1.0, 200.0),
            &kind,
            Vec2::new(1.0, 1.0),
            1.0,
        );
        let speed = enemy.speed;
        enemy.update(0.1);
        assert!(enemy.dir.x < 0.0);
        assert!(enemy.dir.y > 0.0);
        assert!(enemy.bounds().inside_field());
        assert_eq!(enemy.speed, speed);
    }

    #[test]
    fn test_enemy_speed_scale() {
        let kind = ENEMY_TYPES[1];
        let enemy = Enemy::new(Vec2::new(100.0, 100.0), &kind, Vec2::new(-1.0, 1.0), 1.24);
        assert!((enemy.speed - kind.base_speed * 1.24).abs() < 1e-3);
        assert!((enemy.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_coin_pulse_is_cosmetic() {
        let mut coin = Coin::new(Vec2::new(100.0, 100.0), &COIN_TYPES[0]);
        let before = coin.bounds();
        coin.update(0.26);
        assert!((coin.pulse_scale() - (1.0 + 0.1 * (0.26f32 * 6.0).sin())).abs() < 1e-6);
        assert_eq!(coin.bounds(), before);
    }

    #[test]
    fn test_particle_fades_and_expires() {
        let mut particle = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.5, 4.0, [255, 0, 0]);
        assert_eq!(particle.alpha(), 255);
        assert_eq!(particle.update(0.25), Lifecycle::Alive);
        assert_eq!(particle.pos, Vec2::new(25.0, 0.0));
        assert_eq!(particle.alpha(), 127);
        assert_eq!(particle.update(0.25), Lifecycle::Expired);
    }

    #[test]
    fn test_update_all_drops_expired() {
        let mut particles = vec![
            Particle::new(Vec2::ZERO, Vec2::ZERO, 0.1, 3.0, [0, 0, 0]),
            Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0, 3.0, [0, 0, 0]),
        ];
        update_all(&mut particles, 0.5);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].max_life, 1.0);
    }

    fn steering_strategy() -> impl Strategy<Value = Steering> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(up, down, left, right)| held(up, down, left, right))
    }

    proptest! {
        #[test]
        fn prop_player_speed_and_position_bounded(
            start_x in 0.0f32..FIELD_WIDTH,
            start_y in 0.0f32..FIELD_HEIGHT,
            inputs in prop::collection::vec(steering_strategy(), 1..200),
            dt in 0.001f32..0.1,
        ) {
            let mut player = Player::new(Vec2::new(start_x, start_y));
            for steering in inputs {
                player.steering = steering;
                player.update(dt);
                prop_assert!(player.vel.length() <= PLAYER_MAX_SPEED + 1e-3);
                prop_assert!(player.pos.x >= 0.0 && player.pos.x <= FIELD_WIDTH);
                prop_assert!(player.pos.y >= 0.0 && player.pos.y <= FIELD_HEIGHT);
                prop_assert!(player.grace_time >= 0.0);
            }
        }

        #[test]
        fn prop_enemy_stays_in_field_with_unit_heading(
            kind_idx in 0usize..ENEMY_TYPES.len(),
            x in ENEMY_SPAWN_MARGIN..(FIELD_WIDTH - ENEMY_SPAWN_MARGIN),
            y in ENEMY_SPAWN_MARGIN..(FIELD_HEIGHT - ENEMY_SPAWN_MARGIN),
            sx in prop::bool::ANY,
            sy in prop::bool::ANY,
            scale in 1.0f32..4.0,
            ticks in 1usize..600,
        ) {
            let dir = Vec2::new(if sx { 1.0 } else { -1.0 }, if sy { 1.0 } else { -1.0 });
            let mut enemy = Enemy::new(Vec2::new(x, y), &ENEMY_TYPES[kind_idx], dir, scale);
            let speed = enemy.speed;
            for _ in 0..ticks {
                enemy.update(SIM_DT);
                prop_assert!(enemy.bounds().inside_field());
                prop_assert!((enemy.dir.length() - 1.0).abs() < 1e-5);
                prop_assert_eq!(enemy.speed, speed);
            }
        }
    }
}
