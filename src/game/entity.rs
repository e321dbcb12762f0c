//! Entity value types and the circular collision test

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::arena::Arena;
use super::constants::{
    COLLECTIBLE_RADIUS, COLLECTIBLE_VALUE, OBSTACLE_RADIUS, OBSTACLE_SPEED, PLAYER_RADIUS,
};

/// Anything with a center and a collision radius
pub trait Circle {
    fn center(&self) -> (i32, i32);
    fn radius(&self) -> i32;

    fn collides_with<C: Circle + ?Sized>(&self, other: &C) -> bool {
        collides(self, other)
    }
}

/// Two circles collide when the distance between their centers is at most
/// the sum of their radii. Computed on squared integers, so it is exact.
/// Client-reported coordinates and radii may span the whole `i32` range;
/// the squares of their differences only fit in `i128`.
pub fn collides<A: Circle + ?Sized, B: Circle + ?Sized>(a: &A, b: &B) -> bool {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let dx = i128::from(bx) - i128::from(ax);
    let dy = i128::from(by) - i128::from(ay);
    let reach = i128::from(a.radius()) + i128::from(b.radius());
    dx * dx + dy * dy <= reach * reach
}

/// A connected player (authoritative copy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub score: i32,
}

impl Player {
    pub fn new(id: Uuid, (x, y): (i32, i32)) -> Self {
        Self {
            id,
            x,
            y,
            radius: PLAYER_RADIUS,
            score: 0,
        }
    }

    pub fn move_to(&mut self, (x, y): (i32, i32)) {
        self.x = x;
        self.y = y;
    }
}

impl Circle for Player {
    fn center(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn radius(&self) -> i32 {
        self.radius
    }
}

/// The server-driven bouncer that costs players score on contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub vx: i32,
    pub vy: i32,
}

impl Obstacle {
    pub fn new((x, y): (i32, i32)) -> Self {
        Self {
            x,
            y,
            radius: OBSTACLE_RADIUS,
            vx: OBSTACLE_SPEED,
            vy: OBSTACLE_SPEED,
        }
    }

    /// Move one step along the velocity, then bounce off any wall the
    /// obstacle's edge has reached. Each axis flips at most once per call
    /// and always ends up pointing away from the wall it touched.
    pub fn advance(&mut self, arena: &Arena) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x + self.radius > arena.max_x {
            self.vx = -self.vx.abs();
        } else if self.x - self.radius <= arena.min_x {
            self.vx = self.vx.abs();
        }

        if self.y + self.radius > arena.max_y {
            self.vy = -self.vy.abs();
        } else if self.y - self.radius <= arena.min_y {
            self.vy = self.vy.abs();
        }
    }
}

impl Circle for Obstacle {
    fn center(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn radius(&self) -> i32 {
        self.radius
    }
}

/// The pickup. A new `id` is minted every time it is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: Uuid,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub value: i32,
}

impl Collectible {
    pub fn new((x, y): (i32, i32)) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            radius: COLLECTIBLE_RADIUS,
            value: COLLECTIBLE_VALUE,
        }
    }
}

impl Circle for Collectible {
    fn center(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn radius(&self) -> i32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn player_at(x: i32, y: i32, radius: i32) -> Player {
        Player {
            id: Uuid::new_v4(),
            x,
            y,
            radius,
            score: 0,
        }
    }

    #[test]
    fn touching_circles_collide() {
        let a = player_at(0, 0, 10);
        let b = player_at(30, 40, 40);
        // distance 50 == 10 + 40
        assert!(collides(&a, &b));

        let c = player_at(30, 41, 40);
        assert!(!collides(&a, &c));
    }

    #[test]
    fn collision_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2_000 {
            let a = player_at(rng.gen_range(-500..500), rng.gen_range(-500..500), rng.gen_range(1..80));
            let b = player_at(rng.gen_range(-500..500), rng.gen_range(-500..500), rng.gen_range(1..80));
            assert_eq!(collides(&a, &b), collides(&b, &a));
        }
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let far = player_at(i32::MIN, i32::MIN, 15);
        let obstacle = Obstacle::new((300, 200));
        assert!(!collides(&far, &obstacle));
        assert!(!collides(&obstacle, &far));

        let a = player_at(i32::MIN, i32::MIN, i32::MAX);
        let b = player_at(i32::MAX, i32::MAX, i32::MAX);
        assert!(!collides(&a, &b));

        let c = player_at(i32::MAX, i32::MAX, i32::MAX);
        assert!(collides(&b, &c));

        // 4e9 apart, reach just under 2^32
        let left = player_at(-2_000_000_000, 0, i32::MAX);
        let right = player_at(2_000_000_000, 0, i32::MAX);
        assert!(collides(&left, &right));
    }

    #[test]
    fn collision_works_across_entity_kinds() {
        let obstacle = Obstacle::new((100, 100));
        let player = player_at(120, 100, 5);
        assert!(obstacle.collides_with(&player));
        assert!(player.collides_with(&obstacle));

        let collectible = Collectible::new((400, 400));
        assert!(!player.collides_with(&collectible));
    }

    #[test]
    fn obstacle_bounces_off_min_wall_once() {
        let arena = Arena::STANDARD;
        let mut obstacle = Obstacle {
            x: 7,
            y: 200,
            radius: 5,
            vx: -2,
            vy: 0,
        };

        obstacle.advance(&arena);
        assert_eq!(obstacle.x, 5);
        assert_eq!(obstacle.vx, 2);

        // Still touching the wall on the next tick must not flip it back
        obstacle.x = 5;
        obstacle.advance(&arena);
        assert_eq!(obstacle.x, 7);
        assert_eq!(obstacle.vx, 2);
    }

    #[test]
    fn obstacle_bounces_off_max_walls_independently() {
        let arena = Arena::STANDARD;
        let mut obstacle = Obstacle {
            x: 618,
            y: 100,
            radius: 20,
            vx: 3,
            vy: 3,
        };

        obstacle.advance(&arena);
        assert_eq!(obstacle.vx, -3);
        assert_eq!(obstacle.vy, 3);

        obstacle.y = 459;
        obstacle.advance(&arena);
        assert_eq!(obstacle.vx, -3);
        assert_eq!(obstacle.vy, -3);
    }

    #[test]
    fn obstacle_away_from_walls_keeps_velocity() {
        let mut obstacle = Obstacle::new((300, 200));
        obstacle.advance(&Arena::STANDARD);
        assert_eq!((obstacle.x, obstacle.y), (302, 202));
        assert_eq!((obstacle.vx, obstacle.vy), (OBSTACLE_SPEED, OBSTACLE_SPEED));
    }

    #[test]
    fn obstacle_stays_in_bounds_over_many_ticks() {
        let arena = Arena::STANDARD;
        let mut obstacle = Obstacle::new((300, 200));
        for _ in 0..10_000 {
            obstacle.advance(&arena);
            assert!(arena.contains(obstacle.x, obstacle.y));
        }
    }

    #[test]
    fn collectibles_get_fresh_ids() {
        let a = Collectible::new((100, 100));
        let b = Collectible::new((100, 100));
        assert_ne!(a.id, b.id);
        assert_eq!(a.value, COLLECTIBLE_VALUE);
    }
}
