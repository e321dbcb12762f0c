//! Gameplay tuning shared by the simulation and the wire protocol

/// Inset kept clear of the walls when spawning anything
pub const SPAWN_MARGIN: i32 = 50;
/// Spawn coordinates are snapped to multiples of this
pub const SPAWN_GRID: i32 = 10;

/// Collision radius given to a freshly connected player
pub const PLAYER_RADIUS: i32 = 15;
pub const OBSTACLE_RADIUS: i32 = 20;
pub const COLLECTIBLE_RADIUS: i32 = 10;

/// Obstacle speed per tick on each axis at process start
pub const OBSTACLE_SPEED: i32 = 2;

/// Score lost on every obstacle hit
pub const OBSTACLE_PENALTY: i32 = 20;
/// Score awarded per collectible pickup
pub const COLLECTIBLE_VALUE: i32 = 10;

/// A player at or below this score is notified as having lost
pub const LOSS_SCORE: i32 = -60;
/// A player at or above this score is notified as having won
pub const WIN_SCORE: i32 = 30;
