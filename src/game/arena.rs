//! Arena bounds

/// Rectangular play area. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Arena {
    /// The single fixed arena every client renders
    pub const STANDARD: Arena = Arena {
        min_x: 0,
        max_x: 640,
        min_y: 0,
        max_y: 480,
    };

    /// Check if a point lies inside the arena
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::STANDARD
    }
}
