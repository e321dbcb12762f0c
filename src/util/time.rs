//! Time utilities for game simulation

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Server start time for uptime tracking
static SERVER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize server start time (call once at startup)
pub fn init_server_time() {
    SERVER_START.get_or_init(Instant::now);
}

/// Get server uptime in seconds
pub fn uptime_secs() -> u64 {
    SERVER_START
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 50; // 50 ticks per second
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// Nominal interval between two ticks
pub fn tick_period() -> Duration {
    Duration::from_micros(TICK_DURATION_MICROS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_hertz_is_twenty_millis() {
        assert_eq!(tick_period(), Duration::from_millis(20));
    }

    #[test]
    fn uptime_starts_after_init() {
        init_server_time();
        assert!(uptime_secs() < 5);
        assert!(unix_millis() > 0);
    }
}
