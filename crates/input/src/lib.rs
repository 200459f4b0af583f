//! Input: the polled key set, cursor seeding, scroll-driven speed, frame clock.
//!
//! # Invariants
//! - The first cursor sample after a reset produces no movement.
//! - The speed multiplier never leaves `[0.1, 10.0]`.
//! - Hosts translate platform events into [`ViewKey`]s; nothing here depends
//!   on a windowing library.

pub mod keys;
pub mod state;

pub use keys::{KeyState, Movement, ViewKey};
pub use state::{InputState, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, ProjectionMode};

pub fn crate_info() -> &'static str {
    "stilllife-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
