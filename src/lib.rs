//! Token Pilot - a piloting captcha
//!
//! Core modules:
//! - `sim`: Deterministic core (input scheduling, craft kinematics, token generation)
//! - `platform`: Host input/notification abstraction (DOM bindings on wasm)
//! - `settings`: Round configuration
//! - `error`: Error kinds for the fallible operations

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{GenerateError, PlatformError, RoundError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Literal payload of the completion notification
    pub const COMPLETION_MESSAGE: &str = "success";

    /// Number of equation slots (`a + b = c`)
    pub const EQUATION_SLOTS: usize = 3;

    /// Attempts to find a free spot for one token before giving up
    pub const PLACEMENT_ATTEMPTS: u32 = 500;
}

/// Normalize a heading in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Fold a signed heading difference into (-180, 180]
#[inline]
pub fn shortest_turn(mut delta: f32) -> f32 {
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_degrees_wraps_both_directions() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn test_shortest_turn() {
        assert_eq!(shortest_turn(190.0), -170.0);
        assert_eq!(shortest_turn(-190.0), 170.0);
        assert_eq!(shortest_turn(180.0), 180.0);
        assert_eq!(shortest_turn(-180.0), 180.0);
        assert_eq!(shortest_turn(45.0), 45.0);
    }

    proptest! {
        #[test]
        fn normalized_heading_in_range(deg in -100_000.0f32..100_000.0) {
            let h = normalize_degrees(deg);
            prop_assert!((0.0..360.0).contains(&h));
        }

        #[test]
        fn shortest_turn_in_range(deg in -1_000.0f32..1_000.0) {
            let d = shortest_turn(deg);
            prop_assert!(d > -180.0 && d <= 180.0);
        }
    }
}
