//! Round settings
//!
//! Supplied by the embedding page as JSON on the arena element's
//! `data-config` attribute. Values are trusted as given; nothing is clamped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Tokens ===
    /// How many tokens are placed in the arena
    pub token_count: usize,
    /// Exclusive upper bound for token values
    pub token_bound: u32,
    /// Rejection-sampling cap for the token generator
    pub max_attempts: u32,
    /// Side length of a token's square footprint (pixels)
    pub token_size: f32,
    /// Fixed RNG seed; a fresh seed is drawn when absent
    pub seed: Option<u64>,

    // === Timing ===
    /// Scheduler tick interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Debounce window after resume (milliseconds, counted in ticks)
    pub resume_debounce_ms: u32,

    // === Arena & craft ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub craft_width: f32,
    pub craft_height: f32,
    /// Heading the craft starts with (degrees, 270 = nose up)
    pub initial_heading: f32,
    /// Rotation applied per steering tick (degrees)
    pub min_turn_step: f32,
    /// Translation applied per thrust tick (pixels)
    pub min_thrust_distance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token_count: 6,
            token_bound: 100,
            max_attempts: 100_000,
            token_size: 28.0,
            seed: None,

            tick_interval_ms: 20,
            resume_debounce_ms: 500,

            arena_width: 480.0,
            arena_height: 320.0,
            craft_width: 24.0,
            craft_height: 16.0,
            initial_heading: 270.0,
            min_turn_step: 6.0,
            min_thrust_distance: 3.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    pub fn craft_extent(&self) -> Vec2 {
        Vec2::new(self.craft_width, self.craft_height)
    }

    /// Attribute on the arena element holding the JSON config
    #[allow(dead_code)]
    const CONFIG_ATTRIBUTE: &'static str = "data-config";

    /// Load settings from the arena element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(arena_id: &str) -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(arena_id))
            .and_then(|el| el.get_attribute(Self::CONFIG_ATTRIBUTE));

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", arena_id);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring bad config on #{}: {}", arena_id, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(_arena_id: &str) -> Self {
        Self::default()
    }
}
