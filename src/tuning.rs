//! Data-driven tuning
//!
//! Arena size, RNG seed and cadences. Loaded from a JSON file; any field left
//! out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Arena;

/// Session tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Simulation tick length
    pub tick_ms: f64,
    pub spawn_interval_ms: f64,
    pub round_interval_ms: f64,
    /// Repeat rate while the fire input is held
    pub rapid_fire_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed: None,
            tick_ms: SIM_DT_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            round_interval_ms: ROUND_INTERVAL_MS,
            rapid_fire_interval_ms: RAPID_FIRE_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse tuning JSON, then replace unusable values with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Non-positive sizes and intervals fall back to their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            log::warn!(
                "Arena {}x{} is not usable, using {}x{}",
                self.arena_width,
                self.arena_height,
                defaults.arena_width,
                defaults.arena_height
            );
            self.arena_width = defaults.arena_width;
            self.arena_height = defaults.arena_height;
        }
        for (name, value, default) in [
            ("tick_ms", &mut self.tick_ms, defaults.tick_ms),
            ("spawn_interval_ms", &mut self.spawn_interval_ms, defaults.spawn_interval_ms),
            ("round_interval_ms", &mut self.round_interval_ms, defaults.round_interval_ms),
            (
                "rapid_fire_interval_ms",
                &mut self.rapid_fire_interval_ms,
                defaults.rapid_fire_interval_ms,
            ),
        ] {
            if !(*value > 0.0) {
                log::warn!("{} = {} is not usable, using {}", name, value, default);
                *value = default;
            }
        }
        self
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_cadence() {
        let t = Tuning::default();
        assert_eq!(t.spawn_interval_ms, 1000.0);
        assert_eq!(t.round_interval_ms, 85_000.0);
        assert!(t.seed.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "arena_width": 1024.0, "seed": 7 }"#).unwrap();
        assert_eq!(t.arena_width, 1024.0);
        assert_eq!(t.arena_height, ARENA_HEIGHT);
        assert_eq!(t.seed, Some(7));
        assert_eq!(t.tick_ms, SIM_DT_MS);
    }

    #[test]
    fn test_bad_values_are_replaced() {
        let t = Tuning::from_json(r#"{ "arena_height": -5.0, "spawn_interval_ms": 0.0 }"#).unwrap();
        assert_eq!(t.arena_width, ARENA_WIDTH);
        assert_eq!(t.arena_height, ARENA_HEIGHT);
        assert_eq!(t.spawn_interval_ms, SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ arena_width: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let t = Tuning::load(Path::new("/definitely/not/here/tuning.json"));
        assert_eq!(t, Tuning::default());
    }
}
