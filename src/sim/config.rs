//! Simulation tuning
//!
//! Both game variants run the same simulation; they only differ in the
//! constants collected here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lateral_bucket_count;

/// Row size ramp: from `from_index` on, rows hold up to `max_per_row` cubes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBand {
    pub from_index: usize,
    pub max_per_row: u32,
}

/// Future-collision warning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarningBand {
    /// Cubes within `threshold * factor` of the player are checked
    pub factor: f32,
    /// Maximum number of future steps simulated per cube
    pub max_iterations: u32,
}

/// Invalid tuning
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cube capacity {0} leaves no room beyond the marker cube")]
    CapacityTooSmall(usize),
    #[error("row size {max_per_row} exceeds the {buckets} lateral buckets")]
    RowTooWide { max_per_row: u32, buckets: u32 },
    #[error("difficulty bands must be non-empty, start at index 0 and be sorted")]
    BadBands,
    #[error("player speed settings must be positive")]
    BadSpeed,
}

/// Fixed configuration record for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of cubes in the pool, marker included
    pub capacity: usize,
    /// Speed gained per cube passed
    pub speed_increase: f32,
    /// Speed never exceeds this
    pub speed_cap: f32,
    /// `None` disables future-collision warnings
    #[serde(default)]
    pub warning: Option<WarningBand>,
    /// Sorted by `from_index`
    pub bands: Vec<DifficultyBand>,
    /// Extra gap between rows is drawn from `[0, max_extra_row_gap)` cube diameters
    pub max_extra_row_gap: u32,
    /// Gap in cube diameters between the marker and the first row
    pub batch_gap: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::dodge_danger()
    }
}

impl SimConfig {
    /// Full variant: large pool and warnings
    pub fn dodge_danger() -> Self {
        Self {
            capacity: 4096,
            speed_increase: 0.2,
            speed_cap: 20.0,
            warning: Some(WarningBand {
                factor: 8.0,
                max_iterations: 100,
            }),
            bands: vec![
                DifficultyBand {
                    from_index: 0,
                    max_per_row: 3,
                },
                DifficultyBand {
                    from_index: 50,
                    max_per_row: 4,
                },
                DifficultyBand {
                    from_index: 100,
                    max_per_row: 5,
                },
            ],
            max_extra_row_gap: 5,
            batch_gap: 5,
        }
    }

    /// Smaller variant without warnings
    pub fn classic() -> Self {
        Self {
            capacity: 1024,
            speed_increase: 0.25,
            speed_cap: 18.0,
            warning: None,
            bands: vec![
                DifficultyBand {
                    from_index: 0,
                    max_per_row: 2,
                },
                DifficultyBand {
                    from_index: 40,
                    max_per_row: 3,
                },
                DifficultyBand {
                    from_index: 80,
                    max_per_row: 4,
                },
            ],
            max_extra_row_gap: 5,
            batch_gap: 5,
        }
    }

    /// Parse a tuning file
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Largest row the generator may be asked to place for a cube index
    pub fn max_per_row(&self, index: usize) -> u32 {
        self.bands
            .iter()
            .rev()
            .find(|band| index >= band.from_index)
            .or(self.bands.first())
            .map(|band| band.max_per_row)
            .unwrap_or(1)
    }

    /// Check the invariants the generator and step rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < 2 {
            return Err(ConfigError::CapacityTooSmall(self.capacity));
        }
        if !(self.speed_increase >= 0.0 && self.speed_cap > 0.0) {
            return Err(ConfigError::BadSpeed);
        }
        let starts_at_zero = self.bands.first().is_some_and(|b| b.from_index == 0);
        let sorted = self.bands.windows(2).all(|w| w[0].from_index < w[1].from_index);
        if !starts_at_zero || !sorted {
            return Err(ConfigError::BadBands);
        }
        // A row wider than the corridor can never find enough distinct buckets
        let buckets = lateral_bucket_count();
        if let Some(band) = self
            .bands
            .iter()
            .find(|b| b.max_per_row == 0 || b.max_per_row > buckets)
        {
            return Err(ConfigError::RowTooWide {
                max_per_row: band.max_per_row,
                buckets,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(SimConfig::dodge_danger().validate(), Ok(()));
        assert_eq!(SimConfig::classic().validate(), Ok(()));
        assert!(SimConfig::classic().warning.is_none());
    }

    #[test]
    fn test_max_per_row_bands() {
        let config = SimConfig::dodge_danger();
        assert_eq!(config.max_per_row(1), 3);
        assert_eq!(config.max_per_row(49), 3);
        assert_eq!(config.max_per_row(50), 4);
        assert_eq!(config.max_per_row(99), 4);
        assert_eq!(config.max_per_row(100), 5);
        assert_eq!(config.max_per_row(4095), 5);
    }

    #[test]
    fn test_rejects_row_wider_than_corridor() {
        let mut config = SimConfig::dodge_danger();
        config.bands[2].max_per_row = 9;
        assert_eq!(
            config.validate(),
            Err(ConfigError::RowTooWide {
                max_per_row: 9,
                buckets: 8
            })
        );
    }

    #[test]
    fn test_rejects_unsorted_bands() {
        let mut config = SimConfig::classic();
        config.bands.swap(1, 2);
        assert_eq!(config.validate(), Err(ConfigError::BadBands));
    }

    #[test]
    fn test_json_round_trip_keeps_warning_band() {
        let json = serde_json::to_string(&SimConfig::dodge_danger()).unwrap();
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(parsed, SimConfig::dodge_danger());
    }

    #[test]
    fn test_json_without_warning_disables_it() {
        let json = r#"{
            "capacity": 64,
            "speed_increase": 0.5,
            "speed_cap": 10.0,
            "bands": [{ "from_index": 0, "max_per_row": 2 }],
            "max_extra_row_gap": 3,
            "batch_gap": 5
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert!(config.warning.is_none());
        assert_eq!(config.validate(), Ok(()));
    }
}
