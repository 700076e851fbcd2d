//! Persisted preferences
//!
//! Loaded from the key-value store at launch and written back at shutdown.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{KeyValueStore, PersistenceError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub high_score: u32,
    pub fullscreen: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score: 0,
            fullscreen: false,
            window_width: 800,
            window_height: 500,
        }
    }
}

impl Settings {
    /// Read every key, falling back to defaults for missing or bad values
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let settings = Self {
            high_score: read_u32(store, HIGH_SCORE_KEY, defaults.high_score),
            fullscreen: store.read_bool(FULLSCREEN_KEY, defaults.fullscreen),
            window_width: read_u32(store, WINDOW_WIDTH_KEY, defaults.window_width),
            window_height: read_u32(store, WINDOW_HEIGHT_KEY, defaults.window_height),
        };
        log::info!(
            "Settings: high score {}, {}x{}{}",
            settings.high_score,
            settings.window_width,
            settings.window_height,
            if settings.fullscreen { " fullscreen" } else { "" }
        );
        settings
    }

    /// Write every key and flush the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PersistenceError> {
        store.write_int(HIGH_SCORE_KEY, i64::from(self.high_score));
        store.write_bool(FULLSCREEN_KEY, self.fullscreen);
        store.write_int(WINDOW_WIDTH_KEY, i64::from(self.window_width));
        store.write_int(WINDOW_HEIGHT_KEY, i64::from(self.window_height));
        store.flush()
    }
}

fn read_u32(store: &dyn KeyValueStore, key: &str, default: u32) -> u32 {
    let value = store.read_int(key, i64::from(default));
    u32::try_from(value).unwrap_or_else(|_| {
        log::warn!("Setting {key} out of range ({value}), using {default}");
        default
    })
}
