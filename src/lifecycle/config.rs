//! Runtime settings for a [`KitchenSystem`](super::KitchenSystem).

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BUFFER_SIZE: usize = 32;
pub const DEFAULT_STATE_PATH: &str = "kitchen_state.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Request channel capacity of each actor.
    pub buffer_size: usize,
    /// Where the menu and revenue are saved between runs.
    pub state_path: PathBuf,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}

impl KitchenConfig {
    /// Load configuration from environment variables
    ///
    /// - `KITCHEN_BUFFER_SIZE` (default 32; unparsable or zero values fall back to the default)
    /// - `KITCHEN_STATE_PATH` (default `kitchen_state.json`)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            buffer_size: lookup("KITCHEN_BUFFER_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|&size| size > 0)
                .unwrap_or(DEFAULT_BUFFER_SIZE),
            state_path: lookup("KITCHEN_STATE_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
        }
    }
}
