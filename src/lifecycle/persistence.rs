//! Saved kitchen state: the menu with its stock, and the revenue.
//!
//! Orders are not saved. A snapshot is taken at explicit save points, and the file is replaced
//! atomically so a crash mid-write leaves the previous state intact.

use crate::model::{Dish, DishCreate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("State file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One menu entry as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    pub name: String,
    pub price: u64,
    pub available: u32,
    pub cook_time_ms: u64,
}

impl From<&Dish> for DishRecord {
    fn from(dish: &Dish) -> Self {
        Self {
            name: dish.id.0.clone(),
            price: dish.price,
            available: dish.available,
            cook_time_ms: u64::try_from(dish.cook_time.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl From<DishRecord> for DishCreate {
    fn from(record: DishRecord) -> Self {
        Self {
            name: record.name,
            price: record.price,
            available: record.available,
            cook_time: Duration::from_millis(record.cook_time_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenSnapshot {
    pub dishes: Vec<DishRecord>,
    pub revenue: u64,
}

impl KitchenSnapshot {
    /// Reads the snapshot at `path`, or an empty one if there is no file yet.
    pub fn load_or_default(path: &Path) -> Result<Self, PersistenceError> {
        if !path.exists() {
            info!(path = %path.display(), "No saved state, starting empty");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;
        info!(path = %path.display(), dishes = snapshot.dishes.len(), "Loaded state");
        Ok(snapshot)
    }

    /// Writes to a sibling temp file, then renames it over `path`.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "Saved state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> KitchenSnapshot {
        KitchenSnapshot {
            dishes: vec![DishRecord {
                name: "soup".to_string(),
                price: 100,
                available: 4,
                cook_time_ms: 1500,
            }],
            revenue: 250,
        }
    }

    #[test]
    fn test_missing_file_gives_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = KitchenSnapshot::load_or_default(&dir.path().join("state.json")).unwrap();
        assert_eq!(loaded, KitchenSnapshot::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        snapshot().save(&path).unwrap();
        assert_eq!(KitchenSnapshot::load_or_default(&path).unwrap(), snapshot());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            KitchenSnapshot::load_or_default(&path),
            Err(PersistenceError::Json(_))
        ));
    }

    #[test]
    fn test_record_keeps_cook_time() {
        let create = DishCreate::from(snapshot().dishes.remove(0));
        assert_eq!(create.cook_time, Duration::from_millis(1500));
    }
}
