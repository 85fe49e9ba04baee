//! Game tuning and the per-variant score table
//!
//! The original builds of this game scattered speeds, sizes and tier
//! boundaries across mutable globals; everything tunable now lives in one
//! immutable [`GameConfig`] handed to the simulation at construction.

use serde::{Deserialize, Serialize};

/// One row of the score table: every variant id up to and including
/// `last_variant` that is not claimed by an earlier row is worth `points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTier {
    pub last_variant: u8,
    pub points: u32,
}

/// Ordered mapping from variant-id ranges to point values.
///
/// An explicit table instead of chained numeric-range checks, so tier
/// boundaries are stated in exactly one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    tiers: Vec<ScoreTier>,
}

impl Default for ScoreTable {
    fn default() -> Self {
        // Three tiers: cheap everyday variants sit at the high ids.
        Self::new(vec![
            ScoreTier { last_variant: 2, points: 300 },
            ScoreTier { last_variant: 5, points: 200 },
            ScoreTier { last_variant: 8, points: 100 },
        ])
    }
}

impl ScoreTable {
    /// Build a table; rows are kept sorted by `last_variant` so lookups can
    /// take the first matching row.
    pub fn new(mut tiers: Vec<ScoreTier>) -> Self {
        tiers.sort_by_key(|t| t.last_variant);
        Self { tiers }
    }

    /// Point value for a variant. Ids past the final row fall into it.
    pub fn points_for(&self, variant: u8) -> u32 {
        self.tiers
            .iter()
            .find(|t| variant <= t.last_variant)
            .or(self.tiers.last())
            .map(|t| t.points)
            .unwrap_or(0)
    }

    /// Number of distinct variant ids the table covers.
    pub fn variant_count(&self) -> u8 {
        self.tiers.last().map(|t| t.last_variant + 1).unwrap_or(0)
    }
}

/// Immutable game configuration
///
/// Constructed once at startup and shared by reference; nothing in the
/// simulation mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    // === Surface ===
    /// Logical drawing surface size in pixels
    pub surface_width: f32,
    pub surface_height: f32,

    // === Timing ===
    /// Fixed ticker cadence (ticks per second)
    pub tick_rate: f32,
    /// Length of a shopping round in seconds
    pub round_seconds: f32,

    // === Products ===
    /// Concurrent falling products
    pub product_count: usize,
    /// Product bounding-square side
    pub product_size: f32,
    /// Downward speed in pixels per second
    pub product_speed: f32,
    /// Y a product re-enters at after leaving the bottom
    pub product_start_height: f32,

    // === Cart ===
    /// Cart bounding-square side
    pub cart_size: f32,
    /// Horizontal speed in pixels per second while a key is held
    pub cart_step: f32,
    /// Cart center distance above the bottom edge
    pub cart_baseline: f32,

    // === Scoring & outcome ===
    /// Score the session opens with (0, or a stake in some variants)
    pub starting_score: u32,
    /// Variant-id tiers to points
    pub score_table: ScoreTable,
    /// Chance the guards catch an evading player
    pub catch_probability: f64,
    /// Pacing delay between an outcome resolving and the finish scene
    pub outcome_delay_seconds: f32,
    /// Where the escaping figure starts its walk
    pub walk_start_x: f32,
    /// Walk-off speed of the escaping figure, pixels per second
    pub walk_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 1000.0,
            surface_height: 500.0,

            tick_rate: 60.0,
            round_seconds: 30.0,

            product_count: 5,
            product_size: 30.0,
            product_speed: 120.0,
            product_start_height: 30.0,

            cart_size: 40.0,
            cart_step: 300.0,
            cart_baseline: 50.0,

            starting_score: 0,
            score_table: ScoreTable::default(),
            catch_probability: 0.5,
            outcome_delay_seconds: 5.0,
            walk_start_x: 450.0,
            walk_speed: 100.0,
        }
    }
}

impl GameConfig {
    /// Seconds per tick
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Fixed cart center y
    #[inline]
    pub fn cart_y(&self) -> f32 {
        self.surface_height - self.cart_baseline
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "harrytur_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup_hits_each_band() {
        let table = ScoreTable::default();
        assert_eq!(table.points_for(0), 300);
        assert_eq!(table.points_for(2), 300);
        assert_eq!(table.points_for(3), 200);
        assert_eq!(table.points_for(5), 200);
        assert_eq!(table.points_for(6), 100);
        assert_eq!(table.points_for(8), 100);
    }

    #[test]
    fn tier_lookup_past_last_row_falls_into_it() {
        let table = ScoreTable::default();
        assert_eq!(table.points_for(200), 100);
    }

    #[test]
    fn empty_table_scores_nothing() {
        let table = ScoreTable::new(Vec::new());
        assert_eq!(table.points_for(0), 0);
        assert_eq!(table.variant_count(), 0);
    }

    #[test]
    fn rows_are_ordered_regardless_of_input_order() {
        let table = ScoreTable::new(vec![
            ScoreTier { last_variant: 5, points: 50 },
            ScoreTier { last_variant: 1, points: 500 },
        ]);
        assert_eq!(table.points_for(0), 500);
        assert_eq!(table.points_for(4), 50);
        assert_eq!(table.variant_count(), 6);
    }

    #[test]
    fn default_config_is_consistent() {
        let config = GameConfig::default();
        assert!(config.dt() > 0.0);
        assert!(config.cart_y() < config.surface_height);
        assert_eq!(config.score_table.variant_count(), 9);
    }
}
