//! Player progress across levels
//!
//! Persisted to LocalStorage as one JSON blob: player name, the best
//! known result per level, and the level-5 artwork if the player made
//! one. A level is unlocked once the previous level has been completed.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::sim::{Artwork, ProgressionSink};

/// Result of one completed level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelResult {
    pub level: u32,
    pub stars: u8,
    pub elapsed_ms: f64,
    pub mistakes: u32,
    /// Coloring artwork, present for the coloring level only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<Artwork>,
}

/// Whole-game progress for one player
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameProgress {
    pub player_name: String,
    /// One entry per completed level, replaced on replay
    pub results: Vec<LevelResult>,
}

impl GameProgress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "buah_ceria_progress";

    pub fn new(player_name: &str) -> Self {
        Self {
            player_name: player_name.to_owned(),
            results: Vec::new(),
        }
    }

    pub fn result(&self, level: u32) -> Option<&LevelResult> {
        self.results.iter().find(|r| r.level == level)
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.result(level).is_some()
    }

    /// Level 1 is always open, every other level needs its predecessor
    /// completed
    pub fn can_access_level(&self, level: u32) -> bool {
        match level {
            0 => false,
            1 => true,
            n if n <= LEVEL_COUNT => self.is_completed(n - 1),
            _ => false,
        }
    }

    /// Sum of stars over completed levels
    pub fn total_stars(&self) -> u32 {
        self.results.iter().map(|r| u32::from(r.stars)).sum()
    }

    pub fn all_completed(&self) -> bool {
        (1..=LEVEL_COUNT).all(|l| self.is_completed(l))
    }

    /// Record a result, replacing any earlier attempt at the same level
    pub fn record(&mut self, result: LevelResult) {
        match self.results.iter_mut().find(|r| r.level == result.level) {
            Some(slot) => *slot = result,
            None => self.results.push(result),
        }
    }

    /// Wipe all results, keeping the player name
    pub fn reset(&mut self) {
        self.results.clear();
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<GameProgress>(&json) {
                    log::info!(
                        "Loaded progress: {} levels done",
                        progress.results.len()
                    );
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved ({} levels)", self.results.len());
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

impl ProgressionSink for GameProgress {
    fn on_level_complete(
        &mut self,
        level: u32,
        stars: u8,
        elapsed_ms: f64,
        mistakes: u32,
        artwork: Option<Artwork>,
    ) {
        self.record(LevelResult {
            level,
            stars,
            elapsed_ms,
            mistakes,
            artwork,
        });
        self.save();
    }
}
