//! Client settings and preferences
//!
//! Persisted in LocalStorage, separate from scores.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PLAYER_NAME_CHARS, SNAKE_TICK_MS};

/// Slowest and fastest allowed snake intervals
const SNAKE_TICK_RANGE_MS: (u32, u32) = (50, 1000);

/// Client settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for API calls (empty = same origin)
    pub api_base: String,
    /// Delay between snake ticks
    pub snake_tick_ms: u32,

    // === Visual Effects ===
    /// Neon glow around snake and food
    pub glow: bool,

    // === Accessibility ===
    /// Reduced motion (drops glow)
    pub reduced_motion: bool,

    /// Name from the last submitted score, prefilled next time
    pub last_player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            snake_tick_ms: SNAKE_TICK_MS,
            glow: true,
            reduced_motion: false,
            last_player_name: String::new(),
        }
    }
}

impl Settings {
    /// Effective glow (respects reduced_motion)
    pub fn effective_glow(&self) -> bool {
        self.glow && !self.reduced_motion
    }

    /// Snake interval clamped to a playable range
    pub fn snake_interval_ms(&self) -> u32 {
        self.snake_tick_ms
            .clamp(SNAKE_TICK_RANGE_MS.0, SNAKE_TICK_RANGE_MS.1)
    }

    /// Full URL for an API path such as `/api/dino-scores`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Remember a player name (capped like the input field)
    pub fn remember_player(&mut self, name: &str) {
        self.last_player_name = name.trim().chars().take(MAX_PLAYER_NAME_CHARS).collect();
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "portfolio_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
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
    fn test_reduced_motion_disables_glow() {
        let mut settings = Settings::default();
        assert!(settings.effective_glow());
        settings.reduced_motion = true;
        assert!(!settings.effective_glow());
    }

    #[test]
    fn test_snake_interval_clamped() {
        let mut settings = Settings::default();
        assert_eq!(settings.snake_interval_ms(), 150);
        settings.snake_tick_ms = 0;
        assert_eq!(settings.snake_interval_ms(), 50);
        settings.snake_tick_ms = 60_000;
        assert_eq!(settings.snake_interval_ms(), 1000);
    }

    #[test]
    fn test_api_url_joins_base() {
        let mut settings = Settings::default();
        assert_eq!(settings.api_url("/api/dino-scores"), "/api/dino-scores");
        settings.api_base = "https://example.com/".into();
        assert_eq!(
            settings.api_url("/api/dino-scores"),
            "https://example.com/api/dino-scores"
        );
    }

    #[test]
    fn test_old_json_fills_new_fields() {
        let settings: Settings = serde_json::from_str(r#"{"glow": false}"#).unwrap();
        assert!(!settings.glow);
        assert_eq!(settings.snake_tick_ms, SNAKE_TICK_MS);
    }

    #[test]
    fn test_remember_player_trims_and_caps() {
        let mut settings = Settings::default();
        settings.remember_player("  Grace Brewster Murray Hopper ");
        assert_eq!(settings.last_player_name, "Grace Brewster Murra");
    }
}
