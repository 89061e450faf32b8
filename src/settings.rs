//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::SNOW_POOL_SIZE;
use crate::platform::storage;
use crate::sim::ambient::DEFAULT_SNOW_CAP;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Preset after this one on the quality button, wrapping around
    pub fn next(self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Most snowflakes drawn at once for this preset
    pub fn snow_cap(&self) -> usize {
        match self {
            QualityPreset::Low => 50,
            QualityPreset::Medium => DEFAULT_SNOW_CAP,
            QualityPreset::High => SNOW_POOL_SIZE,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Weather ===
    /// Draw falling snow / confetti at all
    pub snow: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            snow: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "magic_dash_settings";

    /// Effective snowflake cap (0 with snow turned off)
    pub fn snow_cap(&self) -> usize {
        if self.snow { self.quality.snow_cap() } else { 0 }
    }

    /// Gain applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings (quality {})", settings.quality.as_str());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), storage::StorageError> {
        storage::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snow_cap() {
        assert_eq!(Settings::default().snow_cap(), 150);
        assert_eq!(QualityPreset::Low.snow_cap(), 50);
        assert_eq!(QualityPreset::High.snow_cap(), SNOW_POOL_SIZE);
    }

    #[test]
    fn test_snow_off() {
        let settings = Settings {
            snow: false,
            ..Settings::default()
        };
        assert_eq!(settings.snow_cap(), 0);
    }

    #[test]
    fn test_mute_silences() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_preset_cycles() {
        assert_eq!(QualityPreset::Low.next(), QualityPreset::Medium);
        assert_eq!(QualityPreset::Medium.next(), QualityPreset::High);
        assert_eq!(QualityPreset::High.next(), QualityPreset::Low);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"Low"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.snow);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_save_then_load() {
        let settings = Settings {
            muted: true,
            quality: QualityPreset::High,
            ..Settings::default()
        };
        settings.save().unwrap();
        assert_eq!(Settings::load(), settings);
    }
}
