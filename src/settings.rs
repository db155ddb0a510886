//! User preferences
//!
//! Persisted in LocalStorage so a reload restores the last submitted parameters.

use serde::{Deserialize, Serialize};

use crate::params::Params;

/// Simulator settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Parameters of the most recent submit
    #[serde(default)]
    pub last_params: Params,
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "double_pendulum_settings";

    /// Remember the parameters of an accepted submit
    pub fn remember(&mut self, params: Params) {
        self.last_params = params;
    }

    /// Slider value to show for a form field
    pub fn field_value(&self, field: &str) -> Option<i64> {
        let p = &self.last_params;
        match field {
            "mass1" => Some(p.mass1.get() as i64),
            "mass2" => Some(p.mass2.get() as i64),
            "phi1" => Some(p.phi1_deg as i64),
            "phi2" => Some(p.phi2_deg as i64),
            _ => None,
        }
    }

    /// Decode settings, falling back to defaults on bad data
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Discarding unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
                log::debug!("Settings saved");
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
