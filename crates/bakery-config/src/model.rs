use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "books";
const MAX_DISPLAY_PRECISION: u8 = 6;

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the saved ledgers. Defaults to `<app base>/books`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_display_precision")]
    pub display_precision: u8,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            display_precision: Self::default_display_precision(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
        }
    }
}

impl Config {
    pub fn default_display_precision() -> u8 {
        2
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Decimal places used when printing amounts, capped at six.
    pub fn precision(&self) -> usize {
        usize::from(self.display_precision.min(MAX_DISPLAY_PRECISION))
    }

    pub fn resolve_data_dir(&self, app_base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => app_base.join(path),
            None => app_base.join(DATA_DIR_NAME),
        }
    }

    /// Colors are used only when enabled and no accessibility mode asks for plain text.
    pub fn use_color(&self) -> bool {
        self.ui_color_enabled && !self.accessibility.plain_output
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default)]
    pub high_contrast: bool,
}

/// Resolves the application base directory, defaulting to the platform data dir.
pub fn default_app_base() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bakery_ledger")
}
