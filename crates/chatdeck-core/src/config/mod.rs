use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::canvas::{parse_hex_color, Canvas};
use crate::constants::{canvas as canvas_defaults, paths, responder as responder_defaults};
use crate::error::{DeckError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub responder: ResponderSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderSettings {
    /// `placeholder` or `echo`.
    pub kind: String,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub stroke_width: u32,
    pub stroke_color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub theme: String,
    pub dark_mode: bool,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            kind: responder_defaults::PLACEHOLDER.to_string(),
            delay_ms: responder_defaults::DEFAULT_DELAY_MS,
        }
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(paths::MODEL_FILE),
        }
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: canvas_defaults::WIDTH,
            height: canvas_defaults::HEIGHT,
            stroke_width: canvas_defaults::STROKE_WIDTH,
            stroke_color: canvas_defaults::STROKE_COLOR.to_string(),
            background_color: canvas_defaults::BACKGROUND_COLOR.to_string(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            dark_mode: false,
        }
    }
}

impl CanvasSettings {
    /// Build a blank canvas from these settings.
    pub fn build(&self) -> Result<Canvas> {
        Ok(Canvas::new(
            self.width,
            self.height,
            parse_hex_color(&self.background_color)?,
            parse_hex_color(&self.stroke_color)?,
            self.stroke_width,
        ))
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    /// Load from `path`; a missing or unreadable file yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring config: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DeckError::Config(e.to_string()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DeckError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
