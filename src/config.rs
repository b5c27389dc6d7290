//! Transcriber configuration loaded from `transcriber.toml`.
//!
//! [`TranscriberConfig`] holds the guide steps, the magnifier geometry and the
//! status bar labels. Keys missing from the file fall back to defaults, and a
//! missing `guide` list means the built-in insect label guide; an explicitly
//! empty one is an error.
//! The `TRANSCRIBER_ZOOM_FACTOR` environment variable overrides the file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{TranscriberError, WorkflowError};
use crate::geometry::{MagnifierSettings, Size};
use crate::workflow::{Guide, GuideStep, WorkflowController};

pub const DEFAULT_CONFIG_FILE: &str = "transcriber.toml";
pub const ZOOM_FACTOR_ENV: &str = "TRANSCRIBER_ZOOM_FACTOR";

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriberConfig {
    /// Collection name shown in the status bar.
    #[serde(default = "default_title")]
    pub title: String,

    /// Secondary status bar line.
    #[serde(default = "default_description")]
    pub description: String,

    /// Document viewport the magnifier is centered in.
    #[serde(default = "default_viewport")]
    pub viewport: Size,

    #[serde(default)]
    pub magnifier: MagnifierSettings,

    /// Guide steps in order; `None` means the built-in guide.
    #[serde(default)]
    pub guide: Option<Vec<GuideStep>>,
}

fn default_title() -> String {
    "Bugs and Such".to_string()
}

fn default_description() -> String {
    "from CalBug".to_string()
}

fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            viewport: default_viewport(),
            magnifier: MagnifierSettings::default(),
            guide: None,
        }
    }
}

impl TranscriberConfig {
    /// Loads `transcriber.toml` from the current directory, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.with_env_overrides()
    }

    /// Loads an explicitly named file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::from_file(path)?.with_env_overrides()
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str::<TranscriberConfig>(&contents)
            .map_err(TranscriberError::from)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        config.guide()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        let raw = std::env::var(ZOOM_FACTOR_ENV).ok();
        self.apply_zoom_override(raw.as_deref())?;
        Ok(self)
    }

    /// Applies a raw `TRANSCRIBER_ZOOM_FACTOR` value; `None` leaves the config as is.
    pub fn apply_zoom_override(&mut self, raw: Option<&str>) -> Result<(), TranscriberError> {
        let Some(raw) = raw else {
            return Ok(());
        };
        let zoom: f64 = raw.trim().parse().map_err(|_| {
            TranscriberError::Config(format!("{ZOOM_FACTOR_ENV} is not a number: {raw}"))
        })?;
        let previous = self.magnifier.zoom_factor;
        self.magnifier.zoom_factor = zoom;
        if let Err(err) = self.validate() {
            self.magnifier.zoom_factor = previous;
            return Err(err);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), TranscriberError> {
        let positive = [
            ("magnifier.zoom_factor", self.magnifier.zoom_factor),
            ("magnifier.width", self.magnifier.width),
            ("magnifier.height", self.magnifier.height),
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
        ];
        for (key, value) in positive {
            if !(value > 0.0) {
                return Err(TranscriberError::Config(format!(
                    "{key} must be positive, got {value}"
                )));
            }
        }

        let finite = [
            ("magnifier.helper_height", self.magnifier.helper_height),
            ("magnifier.helper_gap", self.magnifier.helper_gap),
            ("magnifier.widget_gap", self.magnifier.widget_gap),
        ];
        for (key, value) in finite {
            if !value.is_finite() {
                return Err(TranscriberError::Config(format!(
                    "{key} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The configured guide, or the built-in one when none is configured.
    pub fn guide(&self) -> Result<Guide, WorkflowError> {
        match &self.guide {
            Some(steps) => Guide::new(steps.clone()),
            None => Ok(Guide::insect_labels()),
        }
    }

    pub fn build_controller(&self) -> Result<WorkflowController, WorkflowError> {
        Ok(WorkflowController::with_magnifier(self.guide()?, self.magnifier))
    }
}
