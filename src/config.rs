//! Generator settings, loadable from TOML.
//!
//! ```toml
//! commit_delay_ms = 400
//!
//! [render]
//! size = 200
//! quiet_zone = 4
//!
//! [export]
//! svg_mode = "vector"   # or "embedded"
//! svg_canvas = 256
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::export::ExportOptions;
use crate::render::{RenderOptions, MAX_CANVAS, MAX_QUIET_ZONE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pause between a successful submission and the commit of its result.
    pub commit_delay_ms: u64,
    pub render: RenderOptions,
    pub export: ExportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commit_delay_ms: 400,
            render: RenderOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.render.size == 0 || self.render.size > MAX_CANVAS {
            return Err(ConfigError::Invalid(format!(
                "render.size must be between 1 and {MAX_CANVAS}"
            )));
        }
        if self.render.quiet_zone > MAX_QUIET_ZONE {
            return Err(ConfigError::Invalid(format!(
                "render.quiet_zone must be at most {MAX_QUIET_ZONE}"
            )));
        }
        if self.export.svg_canvas == 0 || self.export.svg_canvas > MAX_CANVAS {
            return Err(ConfigError::Invalid(format!(
                "export.svg_canvas must be between 1 and {MAX_CANVAS}"
            )));
        }
        Ok(())
    }
}
