//! Flow configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up by [`FlowConfig::load_from_dir`]
pub const CONFIG_FILE: &str = "flow.toml";

/// Top-level Flow configuration (flow.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct FlowConfig {
    /// Tracing filter directive, used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub path: PathConfig,
}

/// Frame output configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Time of the first rendered frame
    #[serde(default)]
    pub start_seconds: f64,
    /// Time at which rendering stops (exclusive)
    #[serde(default = "default_end_seconds")]
    pub end_seconds: f64,
    /// JSON-lines frame trace. Written to stdout when unset.
    #[serde(default)]
    pub trace_path: Option<PathBuf>,
}

fn default_fps() -> u32 {
    60
}

fn default_end_seconds() -> f64 {
    4.0
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            start_seconds: 0.0,
            end_seconds: default_end_seconds(),
            trace_path: None,
        }
    }
}

impl OutputConfig {
    /// Frame range `[start, end)` covered by the configured times
    pub fn frame_range(&self) -> (i64, i64) {
        let fps = self.fps.max(1) as f64;
        (
            (self.start_seconds * fps).round() as i64,
            (self.end_seconds * fps).round() as i64,
        )
    }
}

/// Path flattening configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct PathConfig {
    /// Line segments per curve or arc
    #[serde(default = "default_segmentation")]
    pub segmentation: u32,
    /// Radius of rounded corners in the demo scene
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
}

fn default_segmentation() -> u32 {
    16
}

fn default_corner_radius() -> f32 {
    12.0
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            segmentation: default_segmentation(),
            corner_radius: default_corner_radius(),
        }
    }
}

impl FlowConfig {
    /// Load configuration from a directory (looks for flow.toml) or a file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            tracing::debug!("No {} found, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FlowConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the rendered range and rate, then check the result again
    pub fn override_output(
        &mut self,
        from: Option<f64>,
        to: Option<f64>,
        fps: Option<u32>,
    ) -> Result<()> {
        if let Some(from) = from {
            self.output.start_seconds = from;
        }
        if let Some(to) = to {
            self.output.end_seconds = to;
        }
        if let Some(fps) = fps {
            self.output.fps = fps;
        }
        self.validate()
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn validate(&self) -> Result<()> {
        if self.output.fps == 0 {
            anyhow::bail!("output.fps must be positive");
        }
        if self.output.end_seconds < self.output.start_seconds {
            anyhow::bail!(
                "output.end_seconds ({}) is before output.start_seconds ({})",
                self.output.end_seconds,
                self.output.start_seconds
            );
        }
        if self.path.segmentation == 0 {
            anyhow::bail!("path.segmentation must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FlowConfig::from_toml("").unwrap();
        assert_eq!(config, FlowConfig::default());
        assert_eq!(config.output.fps, 60);
        assert_eq!(config.path.segmentation, 16);
        assert_eq!(config.output.frame_range(), (0, 240));
    }

    #[test]
    fn test_partial_sections() {
        let config = FlowConfig::from_toml(
            r#"
            log_filter = "flow_animation=trace"

            [output]
            fps = 30
            end_seconds = 2.5
            trace_path = "frames.jsonl"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.fps, 30);
        assert_eq!(config.output.start_seconds, 0.0);
        assert_eq!(config.output.frame_range(), (0, 75));
        assert_eq!(config.output.trace_path, Some(PathBuf::from("frames.jsonl")));
        assert_eq!(config.path.corner_radius, 12.0);
        assert_eq!(config.log_filter.as_deref(), Some("flow_animation=trace"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(FlowConfig::from_toml("[output]\nfps = 0").is_err());
        assert!(FlowConfig::from_toml("[output]\nstart_seconds = 3.0\nend_seconds = 1.0").is_err());
        assert!(FlowConfig::from_toml("[path]\nsegmentation = 0").is_err());
        assert!(FlowConfig::from_toml("[output]\nfps = \"fast\"").is_err());
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut config = FlowConfig::default();
        assert!(config.override_output(Some(3.0), Some(1.0), None).is_err());

        let mut config = FlowConfig::default();
        let end = config.output.end_seconds;
        assert!(config.override_output(Some(end + 1.0), None, None).is_err());

        let mut config = FlowConfig::default();
        assert!(config.override_output(None, None, Some(0)).is_err());

        let mut config = FlowConfig::default();
        config.override_output(Some(1.0), Some(2.0), Some(30)).unwrap();
        assert_eq!(config.output.start_seconds, 1.0);
        assert_eq!(config.output.end_seconds, 2.0);
        assert_eq!(config.output.fps, 30);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = FlowConfig::default();
        config.output.fps = 24;
        config.log_filter = Some("debug".into());

        let text = config.to_toml().unwrap();
        assert_eq!(FlowConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("flow-config-missing-{}", std::process::id()));
        let config = FlowConfig::load_from_dir(&dir).unwrap();
        assert_eq!(config, FlowConfig::default());
    }

    #[test]
    fn test_load_from_dir_reads_flow_toml() {
        let dir = std::env::temp_dir().join(format!("flow-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "[path]\nsegmentation = 4\n").unwrap();

        let config = FlowConfig::load_from_dir(&dir).unwrap();
        assert_eq!(config.path.segmentation, 4);

        let from_file = FlowConfig::load_from_dir(&dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(from_file, config);

        fs::remove_dir_all(&dir).unwrap();
    }
}
