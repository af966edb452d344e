//! Config module.
//! Screen dimensions and the resolution label used as the layout document key.
//! Optional mapper settings live in a small JSON file (output dir, overlay, confirmation).
//! Every settings field has a default, so a missing or partial file is fine.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Screen size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

impl Screen {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Resolution label, e.g. "1920x1080".
    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Parses a "WIDTHxHEIGHT" label.
pub fn parse_resolution(label: &str) -> Result<Screen> {
    let Some((w, h)) = label.trim().split_once(['x', 'X']) else {
        bail!("Resolution '{}' is not in WIDTHxHEIGHT form", label);
    };
    let width: i32 = w
        .trim()
        .parse()
        .with_context(|| format!("Invalid width in resolution '{}'", label))?;
    let height: i32 = h
        .trim()
        .parse()
        .with_context(|| format!("Invalid height in resolution '{}'", label))?;
    if width <= 0 || height <= 0 {
        bail!("Resolution '{}' must have positive width and height", label);
    }
    Ok(Screen::new(width, height))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Where overlays and click backups go. Default: "output".
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Draw the generated regions over the screenshot for review. Default: true.
    #[serde(default = "default_true")]
    pub render_overlay: bool,
    /// Ask before writing a layout that failed validation. Default: true.
    #[serde(default = "default_true")]
    pub confirm_on_failure: bool,
    /// Keep a copy of the clicks next to the overlay. Default: true.
    #[serde(default = "default_true")]
    pub save_clicks: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            output_dir: default_output_dir(),
            render_overlay: default_true(),
            confirm_on_failure: default_true(),
            save_clicks: default_true(),
        }
    }
}

/// Loads settings from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<MapperConfig> {
    let Some(path) = path else {
        return Ok(MapperConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: MapperConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "mapper config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920x1080").unwrap(), Screen::new(1920, 1080));
        assert_eq!(parse_resolution(" 2560X1440 ").unwrap(), Screen::new(2560, 1440));
        assert!(parse_resolution("1920").is_err());
        assert!(parse_resolution("0x1080").is_err());
        assert!(parse_resolution("axb").is_err());
    }

    #[test]
    fn test_label_round_trip() {
        let screen = Screen::new(1280, 720);
        assert_eq!(parse_resolution(&screen.label()).unwrap(), screen);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MapperConfig = serde_json::from_str(r#"{"render_overlay": false}"#).unwrap();
        assert!(!config.render_overlay);
        assert!(config.confirm_on_failure);
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_no_path_gives_default() {
        assert_eq!(load_config(None).unwrap(), MapperConfig::default());
    }
}
