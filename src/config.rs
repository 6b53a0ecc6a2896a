use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::color::ColorRamp;
use crate::model::profile::{SiteProfile, Viewport};
use crate::model::record::BoardKey;
use crate::report::RenderTargets;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid render target key {0:?} (use a year, \"lifetime\" or \"heatmap\")")]
    TargetKey(String),
    #[error("invalid viewport {width}x{height}")]
    Viewport { width: u32, height: u32 },
}

/// Optional JSON site configuration. Every field falls back to the built-in
/// profile when absent; command-line flags take precedence over it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfigFile {
    pub title: Option<String>,
    pub years: Option<Vec<i32>>,
    pub count_label: Option<String>,
    pub table_ramp: Option<ColorRamp>,
    pub heatmap_ramp: Option<ColorRamp>,
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
}

pub fn load_site_config(path: &Path) -> Result<SiteConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded site config from {}", path.display());
    Ok(config)
}

impl SiteConfigFile {
    pub fn apply_to(&self, profile: &mut SiteProfile) -> Result<(), ConfigError> {
        if let Some(title) = &self.title {
            profile.title = title.clone();
        }
        if let Some(label) = &self.count_label {
            profile.count_label = label.clone();
        }
        if let Some(ramp) = self.table_ramp {
            profile.table_ramp = ramp;
        }
        if let Some(ramp) = self.heatmap_ramp {
            profile.heatmap_ramp = ramp;
        }
        if let Some(viewport) = self.viewport {
            validate_viewport(viewport)?;
            profile.viewport = viewport;
        }
        Ok(())
    }
}

pub fn validate_viewport(viewport: Viewport) -> Result<(), ConfigError> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(ConfigError::Viewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

pub fn parse_target_key(key: &str) -> Result<BoardKey, ConfigError> {
    match key.to_ascii_lowercase().as_str() {
        "lifetime" => Ok(BoardKey::Lifetime),
        "heatmap" => Ok(BoardKey::Heatmap),
        other => other
            .parse::<i32>()
            .map(BoardKey::Year)
            .map_err(|_| ConfigError::TargetKey(key.to_string())),
    }
}

pub fn apply_target_overrides(
    targets: &mut RenderTargets,
    overrides: &BTreeMap<String, String>,
) -> Result<(), ConfigError> {
    for (key, id) in overrides {
        targets.insert(parse_target_key(key)?, id.clone());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
