//! CLI Configuration
//!
//! Loads a JSON configuration file and layers command line flags on top of it.

use std::fs;
use std::path::Path;

use anyhow::Context;
use scopeify::options::stage_by_name;
use scopeify::{ScopeConfig, ScopeError, ScopeOptions};

/// Flags given on the command line. They win over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub no_classes: bool,
    pub no_ids: bool,
    pub no_elements: bool,
    pub no_keyframes: bool,
    pub no_font_faces: bool,
    pub asterisk_name: Option<String>,
    pub stages: Vec<String>,
}

pub fn load_config(path: &Path) -> anyhow::Result<ScopeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = ScopeConfig::from_json(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

pub fn build_options(
    config: Option<ScopeConfig>,
    overrides: &CliOverrides,
) -> anyhow::Result<ScopeOptions> {
    let mut options = config
        .unwrap_or_default()
        .into_options()
        .context("invalid scopeify configuration")?;

    if overrides.no_classes {
        options.classes = false;
    }
    if overrides.no_ids {
        options.ids = false;
    }
    if overrides.no_elements {
        options.elements = false;
    }
    if overrides.no_keyframes {
        options.keyframes = false;
    }
    if overrides.no_font_faces {
        options.font_faces = false;
    }
    if let Some(name) = &overrides.asterisk_name {
        options = options.with_asterisk_name(name.clone());
    }
    for name in &overrides.stages {
        let stage = stage_by_name(name).ok_or_else(|| ScopeError::UnknownStage(name.clone()))?;
        options = options.with_stage(stage);
    }

    tracing::debug!(?options, "resolved options");
    Ok(options)
}
