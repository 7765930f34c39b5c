//! Scope Options
//!
//! Per-pass switches and hooks, plus the JSON configuration they can be loaded from.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, ScopeError};
use crate::scoper::{make_scoper, ScopeFn};

/// Name the universal selector is scoped under unless configured otherwise.
pub const DEFAULT_ASTERISK_NAME: &str = "__asterisk";

/// Builds the scoping function for one stylesheet from its source text.
pub type ScoperFactory = Arc<dyn Fn(&str) -> ScopeFn + Send + Sync>;

/// Maps an element name before it is scoped.
pub type NameTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());

/// Name used for `*` once it is turned into a class.
#[derive(Clone)]
pub enum AsteriskName {
    Literal(String),
    /// Called every time a `*` is scoped.
    Generated(Arc<dyn Fn() -> String + Send + Sync>),
}

impl AsteriskName {
    pub fn resolve(&self) -> String {
        match self {
            AsteriskName::Literal(name) => name.clone(),
            AsteriskName::Generated(generate) => generate(),
        }
    }
}

impl Default for AsteriskName {
    fn default() -> Self {
        AsteriskName::Literal(DEFAULT_ASTERISK_NAME.to_string())
    }
}

impl fmt::Debug for AsteriskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsteriskName::Literal(name) => f.debug_tuple("Literal").field(name).finish(),
            AsteriskName::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// A text transform run over the stylesheet before scoping.
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;
    fn process(&self, css: &str) -> String;
}

/// Removes `/* ... */` comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripComments;

impl Stage for StripComments {
    fn name(&self) -> &str {
        "strip-comments"
    }

    fn process(&self, css: &str) -> String {
        COMMENT_RE.replace_all(css, "").into_owned()
    }
}

/// Look up a built-in stage by the name used in configuration files.
pub fn stage_by_name(name: &str) -> Option<Arc<dyn Stage>> {
    match name {
        "strip-comments" => Some(Arc::new(StripComments)),
        _ => None,
    }
}

#[derive(Clone)]
pub struct ScopeOptions {
    pub classes: bool,
    pub ids: bool,
    pub elements: bool,
    pub keyframes: bool,
    pub font_faces: bool,
    pub asterisk_name: AsteriskName,
    pub element_name_transform: NameTransform,
    pub scoper_factory: ScoperFactory,
    pub stages: Vec<Arc<dyn Stage>>,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        ScopeOptions {
            classes: true,
            ids: true,
            elements: true,
            keyframes: true,
            font_faces: true,
            asterisk_name: AsteriskName::default(),
            element_name_transform: Arc::new(|name: &str| name.to_string()),
            scoper_factory: Arc::new(make_scoper),
            stages: Vec::new(),
        }
    }
}

impl fmt::Debug for ScopeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages: Vec<&str> = self.stages.iter().map(|stage| stage.name()).collect();
        f.debug_struct("ScopeOptions")
            .field("classes", &self.classes)
            .field("ids", &self.ids)
            .field("elements", &self.elements)
            .field("keyframes", &self.keyframes)
            .field("font_faces", &self.font_faces)
            .field("asterisk_name", &self.asterisk_name)
            .field("stages", &stages)
            .finish_non_exhaustive()
    }
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(mut self, enabled: bool) -> Self {
        self.classes = enabled;
        self
    }

    pub fn with_ids(mut self, enabled: bool) -> Self {
        self.ids = enabled;
        self
    }

    pub fn with_elements(mut self, enabled: bool) -> Self {
        self.elements = enabled;
        self
    }

    pub fn with_keyframes(mut self, enabled: bool) -> Self {
        self.keyframes = enabled;
        self
    }

    pub fn with_font_faces(mut self, enabled: bool) -> Self {
        self.font_faces = enabled;
        self
    }

    pub fn with_asterisk_name(mut self, name: impl Into<String>) -> Self {
        self.asterisk_name = AsteriskName::Literal(name.into());
        self
    }

    pub fn with_asterisk_name_fn<F>(mut self, generate: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.asterisk_name = AsteriskName::Generated(Arc::new(generate));
        self
    }

    pub fn with_element_name_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.element_name_transform = Arc::new(transform);
        self
    }

    pub fn with_scoper_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> ScopeFn + Send + Sync + 'static,
    {
        self.scoper_factory = Arc::new(factory);
        self
    }

    pub fn with_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn scoper_for(&self, source: &str) -> ScopeFn {
        (self.scoper_factory)(source)
    }
}

/// JSON configuration, e.g. `{ "elements": false, "plugins": ["strip-comments"] }`.
/// Absent keys leave the corresponding option untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    pub classes: Option<bool>,
    pub ids: Option<bool>,
    pub elements: Option<bool>,
    pub keyframes: Option<bool>,
    pub font_faces: Option<bool>,
    pub asterisk_name: Option<String>,
    /// Kept untyped so that a non-array value is reported as malformed options
    /// rather than as a generic parse failure.
    pub plugins: Option<serde_json::Value>,
}

impl ScopeConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_options(self) -> Result<ScopeOptions> {
        self.apply_to(ScopeOptions::default())
    }

    /// Overlay this configuration on existing options. Fails before touching
    /// anything if `plugins` is not an array of known stage names.
    pub fn apply_to(self, mut options: ScopeOptions) -> Result<ScopeOptions> {
        let stages = match self.plugins {
            None => Vec::new(),
            Some(plugins) => resolve_stages(plugins)?,
        };

        if let Some(classes) = self.classes {
            options.classes = classes;
        }
        if let Some(ids) = self.ids {
            options.ids = ids;
        }
        if let Some(elements) = self.elements {
            options.elements = elements;
        }
        if let Some(keyframes) = self.keyframes {
            options.keyframes = keyframes;
        }
        if let Some(font_faces) = self.font_faces {
            options.font_faces = font_faces;
        }
        if let Some(name) = self.asterisk_name {
            options.asterisk_name = AsteriskName::Literal(name);
        }
        options.stages.extend(stages);
        Ok(options)
    }
}

fn resolve_stages(plugins: serde_json::Value) -> Result<Vec<Arc<dyn Stage>>> {
    let entries = match plugins {
        serde_json::Value::Array(entries) => entries,
        other => {
            return Err(ScopeError::MalformedOptions {
                found: other.to_string(),
            })
        }
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            serde_json::Value::String(name) => {
                stage_by_name(&name).ok_or(ScopeError::UnknownStage(name))
            }
            other => Err(ScopeError::MalformedOptions {
                found: other.to_string(),
            }),
        })
        .collect()
}
