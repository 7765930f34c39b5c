//! Name Mapping
//!
//! Accumulates original name -> scoped name pairs for one stylesheet pass,
//! partitioned by category. Keys and values are bare names (no `.` / `#`).

use indexmap::IndexMap;
use serde::Serialize;

/// The category a mapping entry is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingCategory {
    Elements,
    Classes,
    Ids,
    Keyframes,
    FontFaces,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameMapping {
    pub elements: IndexMap<String, String>,
    pub classes: IndexMap<String, String>,
    pub ids: IndexMap<String, String>,
    pub keyframes: IndexMap<String, String>,
    pub font_faces: IndexMap<String, String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair. A later write for the same original name wins.
    pub fn insert(
        &mut self,
        category: MappingCategory,
        original: impl Into<String>,
        scoped: impl Into<String>,
    ) {
        self.category_mut(category)
            .insert(original.into(), scoped.into());
    }

    pub fn get(&self, category: MappingCategory, original: &str) -> Option<&str> {
        self.category(category).get(original).map(String::as_str)
    }

    pub fn category(&self, category: MappingCategory) -> &IndexMap<String, String> {
        match category {
            MappingCategory::Elements => &self.elements,
            MappingCategory::Classes => &self.classes,
            MappingCategory::Ids => &self.ids,
            MappingCategory::Keyframes => &self.keyframes,
            MappingCategory::FontFaces => &self.font_faces,
        }
    }

    fn category_mut(&mut self, category: MappingCategory) -> &mut IndexMap<String, String> {
        match category {
            MappingCategory::Elements => &mut self.elements,
            MappingCategory::Classes => &mut self.classes,
            MappingCategory::Ids => &mut self.ids,
            MappingCategory::Keyframes => &mut self.keyframes,
            MappingCategory::FontFaces => &mut self.font_faces,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
            && self.classes.is_empty()
            && self.ids.is_empty()
            && self.keyframes.is_empty()
            && self.font_faces.is_empty()
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.elements.len()
            + self.classes.len()
            + self.ids.len()
            + self.keyframes.len()
            + self.font_faces.len()
    }
}
