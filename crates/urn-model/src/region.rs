use serde::{Deserialize, Serialize};

use crate::area::CoverageArea;
use crate::grid::GridBounds;
use crate::ids::FormKey;

/// A named region and the areas it claims.
///
/// A definition with no areas, or only degenerate ones, covers nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub areas: Vec<CoverageArea>,
}

impl RegionDefinition {
    pub fn new(key: FormKey) -> Self {
        Self {
            key,
            editor_id: None,
            areas: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: CoverageArea) -> Self {
        self.areas.push(area);
        self
    }

    /// Editor id when present, otherwise the form key.
    pub fn label(&self) -> String {
        match self.editor_id.as_deref().filter(|id| !id.is_empty()) {
            Some(editor_id) => editor_id.to_string(),
            None => self.key.to_string(),
        }
    }
}

/// An open-world map container and its region list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worldspace {
    pub key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    /// Cell grid extent, when the worldspace declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GridBounds>,
    /// Regions in their listing order.
    #[serde(default)]
    pub regions: Vec<RegionDefinition>,
}

impl Worldspace {
    /// Matches a form key string or, failing that, the editor id ignoring case.
    pub fn matches(&self, identity: &str) -> bool {
        if let Ok(key) = identity.parse::<FormKey>() {
            return key == self.key;
        }
        self.editor_id
            .as_deref()
            .is_some_and(|editor_id| editor_id.eq_ignore_ascii_case(identity.trim()))
    }
}
