use serde::{Deserialize, Serialize};

use crate::grid::GridPoint;
use crate::ids::{FormKey, RegionId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFlags {
    #[serde(default)]
    pub interior: bool,
}

/// One cell record as it appears in the winning override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridPoint>,
    #[serde(default)]
    pub flags: CellFlags,
    /// `None` when the record has no region list at all, which is distinct
    /// from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<RegionId>>,
    /// Unresolved back-reference to the owning worldspace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worldspace: Option<FormKey>,
}

impl CellRecord {
    pub fn new(key: FormKey) -> Self {
        Self {
            key,
            name: None,
            editor_id: None,
            grid: None,
            flags: CellFlags::default(),
            regions: None,
            worldspace: None,
        }
    }

    /// Exterior cell at `grid` inside `worldspace`.
    pub fn exterior(key: FormKey, worldspace: FormKey, grid: impl Into<GridPoint>) -> Self {
        Self {
            grid: Some(grid.into()),
            worldspace: Some(worldspace),
            ..Self::new(key)
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_editor_id(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    #[must_use]
    pub fn with_regions(mut self, regions: impl IntoIterator<Item = RegionId>) -> Self {
        self.regions = Some(regions.into_iter().collect());
        self
    }

    #[must_use]
    pub fn interior(mut self) -> Self {
        self.flags.interior = true;
        self
    }

    pub fn is_interior(&self) -> bool {
        self.flags.interior
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn editor_id(&self) -> Option<&str> {
        non_empty(self.editor_id.as_deref())
    }

    /// Name, else editor id, else the raw local id.
    pub fn display_name(&self) -> String {
        self.name()
            .or_else(|| self.editor_id())
            .map_or_else(|| self.key.id_string(), str::to_string)
    }

    /// The worldspace's always-loaded cell sits at the origin with neither a
    /// name nor an editor id.
    pub fn looks_persistent(&self) -> bool {
        self.grid.is_some_and(|grid| grid.is_origin())
            && self.name().is_none()
            && self.editor_id().is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
