use std::collections::HashMap;

use serde::Serialize;
use urn_model::{CellRecord, FormKey};

use crate::error::SourceError;
use crate::source::OverrideSink;

/// In-memory output patch holding cell overrides in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct PatchPlugin {
    name: String,
    overrides: Vec<CellRecord>,
    #[serde(skip)]
    positions: HashMap<FormKey, usize>,
}

impl PatchPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overrides(&self) -> &[CellRecord] {
        &self.overrides
    }

    pub fn get(&self, key: &FormKey) -> Option<&CellRecord> {
        self.positions.get(key).map(|&position| &self.overrides[position])
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl OverrideSink for PatchPlugin {
    fn get_or_add_override(&mut self, cell: &CellRecord) -> Result<&mut CellRecord, SourceError> {
        let position = match self.positions.get(&cell.key) {
            Some(&position) => position,
            None => {
                self.overrides.push(cell.clone());
                let position = self.overrides.len() - 1;
                self.positions.insert(cell.key.clone(), position);
                position
            }
        };
        Ok(&mut self.overrides[position])
    }
}
