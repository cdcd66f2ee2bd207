#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

const MAX_LOCAL_ID: u32 = 0x00FF_FFFF;

/// Identity of a record: a 24-bit local id scoped to the plugin that
/// introduced it.
///
/// Rendered as `000D62:Skyrim.esm`. The plugin name is compared
/// case-insensitively, matching how plugin files are looked up.
#[derive(Debug, Clone, Eq)]
pub struct FormKey {
    id: u32,
    plugin: String,
}

/// Regions are referenced by the form key of their region record.
pub type RegionId = FormKey;

impl FormKey {
    pub fn new(id: u32, plugin: impl Into<String>) -> Result<Self, ModelError> {
        let plugin = plugin.into();
        let trimmed = plugin.trim();
        if trimmed.is_empty() {
            return Err(ModelError::MissingPlugin(format!("{id:06X}:")));
        }
        if id > MAX_LOCAL_ID {
            return Err(ModelError::FormIdOutOfRange {
                value: format!("{id:X}:{trimmed}"),
                id,
            });
        }
        Ok(Self {
            id,
            plugin: trimmed.to_string(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// The six-digit hex local id, used when a record has no better label.
    pub fn id_string(&self) -> String {
        format!("{:06X}", self.id)
    }
}

impl PartialEq for FormKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.plugin.eq_ignore_ascii_case(&other.plugin)
    }
}

impl std::hash::Hash for FormKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        for byte in self.plugin.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.id, self.plugin)
    }
}

impl FromStr for FormKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((id, plugin)) = trimmed.split_once(':') else {
            return Err(ModelError::MalformedFormKey(s.to_string()));
        };
        if plugin.trim().is_empty() {
            return Err(ModelError::MissingPlugin(s.to_string()));
        }
        let id = id.trim();
        if id.is_empty() || id.len() > 8 {
            return Err(ModelError::MalformedFormKey(s.to_string()));
        }
        let id = u32::from_str_radix(id, 16)
            .map_err(|_| ModelError::MalformedFormKey(s.to_string()))?;
        if id > MAX_LOCAL_ID {
            return Err(ModelError::FormIdOutOfRange {
                value: s.to_string(),
                id,
            });
        }
        Self::new(id, plugin)
    }
}

impl serde::Serialize for FormKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for FormKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
