use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum number of named groups a [`GroupTable`] can hold (one bit each).
pub const MAX_GROUPS: usize = 32;

/// Group membership bitmask carried by every particle and every modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GroupMask(pub u32);

impl GroupMask {
    /// The implicit group every particle belongs to.
    pub const ALL: GroupMask = GroupMask(1);

    pub fn from_bit(bit: usize) -> Self {
        Self(1 << bit)
    }

    /// True when the two masks share at least one group.
    #[inline]
    pub fn intersects(self, other: GroupMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn with(self, other: GroupMask) -> Self {
        Self(self.0 | other.0)
    }

    pub fn without(self, other: GroupMask) -> Self {
        Self(self.0 & !other.0)
    }
}

/// Name → bit lookup for groups. `"all"` always occupies bit 0.
#[derive(Debug, Clone)]
pub struct GroupTable {
    names: Vec<String>,
}

impl Default for GroupTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupTable {
    pub fn new() -> Self {
        Self {
            names: vec!["all".to_string()],
        }
    }

    /// Returns the mask for `name`, defining a new group if needed.
    pub fn define(&mut self, name: &str) -> Result<GroupMask, ConfigError> {
        if let Some(mask) = self.find(name) {
            return Ok(mask);
        }
        if self.names.len() >= MAX_GROUPS {
            return Err(ConfigError::TooManyGroups { max: MAX_GROUPS });
        }
        self.names.push(name.to_string());
        Ok(GroupMask::from_bit(self.names.len() - 1))
    }

    pub fn find(&self, name: &str) -> Option<GroupMask> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(GroupMask::from_bit)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
