//! Allocation limits for a [`Queue`](crate::Queue).
//!
//! A limit that an insertion would exceed makes that insertion fail exactly
//! like an out-of-memory condition, so callers can exercise the
//! no-partial-insertion paths deterministically.

use serde::{Deserialize, Serialize};

use crate::error::{QueueError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of live nodes. `None` means unlimited.
    pub max_nodes: Option<usize>,
    /// Maximum total bytes of stored text. `None` means unlimited.
    pub max_bytes: Option<usize>,
}

impl QueueConfig {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Parse and validate a JSON document such as `{"max_nodes": 64}`.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: QueueConfig = serde_json::from_str(content)?;
        config.validate()?;
        tracing::debug!(?config, "loaded queue config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == Some(0) {
            return Err(QueueError::Config("max_nodes must be at least 1".to_string()));
        }
        Ok(())
    }

    pub(crate) fn admits_node(&self, live_nodes: usize) -> bool {
        self.max_nodes.map_or(true, |max| live_nodes < max)
    }

    pub(crate) fn admits_bytes(&self, stored: usize, extra: usize) -> bool {
        match self.max_bytes {
            Some(max) => stored.checked_add(extra).map_or(false, |total| total <= max),
            None => true,
        }
    }
}
