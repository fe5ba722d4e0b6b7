//! Fields shared by every event

use serde::{Deserialize, Serialize};

/// Common header of an event payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBase {
    pub name: String,
    pub version: u32,
    pub block_height: u64,
}

impl EventBase {
    pub fn new(name: impl Into<String>, version: u32, block_height: u64) -> Self {
        Self {
            name: name.into(),
            version,
            block_height,
        }
    }
}
