use crate::prelude::*;

/// Per-operation timeout applied when a descriptor omits one.
pub const DEFAULT_TIMEOUT_MINUTES: u64 = 20;

///
/// Timeouts
///
/// Pass-through configuration for the generated runtime client. The
/// resolver defaults absent values but never interprets them.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Timeouts {
    #[serde(default = "default_minutes")]
    pub insert_minutes: u64,

    #[serde(default = "default_minutes")]
    pub update_minutes: u64,

    #[serde(default = "default_minutes")]
    pub delete_minutes: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            insert_minutes: DEFAULT_TIMEOUT_MINUTES,
            update_minutes: DEFAULT_TIMEOUT_MINUTES,
            delete_minutes: DEFAULT_TIMEOUT_MINUTES,
        }
    }
}

const fn default_minutes() -> u64 {
    DEFAULT_TIMEOUT_MINUTES
}
