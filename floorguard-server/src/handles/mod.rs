mod health_handle;
mod record_handle;
mod ventilation_handle;

pub use health_handle::*;
pub use record_handle::*;
pub use ventilation_handle::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub severity: Option<String>,
}

impl ListQuery {
    /// Requested page size, defaulted and kept within `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}
