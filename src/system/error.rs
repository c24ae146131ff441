use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleError {
    /// A required metric could not be read. Never reported as zeros.
    #[error("{metric} unavailable: {reason}")]
    MetricUnavailable {
        metric: String,
        reason: String,
    },

    #[error("CPU cursor was issued by a different sampler")]
    ForeignCursor,
}

impl SampleError {
    pub fn disk(mount_point: &Path, reason: impl Into<String>) -> Self {
        SampleError::MetricUnavailable {
            metric: format!("disk usage for {}", mount_point.display()),
            reason: reason.into(),
        }
    }
}
