use std::path::PathBuf;
use std::time::Duration;

use crate::system::platform;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(500);

/// Run-time settings. There is no config file; everything has a fixed
/// default and the CLI only picks the run mode.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub refresh_interval: Duration,
    pub cpu_sample_window: Duration,
    pub mount_point: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            cpu_sample_window: DEFAULT_CPU_SAMPLE_WINDOW,
            mount_point: platform::root_mount(),
        }
    }
}

impl DashboardConfig {
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_cpu_sample_window(mut self, window: Duration) -> Self {
        self.cpu_sample_window = window;
        self
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<PathBuf>) -> Self {
        self.mount_point = mount_point.into();
        self
    }
}
