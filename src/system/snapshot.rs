use std::path::PathBuf;

/// Used/total pair as reported by the OS, with the percentage it accounts for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageStat {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub percent: f64,
}

impl UsageStat {
    /// Build from raw counters. `used` is capped at `total`; the percentage
    /// is rounded to one decimal, matching what OS tools report.
    pub fn from_used_total(used: u64, total: u64) -> Self {
        let used_bytes = used.min(total);
        let percent = if total > 0 {
            round_tenths(used_bytes as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        UsageStat {
            used_bytes,
            total_bytes: total,
            percent,
        }
    }
}

/// Cumulative byte counters since interface reset, summed over all interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub os_name: String,
    pub architecture: String,
    pub physical_cores: usize,
    pub logical_cores: usize,
    pub cpu_usage_percent: f64,
    pub memory: UsageStat,
    pub disk: UsageStat,
    pub disk_mount: PathBuf,
    pub network: NetworkCounters,
}

pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
