use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, System};

use super::error::SampleError;
use super::platform;
use super::snapshot::{NetworkCounters, Snapshot, UsageStat, round_tenths};

static NEXT_SAMPLER_ID: AtomicU64 = AtomicU64::new(1);

/// Proof that a sampler's CPU counters have been observed at least once.
///
/// Only [`MetricsSampler::prime`] hands these out, so a non-blocking sample
/// can never run against an empty baseline.
#[derive(Debug)]
pub struct CpuCursor {
    owner: u64,
}

/// How CPU utilization is measured for one sample.
#[derive(Debug, Clone, Copy)]
pub enum CpuMode<'a> {
    /// Observe counters across the window. Blocks the caller for about that long.
    Blocking(Duration),
    /// Utilization since the previous observation held by the sampler.
    NonBlocking(&'a CpuCursor),
}

/// Static host identity, read once per sampler.
#[derive(Clone, Debug)]
struct HostIdentity {
    os_name: String,
    architecture: String,
    physical_cores: usize,
    logical_cores: usize,
}

pub struct MetricsSampler {
    id: u64,
    sys: System,
    identity: HostIdentity,
    mount_point: PathBuf,
    last_cpu_observation: Instant,
}

impl MetricsSampler {
    pub fn new(mount_point: impl Into<PathBuf>) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        let identity = read_identity(&mut sys);

        tracing::debug!(
            os = %identity.os_name,
            arch = %identity.architecture,
            physical = identity.physical_cores,
            logical = identity.logical_cores,
            "sampler.identity"
        );

        MetricsSampler {
            id: NEXT_SAMPLER_ID.fetch_add(1, Ordering::Relaxed),
            sys,
            identity,
            mount_point: mount_point.into(),
            // read_identity refreshed the CPU counters
            last_cpu_observation: Instant::now(),
        }
    }

    /// Throwaway CPU observation that establishes the non-blocking baseline.
    pub fn prime(&mut self) -> CpuCursor {
        self.observe_cpu();
        CpuCursor { owner: self.id }
    }

    pub fn sample(&mut self, mode: CpuMode<'_>) -> Result<Snapshot, SampleError> {
        let _sample_span = tracing::debug_span!("sampler.sample", mode = ?mode).entered();

        let cpu_usage_percent = match mode {
            CpuMode::Blocking(window) => self.measure_cpu_blocking(window),
            CpuMode::NonBlocking(cursor) => self.measure_cpu_since(cursor)?,
        };

        self.sys.refresh_memory();
        let memory = UsageStat::from_used_total(self.sys.used_memory(), self.sys.total_memory());
        let disk = disk_usage(&self.mount_point)?;
        let network = network_counters();

        Ok(Snapshot {
            os_name: self.identity.os_name.clone(),
            architecture: self.identity.architecture.clone(),
            physical_cores: self.identity.physical_cores,
            logical_cores: self.identity.logical_cores,
            cpu_usage_percent,
            memory,
            disk,
            disk_mount: self.mount_point.clone(),
            network,
        })
    }

    fn measure_cpu_blocking(&mut self, window: Duration) -> f64 {
        self.observe_cpu();
        std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        self.observe_cpu();
        self.global_cpu_percent()
    }

    fn measure_cpu_since(&mut self, cursor: &CpuCursor) -> Result<f64, SampleError> {
        if cursor.owner != self.id {
            return Err(SampleError::ForeignCursor);
        }
        self.wait_for_minimum_window();
        self.observe_cpu();
        Ok(self.global_cpu_percent())
    }

    /// Counters closer together than the provider's minimum interval give a
    /// meaningless ratio, so a sample taken right after `prime()` waits out
    /// the remainder (at most `MINIMUM_CPU_UPDATE_INTERVAL`).
    fn wait_for_minimum_window(&self) {
        let remaining =
            MINIMUM_CPU_UPDATE_INTERVAL.saturating_sub(self.last_cpu_observation.elapsed());
        if !remaining.is_zero() {
            tracing::debug!(
                wait_ms = remaining.as_millis() as u64,
                "cpu cursor too fresh, waiting for a measurable window"
            );
            std::thread::sleep(remaining);
        }
    }

    fn observe_cpu(&mut self) {
        self.sys.refresh_cpu_usage();
        self.last_cpu_observation = Instant::now();
    }

    fn global_cpu_percent(&self) -> f64 {
        let usage = f64::from(self.sys.global_cpu_usage());
        if usage.is_finite() {
            round_tenths(usage.clamp(0.0, 100.0))
        } else {
            0.0
        }
    }
}

fn read_identity(sys: &mut System) -> HostIdentity {
    sys.refresh_cpu_usage();
    let logical_cores = sys.cpus().len().max(1);
    let physical_cores = System::physical_core_count()
        .unwrap_or(logical_cores)
        .clamp(1, logical_cores);

    let architecture = match System::cpu_arch() {
        arch if arch.trim().is_empty() => std::env::consts::ARCH.to_string(),
        arch => arch,
    };

    HostIdentity {
        os_name: platform::os_name(),
        architecture,
        physical_cores,
        logical_cores,
    }
}

/// Usage of the filesystem holding `mount_point`: the mounted disk with the
/// longest mount path that is a prefix of it.
fn disk_usage(mount_point: &Path) -> Result<UsageStat, SampleError> {
    std::fs::metadata(mount_point).map_err(|e| SampleError::disk(mount_point, e.to_string()))?;

    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|d| mount_point.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .ok_or_else(|| SampleError::disk(mount_point, "no mounted filesystem covers this path"))?;

    let total = disk.total_space();
    let used = total.saturating_sub(disk.available_space());
    Ok(UsageStat::from_used_total(used, total))
}

fn network_counters() -> NetworkCounters {
    let networks = Networks::new_with_refreshed_list();
    networks
        .iter()
        .fold(NetworkCounters::default(), |acc, (_, data)| NetworkCounters {
            bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
            bytes_received: acc.bytes_received.saturating_add(data.total_received()),
        })
}
