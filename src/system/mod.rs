pub mod error;
pub mod platform;
pub mod sampler;
pub mod snapshot;

pub use error::SampleError;
pub use sampler::{CpuCursor, CpuMode, MetricsSampler};
pub use snapshot::{NetworkCounters, Snapshot, UsageStat};
