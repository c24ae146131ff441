use std::path::PathBuf;

use sysinfo::System;

/// Per-platform host identity. Each target formats its own OS name and
/// reports where its root filesystem is mounted.
pub trait PlatformExtensions {
    fn os_name() -> String;
    fn root_mount() -> PathBuf;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod other;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use other as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn os_name() -> String {
    platform_impl::Platform::os_name()
}

pub fn root_mount() -> PathBuf {
    platform_impl::Platform::root_mount()
}

/// "family release", used whenever a platform-specific source is missing.
pub fn generic_os_name() -> String {
    let family = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    let release = System::kernel_version().unwrap_or_else(|| "unknown".to_string());
    format!("{family} {release}")
}
