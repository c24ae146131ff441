use std::path::PathBuf;

use sysinfo::System;

use super::{PlatformExtensions, generic_os_name};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn os_name() -> String {
        // Kernel family + release, e.g. "Linux 6.8.0-45-generic"
        match System::kernel_version() {
            Some(release) => format!("Linux {release}"),
            None => generic_os_name(),
        }
    }

    fn root_mount() -> PathBuf {
        PathBuf::from("/")
    }
}
