use std::path::PathBuf;

use sysinfo::System;

use super::{PlatformExtensions, generic_os_name};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn os_name() -> String {
        // Product version ("macOS 14.5") reads better than the Darwin release
        match System::os_version() {
            Some(version) => format!("macOS {version}"),
            None => generic_os_name(),
        }
    }

    fn root_mount() -> PathBuf {
        PathBuf::from("/")
    }
}
