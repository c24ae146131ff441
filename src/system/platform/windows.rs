use std::path::PathBuf;

use sysinfo::System;

use super::{PlatformExtensions, generic_os_name};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn os_name() -> String {
        // Edition + build, e.g. "Windows 11 Pro" / "Windows 10 (19045)"
        if let Some(long) = System::long_os_version() {
            return long;
        }
        match System::os_version() {
            Some(version) => format!("Windows {version}"),
            None => generic_os_name(),
        }
    }

    fn root_mount() -> PathBuf {
        PathBuf::from("C:\\")
    }
}
