use std::path::PathBuf;

use super::{PlatformExtensions, generic_os_name};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn os_name() -> String {
        generic_os_name()
    }

    fn root_mount() -> PathBuf {
        PathBuf::from("/")
    }
}
