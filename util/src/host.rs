//! Host platform (linux for example) utility functions

use std::path::PathBuf;

use uname;

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the root directory of the software install from the
/// `UAV_CTRL_SW_ROOT` environment variable.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    Ok(PathBuf::from(std::env::var("UAV_CTRL_SW_ROOT")?))
}
