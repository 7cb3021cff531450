//! Compiler define flag construction and the build-log banner.

use crate::{
    config::StampConfig,
    error::{StampError, StampResult},
};
use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};

const BANNER_SEPARATOR: &str = "--------------------------------------------------";

/// Format a preprocessor define flag: `-D <name>=\"<value>\"`.
///
/// The escaped quotes make the value a string literal for the downstream
/// compiler. The value is concatenated verbatim; quote characters embedded
/// in it are not re-escaped and will break the resulting flag.
pub fn define_flag(name: &str, value: &str) -> String {
    format!("-D {name}=\\\"{value}\\\"")
}

/// Build the version define flag and print the firmware revision banner.
pub fn version_flag(config: &StampConfig, descriptor: &str) -> String {
    println!("{BANNER_SEPARATOR}");
    println!("Firmware Revision: {descriptor}");
    println!("{BANNER_SEPARATOR}");

    define_flag(&config.version_macro, descriptor)
}

/// Build the timestamp define flag from an epoch-seconds value.
pub fn build_time_flag(config: &StampConfig, epoch: u64) -> String {
    define_flag(&config.build_time_macro, &epoch.to_string())
}

/// Read the system clock once, as seconds since the Unix epoch.
pub fn epoch_seconds() -> StampResult<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| StampError::ClockSkew)?;

    debug!("build timestamp: {}", elapsed.as_secs());
    Ok(elapsed.as_secs())
}
