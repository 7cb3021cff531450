#![warn(clippy::unwrap_used)]
//! Build-time firmware version and timestamp stamping.
//!
//! `fwstamp` derives a human-readable version descriptor from the nearest
//! reachable git tag (`git describe`) and formats it, together with the
//! current build time in epoch seconds, into preprocessor define flags of
//! the shape `-D NAME=\"value\"`. Both flags are appended to a
//! caller-supplied [`BuildEnv`], making every translation unit of a
//! firmware build aware of its own revision.
//!
//! # Example
//!
//! ```no_run
//! use fwstamp::{register_version_flags, StampConfig};
//!
//! let mut build_flags: Vec<String> = Vec::new();
//! register_version_flags(&mut build_flags, &StampConfig::default())
//!     .expect("stamping failed");
//!
//! // build_flags now ends with:
//! //   -D AUTO_VERSION=\"v1.2.3-4-gabcdef0\"
//! //   -D AUTO_BUILD_TIME=\"1700000000\"
//! ```
//!
//! By default a failing or missing git degrades to an empty-quoted version
//! macro and the build carries on; set
//! [`StampConfig::on_unavailable`] to [`FallbackPolicy::Substitute`] or
//! [`FallbackPolicy::Abort`] to change that.

use log::{debug, warn};

mod config;
mod describe;
mod env;
mod error;
mod flags;

pub use config::{FallbackPolicy, StampConfig, TagSelection};
pub use describe::{describe, Descriptor};
pub use env::BuildEnv;
pub use error::{StampError, StampResult};
pub use flags::{build_time_flag, define_flag, epoch_seconds, version_flag};

/// Derive the version and timestamp define flags and append them to `env`.
///
/// Runs once per build invocation, strictly linear: describe the checkout,
/// apply the unavailability policy, format the version flag (printing the
/// revision banner), read the clock, format the timestamp flag, and append
/// `[version, timestamp]` in that order.
///
/// # Errors
///
/// Fails if the describe subprocess times out or produces non-UTF-8 output,
/// if the system clock reads before the epoch, or if the descriptor is
/// unavailable under [`FallbackPolicy::Abort`].
pub fn register_version_flags(
    env: &mut impl BuildEnv,
    config: &StampConfig,
) -> StampResult<()> {
    debug!("querying version control for a descriptor");

    let version = match describe::describe(config)? {
        Descriptor::Described(text) => text,
        Descriptor::Unavailable => match &config.on_unavailable {
            FallbackPolicy::Empty => {
                warn!("no version descriptor, baking an empty {}", config.version_macro);
                String::new()
            }
            FallbackPolicy::Substitute(placeholder) => {
                warn!(
                    "no version descriptor, substituting \"{placeholder}\" for {}",
                    config.version_macro
                );
                placeholder.clone()
            }
            FallbackPolicy::Abort => return Err(StampError::DescriptorUnavailable),
        },
    };

    let version_flag = flags::version_flag(config, &version);
    let time_flag = flags::build_time_flag(config, flags::epoch_seconds()?);

    env.append_flags(&[version_flag, time_flag]);
    Ok(())
}
