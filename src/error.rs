//! Error types for the stamping pipeline.

use std::{string::FromUtf8Error, time::Duration};
use thiserror::Error;

/// A wrapper for the different ways a stamping run can fail.
#[derive(Debug, Error)]
pub enum StampError {
    /// The describe subprocess could not be launched at all.
    #[error("spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The describe subprocess did not exit within the configured bound.
    #[error("`{command}` did not exit within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// No version descriptor could be obtained and the configuration
    /// demands a hard failure ([`FallbackPolicy::Abort`](crate::FallbackPolicy::Abort)).
    #[error("version descriptor unavailable")]
    DescriptorUnavailable,

    /// The system clock reads earlier than the Unix epoch.
    #[error("system clock is before the epoch")]
    ClockSkew,

    /// Describe output was not UTF-8 encoded.
    #[error("describe output is not UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// An I/O operation on the subprocess failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand for a [`Result`] with a [`StampError`].
pub type StampResult<T> = Result<T, StampError>;
