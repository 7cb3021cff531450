//! Queries git for the nearest-tag descriptor of the current checkout.

use crate::{
    config::{StampConfig, TagSelection},
    error::{StampError, StampResult},
};
use log::{debug, warn};
use std::{
    io::ErrorKind,
    process::{Command, Output, Stdio},
    thread,
    time::{Duration, Instant},
};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of asking version control for a version descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// A non-empty, whitespace-trimmed descriptor such as `v1.2.3-4-gabcdef0`.
    Described(String),
    /// Git is missing, the directory is not a repository, no tag is
    /// reachable, or describe produced nothing usable.
    Unavailable,
}

/// Run `git describe` and derive the version descriptor.
///
/// A failing or missing git degrades to [`Descriptor::Unavailable`]; only a
/// timeout, non-UTF-8 output, or an I/O fault while waiting on the child is
/// a hard error.
pub fn describe(config: &StampConfig) -> StampResult<Descriptor> {
    let mut cmd = Command::new("git");
    cmd.arg("describe");

    if config.tag_selection == TagSelection::AnyTag {
        cmd.arg("--tags");
    }
    if config.dirty_suffix {
        cmd.arg("--dirty");
    }
    if let Some(dir) = &config.work_dir {
        cmd.current_dir(dir);
    }

    let output = match run_bounded(cmd, "git describe", config.timeout) {
        Ok(output) => output,
        // A missing git binary degrades the same way a failing one does.
        Err(StampError::Spawn { source, .. }) if source.kind() == ErrorKind::NotFound => {
            warn!("git executable not found");
            return Ok(Descriptor::Unavailable);
        }
        Err(other) => return Err(other),
    };

    interpret(output)
}

/// Turn a finished describe run into a descriptor.
fn interpret(output: Output) -> StampResult<Descriptor> {
    if !output.status.success() {
        // Partial stdout from a failed describe is discarded on purpose.
        warn!(
            "git describe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(Descriptor::Unavailable);
    }

    let text = String::from_utf8(output.stdout)?;
    let trimmed = text.trim();

    if trimmed.is_empty() {
        warn!("git describe produced no output");
        return Ok(Descriptor::Unavailable);
    }

    debug!("descriptor: {trimmed}");
    Ok(Descriptor::Described(trimmed.to_string()))
}

/// Run a command to completion, killing it if it outlives `timeout`.
///
/// The child's stdout must stay below the pipe buffer size, since the pipe
/// is only drained after exit. Describe output is a single short line.
fn run_bounded(mut cmd: Command, label: &str, timeout: Duration) -> StampResult<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| StampError::Spawn {
        command: label.to_string(),
        source,
    })?;

    let deadline = Instant::now() + timeout;

    loop {
        if child.try_wait()?.is_some() {
            return Ok(child.wait_with_output()?);
        }

        if Instant::now() >= deadline {
            if let Err(why) = child.kill() {
                warn!("failed to kill timed-out `{label}`: {why}");
            }
            let _ = child.wait();

            return Err(StampError::Timeout {
                command: label.to_string(),
                timeout,
            });
        }

        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackPolicy;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let output = run_bounded(sh("printf '  v1.0.0-2-gdeadbee\\n'"), "sh", Duration::from_secs(5))
            .unwrap();

        assert_eq!(
            interpret(output).unwrap(),
            Descriptor::Described("v1.0.0-2-gdeadbee".to_string())
        );
    }

    #[test]
    fn non_utf8_output_is_a_hard_error() {
        // 0xFF 0xFE is not valid UTF-8 in any position.
        let output =
            run_bounded(sh("printf '\\377\\376'"), "sh", Duration::from_secs(5)).unwrap();

        assert!(matches!(
            interpret(output),
            Err(StampError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn whitespace_only_output_is_unavailable() {
        let output = run_bounded(sh("printf '  \\n'"), "sh", Duration::from_secs(5)).unwrap();

        assert_eq!(interpret(output).unwrap(), Descriptor::Unavailable);
    }

    #[test]
    fn bounded_run_kills_hung_child() {
        let err = run_bounded(sh("sleep 30"), "sh", Duration::from_millis(100)).unwrap_err();

        match err {
            StampError::Timeout { command, timeout } => {
                assert_eq!(command, "sh");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected timeout, got {other}"),
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let err = run_bounded(
            Command::new("fwstamp-no-such-binary"),
            "fwstamp-no-such-binary",
            Duration::from_secs(1),
        )
        .unwrap_err();

        assert!(matches!(err, StampError::Spawn { .. }));
    }

    #[test]
    fn non_repository_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = StampConfig {
            work_dir: Some(dir.path().to_path_buf()),
            on_unavailable: FallbackPolicy::Empty,
            ..StampConfig::default()
        };

        assert_eq!(describe(&config).unwrap(), Descriptor::Unavailable);
    }
}
