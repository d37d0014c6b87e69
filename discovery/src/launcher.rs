//! Running the external executable.
//!
//! The child inherits the terminal so the mirroring window and its log
//! output behave as if the program had been started by hand. A missing
//! executable is reported as [`LaunchError::ExecutableNotFound`] so the
//! caller can show it and carry on.

use std::io::ErrorKind;
use std::process::Command;
use std::time::Duration;

use scrcpy_form_core::Invocation;
use tracing::{debug, info};
use wait_timeout::ChildExt;

use crate::error::LaunchError;

/// Result of a completed (or abandoned) launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Exit code, `None` when killed by a signal or by the timeout.
    pub exit_code: Option<i32>,
    /// The timeout elapsed and the child was killed.
    pub timed_out: bool,
}

impl LaunchOutcome {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Spawns `invocation` and waits for it, killing it after `timeout`.
pub fn launch(
    invocation: &Invocation,
    timeout: Option<Duration>,
) -> Result<LaunchOutcome, LaunchError> {
    info!(command = %invocation, "Launching");
    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .spawn()
        .map_err(|source| spawn_error(&invocation.program, source))?;

    let wait_error = |source| LaunchError::Wait {
        program: invocation.program.clone(),
        source,
    };

    let Some(timeout) = timeout else {
        let status = child.wait().map_err(wait_error)?;
        debug!(program = %invocation.program, status = ?status.code(), "Process exited");
        return Ok(LaunchOutcome {
            exit_code: status.code(),
            timed_out: false,
        });
    };

    match child.wait_timeout(timeout).map_err(wait_error)? {
        Some(status) => {
            debug!(program = %invocation.program, status = ?status.code(), "Process exited");
            Ok(LaunchOutcome {
                exit_code: status.code(),
                timed_out: false,
            })
        }
        None => {
            debug!(
                program = %invocation.program,
                timeout_ms = timeout.as_millis() as u64,
                "Process timed out, killing"
            );
            let _ = child.kill();
            let _ = child.wait();
            Ok(LaunchOutcome {
                exit_code: None,
                timed_out: true,
            })
        }
    }
}

fn spawn_error(program: &str, source: std::io::Error) -> LaunchError {
    if source.kind() == ErrorKind::NotFound {
        LaunchError::ExecutableNotFound {
            program: program.to_string(),
        }
    } else {
        LaunchError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}
