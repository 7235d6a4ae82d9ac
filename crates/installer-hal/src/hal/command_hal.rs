//! Storage/system HAL backed by external helper programs.
//!
//! Each operation maps to a configured command. Apply-storage requests are
//! written to the helper's stdin as JSON so secrets never show up in the
//! process list. Every command runs under a timeout; a helper that hangs is
//! killed and reported as [`HalError::CommandTimeout`].

use super::{ApplyStorageRequest, ExitAction, StorageOps, SystemOps};
use crate::{HalError, HalResult};
use serde::Deserialize;
use std::io::{Read, Write};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const EXIT_TIMEOUT: Duration = Duration::from_secs(60);

/// A program plus its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandHalConfig {
    pub apply_storage: Option<CommandSpec>,
    pub reset_partitioning: Option<CommandSpec>,
    pub reboot: Option<CommandSpec>,
    pub quit: Option<CommandSpec>,
    pub storage_timeout: Duration,
}

impl Default for CommandHalConfig {
    fn default() -> Self {
        Self {
            apply_storage: None,
            reset_partitioning: None,
            reboot: Some(CommandSpec::new("systemctl", &["reboot"])),
            quit: None,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandHal {
    config: CommandHalConfig,
}

impl CommandHal {
    pub fn new(config: CommandHalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CommandHalConfig {
        &self.config
    }
}

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HalError::CommandNotFound(program.to_string()),
        std::io::ErrorKind::PermissionDenied => HalError::PermissionDenied,
        _ => HalError::Io(err),
    }
}

fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn output_with_timeout(
    spec: &CommandSpec,
    stdin_payload: Option<Vec<u8>>,
    timeout: Duration,
) -> HalResult<Output> {
    let program = spec.program.as_str();
    let mut cmd = Command::new(program);
    cmd.args(&spec.args)
        .stdin(if stdin_payload.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| map_command_err(program, e))?;

    let stdin = child.stdin.take();
    let stdin_handle = std::thread::spawn(move || {
        if let (Some(mut pipe), Some(payload)) = (stdin, stdin_payload) {
            // Broken pipe just means the helper did not read its input.
            let _ = pipe.write_all(&payload);
        }
    });

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    // Drain pipes concurrently to avoid deadlocks on large output.
    let stdout_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout.take() {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr.take() {
            let _ = err.read_to_end(&mut buf);
        }
        buf
    });

    let status = match child.wait_timeout(timeout).map_err(HalError::Io)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdin_handle.join();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    let _ = stdin_handle.join();
    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

fn status_with_timeout(
    spec: &CommandSpec,
    stdin_payload: Option<Vec<u8>>,
    timeout: Duration,
) -> HalResult<()> {
    let output = output_with_timeout(spec, stdin_payload, timeout)?;
    if !output.status.success() {
        return Err(output_failed(&spec.program, &output));
    }
    Ok(())
}

impl StorageOps for CommandHal {
    fn apply_storage(&self, request: &ApplyStorageRequest) -> HalResult<()> {
        let spec = self
            .config
            .apply_storage
            .as_ref()
            .ok_or(HalError::NotConfigured("apply-storage"))?;
        log::info!("Applying storage via {} ({:?})", spec.program, request);
        let payload = serde_json::to_vec(request)?;
        status_with_timeout(spec, Some(payload), self.config.storage_timeout)
    }

    fn reset_partitioning(&self) -> HalResult<()> {
        let spec = self
            .config
            .reset_partitioning
            .as_ref()
            .ok_or(HalError::NotConfigured("reset-partitioning"))?;
        log::info!("Resetting partitioning via {}", spec.program);
        status_with_timeout(spec, None, self.config.storage_timeout)
    }
}

impl SystemOps for CommandHal {
    fn exit(&self, action: ExitAction) -> HalResult<()> {
        let spec = match action {
            ExitAction::Reboot => self.config.reboot.as_ref(),
            ExitAction::Quit => self.config.quit.as_ref(),
        };
        match spec {
            Some(spec) => {
                log::info!("Leaving installer ({}) via {}", action, spec.program);
                status_with_timeout(spec, None, EXIT_TIMEOUT)
            }
            None => {
                log::info!("Leaving installer ({}), no command configured", action);
                Ok(())
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", &["-c", script])
    }

    fn hal_with(apply: Option<CommandSpec>, timeout: Duration) -> CommandHal {
        CommandHal::new(CommandHalConfig {
            apply_storage: apply,
            reset_partitioning: Some(sh("exit 0")),
            reboot: None,
            quit: None,
            storage_timeout: timeout,
        })
    }

    #[test]
    fn apply_storage_passes_request_on_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("request.json");
        let script = format!("cat > {}", out.display());
        let hal = hal_with(Some(sh(&script)), Duration::from_secs(10));

        hal.apply_storage(&ApplyStorageRequest::with_encryption(true, "s3cret"))
            .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["encrypt"], true);
        assert_eq!(value["encrypt_password"], "s3cret");
    }

    #[test]
    fn failing_helper_reports_stderr() {
        let hal = hal_with(Some(sh("echo 'bad disk' >&2; exit 3")), Duration::from_secs(10));

        let err = hal
            .apply_storage(&ApplyStorageRequest::default())
            .unwrap_err();
        match err {
            HalError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "bad disk");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hung_helper_times_out() {
        let hal = hal_with(Some(sh("sleep 5")), Duration::from_millis(200));

        let err = hal
            .apply_storage(&ApplyStorageRequest::default())
            .unwrap_err();
        assert!(matches!(err, HalError::CommandTimeout { .. }));
    }

    #[test]
    fn missing_command_is_not_configured() {
        let hal = hal_with(None, Duration::from_secs(1));

        let err = hal
            .apply_storage(&ApplyStorageRequest::default())
            .unwrap_err();
        assert!(matches!(err, HalError::NotConfigured("apply-storage")));
    }

    #[test]
    fn quit_without_command_is_a_no_op() {
        let hal = hal_with(None, Duration::from_secs(1));
        assert!(hal.exit(ExitAction::Quit).is_ok());
    }
}
