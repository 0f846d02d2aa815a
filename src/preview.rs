// src/preview.rs
// =============================================================================
// Runs generated code for a quick preview, if the user has allowed it.
//
// Model output is untrusted, so it is never run inside this process.
// When previews are enabled the code is written to a throwaway directory and
// handed to a separate command (python3 -I by default) that:
// - starts with an empty environment apart from PATH (no API keys leak)
// - runs inside the temp directory with stdin closed
// - is killed when the timeout expires
// =============================================================================

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

/// Name of the script inside the preview directory.
const SCRIPT_NAME: &str = "app.py";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub enabled: bool,
    /// Program and leading arguments; the script path is appended.
    pub command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: vec!["python3".to_string(), "-I".to_string()],
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("preview is disabled; pass --allow-preview or set preview.enabled in the config")]
    Disabled,

    #[error("preview command is empty")]
    EmptyCommand,

    #[error("preview did not finish within {0}s and was stopped")]
    TimedOut(u64),

    #[error("failed to run preview: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    /// None when the process was ended by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl PreviewOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub async fn run_preview(config: &PreviewConfig, code: &str) -> Result<PreviewOutcome, PreviewError> {
    if !config.enabled {
        return Err(PreviewError::Disabled);
    }
    let (program, args) = config.command.split_first().ok_or(PreviewError::EmptyCommand)?;

    // Removed (with the script) when `dir` drops
    let dir = tempfile::tempdir()?;
    let script: PathBuf = dir.path().join(SCRIPT_NAME);
    tokio::fs::write(&script, code).await?;

    tracing::info!("Running preview: {} {}", config.command.join(" "), script.display());

    let mut command = Command::new(program);
    command
        .args(args)
        .arg(&script)
        .current_dir(dir.path())
        .env_clear()
        .stdin(Stdio::null())
        .kill_on_drop(true);
    if let Some(path) = std::env::var_os("PATH") {
        command.env("PATH", path);
    }

    let limit = Duration::from_secs(config.timeout_secs);
    let output = match tokio::time::timeout(limit, command.output()).await {
        Ok(output) => output?,
        // Dropping the output future kills the child
        Err(_) => return Err(PreviewError::TimedOut(config.timeout_secs)),
    };

    Ok(PreviewOutcome {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(command: &[&str], timeout_secs: u64) -> PreviewConfig {
        PreviewConfig {
            enabled: true,
            command: command.iter().map(|s| s.to_string()).collect(),
            timeout_secs,
        }
    }

    #[tokio::test]
    async fn test_disabled_by_default() {
        let result = run_preview(&PreviewConfig::default(), "print('hi')").await;
        assert!(matches!(result, Err(PreviewError::Disabled)));
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let result = run_preview(&enabled(&[], 5), "print('hi')").await;
        assert!(matches!(result, Err(PreviewError::EmptyCommand)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_script_in_child_process() {
        let outcome = run_preview(&enabled(&["cat"], 10), "st.title('preview')")
            .await
            .unwrap();
        assert!(outcome.succeeded());
        assert_eq!(outcome.stdout, "st.title('preview')");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_environment_is_cleared() {
        std::env::set_var("UI_FORGE_PREVIEW_SECRET", "leak");
        // `sh script` runs the generated text as a shell script
        let outcome = run_preview(&enabled(&["sh"], 10), "echo \"[$UI_FORGE_PREVIEW_SECRET]\"")
            .await
            .unwrap();
        assert_eq!(outcome.stdout.trim(), "[]");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_preview_times_out() {
        let result = run_preview(&enabled(&["sh"], 1), "sleep 5").await;
        assert!(matches!(result, Err(PreviewError::TimedOut(1))));
    }
}
