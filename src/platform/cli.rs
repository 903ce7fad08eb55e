//! Platform CLI wrapper.
//!
//! Runs the external platform CLI under a hard timeout and maps its exit
//! status into the suite's error taxonomy. A non-zero exit is always an
//! orchestration failure; nothing here retries.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error};

use crate::config::SmokeConfig;
use crate::errors::{Error, Result};
use crate::timeout::with_timeout;
use crate::workflow::PushPlan;

/// Captured result of a CLI invocation
#[derive(Debug, Clone)]
pub struct CliOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Wrapper over the external platform CLI binary
#[derive(Debug, Clone)]
pub struct PlatformCli {
    binary: PathBuf,
    default_timeout: Duration,
    api_path_prefix: Option<String>,
}

impl PlatformCli {
    /// Create a wrapper for the given binary name or path
    pub fn new(binary: impl Into<PathBuf>, default_timeout: Duration) -> Self {
        Self { binary: binary.into(), default_timeout, api_path_prefix: None }
    }

    /// Prepend a prefix to every admin API path passed to `curl`
    pub fn with_api_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_path_prefix = Some(prefix.into());
        self
    }

    /// Build from suite configuration
    pub fn from_config(config: &SmokeConfig) -> Self {
        let mut cli = Self::new(&config.cli.binary, config.timeouts.default_timeout());
        cli.api_path_prefix = config.cli.api_path_prefix.clone();
        cli
    }

    /// Check if the CLI binary is resolvable on PATH (or exists as given)
    pub fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    /// The binary this wrapper invokes
    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    /// Run the CLI with the default timeout, failing on non-zero exit
    pub async fn run(&self, args: &[&str]) -> Result<CliOutput> {
        self.run_with_timeout(args, self.default_timeout).await
    }

    /// Run the CLI with an explicit timeout, failing on non-zero exit
    pub async fn run_with_timeout(&self, args: &[&str], timeout: Duration) -> Result<CliOutput> {
        let command_label = self.command_label(args);
        debug!(command = %command_label, timeout_secs = timeout.as_secs(), "Running platform CLI");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args).kill_on_drop(true);

        let output = with_timeout(&command_label, timeout, async {
            cmd.output().await.map_err(|e| Error::Io {
                source: e,
                context: format!("failed to spawn `{}`", command_label),
            })
        })
        .await?;

        let result = CliOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if result.exit_code != 0 {
            error!(
                command = %command_label,
                exit_code = result.exit_code,
                stderr = %stderr_excerpt(&result.stderr),
                "Platform CLI command failed"
            );
            return Err(Error::cli(command_label, result.exit_code, stderr_excerpt(&result.stderr)));
        }

        Ok(result)
    }

    /// Push an application: `push <app> -p <path> -b <buildpack> -d <domain>
    /// -c <start-command>`. Runs under the push timeout, which dominates every
    /// other operation in a scenario.
    pub async fn push(&self, plan: &PushPlan, timeout: Duration) -> Result<()> {
        let args = plan.cli_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_with_timeout(&args, timeout).await?;
        Ok(())
    }

    /// Target a space: `target -s <space>`
    pub async fn target_space(&self, space: &str) -> Result<()> {
        self.run(&["target", "-s", space]).await?;
        Ok(())
    }

    /// Force-delete an application and its routes: `delete <app> -f -r`
    pub async fn delete_app(&self, app: &str) -> Result<()> {
        self.run(&["delete", app, "-f", "-r"]).await?;
        Ok(())
    }

    /// Raw GET against the admin API through the CLI's authenticated session
    pub async fn curl(&self, path: &str) -> Result<String> {
        let path = self.api_path(path);
        let output = self.run(&["curl", &path]).await?;
        Ok(output.stdout)
    }

    /// Raw admin API call with an explicit method and optional body
    pub async fn curl_with(&self, method: &str, path: &str, body: Option<&str>) -> Result<String> {
        let path = self.api_path(path);
        let mut args = vec!["curl", path.as_str(), "-X", method];
        if let Some(body) = body {
            args.push("-d");
            args.push(body);
        }
        let output = self.run(&args).await?;
        Ok(output.stdout)
    }

    fn api_path(&self, path: &str) -> String {
        match &self.api_path_prefix {
            Some(prefix) => format!("{}{}", prefix.trim_end_matches('/'), path),
            None => path.to_string(),
        }
    }

    fn command_label(&self, args: &[&str]) -> String {
        format!("{} {}", self.binary.display(), args.join(" "))
    }
}

/// Trim stderr for error messages; keeps the tail, where CLIs put the reason.
fn stderr_excerpt(stderr: &str) -> String {
    const MAX_LEN: usize = 1024;
    let trimmed = stderr.trim();
    if trimmed.len() <= MAX_LEN {
        return trimmed.to_string();
    }
    let tail_start = trimmed.len() - MAX_LEN;
    let tail_start = trimmed
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| i >= tail_start)
        .unwrap_or(tail_start);
    format!("...{}", &trimmed[tail_start..])
}
