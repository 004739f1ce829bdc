// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle of the target application.
//!
//! A [`Target`] is either a URL that is already being served or a command to
//! launch. Launched targets are spawned into their own process group so that
//! [`Supervised::teardown`] can kill the whole tree, including anything the
//! launcher started (`dotnet run` builds and then runs a second process).

use crate::readiness::{ReadinessError, ReadinessReader};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// How long teardown waits for a killed process to be reaped.
const REAP_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from [`ProcessSupervisor::launch`].
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("target process has no stdout")]
    NoOutput,

    #[error(transparent)]
    Readiness(#[from] ReadinessError),
}

/// What the walkthrough runs against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Already running; used as the entry URL as-is
    Url(String),
    /// Spawned and watched for the ready marker
    Launch(LaunchSpec),
}

/// A command line for the target process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Command that serves the wallet found at `path`.
    ///
    /// Executables and other plain files are run directly with `--server`.
    /// Anything else (a project directory or `.csproj`) goes through
    /// `dotnet run`.
    pub fn for_project(path: &Path) -> Self {
        let is_project_file = path.extension().is_some_and(|ext| ext == "csproj");
        let is_exe = path.extension().is_some_and(|ext| ext == "exe");
        let spec = if is_exe || (path.is_file() && !is_project_file) {
            Self::new(path.display().to_string(), ["--server"])
        } else {
            Self::new(
                "dotnet",
                [
                    "run".to_string(),
                    "--project".to_string(),
                    path.display().to_string(),
                    "--".to_string(),
                    "--server".to_string(),
                ],
            )
        };
        spec.with_env("DOTNET_ENVIRONMENT", "Development")
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Shell-style rendering for progress output
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

/// Starts targets and waits for them to become ready.
#[derive(Clone, Debug, Default)]
pub struct ProcessSupervisor {
    reader: ReadinessReader,
}

impl ProcessSupervisor {
    pub fn new(reader: ReadinessReader) -> Self {
        Self { reader }
    }

    /// Resolve `target` to an entry URL, spawning it if needed.
    ///
    /// A spawned process that fails to become ready is torn down before the
    /// error is returned.
    pub async fn launch(&self, target: &Target) -> Result<Supervised, LaunchError> {
        let spec = match target {
            Target::Url(url) => {
                tracing::info!("Connecting to: {url}");
                return Ok(Supervised {
                    url: url.clone(),
                    child: None,
                })
            }
            Target::Launch(spec) => spec,
        };

        tracing::info!("Starting wallet: {}", spec.display());
        let mut child = spec.command().spawn().map_err(|source| LaunchError::Spawn {
            program: spec.program.clone(),
            source,
        })?;
        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let mut supervised = Supervised {
            url: String::new(),
            child: Some(ChildHandle {
                child,
                pid,
                drains: Vec::new(),
            }),
        };
        if let Some(stderr) = stderr {
            supervised.push_drain(drain(BufReader::new(stderr).lines(), "stderr"));
        }
        let Some(stdout) = stdout else {
            supervised.teardown().await;
            return Err(LaunchError::NoOutput);
        };

        let mut lines = BufReader::new(stdout).lines();
        match self.reader.read(&mut lines).await {
            Ok(url) => {
                tracing::info!("Wallet running at: {url}");
                supervised.url = url;
                supervised.push_drain(drain(lines, "stdout"));
                Ok(supervised)
            }
            Err(e) => {
                supervised.teardown().await;
                Err(e.into())
            }
        }
    }
}

/// Keep reading a pipe so the child never blocks on a full buffer.
fn drain<R>(mut lines: Lines<R>, stream: &'static str) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Ok(Some(line)) = lines.next_line().await {
            tracing::debug!(stream, "  [wallet] {line}");
        }
    })
}

#[derive(Debug)]
struct ChildHandle {
    child: Child,
    pid: Option<u32>,
    drains: Vec<JoinHandle<()>>,
}

/// A ready target. Holds the spawned process, if there is one.
#[derive(Debug)]
pub struct Supervised {
    url: String,
    child: Option<ChildHandle>,
}

impl Supervised {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Process id of the spawned target, while it is held
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(|h| h.pid)
    }

    /// Kill the target and its whole process tree. Safe to call repeatedly.
    pub async fn teardown(&mut self) {
        let Some(mut handle) = self.child.take() else {
            return;
        };
        if let Some(pid) = handle.pid {
            kill_tree(pid);
        }
        let _ = handle.child.start_kill();
        match tokio::time::timeout(REAP_TIMEOUT, handle.child.wait()).await {
            Ok(Ok(status)) => tracing::debug!(%status, "target exited"),
            Ok(Err(e)) => tracing::warn!(error = %e, "failed to reap target"),
            Err(_) => tracing::warn!("target did not exit within {}s", REAP_TIMEOUT.as_secs()),
        }
        for task in handle.drains {
            task.abort();
        }
    }

    fn push_drain(&mut self, task: JoinHandle<()>) {
        match self.child {
            Some(ref mut handle) => handle.drains.push(task),
            None => task.abort(),
        }
    }
}

impl Drop for Supervised {
    fn drop(&mut self) {
        if let Some(ref mut handle) = self.child {
            if let Some(pid) = handle.pid {
                kill_tree(pid);
            }
            let _ = handle.child.start_kill();
            for task in &handle.drains {
                task.abort();
            }
        }
    }
}

/// SIGKILL the process group led by `pid`.
#[cfg(unix)]
fn kill_tree(pid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pid, error = %e, "failed to kill target process group"),
    }
}

#[cfg(not(unix))]
fn kill_tree(pid: u32) {
    let status = std::process::Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(e) = status {
        tracing::warn!(pid, error = %e, "failed to kill target process tree");
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
