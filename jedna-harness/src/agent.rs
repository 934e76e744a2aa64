//! Per-agent subprocess lifecycle.
//!
//! Each agent runs as a child process spawned through the shell, speaking the
//! [`crate::protocol`] over piped stdin/stdout. A dedicated reader thread
//! forwards stdout lines through a channel so that a read can be bounded by
//! `recv_timeout`; stderr is piped to the log and never parsed.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use jedna::view::ActionRequest;

use crate::protocol::{AgentReply, Envelope};

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("agent produced no reply within {0:?}")]
    Timeout(Duration),

    #[error("agent closed its output")]
    ClosedOutput,

    #[error("agent closed its input")]
    ClosedInput,

    #[error("agent sent invalid JSON: {0:?}")]
    InvalidJson(String),

    #[error("failed to spawn agent process")]
    Spawn(#[source] io::Error),

    #[error("broken agent pipe")]
    Io(#[from] io::Error),

    #[error("failed to encode envelope")]
    Encode(#[from] serde_json::Error),
}

/// A running agent child process.
pub struct AgentProcess {
    command: String,
    child: Child,
    stdin: Option<ChildStdin>,
    lines: Receiver<io::Result<String>>,
}

impl AgentProcess {
    /// Spawns `command` through the shell with piped standard I/O.
    pub fn start(command: &str) -> Result<AgentProcess, AgentError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(AgentError::Spawn)?;

        let stdin = child.stdin.take().ok_or(AgentError::ClosedInput)?;
        let stdout = child.stdout.take().ok_or(AgentError::ClosedOutput)?;
        let stderr = child.stderr.take().ok_or(AgentError::ClosedOutput)?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        // stderr is reserved for agent debugging; forward it to the log
        let tag = command.to_string();
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines().flatten() {
                log::debug!(target: "agent-stderr", "[{}] {}", tag, line);
            }
        });

        log::debug!("started agent: {}", command);
        Ok(AgentProcess {
            command: command.to_string(),
            child,
            stdin: Some(stdin),
            lines: rx,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Writes a `request_action` envelope and reads one reply line, bounded
    /// by `timeout` (`None` = wait forever). The process is left running on
    /// timeout; the caller decides its fate.
    pub fn request_action(
        &mut self,
        view: &ActionRequest,
        timeout: Option<Duration>,
    ) -> Result<AgentReply, AgentError> {
        self.send(&Envelope::RequestAction { state: view.clone() })?;
        let line = match timeout {
            Some(limit) => match self.lines.recv_timeout(limit) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => return Err(AgentError::Timeout(limit)),
                Err(RecvTimeoutError::Disconnected) => return Err(AgentError::ClosedOutput),
            },
            None => self.lines.recv().map_err(|_| AgentError::ClosedOutput)?,
        };
        let line = line?;
        serde_json::from_str(&line).map_err(|_| AgentError::InvalidJson(line))
    }

    /// Best-effort write of an informational envelope; a broken pipe is
    /// logged and swallowed.
    pub fn notify(&mut self, envelope: &Envelope) {
        if let Err(err) = self.send(envelope) {
            log::debug!("notify failed for '{}': {}", self.command, err);
        }
    }

    fn send(&mut self, envelope: &Envelope) -> Result<(), AgentError> {
        let stdin = self.stdin.as_mut().ok_or(AgentError::ClosedInput)?;
        let line = serde_json::to_string(envelope)?;
        writeln!(stdin, "{line}")?;
        stdin.flush()?;
        Ok(())
    }

    /// Closes the agent's stdin, waits up to `grace` for a voluntary exit,
    /// then terminates the process.
    pub fn stop(&mut self, grace: Duration) {
        drop(self.stdin.take());
        let deadline = Instant::now() + grace;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    log::debug!("agent '{}' exited: {}", self.command, status);
                    return;
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        break;
                    }
                    thread::sleep(Duration::from_millis(25));
                }
                Err(err) => {
                    log::warn!("wait for agent '{}' failed: {}", self.command, err);
                    break;
                }
            }
        }
        log::debug!("terminating agent '{}'", self.command);
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for AgentProcess {
    fn drop(&mut self) {
        // make sure no child outlives its harness, whatever the exit path
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
