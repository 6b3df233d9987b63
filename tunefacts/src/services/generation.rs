//! Text generation backend
//!
//! The pipeline only needs "prompt in, text out". [`OllamaCli`] runs
//! `<command> run <model>` as a child process, feeds the prompt on stdin and
//! reads the answer from stdout.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tunefacts_common::config::GenerationConfig;

/// Generation backend errors
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0} CLI not found. Make sure '{0}' is on PATH.")]
    NotFound(String),

    #[error("{0} CLI timed out after {1:?}")]
    Timeout(String, Duration),

    #[error("{0} exited with status {1}: {2}")]
    Failed(String, i32, String),

    #[error("Generation backend I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Generation collaborator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Local model run through the Ollama command line
pub struct OllamaCli {
    command: String,
    model: String,
    timeout: Duration,
}

impl OllamaCli {
    pub fn new(command: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn run(&self, prompt: &str) -> Result<std::process::Output, GenerationError> {
        let mut child = Command::new(&self.command)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => GenerationError::NotFound(self.command.clone()),
                _ => GenerationError::Io(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A child that exits early closes its end; its exit status is
            // the useful diagnostic, not the broken pipe
            if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        Ok(child.wait_with_output().await?)
    }
}

#[async_trait]
impl TextGenerator for OllamaCli {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Running generation backend");

        let output = tokio::time::timeout(self.timeout, self.run(prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.command.clone(), self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                format!("Unknown {} error", self.command)
            } else {
                stderr
            };
            return Err(GenerationError::Failed(
                self.command.clone(),
                output.status.code().unwrap_or(-1),
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
