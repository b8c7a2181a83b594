use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use bedrock_domain::{CommandInfra, CommandOutput};
use tokio::process::Command;
use tracing::debug;

/// Runs short-lived external programs such as the AWS CLI.
#[derive(Default)]
pub struct CommandRunner;

#[async_trait::async_trait]
impl CommandInfra for CommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> anyhow::Result<CommandOutput> {
        debug!(program, ?args, "Running command");
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| anyhow!("{program} did not finish within {}s", timeout.as_secs()))?
            .with_context(|| format!("Failed to run {program}"))?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_captures_stdout() {
        let actual = CommandRunner
            .run("echo", &["hello"], Duration::from_secs(5))
            .await
            .unwrap();

        let expected = CommandOutput {
            success: true,
            stdout: "hello\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let actual = CommandRunner.run("false", &[], Duration::from_secs(5)).await.unwrap();
        assert!(!actual.success);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let actual = CommandRunner
            .run("definitely-not-a-real-program", &[], Duration::from_secs(5))
            .await;
        assert!(actual.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        let actual = CommandRunner
            .run("sleep", &["5"], Duration::from_millis(100))
            .await;
        assert!(actual.unwrap_err().to_string().contains("did not finish"));
    }
}
