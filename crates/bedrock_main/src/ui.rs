use std::time::Duration;

use anyhow::{Context as _, Result};
use bedrock_app::{BedrockApp, DemoResult, Infrastructure};
use bedrock_display::{
    TitleFormat, render_access, render_check, render_cli_status, render_credentials,
    render_environment_check, render_error_patterns, render_outcome, render_permissions,
    render_region_catalog, render_regions, render_smoke, render_variables,
};
use bedrock_domain::{ChatMessage, CompletionParams, ModelId, Region};
use serde_json::Value;

use crate::Command;

/// Suggestions printed per demo case.
const DEMO_SUGGESTIONS: usize = 3;

/// Runs one CLI command against the app and prints its report to stdout.
pub struct UI<I> {
    app: BedrockApp<I>,
}

impl<I: Infrastructure> UI<I> {
    pub fn new(app: BedrockApp<I>) -> Self {
        Self { app }
    }

    /// Returns whether the command succeeded; the caller turns `false` into
    /// a non-zero exit code.
    pub async fn run(&self, command: Command) -> Result<bool> {
        match command {
            Command::Check => {
                let report = self.app.check().await;
                println!("{}", render_check(&report));
                Ok(report.is_ok())
            }
            Command::Credentials => {
                let report = self.app.credentials().await;
                println!("{}", render_credentials(&report));
                println!("{}", render_environment_check(&self.app.check_environment()));
                Ok(report.is_ok())
            }
            Command::Regions { regions } => {
                let regions: Vec<Region> = regions.into_iter().map(Region::from).collect();
                let selected = (!regions.is_empty()).then_some(regions.as_slice());
                let reports = self.app.regions(selected).await;
                println!("{}", render_regions(&reports));
                Ok(reports.iter().any(|report| report.has_models()))
            }
            Command::Access { region } => {
                let report = self.app.access(region.map(Region::from)).await;
                println!("{}", render_access(&report));
                Ok(report.available_count() > 0)
            }
            Command::Chat {
                message,
                system,
                messages,
                model,
                temperature,
                max_tokens,
                timeout,
                json,
            } => {
                if let Err(error) = self.app.check_environment() {
                    tracing::warn!(%error, "Continuing with the SDK credential chain");
                }
                let input = chat_input(message, system, messages)?;
                let params = chat_params(temperature, max_tokens, timeout);
                let outcome = self.app.chat(input, model.map(ModelId::new), params).await;
                if json {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                } else {
                    println!("{}", render_outcome(&outcome, None));
                }
                Ok(outcome.is_success())
            }
            Command::Demo => match self.app.demo().await {
                Ok(results) => {
                    println!("{}", render_demo(&results));
                    Ok(results.iter().all(|result| result.outcome.is_success()))
                }
                Err(error) => {
                    println!("{}", render_environment_check(&Err(error)));
                    Ok(false)
                }
            },
            Command::Setup { write_env_example } => {
                let guide = self.app.setup();
                println!("{}", render_variables(&guide.environment_status(self.app.env())));
                println!("{}", render_cli_status(&guide.aws_cli_status().await));
                println!("{}", render_region_catalog(guide.region_catalog()));
                println!("{}", render_permissions(guide.required_permissions()));
                println!("{}", render_error_patterns(guide.error_patterns()));
                if let Some(path) = write_env_example {
                    guide.write_env_example(&path, &self.app.region()).await?;
                    println!(
                        "{}",
                        TitleFormat::success("Wrote example environment file")
                            .sub_title(path.display().to_string())
                    );
                }
                Ok(true)
            }
            Command::Smoke => {
                let report = self.app.smoke().await;
                println!("{}", render_smoke(&report, self.app.config().preview_limit));
                Ok(report.is_ok())
            }
        }
    }
}

/// Builds the raw message array for `chat`: either the parsed `--messages`
/// JSON or an optional system prompt followed by the user message.
pub fn chat_input(
    message: Option<String>,
    system: Option<String>,
    messages: Option<String>,
) -> Result<Vec<Value>> {
    if let Some(raw) = messages {
        let value: Value = serde_json::from_str(&raw).context("--messages is not valid JSON")?;
        return Ok(match value {
            Value::Array(items) => items,
            other => vec![other],
        });
    }

    Ok(system
        .map(ChatMessage::system)
        .into_iter()
        .chain(message.map(ChatMessage::user))
        .map(|message| message.to_value())
        .collect())
}

pub fn chat_params(
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<u64>,
) -> CompletionParams {
    CompletionParams {
        temperature,
        max_tokens,
        timeout: timeout.map(Duration::from_secs),
        ..CompletionParams::empty()
    }
}

fn render_demo(results: &[DemoResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{}\n{}",
                TitleFormat::action(result.case.name)
                    .sub_title(format!("{} messages", result.case.messages.len())),
                render_outcome(&result.outcome, Some(DEMO_SUGGESTIONS))
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_chat_input_from_flags() {
        let actual =
            chat_input(Some("Hello".to_string()), Some("Be brief".to_string()), None).unwrap();

        let expected = vec![
            json!({"role": "system", "content": "Be brief"}),
            json!({"role": "user", "content": "Hello"}),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_chat_input_from_raw_json_keeps_malformed_entries() {
        let actual =
            chat_input(None, None, Some(r#"[{"role": "user"}, {"content": "Hello"}]"#.to_string()))
                .unwrap();

        let expected = vec![json!({"role": "user"}), json!({"content": "Hello"})];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_chat_input_single_object() {
        let actual = chat_input(None, None, Some(r#"{"content": "Hi"}"#.to_string())).unwrap();
        assert_eq!(actual, vec![json!({"content": "Hi"})]);
    }

    #[test]
    fn test_chat_input_invalid_json() {
        let actual = chat_input(None, None, Some("not json".to_string()));
        assert!(actual.is_err());
    }

    #[test]
    fn test_chat_params_only_sets_given_values() {
        let actual = chat_params(None, Some(50), Some(10));

        let expected = CompletionParams::empty()
            .max_tokens(50u32)
            .timeout(Duration::from_secs(10));
        assert_eq!(actual, expected);
    }
}
