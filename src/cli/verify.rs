//! Verify command - fact-checks text once and prints the results

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::api::types::VerifyResponse;
use crate::config::AppConfig;
use crate::infrastructure::credentials::EnvCredentialProvider;
use crate::infrastructure::logging::init_logging;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Text to verify
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub async fn run(args: VerifyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let text = read_input(&args).await?;

    let pipeline = crate::build_pipeline(&config, &EnvCredentialProvider::default())
        .await
        .context("Failed to build verification pipeline")?;

    let output = pipeline
        .process(&text)
        .await
        .context("Verification failed")?;

    info!(records = output.results.len(), total_usage = output.usage.total, "Verification finished");

    let response = VerifyResponse::from_domain(output);
    println!("{}", render(&response, args.format)?);

    Ok(())
}

async fn read_input(args: &VerifyArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    Ok(text)
}

fn render(response: &VerifyResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Pretty => Ok(render_pretty(response)),
    }
}

fn render_pretty(response: &VerifyResponse) -> String {
    let mut out = String::new();

    for (index, result) in response.results.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        let claim = if result.claim.is_empty() {
            "(no claim)"
        } else {
            result.claim.as_str()
        };
        out.push_str(&format!("[{}] {}\n", index + 1, claim));
        out.push_str(&format!(
            "    score: {}/10 ({})\n",
            result.truthfulness_score, result.status
        ));
        out.push_str(&format!("    {}\n", result.explanation));
        for source in &result.sources {
            out.push_str(&format!("    - {}\n", source));
        }
    }

    out.push_str(&format!("\nusage: {} total", response.usage.total));
    for (stage, units) in &response.usage.stages {
        out.push_str(&format!(", {} {}", stage, units));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ClaimResult, UsageSummary};
    use std::collections::BTreeMap;

    fn response() -> VerifyResponse {
        VerifyResponse {
            results: vec![ClaimResult {
                claim: "The sky is blue.".to_string(),
                truthfulness_score: 9,
                sources: vec!["https://example.com/sky".to_string()],
                explanation: "Rayleigh scattering.".to_string(),
                status: "verified".to_string(),
            }],
            usage: UsageSummary {
                stages: BTreeMap::from([("claim_extraction".to_string(), 10)]),
                total: 10,
            },
        }
    }

    #[test]
    fn test_render_pretty() {
        let out = render_pretty(&response());

        assert!(out.contains("[1] The sky is blue."));
        assert!(out.contains("score: 9/10 (verified)"));
        assert!(out.contains("- https://example.com/sky"));
        assert!(out.ends_with("usage: 10 total, claim_extraction 10"));
    }

    #[test]
    fn test_render_json() {
        let out = render(&response(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["results"][0]["truthfulness_score"], 9);
        assert_eq!(value["usage"]["total"], 10);
    }

    #[tokio::test]
    async fn test_read_input_prefers_text() {
        let args = VerifyArgs {
            text: Some("Water boils at 100C.".to_string()),
            file: None,
            format: OutputFormat::Json,
        };

        assert_eq!(read_input(&args).await.unwrap(), "Water boils at 100C.");
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let args = VerifyArgs {
            text: None,
            file: Some(PathBuf::from("/nonexistent/truthio-input.txt")),
            format: OutputFormat::Pretty,
        };

        assert!(read_input(&args).await.is_err());
    }
}
