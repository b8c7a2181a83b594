use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Diagnose AWS Bedrock connectivity and send completions through a model
/// fallback chain.
#[derive(Parser, Debug)]
#[command(name = "bedrock-doctor", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Enable debug logging on stderr.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, short = 'v', default_value_t = false, global = true)]
    pub verbose: bool,

    /// Color output: always, auto or never.
    #[arg(long, global = true)]
    pub color: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run every probe and recommend a region.
    Check,

    /// Show AWS environment variables and resolve the credential chain.
    Credentials,

    /// List Claude models in each region.
    Regions {
        /// Region to probe; may be repeated. Defaults to the configured list.
        #[arg(long = "region", short = 'r')]
        regions: Vec<String>,
    },

    /// Check access to each probe model in one region.
    Access {
        /// Defaults to AWS_REGION.
        #[arg(long, short = 'r')]
        region: Option<String>,
    },

    /// Send a conversation through the candidate model chain.
    Chat {
        /// User message.
        #[arg(long, short = 'm', required_unless_present = "messages")]
        message: Option<String>,

        /// Optional system prompt placed before the user message.
        #[arg(long, short = 's', conflicts_with = "messages")]
        system: Option<String>,

        /// Raw JSON message array; malformed entries are repaired before
        /// sending.
        #[arg(long, conflicts_with = "message")]
        messages: Option<String>,

        /// Preferred model; unknown models fall back to the full chain.
        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        temperature: Option<f32>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(i32::MAX)))]
        max_tokens: Option<u32>,

        /// Per-attempt timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the outcome as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Run canned malformed conversations through the sanitizer and the
    /// fallback chain.
    Demo,

    /// Explain how to configure AWS for Bedrock.
    Setup {
        /// Write an example environment file to this path.
        #[arg(long)]
        write_env_example: Option<PathBuf>,
    },

    /// End-to-end connectivity test with a short completion.
    Smoke,
}
