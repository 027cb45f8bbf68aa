use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "promptwiz",
    version,
    about = "Evaluate PromptWiz prompts from the command line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate one or more prompts and print the result set as JSON
    Evaluate(EvaluateArgs),
    Version,
}

#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["prompt_id", "queries"])
))]
pub struct EvaluateArgs {
    /// Prompt ID for an inline query
    #[arg(long)]
    pub prompt_id: Option<u64>,

    /// Prompt argument for the inline query (repeatable)
    /// Example: --arg topic=rust --arg tone=formal
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_val, requires = "prompt_id")]
    pub args: Vec<(String, String)>,

    /// Correlation ID echoed back in the inline query's result
    #[arg(long, requires = "prompt_id")]
    pub link_id: Option<String>,

    /// Upstream model API key for the inline query
    #[arg(long, requires = "prompt_id")]
    pub model_api_key: Option<String>,

    /// JSON file containing an array of queries
    /// Example: [{"promptId": 1, "args": {"topic": "rust"}, "linkId": "a"}]
    #[arg(long, value_name = "FILE")]
    pub queries: Option<PathBuf>,

    /// Whether a result set missing some queries is acceptable (not sent when omitted)
    #[arg(long, value_name = "BOOL")]
    pub accept_partial: Option<bool>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection settings shared by commands talking to the service.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// PromptWiz API key
    #[arg(long, env = "PROMPTWIZ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// PromptWiz base URL
    #[arg(long, env = "PROMPTWIZ_URL")]
    pub url: Option<String>,

    /// PromptWiz API version
    #[arg(long, env = "PROMPTWIZ_API_VERSION")]
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PROMPTWIZ_TIMEOUT")]
    pub timeout_secs: Option<u64>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
