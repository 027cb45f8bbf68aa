//! CLI command: promptwiz evaluate
//!
//! Usage:
//!   promptwiz evaluate --prompt-id 12 --arg topic=rust [--link-id a] [--accept-partial true]
//!   promptwiz evaluate --queries queries.json
//!
//! Prints `{"resultSet": [...], "errors": [...] | null, "statusCode": N}`.

use anyhow::{Context, Result};
use promptwiz_client::{
    ApiVersion, ClientConfig, ClientError, EvaluateOptions, LinkId, PromptWizClient, Query,
};
use std::path::Path;
use tracing::{error, info};

use crate::cli::args::{ConnectionArgs, EvaluateArgs};
use crate::exit_codes::{CONFIG_ERROR, SERVICE_ERROR, SUCCESS, TRANSPORT_ERROR};

pub async fn run(args: EvaluateArgs) -> Result<i32> {
    let queries = collect_queries(&args)?;

    let client = match build_config(&args.connection).and_then(PromptWizClient::new) {
        Ok(client) => client,
        Err(e) => return Ok(report(e)),
    };

    info!(
        queries = queries.len(),
        url = %client.evaluate_url(),
        "evaluating query set"
    );

    let options = EvaluateOptions {
        accept_partial: args.accept_partial,
        ..EvaluateOptions::default()
    };

    let evaluation = match client.evaluate(&queries, options).await {
        Ok(evaluation) => evaluation,
        Err(e) => return Ok(report(e)),
    };

    println!("{}", serde_json::to_string_pretty(&evaluation)?);

    if evaluation.is_success() {
        Ok(SUCCESS)
    } else {
        for e in evaluation.service_errors() {
            error!(code = %e.code, "{}", e.description);
        }
        Ok(SERVICE_ERROR)
    }
}

fn report(e: ClientError) -> i32 {
    eprintln!("error: {e}");
    exit_code(&e)
}

fn exit_code(e: &ClientError) -> i32 {
    if e.is_transport() {
        TRANSPORT_ERROR
    } else {
        CONFIG_ERROR
    }
}

fn build_config(conn: &ConnectionArgs) -> Result<ClientConfig, ClientError> {
    let mut config = ClientConfig::default();

    if let Some(api_key) = &conn.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(url) = &conn.url {
        config = config.with_base_url(url);
    }
    if let Some(version) = &conn.api_version {
        config = config.with_api_version(ApiVersion::parse(version)?);
    }
    if let Some(secs) = conn.timeout_secs {
        config = config.with_timeout_secs(secs);
    }

    Ok(config)
}

/// File queries first, then the inline one.
fn collect_queries(args: &EvaluateArgs) -> Result<Vec<Query>> {
    let mut queries = match &args.queries {
        Some(path) => load_queries(path)?,
        None => Vec::new(),
    };

    if let Some(prompt_id) = args.prompt_id {
        let mut query = Query::new(prompt_id);
        if !args.args.is_empty() {
            query = query.with_args(args.args.iter().cloned());
        }
        if let Some(link_id) = &args.link_id {
            query = query.with_link_id(parse_link_id(link_id));
        }
        if let Some(key) = &args.model_api_key {
            query = query.with_model_api_key(key);
        }
        queries.push(query);
    }

    Ok(queries)
}

fn load_queries(path: &Path) -> Result<Vec<Query>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read query file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse query file {}", path.display()))
}

/// Canonical non-zero integers are sent as numbers, anything else (`"007"`,
/// `"0"`) as the string the user typed.
fn parse_link_id(raw: &str) -> LinkId {
    match raw.parse::<i64>() {
        Ok(id) if id != 0 && id.to_string() == raw => LinkId::Int(id),
        _ => LinkId::Text(raw.to_string()),
    }
}
