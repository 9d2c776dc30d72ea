//! `pd-cli call`.

use std::path::PathBuf;

use parcel_desk_server::config::ServerConfig;
use parcel_desk_server::state::build_handler;
use serde_json::Value;
use tracing::info;

use super::{Outcome, print_json};

/// Run one tool against the configured platform and print the result.
///
/// # Errors
///
/// Returns an error if the arguments are not a JSON object, the content
/// override cannot be loaded, or the tool does not exist.
pub async fn run(
    tool: &str,
    args: Option<&str>,
    content_path: Option<PathBuf>,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let arguments = parse_arguments(args)?;
    let config = ServerConfig {
        content_path,
        ..ServerConfig::default()
    };
    let handler = build_handler(&config)?;

    info!(tool, platform = %config.platform, "Running tool");
    let result = handler.executor().execute(tool, &arguments).await?;
    let outcome = if result.is_error() {
        Outcome::Rejected
    } else {
        Outcome::Success
    };
    print_json(result.value())?;
    Ok(outcome)
}

fn parse_arguments(raw: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let Some(raw) = raw else {
        return Ok(Value::Object(serde_json::Map::new()));
    };
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err("--args must be a JSON object".into());
    }
    Ok(value)
}
