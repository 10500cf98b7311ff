use std::env;
use std::sync::Arc;

use tickdeck_core::{
    parse_iso_date, DataOrigin, HttpAuth, MarketDataClient, ReqwestHttpClient, Ticker,
};

use crate::cli::{FetchCommand, FetchPrevArgs, FetchRangeArgs};
use crate::error::CliError;

use super::CommandResult;

pub async fn run(command: &FetchCommand) -> Result<CommandResult, CliError> {
    match command {
        FetchCommand::Prev(args) => prev(args).await,
        FetchCommand::Range(args) => range(args).await,
    }
}

async fn prev(args: &FetchPrevArgs) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let client = build_client(args.api_key.as_deref(), &args.base_url)?;

    let window = client.previous_close(&ticker).await?;
    Ok(CommandResult::ok(
        serde_json::to_value(window)?,
        DataOrigin::Polygon,
    ))
}

async fn range(args: &FetchRangeArgs) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let from = parse_iso_date(&args.from)?;
    let to = parse_iso_date(&args.to)?;
    if from > to {
        return Err(CliError::Command(format!(
            "--from {} must not be after --to {}",
            args.from, args.to
        )));
    }

    let client = build_client(args.api_key.as_deref(), &args.base_url)?;
    let window = client.range(&ticker, from, to).await?;
    Ok(CommandResult::ok(
        serde_json::to_value(window)?,
        DataOrigin::Polygon,
    ))
}

fn build_client(api_key: Option<&str>, base_url: &str) -> Result<MarketDataClient, CliError> {
    let key = match api_key {
        Some(key) => Some(key.to_owned()),
        None => env::var("POLYGON_API_KEY").ok(),
    };

    let key = key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
        CliError::Command(String::from(
            "an API key is required: pass --api-key or set POLYGON_API_KEY",
        ))
    })?;

    let client = MarketDataClient::new(
        Arc::new(ReqwestHttpClient::new()),
        HttpAuth::BearerToken(key),
    )
    .with_base_url(base_url);
    Ok(client)
}
