use serde_json::Value;
use tickdeck_core::{DataOrigin, EnvelopeError, KeyValueStore, StockRegistry};

use crate::cli::{CreateStockArgs, GetStockArgs, StockCommand};
use crate::error::CliError;

use super::CommandResult;

pub fn run(command: &StockCommand, store: &KeyValueStore) -> Result<CommandResult, CliError> {
    let registry = StockRegistry::new(store.clone());

    match command {
        StockCommand::Create(args) => create(args, &registry),
        StockCommand::List => {
            let stocks = registry.list_stocks();
            Ok(CommandResult::ok(
                serde_json::to_value(stocks)?,
                DataOrigin::Store,
            ))
        }
        StockCommand::Get(args) => get(args, &registry),
    }
}

fn create(args: &CreateStockArgs, registry: &StockRegistry) -> Result<CommandResult, CliError> {
    let record = registry.create_stock(&args.company, &args.ticker, args.volume, args.price)?;
    Ok(CommandResult::ok(
        serde_json::to_value(record)?,
        DataOrigin::Store,
    ))
}

fn get(args: &GetStockArgs, registry: &StockRegistry) -> Result<CommandResult, CliError> {
    match registry.get_stock(&args.ticker)? {
        Some(record) => Ok(CommandResult::ok(
            serde_json::to_value(record)?,
            DataOrigin::Store,
        )),
        None => {
            let error = EnvelopeError::new(
                "stock.not_found",
                format!("ticker '{}' is not listed", args.ticker.to_uppercase()),
            )?;
            Ok(CommandResult::ok(Value::Null, DataOrigin::Store).with_error(error))
        }
    }
}
