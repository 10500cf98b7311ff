mod chart;
mod fetch;
mod market;
mod stock;

use std::time::Instant;

use serde_json::Value;
use tickdeck_core::{DataOrigin, Envelope, EnvelopeError, EnvelopeMeta, KeyValueStore};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub origin: DataOrigin,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value, origin: DataOrigin) -> Self {
        Self {
            data,
            origin,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let store = build_store(cli);
    tickdeck_core::seed_defaults(&store)?;

    let result = match &cli.command {
        Command::Stock(command) => stock::run(command, &store)?,
        Command::Market(command) => market::run(command, &store)?,
        Command::Chart(command) => chart::run(command)?,
        Command::Fetch(command) => fetch::run(command).await?,
    };

    let CommandResult {
        data,
        origin,
        warnings,
        errors,
    } = result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), origin, elapsed_ms(started))?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

fn build_store(cli: &Cli) -> KeyValueStore {
    if cli.memory {
        return KeyValueStore::in_memory();
    }

    let root = cli
        .data_dir
        .clone()
        .unwrap_or_else(tickdeck_core::default_data_dir);
    KeyValueStore::file_backed(root)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
