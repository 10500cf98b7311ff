use std::fs;

use tickdeck_core::{layout_candles, parse_aggs_json, ChartArea, DataOrigin};

use crate::cli::{ChartCommand, ChartLayoutArgs};
use crate::error::CliError;

use super::CommandResult;

pub fn run(command: &ChartCommand) -> Result<CommandResult, CliError> {
    match command {
        ChartCommand::Layout(args) => layout(args),
    }
}

fn layout(args: &ChartLayoutArgs) -> Result<CommandResult, CliError> {
    let raw = fs::read_to_string(&args.input)?;
    let bars = parse_aggs_json(&raw)?;
    let area = ChartArea::new(args.width, args.height)?;

    let scene = layout_candles(&bars, area)?;
    Ok(CommandResult::ok(
        serde_json::to_value(scene)?,
        DataOrigin::File,
    ))
}
