use serde_json::json;
use tickdeck_core::{
    DataOrigin, HolidayDate, KeyValueStore, MarketSchedule, TimeOfDay, UtcTimestamp,
};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::cli::{MarketCommand, MarketStatusArgs, SetHoursArgs};
use crate::error::CliError;

use super::CommandResult;

pub fn run(command: &MarketCommand, store: &KeyValueStore) -> Result<CommandResult, CliError> {
    let schedule = MarketSchedule::new(store.clone());

    match command {
        MarketCommand::SetHours(args) => set_hours(args, &schedule),
        MarketCommand::Status(args) => status(args, &schedule),
    }
}

fn set_hours(args: &SetHoursArgs, schedule: &MarketSchedule) -> Result<CommandResult, CliError> {
    let open: TimeOfDay = args.open.parse()?;
    let close: TimeOfDay = args.close.parse()?;
    let holidays = parse_holidays(args.holidays.as_deref())?;

    let hours = schedule.set_hours(open, close, holidays)?;
    Ok(CommandResult::ok(
        serde_json::to_value(hours)?,
        DataOrigin::Store,
    ))
}

fn status(args: &MarketStatusArgs, schedule: &MarketSchedule) -> Result<CommandResult, CliError> {
    let at = match &args.at {
        Some(raw) => UtcTimestamp::parse(raw)?.into_inner(),
        None => OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
    };

    let hours = schedule.hours();
    let data = json!({
        "is_open": hours.is_open_at(at),
        "evaluated_at": at
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>")),
        "hours": serde_json::to_value(hours)?,
    });

    Ok(CommandResult::ok(data, DataOrigin::Store))
}

fn parse_holidays(raw: Option<&str>) -> Result<Vec<HolidayDate>, CliError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| HolidayDate::parse(part).map_err(CliError::from))
        .collect()
}
