mod bar;
mod hours;
mod stock;
mod ticker;
mod timestamp;

pub use bar::OhlcBar;
pub use hours::{format_iso_date, parse_iso_date, HolidayDate, MarketHours, TimeOfDay};
pub use stock::StockRecord;
pub use ticker::Ticker;
pub use timestamp::UtcTimestamp;
