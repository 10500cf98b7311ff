use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Parser)]
#[command(
    name = "tickdeck",
    version,
    about = "Stock dashboard store, market schedule, and chart layout toolkit"
)]
pub struct Cli {
    /// Output format for the response envelope.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Fail when the envelope carries warnings or errors.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Use a volatile in-memory store instead of the data directory.
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub memory: bool,

    /// Directory holding the persisted store documents.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the stock registry.
    #[command(subcommand)]
    Stock(StockCommand),

    /// Manage market hours and holidays.
    #[command(subcommand)]
    Market(MarketCommand),

    /// Lay out candlestick scenes from bar data.
    #[command(subcommand)]
    Chart(ChartCommand),

    /// Fetch bars from the aggregates API.
    #[command(subcommand)]
    Fetch(FetchCommand),
}

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// Create (or overwrite) a stock record.
    Create(CreateStockArgs),
    /// List all stock records, ordered by ticker.
    List,
    /// Look up one stock record by ticker, case-insensitively.
    Get(GetStockArgs),
}

#[derive(Debug, Args)]
pub struct CreateStockArgs {
    #[arg(long)]
    pub company: String,

    #[arg(long)]
    pub ticker: String,

    #[arg(long)]
    pub volume: f64,

    #[arg(long)]
    pub price: f64,
}

#[derive(Debug, Args)]
pub struct GetStockArgs {
    pub ticker: String,
}

#[derive(Debug, Subcommand)]
pub enum MarketCommand {
    /// Overwrite the market schedule.
    SetHours(SetHoursArgs),
    /// Report the schedule and whether the market is open.
    Status(MarketStatusArgs),
}

#[derive(Debug, Args)]
pub struct SetHoursArgs {
    /// Session open, "HH:MM".
    #[arg(long)]
    pub open: String,

    /// Session close, "HH:MM".
    #[arg(long)]
    pub close: String,

    /// Comma-separated "YYYY-MM-DD" holiday dates.
    #[arg(long)]
    pub holidays: Option<String>,
}

#[derive(Debug, Args)]
pub struct MarketStatusArgs {
    /// Evaluate at this RFC3339 instant instead of the local clock.
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ChartCommand {
    /// Compute candle glyph geometry for a fixed surface size.
    Layout(ChartLayoutArgs),
}

#[derive(Debug, Args)]
pub struct ChartLayoutArgs {
    /// JSON file holding an aggregates document or a bare array of rows.
    #[arg(long)]
    pub input: PathBuf,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 400.0)]
    pub height: f64,
}

#[derive(Debug, Subcommand)]
pub enum FetchCommand {
    /// Most recent completed daily bar.
    Prev(FetchPrevArgs),
    /// Daily bars over an inclusive date range.
    Range(FetchRangeArgs),
}

#[derive(Debug, Args)]
pub struct FetchPrevArgs {
    #[arg(long)]
    pub ticker: String,

    /// API key; falls back to the POLYGON_API_KEY environment variable.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = tickdeck_core::DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Debug, Args)]
pub struct FetchRangeArgs {
    #[arg(long)]
    pub ticker: String,

    /// Range start, "YYYY-MM-DD".
    #[arg(long)]
    pub from: String,

    /// Range end, "YYYY-MM-DD".
    #[arg(long)]
    pub to: String,

    /// API key; falls back to the POLYGON_API_KEY environment variable.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = tickdeck_core::DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_stock_create() {
        let cli = Cli::parse_from([
            "tickdeck", "--memory", "stock", "create", "--company", "Apple Inc.", "--ticker",
            "aapl", "--volume", "1000", "--price", "187.5",
        ]);

        assert!(cli.memory);
        match cli.command {
            Command::Stock(StockCommand::Create(args)) => {
                assert_eq!(args.ticker, "aapl");
                assert_eq!(args.price, 187.5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
