use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "rental-quote")]
#[command(about = "Check a car's availability and price a rental period")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "rental.toml")]
    pub config: String,

    /// Car to check
    #[arg(long)]
    pub car: i64,

    /// Pick-up day (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Return day (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Renter making the request
    #[arg(long, default_value = "guest")]
    pub renter: String,

    /// Treat this day as today instead of the system clock
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Submit the reservation after a clean preflight
    #[arg(long)]
    pub submit: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
