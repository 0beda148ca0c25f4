use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rental_availability::utils::error::ErrorSeverity;
use rental_availability::utils::{logger, validation::Validate};
use rental_availability::{
    AvailabilityEngine, BookingError, BookingService, CliConfig, DateInterval, Preflight,
    Session, SubmitOutcome, TomlConfig, UserType,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入配置
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting rental-quote");
    tracing::debug!("CLI args: {:?}", args);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    if let Err(e) = run(&args, &config).await {
        tracing::error!(
            "❌ Booking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.severity()));
    }

    Ok(())
}

async fn run(args: &CliConfig, config: &TomlConfig) -> Result<(), BookingError> {
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    if AvailabilityEngine::disable_past_dates(&args.start, &today) {
        return Err(BookingError::invalid_range(
            args.start,
            args.end,
            format!("pick-up day is before {}", today),
        ));
    }
    if AvailabilityEngine::disable_end_dates(&args.end, &args.start) {
        return Err(BookingError::invalid_range(
            args.start,
            args.end,
            "return day must come after pick-up day",
        ));
    }
    let interval = DateInterval::new(args.start, args.end)?;

    let backend = config.build_backend();
    let service = BookingService::new(config.engine(), backend.clone(), backend);
    let session = Session::new(args.renter.clone(), UserType::Renter);

    let preflight = service.preflight(&session, args.car, interval).await?;
    print_result(args.json, &preflight)?;

    if let (true, Preflight::Available(quote)) = (args.submit, preflight) {
        let outcome = service.submit(&session, quote).await?;
        print_result(args.json, &outcome)?;
    }
    Ok(())
}

fn print_result<T: serde::Serialize + Describe>(json: bool, value: &T) -> Result<(), BookingError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value.describe());
    }
    Ok(())
}

trait Describe {
    fn describe(&self) -> String;
}

impl Describe for Preflight {
    fn describe(&self) -> String {
        match self {
            Preflight::Available(quote) => format!(
                "✅ Available: {} day(s) x {} = {} {}",
                quote.pricing.days,
                quote.pricing.daily_rate,
                quote.pricing.total_amount,
                quote.currency
            ),
            Preflight::Conflicted { colliding_days, .. } => {
                let days: Vec<String> = colliding_days.iter().map(|d| d.to_string()).collect();
                format!("⛔ Unavailable on: {}", days.join(", "))
            }
        }
    }
}

impl Describe for SubmitOutcome {
    fn describe(&self) -> String {
        match self {
            SubmitOutcome::Confirmed(c) => format!(
                "📄 Reservation {} pending payment: {} {}",
                c.order_id, c.total_amount, c.currency
            ),
            SubmitOutcome::ConflictRejected { conflicts } => {
                format!("⛔ Rejected: {} conflicting record(s)", conflicts.len())
            }
        }
    }
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 2,      // 輸入錯誤
        ErrorSeverity::Medium => 2,   // 權限錯誤
        ErrorSeverity::High => 1,     // 後端錯誤
        ErrorSeverity::Critical => 3, // 配置錯誤
    }
}
