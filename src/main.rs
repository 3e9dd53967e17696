use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use trendwatch::cli::commands::{Cli, Commands};
use trendwatch::config::AppConfig;
use trendwatch::TrendWatch;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let tw = TrendWatch::new(&config);
    if let Err(e) = run_command(tw, &config, cli.command).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run_command(
    tw: TrendWatch,
    config: &AppConfig,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Detect {
            top,
            no_save,
            json,
            now,
        } => {
            let now = parse_date(&now)?.unwrap_or_else(chrono::Utc::now);
            let scan = tw.detect(now).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                println!(
                    "Analyzed {} posts/comments, {} symbols with mention spikes",
                    scan.records_scanned, scan.spikes_detected
                );
                print!("{}", tw.summary(&scan, top.unwrap_or(config.top_n)));
            }
            if !no_save {
                if let Some(key) = tw.save(&scan).await? {
                    eprintln!("Saved {} trending opportunities to {key}", scan.total_opportunities);
                }
            }
        }
        Commands::Symbols { text } => {
            let symbols = tw.extract_symbols(&text);
            println!("{}", serde_json::to_string(&symbols)?);
        }
        Commands::Baseline { symbol, now } => {
            let now = parse_date(&now)?.unwrap_or_else(chrono::Utc::now);
            let report = tw.baseline(&symbol, now).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Watchlist => {
            for (symbol, class) in tw.watchlist().entries() {
                println!("{symbol}\t{class}");
            }
        }
    }
    Ok(())
}

fn parse_date(s: &Option<String>) -> Result<Option<chrono::DateTime<chrono::Utc>>, String> {
    match s {
        None => Ok(None),
        Some(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&chrono::Utc)));
            }
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Some(dt.and_utc()));
                }
            }
            Err(format!("Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"))
        }
    }
}
