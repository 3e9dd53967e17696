use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trendwatch", about = "Trending-symbol detector over collected social mentions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run detection, print the top opportunities and save the ranked list
    Detect {
        /// How many opportunities to show (defaults to TRENDWATCH_TOP_N)
        #[arg(long)]
        top: Option<usize>,
        /// Skip writing results to the blob store
        #[arg(long)]
        no_save: bool,
        /// Print the full scan as JSON instead of the text summary
        #[arg(long)]
        json: bool,
        /// End of the detection window (YYYY-MM-DD or RFC3339, default now)
        #[arg(long)]
        now: Option<String>,
    },
    /// Show which watch-list symbols a piece of text mentions
    Symbols {
        text: String,
    },
    /// Show the mention baseline for one symbol
    Baseline {
        symbol: String,
        #[arg(long)]
        now: Option<String>,
    },
    /// List the configured watch-list
    Watchlist,
}
