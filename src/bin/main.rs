use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mock_trader::tui::app::App;
use mock_trader::*;

#[derive(Parser, Debug)]
#[command(about = "Mock stock trading simulator")]
struct Args {
    /// Symbols listed on the mock market
    #[arg(
        long,
        env = "MOCK_TRADER_SYMBOLS",
        value_delimiter = ',',
        default_value = "AAPL,TSLA,AMZN,GOOG"
    )]
    symbols: Vec<String>,
    /// Seed for a reproducible market
    #[arg(long, env = "MOCK_TRADER_SEED")]
    seed: Option<u64>,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=warn,mock_trader=warn", env!("CARGO_CRATE_NAME")).into()
        }))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = SessionConfig::default()
        .with_symbols(args.symbols)
        .with_seed(args.seed);
    let session = Session::from_config(&config)?;
    info!(
        "session started with {} symbols (seed {:?})",
        session.market().len(),
        config.seed
    );

    let mut app = App::new(session, io::stdin().lock(), io::stdout().lock());
    app.run()
}
