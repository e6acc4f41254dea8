use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod models;
mod services;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("price_chart=info")),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    info!("📈 Starting price-chart {}", env!("CARGO_PKG_VERSION"));

    match commands::handle_args(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
