//! Interactive terminal client for FeedsApp.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin feedsapp-client -- --base-url http://localhost:8080
//! ```

use clap::Parser;
use feedsapp_client::{Args, ClientConfig};
use feedsapp_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ClientConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = feedsapp_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
