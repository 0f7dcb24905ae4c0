//! Shop assistant CLI - run gateway requests from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Classify a free-text message and run the chosen operation
//! sa-cli ask "avete le sneaker nere in 44?"
//!
//! # Direct search
//! sa-cli search sneaker --size 44 --color nero --debug
//!
//! # Direct stock check
//! sa-cli stock --size 44 --url https://shop.example/prodotto/sneaker-nera/
//! sa-cli stock --size 44 --product-id 812
//! ```
//!
//! Reads the same environment as the gateway binary and prints the
//! response envelope as pretty JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use shop_assistant_core::Query;
use shop_assistant_gateway::Dispatcher;
use shop_assistant_gateway::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "sa-cli")]
#[command(author, version, about = "Shop assistant CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a free-text message through intent classification
    Ask {
        /// Shopper message
        message: String,
    },
    /// Search the catalog directly
    Search {
        /// Search term
        query: String,

        /// Size attribute filter
        #[arg(short, long)]
        size: Option<String>,

        /// Color attribute filter
        #[arg(short, long)]
        color: Option<String>,

        /// Include the catalog query URL and result count
        #[arg(long)]
        debug: bool,
    },
    /// Check stock of one size of a product
    Stock(StockArgs),
}

#[derive(Args)]
struct StockArgs {
    /// Size to check
    #[arg(short, long)]
    size: String,

    /// Product page URL
    #[arg(short, long, required_unless_present = "product_id")]
    url: Option<String>,

    /// Numeric product ID (wins over --url)
    #[arg(short, long)]
    product_id: Option<String>,
}

impl Commands {
    fn into_query(self) -> Query {
        match self {
            Self::Ask { message } => Query::message(message),
            Self::Search {
                query,
                size,
                color,
                debug,
            } => Query {
                explicit_query: Some(query),
                size,
                color,
                debug,
                ..Query::default()
            },
            Self::Stock(StockArgs {
                size,
                url,
                product_id,
            }) => Query {
                size: Some(size),
                product_url: url,
                product_id,
                ..Query::default()
            },
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr keeps stdout clean for JSON)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env()?;
    let dispatcher = Dispatcher::from_config(&config)?;

    let envelope = dispatcher.dispatch(cli.command.into_query()).await;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}
