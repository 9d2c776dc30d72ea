//! Parcel Desk CLI - run the support tools without an MCP client.
//!
//! # Usage
//!
//! ```bash
//! # List every tool, or one domain
//! pd-cli tools
//! pd-cli tools --domain orders
//!
//! # Show how an order id is classified
//! pd-cli classify ORD-1001-D
//!
//! # Run a tool against the mock platform
//! pd-cli call get_order_status --args '{"order_id": "ORD-1001-D"}'
//! pd-cli call get_shipping_info --args '{"order_value": 50}'
//! ```
//!
//! `call` exits with status 1 when the tool refuses the request.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(author, version, about = "Parcel Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools
    Tools {
        /// Only tools in this domain (`orders`, `support`)
        #[arg(short, long)]
        domain: Option<String>,
    },
    /// Classify an order id and show its status profile
    Classify {
        /// Order id, e.g. ORD-1001-D
        order_id: String,
    },
    /// Run a tool and print its JSON result
    Call {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,

        /// Support content YAML to use instead of the built-in content
        #[arg(long, env = "PARCEL_DESK_CONTENT_PATH")]
        content: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(commands::Outcome::Success) => {}
        Ok(commands::Outcome::Rejected) => std::process::exit(1),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<commands::Outcome, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Tools { domain } => commands::tools::list(domain.as_deref()),
        Commands::Classify { order_id } => commands::classify::show(&order_id),
        Commands::Call {
            tool,
            args,
            content,
        } => commands::call::run(&tool, args.as_deref(), content).await,
    }
}
