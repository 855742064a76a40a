use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::debug;

mod cli;
mod formatting;
mod vipps;

use crate::vipps::{handle_command, storage_path_from_env};

#[derive(Parser, Debug)]
#[command(version, about = "Look up Vipps MobilePay receipts and keep them in a local JSON store")]
pub struct Arguments {
    /// The JSON file receipts are stored in. Defaults to $VRS_STORAGE_FILE, or receipts.json if that is not set.
    #[arg(short, long)]
    storage: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the receipt for an order from both Vipps APIs, merge it and save it in the receipt store
    Store {
        /// The order ID (transactionId/reference). You will be prompted for it if it is omitted.
        #[arg(index = 1)]
        order_id: Option<String>,
    },
    /// Fetch payment details, including the receipt link, from the ePayment API
    Payment {
        /// The payment reference (orderId). You will be prompted for it if it is omitted.
        #[arg(index = 1)]
        reference: Option<String>,
    },
    /// Fetch the full order details and receipt from the Order Management API
    Order {
        /// The order ID (transactionId). You will be prompted for it if it is omitted.
        #[arg(index = 1)]
        order_id: Option<String>,
    },
    /// Walk through the Vipps Login flow and print the user's profile
    Login {
        /// The authorization code received on the redirect URI. You will be prompted for it if it is omitted.
        #[arg(short, long)]
        code: Option<String>,
    },
    /// List the receipts in the receipt store
    Receipts,
    /// Print a stored receipt
    Show {
        #[arg(required = true, index = 1)]
        order_id: String,
    },
    /// Print the current configuration, excluding secrets
    Env,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let storage = cli.storage.unwrap_or_else(storage_path_from_env);
    debug!("Using receipt store at {}", storage.display());
    if let Err(e) = handle_command(cli.command, storage).await {
        eprintln!("An error occurred: {e:#}");
        std::process::exit(1);
    }
}
