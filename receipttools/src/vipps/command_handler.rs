use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use receipt_engine::{
    flow_objects::CaptureOutcome,
    JsonFileStorage,
    OrderId,
    ReceiptFlowApi,
};
use vipps_tools::{VippsApi, VippsConfig};

use crate::{
    cli::display_envs,
    formatting::{format_receipt, format_receipt_records, to_pretty_json},
    Command,
};

pub async fn handle_command(command: Command, storage: PathBuf) -> Result<()> {
    use Command::*;
    match command {
        Store { order_id } => store_receipt(order_id, storage).await,
        Payment { reference } => fetch_payment_details(reference).await,
        Order { order_id } => fetch_order_details(order_id).await,
        Login { code } => login(code).await,
        Receipts => list_receipts(storage),
        Show { order_id } => show_receipt(&order_id, storage),
        Env => {
            display_envs();
            Ok(())
        },
    }
}

fn new_vipps_api() -> Result<VippsApi> {
    let config = VippsConfig::new_from_env_or_default();
    Ok(VippsApi::new(config)?)
}

/// Returns the value given on the command line, or asks for one. `None` means the user gave nothing usable.
fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<Option<String>> {
    let value = match value {
        Some(v) => v,
        None => dialoguer::Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text()?,
    };
    let value = value.trim().to_string();
    Ok(if value.is_empty() { None } else { Some(value) })
}

fn order_id_or_prompt(value: Option<String>, prompt: &str) -> Result<Option<OrderId>> {
    match value_or_prompt(value, prompt)? {
        Some(s) => Ok(Some(s.parse()?)),
        None => {
            println!("Order ID is required.");
            Ok(None)
        },
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    let style =
        ProgressStyle::with_template("{spinner:5} {msg} [{elapsed}]").unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message);
    pb
}

pub async fn store_receipt(order_id: Option<String>, storage: PathBuf) -> Result<()> {
    println!("Vipps Receipt Storage Tool");
    let Some(order_id) = order_id_or_prompt(order_id, "Enter the Order ID (transactionId/reference)")? else {
        return Ok(());
    };
    let api = ReceiptFlowApi::new(new_vipps_api()?, JsonFileStorage::new(&storage));
    let pb = spinner("Fetching receipt data...");
    let outcome = api.capture_receipt(&order_id).await;
    pb.finish_and_clear();
    let outcome = outcome?;
    for warning in outcome.fetch_warnings() {
        println!("Warning: {warning}");
    }
    match outcome {
        CaptureOutcome::NoReceiptData { .. } => println!("No receipt data or URL found for this order."),
        CaptureOutcome::Stored(stored) => {
            if let Some(warning) = &stored.storage_warning {
                println!("Warning: {warning}");
            }
            info!("Receipt for order {order_id} was {}", stored.upsert);
            println!("Receipt saved to {}", storage.display());
            println!("\nCaptured Data:");
            println!("{}", to_pretty_json(&stored.record, "receipt"));
        },
    }
    Ok(())
}

pub async fn fetch_payment_details(reference: Option<String>) -> Result<()> {
    println!("Fetching payment details (receipt link) from the Vipps ePayment API.");
    let Some(reference) = value_or_prompt(reference, "Enter the Payment Reference (orderId)")? else {
        println!("A payment reference is required.");
        return Ok(());
    };
    let api = new_vipps_api()?;
    let token = api.access_token().await?;
    println!("Access Token obtained: {}", token.preview());
    let details = api.payment_details(&reference, &token).await?;
    println!("\nPayment Details:\n{}", to_pretty_json(&details, "payment details"));
    match &details.receipt_url {
        Some(url) => println!("\nReceipt URL: {url}"),
        None => println!("\nNo 'receiptUrl' found in the payment details."),
    }
    Ok(())
}

pub async fn fetch_order_details(order_id: Option<String>) -> Result<()> {
    println!("Fetching full order details (receipt data) from the Vipps Order Management API.");
    let Some(order_id) = order_id_or_prompt(order_id, "Enter the Order ID (transactionId)")? else {
        return Ok(());
    };
    let api = new_vipps_api()?;
    let token = api.access_token().await?;
    println!("Access Token obtained: {}", token.preview());
    let Some(details) = api.order_details(order_id.as_str(), &token).await? else {
        println!("\nNo order details are registered for order {order_id}.");
        return Ok(());
    };
    println!("\nOrder Details (Receipt):\n{}", to_pretty_json(&details, "order details"));
    match &details.receipt {
        Some(receipt) => println!("\n{}", format_receipt(receipt)),
        None => println!("\nNo 'receipt' object found in order details."),
    }
    Ok(())
}

pub async fn login(code: Option<String>) -> Result<()> {
    let api = new_vipps_api()?;
    let url = api.authorize_url(&VippsApi::random_state())?;
    println!("To log in with Vipps, open this URL in a browser:");
    println!("{url}");
    let Some(code) = value_or_prompt(code, "Enter the Authorization Code received from the callback")? else {
        return Ok(());
    };
    let tokens = api.login(&code).await?;
    println!("\nTokens received:\n{}", to_pretty_json(&tokens, "tokens"));
    let user_info = api.user_info(&tokens.access_token).await?;
    println!("\nUser Info received:\n{}", to_pretty_json(&user_info, "user info"));
    println!(
        "\nNow you have identified the user. You can use their 'sub' or 'phone_number' to look up their receipts in \
         your local store."
    );
    Ok(())
}

/// A flow API for reading the receipt store. Reads never touch the Vipps client.
fn receipt_store(storage: &Path) -> Result<ReceiptFlowApi<VippsApi, JsonFileStorage>> {
    Ok(ReceiptFlowApi::new(new_vipps_api()?, JsonFileStorage::new(storage)))
}

pub fn list_receipts(storage: PathBuf) -> Result<()> {
    let loaded = receipt_store(&storage)?.stored_receipts()?;
    if let Some(warning) = &loaded.warning {
        println!("Warning: {warning}");
    }
    if loaded.store.is_empty() {
        println!("No receipts stored in {}", storage.display());
        return Ok(());
    }
    println!("{} receipts stored in {}", loaded.store.len(), storage.display());
    println!("{}", format_receipt_records(loaded.store.records()));
    Ok(())
}

pub fn show_receipt(order_id: &str, storage: PathBuf) -> Result<()> {
    let order_id = order_id.parse::<OrderId>()?;
    let (record, warning) = receipt_store(&storage)?.stored_receipt(&order_id)?;
    if let Some(warning) = &warning {
        println!("Warning: {warning}");
    }
    match record {
        Some(record) => {
            println!("{}", to_pretty_json(&record, "receipt"));
            if let Some(receipt) = &record.receipt {
                println!("\n{}", format_receipt(receipt));
            }
        },
        None => println!("No receipt stored for order {order_id}"),
    }
    Ok(())
}
