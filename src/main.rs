//! # Delivery Tracker Demo
//!
//! Picks a store, an address and an item, then follows the courier until it
//! arrives. Each frame is logged with the marker position and the status line.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --list
//! RUST_LOG=info cargo run -- --store "Sushi Master" --address "Rua Halfeld, Juiz de Fora" --item "🍣 Sushi" --interval 1
//! ```

use clap::Parser;
use delivery_tracker::catalog::{Catalog, StoreId};
use delivery_tracker::config::Settings;
use delivery_tracker::lifecycle::{setup_tracing, DeliverySystem};
use delivery_tracker::model::Address;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "delivery-tracker", about = "Simulated food delivery tracking")]
struct Cli {
    /// Store to order from
    #[arg(long, default_value = "Hamburgueria Top")]
    store: String,

    /// Delivery address
    #[arg(long, required_unless_present = "list")]
    address: Option<String>,

    /// Menu item to order
    #[arg(long, required_unless_present = "list")]
    item: Option<String>,

    /// Seconds between courier moves, overrides TICK_INTERVAL_SECS
    #[arg(long)]
    interval: Option<u64>,

    /// Print the store catalog and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let cli = Cli::parse();

    if cli.list {
        for store in Catalog::default().stores() {
            info!("{}", store.listing_label());
            for entry in store.menu_entries() {
                info!("    {}", entry.label);
            }
        }
        return Ok(());
    }

    let mut settings = Settings::from_env()?;
    if let Some(secs) = cli.interval.filter(|s| *s > 0) {
        settings.tick_interval = Duration::from_secs(secs);
    }

    let mut system = DeliverySystem::new(&settings)?;
    let client = system.session_client.clone();

    let address = Address::new(cli.address.unwrap_or_default());
    let selection = client
        .select_store(StoreId::from(cli.store), address)
        .await?;
    info!("{}", selection.store_label);

    let snapshot = client.confirm_order(cli.item.unwrap_or_default()).await?;
    info!("{}", snapshot.label);

    let mut frames = system.start_tracking(selection.generation);
    while frames.changed().await.is_ok() {
        let Some(frame) = frames.borrow_and_update().clone() else {
            continue;
        };
        let [lat, lng] = frame.marker();
        info!(
            cursor = frame.cursor,
            lat,
            lng,
            status = %frame.status,
            "Courier position"
        );
        if frame.has_arrived() {
            break;
        }
    }

    match client.snapshot().await {
        Ok(snapshot) => info!("{}", snapshot.label),
        Err(e) => warn!(error = %e, "Could not read final status"),
    }

    drop(client);
    system.shutdown().await?;
    Ok(())
}
