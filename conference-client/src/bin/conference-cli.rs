//! Conference CLI - confer orders from a terminal
//!
//! ```text
//! conference-cli list [--number 1234]
//! conference-cli show <order-id>
//! conference-cli inc <order-id> <item>
//! conference-cli scan <order-id> <item> <code>
//! conference-cli finalize <order-id>
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use conference::{ConferenceCommand, ConferenceConfig, ConferenceSession, SessionResponse};
use conference_client::{ClientConfig, ConferenceFilter, HttpClient};
use shared::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "conference-cli", about = "Order conference client")]
struct Cli {
    /// API base URL (overrides API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token (overrides API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Request timeout in milliseconds (overrides API_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List orders
    List {
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        customer: Option<String>,
    },
    /// Show one order with its progress
    Show { order_id: String },
    /// Set an item's conferred quantity
    Set {
        order_id: String,
        item: usize,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit to an item
    Inc { order_id: String, item: usize },
    /// Remove one unit from an item
    Dec { order_id: String, item: usize },
    /// Count one scanned code for an item
    Scan {
        order_id: String,
        item: usize,
        code: String,
    },
    /// Set or clear an item's note
    Note {
        order_id: String,
        item: usize,
        text: Option<String>,
    },
    /// Finalize the conference
    Finalize { order_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = ConferenceConfig::from_env().context("Failed to load conference configuration")?;
    conference::logger::init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    // Flags win over the environment
    let client_config = ClientConfig::from_lookup(|key| {
        let flag = match key {
            "API_BASE_URL" => cli.base_url.clone(),
            "API_TOKEN" => cli.token.clone(),
            "API_TIMEOUT_MS" => cli.timeout_ms.map(|ms| ms.to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })?;
    let client = Arc::new(HttpClient::new(&client_config)?);

    let (order_id, command) = match cli.command {
        Command::List { number, customer } => {
            let list = client.list_conferences(&ConferenceFilter { number, customer }).await?;
            for order in &list.orders {
                let progress = order.progress();
                let status = config.status_mapping.resolve(order.status.as_deref());
                println!(
                    "{:<26} #{:<10} {:<12} {}/{}",
                    order.id,
                    order.number().unwrap_or("-"),
                    status,
                    progress.conferred_items,
                    progress.total_items
                );
            }
            println!("{} order(s)", list.count.max(list.orders.len() as u64));
            return Ok(());
        }
        Command::Show { order_id } => {
            let order = client.fetch_conference(&order_id).await?;
            let status = config.status_mapping.resolve(order.status.as_deref());
            println!("Order {} ({})", order.number().unwrap_or(&order.id), status);
            for (index, item) in order.items.iter().enumerate() {
                println!(
                    "  [{}] {:<20} {:>4}/{:<4} {}",
                    index,
                    item.label(),
                    item.conferred_quantity,
                    item.required_quantity,
                    item.observation.as_deref().unwrap_or("")
                );
            }
            return Ok(());
        }
        Command::Set {
            order_id,
            item,
            quantity,
        } => (
            order_id,
            ConferenceCommand::SetQuantity {
                item_index: item,
                quantity,
            },
        ),
        Command::Inc { order_id, item } => (order_id, ConferenceCommand::Increment { item_index: item }),
        Command::Dec { order_id, item } => (order_id, ConferenceCommand::Decrement { item_index: item }),
        Command::Scan { order_id, item, code } => (order_id, ConferenceCommand::Scan { item_index: item, code }),
        Command::Note { order_id, item, text } => (
            order_id,
            ConferenceCommand::SetObservation {
                item_index: item,
                observation: text,
            },
        ),
        Command::Finalize { order_id } => (order_id, ConferenceCommand::Finalize),
    };

    let mut session = ConferenceSession::open(client, config.status_mapping.clone(), &order_id, config.scan)
        .await
        .with_context(|| format!("Failed to open order {}", order_id))?;
    let response = match session.execute(command).await {
        Ok(response) => response,
        Err(e) => {
            let app = AppError::from(&e);
            tracing::warn!(
                order_id = %order_id,
                code = app.code.code(),
                category = app.code.category().name(),
                local = e.is_local(),
                "Command rejected"
            );
            eprintln!(
                "{} [{} / HTTP {}]",
                app.message,
                app.code.code(),
                app.http_status().as_u16()
            );
            return Err(e.into());
        }
    };
    print_response(&response);
    Ok(())
}

fn print_response(response: &SessionResponse) {
    println!(
        "{:?}: status {}, {}/{} items conferred, {} unit(s) remaining{}",
        response.notice,
        response.status,
        response.progress.conferred_items,
        response.progress.total_items,
        response.progress.remaining_units,
        if response.persisted { "" } else { " (nothing written)" }
    );
}
