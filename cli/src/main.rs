mod file_store;
mod http;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};

use cart::{
    CART_STORAGE_KEY, CartRecord, CartStorage, CartUpdater, ClickOutcome, GuestCartStore, PageEffects, SessionContext,
    SyncError,
};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::file_store::FileStorage;
use crate::http::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing CSRF token; pass --csrf-token or set CART_CSRF_TOKEN")]
    MissingCsrfToken,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("cart update failed: {0}")]
    Sync(#[from] SyncError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("guest cart was not saved under {}", .0.display())]
    GuestCartNotSaved(PathBuf),
}

#[derive(Parser, Debug)]
#[command(name = "cart-cli", about = "Apply storefront cart updates from the terminal")]
struct Cli {
    #[arg(long, env = "CART_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "CART_ENDPOINT", default_value = cart::sync::UPDATE_ITEM_PATH)]
    endpoint: String,

    #[arg(long, env = "CART_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Session cookie of a logged-in visitor. Without it updates go to the guest cart.
    #[arg(long, env = "CART_SESSION_ID")]
    session_id: Option<String>,

    /// Directory holding the guest cart file.
    #[arg(long, env = "CART_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Add one unit of a product.
    Add { product_id: String },
    /// Remove one unit of a product.
    Remove { product_id: String },
    /// Send an arbitrary action token for a product.
    Update { product_id: String, action: String },
    /// Print the guest cart and its item count.
    Show,
}

impl Command {
    fn as_click(&self) -> Option<(&str, &str)> {
        match self {
            Self::Add { product_id } => Some((product_id.as_str(), cart::record::ACTION_ADD)),
            Self::Remove { product_id } => Some((product_id.as_str(), cart::record::ACTION_REMOVE)),
            Self::Update { product_id, action } => Some((product_id.as_str(), action.as_str())),
            Self::Show => None,
        }
    }
}

/// Terminal stand-in for the page: there is nothing to reload, and notices
/// go to stderr.
struct TerminalPage;

impl PageEffects for TerminalPage {
    fn reload(&self) {
        log::info!("cart: update applied");
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn session_from_cli(cli: &Cli) -> Result<SessionContext, CliError> {
    match &cli.session_id {
        Some(_) => {
            let token = cli.csrf_token.clone().ok_or(CliError::MissingCsrfToken)?;
            Ok(SessionContext::authenticated(token))
        }
        None => Ok(SessionContext::anonymous(cli.csrf_token.clone().unwrap_or_default())),
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let storage = FileStorage::new(cli.data_dir.clone());

    let Some((product_id, action)) = cli.command.as_click() else {
        let record = GuestCartStore::new(&storage).load();
        let count = record.item_count();
        return print_json(&serde_json::json!({ "items": record, "count": count }));
    };

    let session = session_from_cli(&cli)?;
    let transport = ReqwestTransport::new(&cli.base_url, cli.session_id.clone())?;
    let updater = CartUpdater::new(session, &storage, transport, TerminalPage).with_endpoint(cli.endpoint.as_str());

    match updater.handle_click(product_id, action).await {
        ClickOutcome::GuestUpdated(record) => {
            ensure_persisted(&storage, &record, &cli.data_dir)?;
            print_json(&serde_json::to_value(&record)?)
        }
        ClickOutcome::Synced(data) => print_json(&data),
        ClickOutcome::SyncFailed(e) => Err(CliError::Sync(e)),
    }
}

/// The guest path only logs write failures, so check the file actually holds
/// the new cart before reporting success.
fn ensure_persisted(storage: &FileStorage, record: &CartRecord, data_dir: &Path) -> Result<(), CliError> {
    let expected = record.to_json()?;
    match storage.load(CART_STORAGE_KEY) {
        Ok(Some(raw)) if raw == expected => Ok(()),
        _ => Err(CliError::GuestCartNotSaved(data_dir.to_path_buf())),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}
