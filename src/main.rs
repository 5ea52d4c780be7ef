mod api;
mod common;
mod config;
mod ui;
mod views;

use std::env;
use std::error::Error;

use api::{ApiClient, ApiWorker};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;
use ui::AdminApp;

#[derive(Parser)]
#[command(
    name = "autoreply-admin",
    version,
    about = "Admin client for the AutoReplyBot backend"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Backend base URL (overrides AUTOREPLY_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Check that the backend answers, then exit
    Check,
    /// Print one template as JSON, then exit
    Template {
        /// Template id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let env_url = env::var(config::API_URL_ENV).ok();
    let base_url = config::resolve_api_url(cli.api_url.as_deref(), env_url.as_deref(), &app_config);
    let client = ApiClient::new(&base_url)?;

    match cli.mode {
        Some(Mode::Check) => run_check(&client).await,
        Some(Mode::Template { id }) => print_template(&client, id).await,
        None => run_gui(client, app_config.rows_per_page()).await,
    }
}

async fn run_check(client: &ApiClient) -> Result<(), Box<dyn Error>> {
    let banner = client.health().await?;
    log::info!("Backend at {} is up", client.base_url());
    println!("{}: {banner}", client.base_url());
    Ok(())
}

async fn print_template(client: &ApiClient, id: i64) -> Result<(), Box<dyn Error>> {
    let template = client.get_template(id).await?;
    println!("{}", serde_json::to_string_pretty(&template)?);
    Ok(())
}

async fn run_gui(client: ApiClient, rows_per_page: u32) -> Result<(), Box<dyn Error>> {
    // 1. Channels
    // UI -> API worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // API worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Start the API worker (background)
    log::info!("Using backend {}", client.base_url());
    tokio::spawn(ApiWorker::new(client, event_tx, cmd_rx).run());

    // 3. Start the UI (main thread)
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "AutoReplyBot Admin",
        options,
        Box::new(move |cc| {
            Ok(Box::new(AdminApp::new(
                cc,
                cmd_tx,
                event_rx,
                rows_per_page,
            )))
        }),
    )?;
    Ok(())
}
