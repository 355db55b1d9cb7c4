mod bot;

use std::{env::var, process::exit, sync::Arc};

use bot::{
    commands::CommandRegistry,
    db::open_database,
    platforms::telegram::{event_loop::run_telegram_loop, telegram::TelegramClient},
    run_event_loop,
    state::{def::{AppState, BotConfig, BotSecrets}, state::LocalClock},
};
use dotenvy::dotenv;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let secrets = match BotSecrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    };

    if let Err(e) = run_chat_bot(secrets).await {
        error!("Error running chat bot: {e}");
        exit(1);
    }
}

async fn run_chat_bot(secrets: BotSecrets) -> bot::commands::commands::BotResult<()> {
    let config_path = var("BOT_CONFIG").unwrap_or_else(|_| "bot_config.json".to_string());
    let config = BotConfig::load_config(&config_path)?;

    let pool = open_database(&config.database_url).await?;

    let client = TelegramClient::new(&secrets.token);
    let bot_username = client.username().await?;
    let telegram = client.bot.clone();

    let state = Arc::new(AppState {
        secrets: Arc::new(secrets),
        config: Arc::new(config),
        chat_client: Arc::new(client),
        registry: Arc::new(CommandRegistry::new()),
        clock: Arc::new(LocalClock),
        bot_username,
    });

    let (tx, rx) = unbounded_channel();
    let poller = tokio::spawn(async move {
        if let Err(e) = run_telegram_loop(telegram, tx).await {
            error!("Telegram loop error: {e}");
        }
    });

    info!("🤖 Bot @{} is running...", state.bot_username);

    let result = tokio::select! {
        result = run_event_loop(pool.clone(), state, rx) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    };

    poller.abort();
    pool.close().await;
    result
}
