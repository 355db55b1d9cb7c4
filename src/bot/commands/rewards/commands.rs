use std::sync::Arc;

use futures::FutureExt;
use lazy_static::lazy_static;
use sqlx::SqlitePool;
use tracing::info;

use crate::{bot::{chat_event::chat_event::{parse_referral_code, CommandEvent}, commands::{commands::{BotResult, CommandT, FnCommand}, rewards::logic::pay_referral, CommandGroup}, dashboard::dashboard::send_dashboard, db::{accounts::create_account, ads::insert_ad}, permissions::permissions::PermissionLevel, replies::Replies, state::def::AppState}, cmd};

lazy_static! {
    pub static ref REWARD_COMMANDS: Arc<CommandGroup> = Arc::new(CommandGroup {
        name: "Rewards".to_string(),
        commands: vec![
            cmd!(start(), "start"),
            cmd!(add_ad(), "addad"),
        ],
    });
}

pub fn start() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |event: CommandEvent, pool: SqlitePool, state: Arc<AppState>| run_start(event, pool, state).boxed(),
        "Creates your account and shows the dashboard",
        "/start [ref<id>]",
        "start",
        PermissionLevel::Everyone,
    ))
}

pub fn add_ad() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |event: CommandEvent, pool: SqlitePool, state: Arc<AppState>| run_add_ad(event, pool, state).boxed(),
        "Adds an ad to the pool",
        "/addad <ad_url>",
        "addad",
        PermissionLevel::Admin,
    ))
}

async fn run_start(event: CommandEvent, pool: SqlitePool, state: Arc<AppState>) -> BotResult<()> {
    let user = event.user.id;

    // Referral se platí jen při založení účtu
    if create_account(&pool, user, state.clock.today()).await? {
        info!("New account {} ({})", user, event.user.display);

        if let Some(referrer) = event.args().next().and_then(parse_referral_code) {
            if referrer != user {
                pay_referral(&pool, &state, referrer, user).await?;
            }
        }
    }

    send_dashboard(&pool, &state, user, event.chat).await?;
    Ok(())
}

async fn run_add_ad(event: CommandEvent, pool: SqlitePool, state: Arc<AppState>) -> BotResult<()> {
    let client = &state.chat_client;
    let url = event.raw_args.trim();

    if url.is_empty() {
        client.send_message(event.chat, &Replies::add_ad_usage()).await?;
        return Ok(());
    }

    let id = insert_ad(&pool, url).await?;
    info!("Ad #{id} added by {}: {url}", event.user.id);
    client.send_message(event.chat, &Replies::ad_added()).await?;
    Ok(())
}
