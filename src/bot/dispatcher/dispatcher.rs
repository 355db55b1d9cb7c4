use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::bot::{chat_event::chat_event::{ButtonAction, ButtonEvent, ChatEvent, CommandEvent}, commands::{commands::BotResult, rewards::logic::start_task}, permissions::permissions::has_permission, replies::Replies, state::def::AppState};

pub async fn dispatch_event(event: ChatEvent, pool: SqlitePool, state: Arc<AppState>) -> BotResult<()> {
    match event {
        ChatEvent::Command(cmd) => dispatch_command(cmd, pool, state).await,
        ChatEvent::ButtonPress(press) => dispatch_button(press, pool, state).await,
    }
}

pub async fn dispatch_command(event: CommandEvent, pool: SqlitePool, state: Arc<AppState>) -> BotResult<()> {
    let Some(cmd) = state.registry.get(&event.name) else {
        debug!("Ignoring unknown command /{}", event.name);
        return Ok(());
    };

    if !has_permission(&event.user, cmd.permission(), &state.secrets) {
        warn!("User {} tried /{} without {} rights", event.user.id, cmd.name(), cmd.permission());
        state.chat_client.send_message(event.chat, &Replies::not_authorized()).await?;
        return Ok(());
    }

    debug!("User {} runs /{}", event.user.id, cmd.name());
    cmd.execute(event, pool, state).await
}

pub async fn dispatch_button(event: ButtonEvent, pool: SqlitePool, state: Arc<AppState>) -> BotResult<()> {
    let action = match event.data.parse::<ButtonAction>() {
        Ok(action) => action,
        Err(_) => {
            warn!("Unknown button '{}' from user {}", event.data, event.user.id);
            return Ok(());
        }
    };

    debug!("User {} pressed {}", event.user.id, action);
    let client = &state.chat_client;

    match action {
        ButtonAction::StartTask => {
            start_task(&pool, &state, event.user.id, event.chat).await?;
        }
        ButtonAction::Refer => {
            client.send_message(event.chat, &Replies::referral_link(&state.bot_username, event.user.id)).await?;
        }
        ButtonAction::Withdraw => {
            client.send_message(event.chat, &Replies::withdraw_manual()).await?;
        }
    }

    Ok(())
}
