use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::bot::{chat_event::chat_event::ChatEvent, commands::commands::BotResult, handler::handler::handle_event, state::def::AppState};

pub mod state;
pub mod chat_event;
pub mod dispatcher;
pub mod commands;
pub mod platforms;
pub mod permissions;
pub mod db;
pub mod handler;
pub mod dashboard;
pub mod replies;

#[cfg(test)]
pub mod test_support;

/// Handles events one at a time. A failing event is logged and the loop moves on.
pub async fn run_event_loop(pool: SqlitePool, state: Arc<AppState>, mut rx: tokio::sync::mpsc::UnboundedReceiver<ChatEvent>) -> BotResult<()> {
    info!("Event loop started");

    while let Some(event) = rx.recv().await {
        if let Err(e) = handle_event(event, pool.clone(), state.clone()).await {
            tracing::error!("Event error: {e:?}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{db::{accounts::get_account, UserId}, test_support::TestBot};

    #[tokio::test]
    async fn failing_event_does_not_stop_the_loop() {
        let bot = TestBot::new("1").await;
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        // no account yet, so this press fails
        tx.send(TestBot::press(10, "start_task")).unwrap();
        tx.send(TestBot::command(10, "/start")).unwrap();
        drop(tx);

        run_event_loop(bot.pool.clone(), bot.state.clone(), rx).await.unwrap();

        assert!(get_account(&bot.pool, UserId(10)).await.unwrap().is_some());
        assert_eq!(bot.client.take().len(), 1);
    }
}
