use std::sync::Arc;

use futures::future::BoxFuture;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::bot::{chat_event::chat_event::{ButtonAction, ChatEvent}, commands::commands::BotResult, db::ChatId, dispatcher::dispatcher::dispatch_event, state::def::AppState};

/// Outbound side of the chat platform.
pub trait ChatClient: Send + Sync {
    fn send_message<'a>(&'a self, chat: ChatId, message: &'a str) -> BoxFuture<'a, BotResult<()>>;

    /// Sends a message with one inline button per row.
    fn send_with_actions<'a>(&'a self, chat: ChatId, message: &'a str, actions: &'a [ButtonAction]) -> BoxFuture<'a, BotResult<()>>;

    /// Tells the platform a button press was received.
    fn acknowledge<'a>(&'a self, callback_id: &'a str) -> BoxFuture<'a, BotResult<()>>;
}

pub async fn handle_event(event: ChatEvent, pool: SqlitePool, state: Arc<AppState>) -> BotResult<()> {
    debug!("Handling event from user {}", event.user().id);

    // Stale presses cannot be acknowledged any more but still have to run
    if let ChatEvent::ButtonPress(press) = &event {
        if let Some(callback_id) = &press.callback_id {
            if let Err(e) = state.chat_client.acknowledge(callback_id).await {
                warn!("Could not acknowledge press {callback_id} from user {}: {e}", press.user.id);
            }
        }
    }

    dispatch_event(event, pool, state).await
}
