use std::time::Duration;

use teloxide::{prelude::*, types::AllowedUpdate};
use tokio::{sync::mpsc::UnboundedSender, time::sleep};
use tracing::{debug, error, info};

use crate::bot::{chat_event::chat_event::ChatEvent, commands::commands::BotResult, platforms::telegram::telegram::map_update};

/// Long-poll wait in seconds. Stays below teloxide's default HTTP timeout.
const POLL_TIMEOUT: u32 = 10;

/// Pulls updates in order and forwards the ones the bot understands.
/// Returns when the receiving side of `tx` is gone.
pub async fn run_telegram_loop(bot: Bot, tx: UnboundedSender<ChatEvent>) -> BotResult<()> {
    let mut offset: i32 = 0;
    info!("Polling Telegram for updates");

    loop {
        let updates = match bot
            .get_updates()
            .offset(offset)
            .timeout(POLL_TIMEOUT)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
            .await
        {
            Ok(updates) => updates,
            Err(e) => {
                error!("getUpdates failed: {e}");
                sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            let update_id = update.id.0;
            match next_offset(update_id) {
                Some(next) => offset = next,
                None => error!("Update id {update_id} does not fit the getUpdates offset"),
            }

            let Some(event) = map_update(update.kind) else {
                debug!("Skipping update {update_id}");
                continue;
            };

            if tx.send(event).is_err() {
                info!("Event loop closed, stopping Telegram polling");
                return Ok(());
            }
        }
    }
}

/// Offset confirming `update_id`, `None` if it would not fit the API's i32.
fn next_offset(update_id: u32) -> Option<i32> {
    i32::try_from(update_id).ok()?.checked_add(1)
}
