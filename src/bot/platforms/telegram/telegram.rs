use futures::future::BoxFuture;
use teloxide::{
    prelude::*,
    types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message, UpdateKind, User},
};

use crate::bot::{chat_event::chat_event::{parse_command, ButtonAction, ButtonEvent, ChatEvent, ChatUser, CommandEvent}, commands::commands::BotResult, db::{ChatId, UserId}, handler::handler::ChatClient};

pub struct TelegramClient {
    pub bot: Bot,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self { bot: Bot::new(token) }
    }

    /// Username of the bot account, needed for `t.me` links.
    pub async fn username(&self) -> BotResult<String> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }
}

impl ChatClient for TelegramClient {
    fn send_message<'a>(&'a self, chat: ChatId, message: &'a str) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(async move {
            self.bot.send_message(teloxide::types::ChatId(chat.0), message).await?;
            Ok(())
        })
    }

    fn send_with_actions<'a>(&'a self, chat: ChatId, message: &'a str, actions: &'a [ButtonAction]) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(async move {
            self.bot
                .send_message(teloxide::types::ChatId(chat.0), message)
                .reply_markup(action_keyboard(actions))
                .await?;
            Ok(())
        })
    }

    fn acknowledge<'a>(&'a self, callback_id: &'a str) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(async move {
            self.bot.answer_callback_query(callback_id.to_string()).await?;
            Ok(())
        })
    }
}

fn action_keyboard(actions: &[ButtonAction]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        actions
            .iter()
            .map(|action| vec![InlineKeyboardButton::callback(action.label(), action.as_str())])
    )
}

pub fn map_update(kind: UpdateKind) -> Option<ChatEvent> {
    match kind {
        UpdateKind::Message(msg) => map_message(&msg),
        UpdateKind::CallbackQuery(query) => map_callback(query),
        _ => None,
    }
}

fn map_message(msg: &Message) -> Option<ChatEvent> {
    let from = msg.from.as_ref()?;
    let (name, raw_args) = parse_command(msg.text()?)?;

    Some(ChatEvent::Command(CommandEvent {
        user: map_user(from),
        chat: ChatId(msg.chat.id.0),
        name,
        raw_args,
    }))
}

fn map_callback(query: CallbackQuery) -> Option<ChatEvent> {
    let user = map_user(&query.from);
    // Zpráva s tlačítky může být už nedostupná, pak odpovídáme do soukromého chatu
    let chat = query
        .message
        .as_ref()
        .map(|m| ChatId(m.chat().id.0))
        .unwrap_or_else(|| user.id.private_chat());

    Some(ChatEvent::ButtonPress(ButtonEvent {
        user,
        chat,
        data: query.data?,
        callback_id: Some(query.id),
    }))
}

fn map_user(user: &User) -> ChatUser {
    ChatUser {
        id: UserId(user.id.0 as i64),
        display: user.username.clone().unwrap_or_else(|| user.first_name.clone()),
    }
}
