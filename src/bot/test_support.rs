use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use futures::future::BoxFuture;
use sqlx::SqlitePool;
use teloxide::{ApiError, RequestError};

use crate::bot::{chat_event::chat_event::{ButtonAction, ButtonEvent, ChatEvent, ChatUser, CommandEvent}, commands::{commands::BotResult, CommandRegistry}, db::{memory_pool, ChatId, UserId}, handler::handler::ChatClient, state::def::{AppState, BotConfig, BotError, BotSecrets, Clock}};

#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub chat: ChatId,
    pub text: String,
    pub actions: Vec<ButtonAction>,
}

#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<Sent>>,
    pub acknowledged: Mutex<Vec<String>>,
    reject_acks: bool,
    blocked: Vec<ChatId>,
}

impl RecordingClient {
    /// Every acknowledgement fails, like presses Telegram considers too old.
    pub fn rejecting_acks() -> Self {
        Self { reject_acks: true, ..Default::default() }
    }

    /// Sends to `chat` fail, like a user who blocked the bot.
    pub fn blocked_by(chat: ChatId) -> Self {
        Self { blocked: vec![chat], ..Default::default() }
    }

    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    pub fn texts(&self) -> Vec<String> {
        self.take().into_iter().map(|s| s.text).collect()
    }
}

impl ChatClient for RecordingClient {
    fn send_message<'a>(&'a self, chat: ChatId, message: &'a str) -> BoxFuture<'a, BotResult<()>> {
        self.send_with_actions(chat, message, &[])
    }

    fn send_with_actions<'a>(&'a self, chat: ChatId, message: &'a str, actions: &'a [ButtonAction]) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(async move {
            if self.blocked.contains(&chat) {
                return Err(BotError::Telegram(RequestError::Api(ApiError::BotBlocked)));
            }
            self.sent.lock().unwrap().push(Sent { chat, text: message.to_string(), actions: actions.to_vec() });
            Ok(())
        })
    }

    fn acknowledge<'a>(&'a self, callback_id: &'a str) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(async move {
            if self.reject_acks {
                return Err(BotError::Telegram(RequestError::Api(ApiError::Unknown("query is too old".into()))));
            }
            self.acknowledged.lock().unwrap().push(callback_id.to_string());
            Ok(())
        })
    }
}

pub struct FixedClock(Mutex<NaiveDate>);

impl FixedClock {
    pub fn advance_day(&self) {
        let mut today = self.0.lock().unwrap();
        *today = today.succ_opt().unwrap();
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.0.lock().unwrap()
    }
}

pub struct TestBot {
    pub pool: SqlitePool,
    pub state: Arc<AppState>,
    pub client: Arc<RecordingClient>,
    pub clock: Arc<FixedClock>,
}

impl TestBot {
    pub async fn new(admin_id: &str) -> Self {
        Self::with_client(admin_id, RecordingClient::default()).await
    }

    pub async fn with_client(admin_id: &str, client: RecordingClient) -> Self {
        let pool = memory_pool().await;
        let client = Arc::new(client);
        let clock = Arc::new(FixedClock(Mutex::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())));

        let state = Arc::new(AppState {
            secrets: Arc::new(BotSecrets { token: "test-token".into(), admin_id: admin_id.into() }),
            config: Arc::new(BotConfig::new()),
            chat_client: client.clone(),
            registry: Arc::new(CommandRegistry::new()),
            clock: clock.clone(),
            bot_username: "AdQuotaBot".into(),
        });

        TestBot { pool, state, client, clock }
    }

    pub fn command(user: i64, text: &str) -> ChatEvent {
        let (name, raw_args) = crate::bot::chat_event::chat_event::parse_command(text).unwrap();
        ChatEvent::Command(CommandEvent { user: Self::user(user), chat: ChatId(user), name, raw_args })
    }

    pub fn press(user: i64, data: &str) -> ChatEvent {
        ChatEvent::ButtonPress(ButtonEvent {
            user: Self::user(user),
            chat: ChatId(user),
            data: data.to_string(),
            callback_id: Some(format!("cb-{user}")),
        })
    }

    fn user(id: i64) -> ChatUser {
        ChatUser { id: UserId(id), display: format!("user{id}") }
    }
}
