use std::{io, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bot::{commands::CommandRegistry, db::UserId, handler::handler::ChatClient};

pub struct AppState {
    pub secrets: Arc<BotSecrets>,
    pub config: Arc<BotConfig>,
    pub chat_client: Arc<dyn ChatClient>,
    pub registry: Arc<CommandRegistry>,
    pub clock: Arc<dyn Clock>,
    /// Telegram username of the bot itself, used in referral links.
    pub bot_username: String,
}

pub struct BotSecrets {
    pub token: String,
    pub admin_id: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct BotConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub rewards: RewardConfig,
}

fn default_database_url() -> String {
    "sqlite://adquota.db".into()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct RewardConfig {
    //Kolik úkolů denně
    #[serde(default = "default_daily_tasks")]
    pub daily_tasks: i64,
    #[serde(default = "default_task_reward")]
    pub task_reward: f64,
    #[serde(default = "default_referral_reward")]
    pub referral_reward: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_progress_width")]
    pub progress_width: usize,
}

fn default_daily_tasks() -> i64 { 30 }
fn default_task_reward() -> f64 { 2.0 }
fn default_referral_reward() -> f64 { 5.0 }
fn default_currency() -> String { "VET".into() }
fn default_progress_width() -> usize { 10 }

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            database_url: default_database_url(),
            rewards: RewardConfig::default(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            daily_tasks: default_daily_tasks(),
            task_reward: default_task_reward(),
            referral_reward: default_referral_reward(),
            currency: default_currency(),
            progress_width: default_progress_width(),
        }
    }
}

/// Source of "today" for the daily quota.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("JSON deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Telegram request error: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("No account for user {0}")]
    AccountMissing(UserId),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Missing {0} environment variable.")]
    Missing(&'static str),
}
