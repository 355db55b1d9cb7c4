use std::{env::var, fs::File, io::{Read, Write}, path::Path};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::bot::{commands::commands::BotResult, state::def::{BotConfig, BotError, BotSecrets, Clock, RewardConfig, SecretError}};

impl BotSecrets {
    pub fn from_env() -> Result<Self, SecretError> {
        let token = var("TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(SecretError::Missing("TOKEN"))?;

        let admin_id = var("ADMIN_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(SecretError::Missing("ADMIN_ID"))?;

        Ok(Self { token, admin_id })
    }
}

impl BotConfig {
    pub fn new() -> Self {
        BotConfig::default()
    }

    /// Loads the config file, writing the defaults there first if it does not exist.
    /// `DATABASE_URL` from the environment wins over the file.
    pub fn load_config(config_path: &str) -> BotResult<Self> {
        let mut config = if Path::new(config_path).exists() {
            let mut file = File::open(config_path)?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            serde_json::from_str(&content)?
        } else {
            info!("No config at {config_path}, writing defaults");
            let new_config = BotConfig::new();
            new_config.save_config(config_path)?;
            new_config
        };

        if let Ok(url) = var("DATABASE_URL") {
            config.database_url = url;
        }

        config.rewards.validate()?;
        Ok(config)
    }

    pub fn save_config(&self, config_path: &str) -> BotResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        let mut file = File::create(config_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl RewardConfig {
    pub fn validate(&self) -> BotResult<()> {
        if self.daily_tasks <= 0 {
            return Err(BotError::Config(format!("daily_tasks must be positive, got {}", self.daily_tasks)));
        }
        if self.progress_width == 0 {
            return Err(BotError::Config("progress_width must be positive".into()));
        }
        if self.task_reward < 0.0 || self.referral_reward < 0.0 {
            return Err(BotError::Config("rewards must not be negative".into()));
        }
        Ok(())
    }
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
