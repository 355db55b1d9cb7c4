use sqlx::SqlitePool;

use crate::bot::{chat_event::chat_event::ButtonAction, commands::commands::BotResult, db::{accounts::{get_account, reset_daily_tasks, Account}, ChatId, UserId}, state::def::{AppState, RewardConfig}};

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub balance: f64,
    pub completed: i64,
    pub daily_limit: i64,
    pub currency: String,
    pub width: usize,
}

impl Dashboard {
    pub fn new(account: &Account, rewards: &RewardConfig) -> Self {
        Dashboard {
            balance: account.balance,
            completed: account.tasks_completed,
            daily_limit: rewards.daily_tasks,
            currency: rewards.currency.clone(),
            width: rewards.progress_width,
        }
    }

    /// Not clamped, goes negative if the counter ever overshoots the limit.
    pub fn remaining(&self) -> i64 {
        self.daily_limit - self.completed
    }

    pub fn filled_segments(&self) -> usize {
        let filled = self.completed.max(0) * self.width as i64 / self.daily_limit;
        (filled as usize).min(self.width)
    }

    pub fn percent(&self) -> i64 {
        self.completed * 100 / self.daily_limit
    }

    pub fn progress_bar(&self) -> String {
        let filled = self.filled_segments();
        format!("{}{}", "█".repeat(filled), "░".repeat(self.width - filled))
    }

    pub fn render(&self) -> String {
        format!(
            "💰 Balance: {:.1} {}\n\n📅 Today's Ad Tasks:\nTotal: {}\n✅ Completed: {}\n⏳ Remaining: {}\n\n{} {}%",
            self.balance,
            self.currency,
            self.daily_limit,
            self.completed,
            self.remaining(),
            self.progress_bar(),
            self.percent()
        )
    }
}

/// Reconciles the daily counter and sends the dashboard. Returns `false` without
/// sending anything when the user has no account.
pub async fn send_dashboard(pool: &SqlitePool, state: &AppState, user: UserId, chat: ChatId) -> BotResult<bool> {
    reset_daily_tasks(pool, user, state.clock.today()).await?;

    let Some(account) = get_account(pool, user).await? else {
        return Ok(false);
    };

    let dashboard = Dashboard::new(&account, &state.config.rewards);
    state.chat_client.send_with_actions(chat, &dashboard.render(), &ButtonAction::DASHBOARD).await?;
    Ok(true)
}
