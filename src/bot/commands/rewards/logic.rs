use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::bot::{commands::commands::BotResult, dashboard::dashboard::send_dashboard, db::{accounts::{credit_referral, get_account, grant_task_reward, reset_daily_tasks}, ads::{random_ad, AdEntry}, ChatId, UserId}, replies::Replies, state::def::{AppState, BotError}};

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// Daily quota already used up, nothing changed.
    QuotaReached,
    /// Ad pool is empty, nothing changed.
    NoAds,
    Granted(AdEntry),
}

/// Shows one random ad and pays for it.
///
/// The ad goes out before the credit. The credit itself is a single guarded
/// statement, so a grant that loses a race against the quota is refused rather
/// than pushing the counter past the limit.
pub async fn start_task(pool: &SqlitePool, state: &AppState, user: UserId, chat: ChatId) -> BotResult<TaskOutcome> {
    let rewards = &state.config.rewards;
    let client = &state.chat_client;

    reset_daily_tasks(pool, user, state.clock.today()).await?;
    let account = get_account(pool, user).await?.ok_or(BotError::AccountMissing(user))?;

    if account.tasks_completed >= rewards.daily_tasks {
        client.send_message(chat, &Replies::daily_tasks_done()).await?;
        return Ok(TaskOutcome::QuotaReached);
    }

    let Some(ad) = random_ad(pool).await? else {
        client.send_message(chat, &Replies::no_ads()).await?;
        return Ok(TaskOutcome::NoAds);
    };

    client.send_message(chat, &Replies::watch_ad(&ad.url)).await?;

    if !grant_task_reward(pool, user, rewards.task_reward, rewards.daily_tasks).await? {
        warn!("Task grant for {user} refused, quota reached meanwhile");
        client.send_message(chat, &Replies::daily_tasks_done()).await?;
        return Ok(TaskOutcome::QuotaReached);
    }

    send_dashboard(pool, state, user, chat).await?;
    Ok(TaskOutcome::Granted(ad))
}

/// Pays the referral reward and tells the referrer about it.
/// Returns `false` if no account matched `referrer`. A failed notification is
/// only logged, the credit stays.
pub async fn pay_referral(pool: &SqlitePool, state: &AppState, referrer: UserId, referred: UserId) -> BotResult<bool> {
    let rewards = &state.config.rewards;

    if !credit_referral(pool, referrer, rewards.referral_reward).await? {
        warn!("Referral of {referred} credited to unknown user {referrer}, nothing changed");
        return Ok(false);
    }

    info!("User {referrer} referred {referred}");
    if let Err(e) = state.chat_client.send_message(referrer.private_chat(), &Replies::referral_bonus(rewards)).await {
        warn!("Could not notify referrer {referrer}: {e}");
    }
    Ok(true)
}
