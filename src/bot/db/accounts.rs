use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::bot::{commands::commands::BotResult, db::UserId};

pub const USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,       -- telegram user id
        balance REAL DEFAULT 0,
        tasks_completed INTEGER DEFAULT 0, -- platí jen pro last_reset
        last_reset DATE,
        referrals INTEGER DEFAULT 0
    );
";

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Account {
    pub user_id: UserId,
    pub balance: f64,
    pub tasks_completed: i64,
    pub last_reset: Option<NaiveDate>,
    pub referrals: i64,
}

/// Creates the account if it is missing. Returns `true` when a new row was inserted.
pub async fn create_account(pool: &SqlitePool, user_id: UserId, today: NaiveDate) -> BotResult<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO users (user_id, last_reset) VALUES (?, ?)")
        .bind(user_id)
        .bind(today)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn get_account(pool: &SqlitePool, user_id: UserId) -> BotResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT user_id, balance, tasks_completed, last_reset, referrals FROM users WHERE user_id = ?"
    ).bind(user_id).fetch_optional(pool).await?;

    Ok(account)
}

/// Zeroes the daily counter when `last_reset` is missing or not `today`.
/// Returns `true` if a reset happened; calling it again the same day is a no-op.
pub async fn reset_daily_tasks(pool: &SqlitePool, user_id: UserId, today: NaiveDate) -> BotResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET tasks_completed = 0, last_reset = ?
        WHERE user_id = ? AND (last_reset IS NULL OR last_reset <> ?)
        "#
    ).bind(today).bind(user_id).bind(today).execute(pool).await?;

    Ok(result.rows_affected() > 0)
}

/// Credits a task reward in one statement. The quota guard lives in the `WHERE`
/// clause so two grants can never push the counter past `daily_limit`.
pub async fn grant_task_reward(pool: &SqlitePool, user_id: UserId, reward: f64, daily_limit: i64) -> BotResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET balance = balance + ?, tasks_completed = tasks_completed + 1
        WHERE user_id = ? AND tasks_completed < ?
        "#
    ).bind(reward).bind(user_id).bind(daily_limit).execute(pool).await?;

    Ok(result.rows_affected() == 1)
}

/// Credits the referrer. The referrer is not checked for existence: if there is no
/// such account nothing is updated and `false` comes back.
pub async fn credit_referral(pool: &SqlitePool, referrer: UserId, reward: f64) -> BotResult<bool> {
    let result = sqlx::query("UPDATE users SET balance = balance + ?, referrals = referrals + 1 WHERE user_id = ?")
        .bind(reward)
        .bind(referrer)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub async fn set_progress(pool: &SqlitePool, user_id: UserId, tasks_completed: i64, last_reset: Option<NaiveDate>) {
    sqlx::query("UPDATE users SET tasks_completed = ?, last_reset = ? WHERE user_id = ?")
        .bind(tasks_completed)
        .bind(last_reset)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}
