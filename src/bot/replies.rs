use crate::bot::{chat_event::chat_event::referral_code, db::UserId, state::def::RewardConfig};

pub struct Replies;

impl Replies {
    pub fn referral_bonus(rewards: &RewardConfig) -> String {
        format!("🎉 You got {:.1} {} for referring a friend!", rewards.referral_reward, rewards.currency)
    }

    pub fn ad_added() -> String {
        "✅ Ad added successfully!".to_string()
    }

    pub fn add_ad_usage() -> String {
        "⚠ Usage: /addad <ad_url>".to_string()
    }

    pub fn not_authorized() -> String {
        "❌ You are not authorized.".to_string()
    }

    pub fn daily_tasks_done() -> String {
        "✅ You've completed all your daily tasks!".to_string()
    }

    pub fn no_ads() -> String {
        "❌ No ads available right now.".to_string()
    }

    pub fn watch_ad(url: &str) -> String {
        format!("📺 Watch this ad:\n{url}")
    }

    pub fn referral_link(bot_username: &str, user: UserId) -> String {
        format!("👥 Share your referral link:\nhttps://t.me/{bot_username}?start={}", referral_code(user))
    }

    pub fn withdraw_manual() -> String {
        "💸 Withdrawals are processed manually. Contact admin.".to_string()
    }
}
