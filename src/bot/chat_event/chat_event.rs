use core::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::bot::db::{ChatId, UserId};

lazy_static! {
    static ref REFERRAL_CODE: Regex = Regex::new(r"^ref(\d+)$").unwrap();
}

/// Everything the bot reacts to, already stripped of platform details.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Command(CommandEvent),
    ButtonPress(ButtonEvent),
}

#[derive(Debug, Clone)]
pub struct CommandEvent {
    pub user: ChatUser,
    pub chat: ChatId,
    /// Lowercase command name without the leading `/` or `@botname` suffix.
    pub name: String,
    /// Everything after the command name, trimmed.
    pub raw_args: String,
}

#[derive(Debug, Clone)]
pub struct ButtonEvent {
    pub user: ChatUser,
    pub chat: ChatId,
    pub data: String,
    pub callback_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatUser {
    pub id: UserId,
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction { StartTask, Refer, Withdraw }

impl ChatEvent {
    pub fn user(&self) -> &ChatUser {
        match self {
            ChatEvent::Command(cmd) => &cmd.user,
            ChatEvent::ButtonPress(press) => &press.user,
        }
    }
}

impl CommandEvent {
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.raw_args.split_whitespace()
    }
}

impl ButtonAction {
    pub const DASHBOARD: [ButtonAction; 3] = [ButtonAction::StartTask, ButtonAction::Refer, ButtonAction::Withdraw];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::StartTask => "start_task",
            ButtonAction::Refer => "refer",
            ButtonAction::Withdraw => "withdraw",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonAction::StartTask => "▶ Start Task",
            ButtonAction::Refer => "👥 Refer & Earn",
            ButtonAction::Withdraw => "💰 Withdraw",
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonAction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start_task" => Ok(ButtonAction::StartTask),
            "refer" => Ok(ButtonAction::Refer),
            "withdraw" => Ok(ButtonAction::Withdraw),
            _ => Err("Invalid button"),
        }
    }
}

/// Splits `/name@bot rest of text` into (`name`, `rest of text`).
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    let body = text.strip_prefix('/')?;

    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (body, ""),
    };
    let name = head.split('@').next().unwrap_or("");
    if name.is_empty() {
        return None;
    }

    Some((name.to_ascii_lowercase(), rest.to_string()))
}

/// `ref<digits>` → referrer id. Anything else, including ids that overflow, is not a referral.
pub fn parse_referral_code(arg: &str) -> Option<UserId> {
    let caps = REFERRAL_CODE.captures(arg)?;
    caps[1].parse::<i64>().ok().map(UserId)
}

pub fn referral_code(user: UserId) -> String {
    format!("ref{}", user)
}
