use core::fmt;
use std::fmt::Display;

use crate::bot::{chat_event::chat_event::ChatUser, state::def::BotSecrets};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum PermissionLevel {
    Admin,
    Everyone,
}

impl Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PermissionLevel::Admin => "admin",
            PermissionLevel::Everyone => "everyone",
        };
        write!(f, "{}", s)
    }
}

/// Admin is whoever's id, as text, is exactly `ADMIN_ID`.
pub fn has_permission(user: &ChatUser, required: PermissionLevel, secrets: &BotSecrets) -> bool {
    match required {
        PermissionLevel::Everyone => true,
        PermissionLevel::Admin => user.id.to_string() == secrets.admin_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::db::UserId;

    fn user(id: i64) -> ChatUser {
        ChatUser { id: UserId(id), display: "someone".into() }
    }

    fn secrets(admin_id: &str) -> BotSecrets {
        BotSecrets { token: "t".into(), admin_id: admin_id.into() }
    }

    #[test]
    fn everyone_level_allows_anyone() {
        assert!(has_permission(&user(5), PermissionLevel::Everyone, &secrets("1")));
    }

    #[test]
    fn admin_is_matched_exactly() {
        assert!(has_permission(&user(123), PermissionLevel::Admin, &secrets("123")));
        assert!(!has_permission(&user(124), PermissionLevel::Admin, &secrets("123")));
    }

    #[test]
    fn admin_id_is_compared_as_text() {
        assert!(!has_permission(&user(123), PermissionLevel::Admin, &secrets("0123")));
        assert!(!has_permission(&user(123), PermissionLevel::Admin, &secrets(" 123")));
    }
}
