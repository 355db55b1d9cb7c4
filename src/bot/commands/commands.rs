use std::{collections::HashMap, sync::Arc};
use futures::future::BoxFuture;
use lazy_static::lazy_static;
use sqlx::SqlitePool;
use tracing::debug;

use crate::bot::{chat_event::chat_event::CommandEvent, commands::{rewards::commands::REWARD_COMMANDS, CommandGroup, CommandMap, CommandRegistry}, permissions::permissions::PermissionLevel, state::def::{AppState, BotError}};

pub type BotResult<T> = Result<T, BotError>;

lazy_static! {
    pub static ref COMMAND_GROUPS: HashMap<&'static str, Arc<CommandGroup>> = {
        let mut map = HashMap::new();
        map.insert("rewards", REWARD_COMMANDS.clone());
        map
    };
}

pub trait CommandT: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn usage(&self) -> &str;
    fn permission(&self) -> PermissionLevel;

    fn execute(&self, event: CommandEvent, pool: SqlitePool, state: Arc<AppState>) -> BoxFuture<'static, BotResult<()>>;
}

pub struct FnCommand<F> {func: F, desc: String, usage: String, name: String, permission: PermissionLevel} impl<F> FnCommand<F>
    where
        F: Fn(CommandEvent, SqlitePool, Arc<AppState>) -> BoxFuture<'static, BotResult<()>> + Send + Sync + 'static {
    pub fn new(func: F, desc: impl Into<String>, usage: impl Into<String>, name: impl Into<String>, permission: PermissionLevel,) -> Self {
        Self {
            func,
            desc: desc.into(),
            usage: usage.into(),
            name: name.into(),
            permission,
        }
    }
}

impl<F> CommandT for FnCommand<F> where
    F: Fn(CommandEvent, SqlitePool, Arc<AppState>) -> BoxFuture<'static, BotResult<()>> + Send + Sync + 'static {
        fn execute(&self, event: CommandEvent, pool: SqlitePool, state: Arc<AppState>) -> BoxFuture<'static, BotResult<()>> {
            (self.func)(event, pool, state)
        }

        fn name(&self) -> &str { &self.name }
        fn description(&self) -> &str { &self.desc }
        fn usage(&self) -> &str { &self.usage }
        fn permission(&self) -> PermissionLevel { self.permission }
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut groups = HashMap::new();
        let mut commands: CommandMap = HashMap::new();

        for (name, group) in COMMAND_GROUPS.iter() {
            for reg in &group.commands {
                for alias in &reg.aliases {
                    commands.insert(alias.to_ascii_lowercase(), reg.command.clone());
                }
            }
            debug!("Registered command group {} ({} commands)", group.name, group.commands.len());
            groups.insert((*name).to_string(), Arc::clone(group));
        }

        Self { groups, commands }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandT>> {
        self.commands.get(name).cloned()
    }
}

#[macro_export]
macro_rules! cmd {
    ($command:expr, $($alias:expr),+ $(,)?) => {
        $crate::bot::commands::CommandRegistration {
            aliases: vec![$($alias.to_string()),+],
            command: $command,
        }
    };
}
