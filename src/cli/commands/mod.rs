use std::collections::HashMap;

pub mod category;
pub mod session;
pub mod settings;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands by name, remembering registration order for `help`.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every shell command, grouped the way `help` lists them.
    pub fn with_all() -> Self {
        let mut registry = Self::new();
        session::definitions()
            .into_iter()
            .chain(transaction::definitions())
            .chain(summary::definitions())
            .chain(category::definitions())
            .chain(settings::definitions())
            .chain(system::definitions())
            .for_each(|entry| registry.register(entry));
        registry
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered_once() {
        let registry = CommandRegistry::with_all();
        let names: Vec<_> = registry.names().collect();
        for expected in [
            "signup", "signin", "logout", "add", "upi", "pick", "confirm", "discard", "rm",
            "list", "clear", "summary", "cats", "cat-add", "cat-rm", "settings", "version",
            "help", "exit",
        ] {
            assert!(names.contains(&expected), "missing `{expected}`");
        }
        assert_eq!(names.len(), registry.list().len());
    }
}
