use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::cli::commands::{CommandEntry, CommandRegistry};
use crate::cli::core::{CliError, CommandError, LoopControl};
use crate::cli::io as cli_io;
use crate::config::{Config, ConfigManager};
use crate::core::{RandomIds, SpendWise, SystemClock};
use crate::domain::category::CategoryId;
use crate::domain::Identifiable;
use crate::storage::JsonFileStore;

/// Commands within this edit distance get a "did you mean" hint.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    /// Commands come from stdin; confirmations are assumed.
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: SpendWise,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration from the data root and opens the file-backed store.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        crate::init_with_filter(config.log_filter.as_deref());

        let store = JsonFileStore::at(config_manager.records_dir(&config))?;
        let app = SpendWise::open_with(
            Box::new(store),
            Box::new(SystemClock),
            Box::new(RandomIds),
            &config,
        )?;
        for warning in app.hydration().warnings() {
            cli_io::print_warning(warning);
        }
        Ok(Self::with_app(mode, app, config))
    }

    pub fn with_app(mode: CliMode, app: SpendWise, config: Config) -> Self {
        Self {
            mode,
            registry: CommandRegistry::with_all(),
            app,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        match self.app.profile() {
            Some(profile) => format!("spendwise({})> ", profile.first_name()),
            None => "spendwise> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => {
                self.announce();
                Ok(LoopControl::Continue)
            }
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => {
                // The error is reported by the caller; drop the duplicate notice.
                self.app.take_notice();
                Err(err)
            }
        }
    }

    /// Prints and clears the notice left by the last operation.
    fn announce(&mut self) {
        if let Some(notice) = self.app.take_notice() {
            if notice.is_error() {
                cli_io::print_error(notice.message);
            } else {
                cli_io::print_success(notice.message);
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let wanted = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &wanted), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?").map_err(CliError::from)
    }

    /// Asks a yes/no question; script mode always answers yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    /// Accepts a category id or label (case-insensitive).
    pub(crate) fn resolve_category(&self, raw: &str) -> Result<CategoryId, CommandError> {
        let registry = self.app.categories();
        if registry.contains(raw) {
            return Ok(raw.to_string());
        }
        if let Some(category) = registry
            .list_all()
            .find(|category| category.label.eq_ignore_ascii_case(raw))
        {
            return Ok(category.id.clone());
        }

        let wanted = raw.to_lowercase();
        let mut message = format!("unknown category `{raw}`");
        let closest = registry
            .list_all()
            .map(|category| (levenshtein(&category.id, &wanted), category.id.as_str()))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, id)) = closest {
            if distance <= SUGGESTION_DISTANCE {
                message.push_str(&format!(" (did you mean `{id}`?)"));
            }
        }
        Err(CommandError::InvalidArguments(message))
    }

    /// Finds the transaction with id `prefix`, else the one id starting with it.
    pub(crate) fn find_transaction(&self, prefix: &str) -> Result<String, CommandError> {
        let transactions = self.app.transactions();
        if transactions.iter().any(|txn| txn.id() == prefix) {
            return Ok(prefix.to_string());
        }
        let matches: Vec<&str> = transactions
            .iter()
            .map(Identifiable::id)
            .filter(|id| id.starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [id] => Ok((*id).to_string()),
            [] => Err(CommandError::InvalidArguments(format!(
                "no transaction matches `{prefix}`"
            ))),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{prefix}` matches {} transactions; use more characters",
                matches.len()
            ))),
        }
    }
}

/// First eight characters of an id, as shown in listings.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
pub(crate) fn script_context() -> ShellContext {
    use crate::core::{FixedClock, SequentialIds};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    let clock = FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    );
    let app = SpendWise::open_with(
        Box::new(MemoryStore::new()),
        Box::new(clock),
        Box::new(SequentialIds::new()),
        &Config::default(),
    )
    .unwrap();
    ShellContext::with_app(CliMode::Script, app, Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_resolve_by_id_or_label() {
        let ctx = script_context();
        assert_eq!(ctx.resolve_category("food").unwrap(), "food");
        assert_eq!(ctx.resolve_category("bills & utilities").unwrap(), "bills");
        let err = ctx.resolve_category("fod").unwrap_err();
        assert!(err.to_string().contains("did you mean `food`"));
    }

    #[test]
    fn prompt_shows_first_name_once_signed_in() {
        let mut ctx = script_context();
        assert_eq!(ctx.prompt(), "spendwise> ");
        ctx.app
            .sign_in(crate::core::services::Credentials::new("Asha Rao", "a@x", "pw"))
            .unwrap();
        assert_eq!(ctx.prompt(), "spendwise(Asha)> ");
    }

    #[test]
    fn exact_ids_win_over_longer_prefix_matches() {
        use crate::cli::shell::run_lines;

        let mut ctx = script_context();
        let mut lines = vec!["signup Asha a@x pw"];
        lines.extend(std::iter::repeat("add expense 10 food").take(10));
        assert!(run_lines(&mut ctx, &lines).iter().all(Result::is_ok));

        assert_eq!(ctx.find_transaction("id1").unwrap(), "id1");
        assert_eq!(run_lines(&mut ctx, &["rm id1"]), vec![Ok(())]);
        let ids: Vec<&str> = ctx.app.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 9);
        assert!(ids.contains(&"id10"));
        assert!(!ids.contains(&"id1"));
    }

    #[test]
    fn short_ids_handle_short_input() {
        assert_eq!(short_id("abcdef0123"), "abcdef01");
        assert_eq!(short_id("id1"), "id1");
    }
}
