use crate::cli::commands::CommandEntry;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::shell_context::ShellContext;
use crate::currency::CurrencyFormat;
use crate::domain::settings::{parse_budget, SettingsDraft, SettingsField};

const USAGE: &str =
    "settings <open|set <name|email|budget|notifications> <value>|toggle|save|cancel|show>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settings",
        "Edit profile and preferences (changes apply on save)",
        USAGE,
        cmd_settings,
    )]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["open"] => {
            let draft = context.app.open_settings()?;
            print_draft(&draft, context.app.currency());
            Ok(())
        }
        ["set", field, value @ ..] => {
            let field = parse_field(field, value)?;
            edit(context, field)
        }
        ["toggle"] => edit(context, SettingsField::ToggleNotifications),
        ["save"] => {
            context.app.save_settings()?;
            Ok(())
        }
        ["cancel"] => {
            if context.app.cancel_settings() {
                io::print_info("Changes discarded.");
            }
            Ok(())
        }
        ["show"] | [] => {
            show(context);
            Ok(())
        }
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn parse_field(name: &str, value: &[&str]) -> Result<SettingsField, CommandError> {
    let joined = value.join(" ");
    match name.to_ascii_lowercase().as_str() {
        "name" => Ok(SettingsField::Name(joined)),
        "email" => Ok(SettingsField::Email(joined)),
        "budget" => Ok(SettingsField::Budget(parse_budget(&joined)?)),
        "notifications" => match joined.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(SettingsField::Notifications(true)),
            "off" | "false" | "no" => Ok(SettingsField::Notifications(false)),
            other => Err(CommandError::InvalidArguments(format!(
                "notifications must be on or off, not `{other}`"
            ))),
        },
        other => Err(CommandError::InvalidArguments(format!(
            "unknown setting `{other}`"
        ))),
    }
}

fn edit(context: &mut ShellContext, field: SettingsField) -> CommandResult {
    if !context.app.edit_settings(field) {
        return Err(CommandError::InvalidArguments(
            "settings are not open; run `settings open` first".into(),
        ));
    }
    if let Some(draft) = context.app.settings_draft() {
        print_draft(draft, context.app.currency());
    }
    Ok(())
}

fn show(context: &ShellContext) {
    output_section("Settings");
    let settings = context.app.settings();
    if let Some(profile) = context.app.profile() {
        io::print_info(format!("  name          : {}", profile.name));
        io::print_info(format!("  email         : {}", profile.email));
    }
    io::print_info(format!("  notifications : {}", on_off(settings.notifications)));
    io::print_info(format!(
        "  daily budget  : {}",
        budget_text(settings.budget, context.app.currency())
    ));
    if let Some(draft) = context.app.settings_draft() {
        print_draft(draft, context.app.currency());
    }
}

fn print_draft(draft: &SettingsDraft, currency: &CurrencyFormat) {
    io::print_info("  draft (unsaved):");
    io::print_info(format!("    name          : {}", draft.name));
    io::print_info(format!("    email         : {}", draft.email));
    io::print_info(format!("    notifications : {}", on_off(draft.notifications)));
    io::print_info(format!(
        "    daily budget  : {}",
        budget_text(draft.budget, currency)
    ));
}

fn budget_text(budget: Option<f64>, currency: &CurrencyFormat) -> String {
    budget
        .map(|limit| currency.format(limit))
        .unwrap_or_else(|| "not set".into())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::shell::run_lines;
    use crate::cli::shell_context::script_context;

    #[test]
    fn edits_apply_only_on_save() {
        let mut ctx = script_context();
        let results = run_lines(
            &mut ctx,
            &[
                "signin Asha a@x pw",
                "settings open",
                "settings set budget 800",
                "settings set name Asha Rao",
                "settings toggle",
            ],
        );
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(ctx.app.settings().budget, None);

        assert!(run_lines(&mut ctx, &["settings save"])[0].is_ok());
        assert_eq!(ctx.app.settings().budget, Some(800.0));
        assert!(!ctx.app.settings().notifications);
        assert_eq!(ctx.app.profile().map(|p| p.name.as_str()), Some("Asha Rao"));
    }

    #[test]
    fn closed_editor_rejects_edits() {
        let mut ctx = script_context();
        let results = run_lines(
            &mut ctx,
            &["signin Asha a@x pw", "settings set budget 5", "settings save", "settings bogus"],
        );
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert!(results[3].as_ref().is_err_and(|m| m.starts_with("usage:")));
    }

    #[test]
    fn empty_email_keeps_editor_open() {
        let mut ctx = script_context();
        let results = run_lines(
            &mut ctx,
            &["signin Asha a@x pw", "settings open", "settings set email", "settings save"],
        );
        assert_eq!(results[3], Err("Name and email can't be empty".to_string()));
        assert!(ctx.app.settings_draft().is_some());
        assert!(run_lines(&mut ctx, &["settings cancel"])[0].is_ok());
        assert!(ctx.app.settings_draft().is_none());
    }
}
