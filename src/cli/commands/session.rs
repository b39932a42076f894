use crate::cli::commands::CommandEntry;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::shell_context::ShellContext;
use crate::core::services::Credentials;
use crate::domain::settings::parse_budget;
use crate::domain::upi::UpiApp;

const SIGNUP_USAGE: &str = "signup <name> <email> <password> [daily-budget] [upi-app]";
const SIGNIN_USAGE: &str = "signin <name> <email> <password> [daily-budget]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("signup", "Create the local profile", SIGNUP_USAGE, cmd_signup),
        CommandEntry::new("signin", "Sign in with a local profile", SIGNIN_USAGE, cmd_signin),
        CommandEntry::new(
            "logout",
            "Sign out and clear transactions",
            "logout",
            cmd_logout,
        ),
    ]
}

fn credentials(args: &[&str], usage: &str) -> Result<Credentials, CommandError> {
    let [name, email, password, rest @ ..] = args else {
        return Err(CommandError::usage(usage));
    };
    let budget = match rest.first() {
        Some(raw) => parse_budget(raw)?,
        None => None,
    };
    Ok(Credentials::new(*name, *email, *password).with_budget(budget))
}

fn cmd_signup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut credentials = credentials(args, SIGNUP_USAGE)?;
    if let Some(raw) = args.get(4) {
        let app = raw
            .parse::<UpiApp>()
            .map_err(CommandError::InvalidArguments)?;
        credentials = credentials.with_upi_app(app);
    }
    context.app.sign_up(credentials)?;
    Ok(())
}

fn cmd_signin(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 4 {
        return Err(CommandError::usage(SIGNIN_USAGE));
    }
    let credentials = credentials(args, SIGNIN_USAGE)?;
    context.app.sign_in(credentials)?;
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.app.is_signed_in() {
        io::print_info("Not signed in.");
        return Ok(());
    }
    context.app.sign_out()?;
    io::print_info("Signed out.");
    Ok(())
}
