use crate::cli::commands::CommandEntry;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::{section as output_section, signed_amount};
use crate::cli::shell_context::{short_id, ShellContext};
use crate::core::services::transaction_service::{filter_by_date, filter_by_type};
use crate::domain::transaction::{Transaction, TransactionDraft, TransactionKind};
use crate::domain::upi::UpiApp;

const ADD_USAGE: &str = "add <expense|income> <amount> <category> [note...]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an expense or income", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "upi",
            "Import a UPI payment (then `pick` and `confirm`)",
            "upi <amount> [app]",
            cmd_upi,
        ),
        CommandEntry::new(
            "pick",
            "Choose the category for the pending UPI payment",
            "pick <category>",
            cmd_pick,
        ),
        CommandEntry::new(
            "confirm",
            "Record the pending UPI payment",
            "confirm",
            cmd_confirm,
        ),
        CommandEntry::new(
            "discard",
            "Drop the pending UPI payment",
            "discard",
            cmd_discard,
        ),
        CommandEntry::new("rm", "Delete a transaction", "rm <id-prefix>", cmd_rm),
        CommandEntry::new(
            "list",
            "List transactions, newest first",
            "list [today|expense|income]",
            cmd_list,
        ),
        CommandEntry::new("clear", "Delete every transaction", "clear [--yes]", cmd_clear),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, note @ ..] = args else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    let kind = kind
        .parse::<TransactionKind>()
        .map_err(CommandError::InvalidArguments)?;
    let category = context.resolve_category(category)?;
    let draft = TransactionDraft {
        amount: amount.to_string(),
        note: note.join(" "),
        category: Some(category),
        kind,
    };
    let txn = context.app.add_manual(draft)?;
    io::print_info(format!("  id {}", short_id(&txn.id)));
    Ok(())
}

fn cmd_upi(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(amount) = args.first() else {
        return Err(CommandError::usage("upi <amount> [app]"));
    };
    let app = match args.get(1..).filter(|rest| !rest.is_empty()) {
        Some(rest) => Some(
            rest.join(" ")
                .parse::<UpiApp>()
                .map_err(CommandError::InvalidArguments)?,
        ),
        None => None,
    };
    let pending = context.app.import_upi(app, amount)?;
    io::print_info(format!(
        "{}: {} pending. Choose a category with `pick <category>`.",
        pending.note(),
        context.app.currency().format(pending.amount)
    ));
    Ok(())
}

fn cmd_pick(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::usage("pick <category>"));
    }
    let category = context.resolve_category(&args.join(" "))?;
    context.app.choose_pending_category(category.clone())?;
    let label = context.app.categories().resolve(&category).label.into_owned();
    io::print_info(format!("Category set to {label}. Use `confirm` to record it."));
    Ok(())
}

fn cmd_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.app.confirm_pending()?;
    Ok(())
}

fn cmd_discard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.app.discard_pending() {
        io::print_info("Pending payment discarded.");
    } else {
        io::print_info("Nothing pending.");
    }
    Ok(())
}

fn cmd_rm(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::usage("rm <id-prefix>"));
    };
    let id = context.find_transaction(prefix)?;
    context.app.delete_transaction(&id)?;
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let all = context.app.transactions();
    let (title, selected): (&str, Vec<&Transaction>) = match args.first().copied() {
        None => ("All transactions", all.iter().collect()),
        Some("today") => ("Today", filter_by_date(all, context.app.today())),
        Some(kind) => {
            let kind = kind
                .parse::<TransactionKind>()
                .map_err(CommandError::InvalidArguments)?;
            ("Transactions", filter_by_type(all, kind))
        }
    };

    output_section(title);
    if selected.is_empty() {
        io::print_info("No transactions yet.");
        return Ok(());
    }
    for txn in selected {
        let row = context.app.row(txn);
        io::print_info(format!(
            "  {:<8}  {} {}  {} {:<24} {}",
            short_id(&row.id),
            row.date,
            row.time,
            row.icon,
            row.title,
            signed_amount(&row.amount_text, txn.is_income()),
        ));
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let forced = args.iter().any(|arg| matches!(*arg, "--yes" | "-y"));
    if !forced && !context.confirm("Delete every transaction? This cannot be undone.")? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    context.app.clear_transactions()?;
    Ok(())
}
