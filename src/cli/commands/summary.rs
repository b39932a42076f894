use crate::cli::commands::CommandEntry;
use crate::cli::core::CommandResult;
use crate::cli::io;
use crate::cli::output::{progress_bar, section as output_section, signed_amount};
use crate::cli::shell_context::ShellContext;
use crate::domain::category::CategoryId;

const BAR_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Today's totals, budget, and spending by category",
        "summary [category...]",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selected = args
        .iter()
        .map(|raw| context.resolve_category(raw))
        .collect::<Result<Vec<CategoryId>, _>>()?;

    let app = &context.app;
    let currency = app.currency();
    let dashboard = app.dashboard(&selected);

    if let Some(greeting) = app.greeting() {
        io::print_info(greeting);
    }

    output_section(format!("Today ({})", dashboard.today.format("%d %b %Y")));
    io::print_info(format!(
        "  spent    {}",
        signed_amount(&currency.format(dashboard.today_totals.expense), false)
    ));
    io::print_info(format!(
        "  received {}",
        signed_amount(&currency.format(dashboard.today_totals.income), true)
    ));
    if let Some(budget) = &dashboard.budget {
        io::print_info(format!(
            "  budget   {} {:.0}% of {}",
            progress_bar(budget.percent, BAR_WIDTH, budget.over_budget),
            budget.percent,
            currency.format(budget.limit)
        ));
        if budget.over_budget {
            io::print_warning("Over today's budget.");
        }
    }
    if let Some(insight) = app.insight() {
        io::print_hint(insight);
    }

    output_section("Spending by category");
    if dashboard.breakdown.is_empty() {
        io::print_info("No expenses yet.");
    }
    for entry in &dashboard.breakdown {
        let marker = if entry.selected { "*" } else { " " };
        io::print_info(format!(
            " {marker} {} {:<20} {:>10} {:>5.1}%",
            entry.icon,
            entry.label,
            currency.format(entry.total),
            entry.share
        ));
    }
    io::print_info(format!(
        "  total {}",
        currency.format(dashboard.total_expenses)
    ));

    let selection = &dashboard.selection;
    let scope = if selected.is_empty() {
        "all categories"
    } else {
        "selected categories"
    };
    output_section(format!("Totals for {scope}"));
    io::print_info(format!("  spent    {}", currency.format(selection.spent)));
    io::print_info(format!("  received {}", currency.format(selection.received)));
    io::print_info(format!(
        "  net      {} {}",
        selection.net_sign(),
        currency.format(selection.net_magnitude())
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::shell::run_lines;
    use crate::cli::shell_context::script_context;

    #[test]
    fn summary_accepts_labels_and_rejects_unknown_categories() {
        let mut ctx = script_context();
        let results = run_lines(
            &mut ctx,
            &[
                "signup Asha a@x pw 500",
                "add expense 200 food",
                "add expense 400 transport",
                "add income 1000 other salary",
                "summary",
                "summary food Transport",
                "summary nothing-like-this",
            ],
        );
        assert!(results[..6].iter().all(Result::is_ok));
        assert!(results[6]
            .as_ref()
            .is_err_and(|m| m.contains("unknown category")));
    }

    #[test]
    fn summary_works_before_sign_in() {
        let mut ctx = script_context();
        assert_eq!(run_lines(&mut ctx, &["summary"]), vec![Ok(())]);
    }
}
