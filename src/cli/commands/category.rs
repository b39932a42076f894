use crate::cli::commands::CommandEntry;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::shell_context::ShellContext;
use crate::domain::category::{Category, NewCategory, CUSTOM_COLORS, CUSTOM_ICONS};
use crate::domain::Displayable;

const ADD_USAGE: &str = "cat-add <label> [icon] [color]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "cats",
            "List categories (`--palette` shows icon and color choices)",
            "cats [--palette]",
            cmd_list,
        ),
        CommandEntry::new("cat-add", "Add a custom category", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "cat-rm",
            "Remove a custom category",
            "cat-rm <category>",
            cmd_remove,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.first() == Some(&"--palette") {
        output_section("Palette");
        io::print_info(format!("  icons : {}", CUSTOM_ICONS.join(" ")));
        io::print_info(format!("  colors: {}", CUSTOM_COLORS.join(" ")));
        return Ok(());
    }

    output_section("Categories");
    for category in context.app.categories().list_all() {
        let marker = if category.custom { " (custom)" } else { "" };
        io::print_info(format!(
            "  {:<24} {:<16} {}{}",
            category.display_label(),
            category.id,
            category.color,
            marker
        ));
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [label, rest @ ..] = args else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    if rest.len() > 2 {
        return Err(CommandError::usage(ADD_USAGE));
    }
    let mut new = NewCategory::new(*label);
    if let Some(icon) = rest.first() {
        new = new.with_icon(*icon);
    }
    if let Some(color) = rest.get(1) {
        new = new.with_color(*color);
    }
    let category = context.app.add_category(new)?;
    io::print_info(format!("  id {}", category.id));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::usage("cat-rm <category>"));
    }
    let id = context.resolve_category(&args.join(" "))?;
    if Category::is_built_in_id(&id) {
        return Err(CommandError::InvalidArguments(format!(
            "`{id}` is built in and cannot be removed"
        )));
    }
    context.app.remove_category(&id)?;
    Ok(())
}
