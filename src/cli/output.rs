//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{CategorySummary, Entry};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a blue info message to stderr, for commands whose stdout is data.
pub fn note(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of categories with their entry counts.
pub fn print_categories_table(categories: &[CategorySummary]) {
    if categories.is_empty() {
        info("No categories in this vault yet.");
        tip("Run `surelock add <ENTRY> <USERNAME>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Entries"]);

    for c in categories {
        table.add_row(vec![c.name.clone(), c.entry_count.to_string()]);
    }

    println!("{table}");
}

/// Print the entries of one category (Site, Username, Description).
///
/// Passwords are never shown here.
pub fn print_entries_table(category: &str, entries: &[Entry]) {
    println!("Category: {}", style(category).bold());

    if entries.is_empty() {
        tip("(empty)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site", "Username", "Description"]);

    for e in entries {
        table.add_row(vec![
            e.name.clone(),
            e.username.clone(),
            e.description.clone(),
        ]);
    }

    println!("{table}");
}
