pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Result};
pub use std::format as f;

/// Borderless table; a non-empty `titles` adds a header row under a rule
pub fn new_table(titles: &[&str]) -> prettytable::Table {
    use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
    use prettytable::{Cell, Row};

    let mut table = prettytable::Table::new();

    let format = FormatBuilder::new()
        .padding(1, 1)
        .separator(LinePosition::Title, LineSeparator::new('-', '-', '-', '-'))
        .build();

    table.set_format(format);

    if !titles.is_empty() {
        table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t)).collect()));
    }

    table
}
