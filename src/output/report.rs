//! Plain-text rendering of sorted views

use crate::sort::SortedView;

/// Formats every view: its label, then each record block
pub fn format_views(views: &[SortedView<'_>]) -> String {
    let mut out = String::new();

    for view in views {
        out.push_str(&view.label);
        out.push('\n');
        for record in &view.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
    }

    out
}

/// Prints every view to stdout
pub fn print_views(views: &[SortedView<'_>]) {
    print!("{}", format_views(views));
}

/// Closing summary line of a run
pub fn format_record_count(count: usize) -> String {
    format!("{} book(s) scraped", count)
}
