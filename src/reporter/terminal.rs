//! Terminal output of filtered search results.

use colored::Colorize;
use std::time::Duration;

use crate::walker::{EntryKind, TraversalEntry};

/// Print matched entries (directories blue, files green) followed by a
/// one-line summary. Colors degrade to plain text off-TTY.
pub fn print_results(matches: &[&TraversalEntry], elapsed: Duration) {
    for entry in matches {
        let line = entry.path.display().to_string();
        match entry.kind {
            EntryKind::Directory => println!("{}", line.blue()),
            EntryKind::File => println!("{}", line.green()),
        }
    }
    println!(
        "{}",
        format!(
            "Found {} matches in {} ms",
            matches.len(),
            elapsed.as_millis()
        )
        .cyan()
    );
}
