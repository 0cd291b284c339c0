pub mod app;
pub mod commands;

pub use app::{Cli, Commands};

use crate::api::MessageLog;
use colored::*;

/// Print the message log the way the message panel shows it
pub fn print_messages(messages: &MessageLog) {
    let lines = messages.lines();
    if lines.is_empty() {
        return;
    }

    println!();
    println!("{}", "Messages".bold());
    for line in lines {
        if line.contains(" failed: ") {
            println!("  {}", line.red());
        } else {
            println!("  {}", line.dimmed());
        }
    }
}
