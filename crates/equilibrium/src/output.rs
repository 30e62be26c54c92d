//! Terminal output utilities

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

/// Green check mark
pub fn success_mark() -> StyledObject<&'static str> {
    style("✓").green().bold()
}

/// Yellow warning sign
pub fn warning_mark() -> StyledObject<&'static str> {
    style("⚠").yellow().bold()
}

/// Print a header
pub fn header(msg: &str) -> String {
    style(msg).bold().to_string()
}

/// Create a spinner on stderr (hidden when stderr is not a terminal)
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
