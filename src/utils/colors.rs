/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Lateness/undertime color: flagged minutes are red, clean days green.
pub fn color_for_flag(flagged: bool) -> &'static str {
    if flagged { RED } else { GREEN }
}
