//! Truecolor escapes used by the diagnostics, the prompt and the debug
//! printers.

pub const PURPLE: &str = "\x1b[38;2;133;89;222m";
pub const WHITE: &str = "\x1b[38;2;255;255;255m";
pub const RED: &str = "\x1b[38;2;255;65;65m";
pub const YELLOW: &str = "\x1b[38;2;255;204;0m";
pub const GREEN: &str = "\x1b[38;2;0;255;0m";
pub const RESET: &str = "\x1b[0m";

pub const COLOR_STMT: &str = PURPLE;
pub const COLOR_EXPR: &str = YELLOW;
pub const COLOR_ARG: &str = YELLOW;
pub const COLOR_OP: &str = GREEN;
pub const COLOR_INNER: &str = WHITE;
pub const COLOR_LITERAL: &str = RED;
