//! UI utilities for terminal output.

mod prompt;
mod qr;

pub use prompt::confirm_overwrite;
pub use qr::print_qr_lines;
