//! QR code display.

use std::io::{self, Write};

/// Print pre-rendered QR glyph lines to stdout.
pub fn print_qr_lines(lines: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
