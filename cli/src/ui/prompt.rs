//! Interactive confirmation prompts.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Ask on stderr whether `path` may be overwritten.
pub fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    let question = format!(
        "Are you sure you want to overwrite \"{}\"? [y|n] ",
        path.display()
    );
    ask_yes_no(&mut io::stdin().lock(), &mut io::stderr(), &question)
}

/// Repeat `question` until a yes/no answer is read. End of input counts as no.
fn ask_yes_no(input: &mut impl BufRead, out: &mut impl Write, question: &str) -> io::Result<bool> {
    loop {
        write!(out, "{}", question)?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }

        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "ye" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}
