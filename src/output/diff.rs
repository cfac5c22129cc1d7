//! Colored diff output

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use super::config::OutputConfig;

fn line_color(line: &str) -> Option<Color> {
    if line.starts_with("---") || line.starts_with("+++") {
        None
    } else if line.starts_with('-') {
        Some(Color::Red)
    } else if line.starts_with('+') {
        Some(Color::Green)
    } else if line.starts_with("@@") {
        Some(Color::Cyan)
    } else {
        None
    }
}

/// Write diff lines, deletions red and insertions green.
pub fn write_diff<W: WriteColor>(lines: &[String], out: &mut W) -> io::Result<()> {
    for line in lines {
        let mut spec = ColorSpec::new();
        match line_color(line) {
            Some(color) => {
                spec.set_fg(Some(color));
            }
            None if line.starts_with("---") || line.starts_with("+++") => {
                spec.set_bold(true);
            }
            None => {}
        }
        out.set_color(&spec)?;
        write!(out, "{}", line)?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print diff lines to stdout.
pub fn print_diff(lines: &[String], output: &OutputConfig) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(output.color_choice());
    write_diff(lines, &mut stdout)
}
