//! Rendering of command output to a text stream.

use std::io::{self, Write};

use glnomad_console::CommandOutput;

/// ANSI clear-screen and cursor-home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn write_output<W: Write>(out: &mut W, output: &CommandOutput) -> io::Result<()> {
    match output {
        CommandOutput::Text(text) => {
            if !text.is_empty() {
                writeln!(out, "{text}")?;
            }
        },
        CommandOutput::Table { headers, rows } => write_table(out, headers, rows)?,
        CommandOutput::Clear => write!(out, "{CLEAR_SCREEN}")?,
        CommandOutput::None | CommandOutput::Quit => {},
    }
    Ok(())
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header.
fn write_table<W: Write>(out: &mut W, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let render = |cells: &[String]| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        line.join("  ").trim_end().to_string()
    };

    writeln!(out, "{}", render(headers))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for row in rows {
        writeln!(out, "{}", render(row))?;
    }
    Ok(())
}
