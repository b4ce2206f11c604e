use crate::matrix::{text_width, truncate_text};
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Width of the `HH:MM:SS ` prefix on every report line.
pub const TIME_PREFIX_WIDTH: usize = 9;

pub const DEFAULT_HEADER_EVERY: usize = 20;

const SEPARATOR: &str = "  ";

/// Writes report samples as aligned text, repeating the column header every
/// `header_every` data lines.
#[derive(Debug, Clone)]
pub struct TableWriter {
    header_every: usize,
    truncate: bool,
    color: bool,
    lines_since_header: Option<usize>,
}

impl TableWriter {
    /// `header_every` of 0 prints the header once.
    pub fn new(header_every: usize, truncate: bool, color: bool) -> Self {
        Self {
            header_every,
            truncate,
            color,
            lines_since_header: None,
        }
    }

    /// Write the rows of one sample, returning how many data lines were printed.
    pub fn write_sample<W: Write>(
        &mut self,
        out: &mut W,
        at: NaiveDateTime,
        columns: &[String],
        widths: &[usize],
        rows: &[&[Option<String>]],
    ) -> io::Result<usize> {
        for (i, row) in rows.iter().enumerate() {
            if self.header_due() {
                self.write_header(out, columns, widths)?;
            }

            let prefix = if i == 0 {
                at.format("%H:%M:%S ").to_string()
            } else {
                " ".repeat(TIME_PREFIX_WIDTH)
            };

            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let value = cell.as_deref().unwrap_or("");
                    let width = widths.get(col).copied().unwrap_or(0);
                    self.format_cell(value, width, col + 1 == row.len())
                })
                .collect();

            writeln!(out, "{prefix}{}", cells.join(SEPARATOR))?;
            self.lines_since_header = self.lines_since_header.map(|n| n + 1);
        }

        Ok(rows.len())
    }

    fn header_due(&self) -> bool {
        match self.lines_since_header {
            None => true,
            Some(n) => self.header_every > 0 && n >= self.header_every,
        }
    }

    fn write_header<W: Write>(
        &mut self,
        out: &mut W,
        columns: &[String],
        widths: &[usize],
    ) -> io::Result<()> {
        let names: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let width = widths.get(col).copied().unwrap_or(0);
                if col + 1 == columns.len() {
                    name.clone()
                } else {
                    pad(name, width)
                }
            })
            .collect();

        let line = names.join(SEPARATOR);
        let blank = " ".repeat(TIME_PREFIX_WIDTH);
        if self.color {
            writeln!(out, "{blank}{}", line.bold())?;
        } else {
            writeln!(out, "{blank}{line}")?;
        }

        self.lines_since_header = Some(0);
        Ok(())
    }

    fn format_cell(&self, value: &str, width: usize, last: bool) -> String {
        let len = text_width(value);
        if last {
            if self.truncate && width > 0 && len > width {
                truncate_text(value, width)
            } else {
                value.to_string()
            }
        } else if len > width {
            truncate_text(value, width.max(1))
        } else {
            pad(value, width)
        }
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = text_width(value);
    let mut out = String::with_capacity(value.len() + width.saturating_sub(len));
    out.push_str(value);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}
