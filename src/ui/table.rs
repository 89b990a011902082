//! Plain-text tables for terminal views.

use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    /// Aligned lines without colour: header, rule, rows.
    pub fn lines(&self) -> Vec<String> {
        let widths = self.widths();
        let fmt_row = |cells: &[String]| {
            widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{cell:<w$}")
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(fmt_row(&self.headers));
        out.push("-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.extend(self.rows.iter().map(|r| fmt_row(r)));
        out
    }

    /// Print with a bold header and alternating dimmed rows.
    pub fn print(&self) {
        for (i, line) in self.lines().into_iter().enumerate() {
            match i {
                0 => println!("  {}", line.bold()),
                1 => println!("  {line}"),
                n if n % 2 == 1 => println!("  {}", line.dimmed()),
                _ => println!("  {line}"),
            }
        }
    }

    /// Comma-separated rendering, header first. Cells containing commas or
    /// quotes are quoted.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            let line = row.iter().map(|c| csv_cell(c)).collect::<Vec<_>>().join(",");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
