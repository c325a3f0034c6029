//! Terminal UI utilities.
//!
//! - `Table` - box-drawn table sized to its widest cells
//! - `with_spinner` - spinner shown while a blocking call runs
//!
//! ```rust
//! let mut table = malo::ui::Table::new(&["Package"]);
//! table.add_row(vec!["requests".to_string()]);
//! table.print();
//! ```

use colored::*;
use console::{Alignment, measure_text_width, pad_str};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let widths = self.column_widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: Vec<String>| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!(" {} ", pad_str(cell, *w, Alignment::Left, None)))
                .collect();
            format!("  │{}│", padded.join("│"))
        };

        let mut out = vec![rule("┌", "┬", "┐")];
        out.push(line(
            self.headers
                .iter()
                .map(|h| h.bold().to_string())
                .collect(),
        ));
        out.push(rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push(line(row.clone()));
        }
        out.push(rule("└", "┴", "┘"));
        out.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

/// Runs `f` behind a spinner labelled `message`. The spinner is cleared
/// before returning so the caller's own status line takes its place.
pub fn with_spinner<T>(message: impl Into<String>, f: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]));
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    result
}
