use crate::api::QueryResult;
use comfy_table::Table;
use comfy_table::presets::NOTHING;
use std::collections::HashSet;
use std::io::{self, Write};

/// Prints aggregate results as a table, redrawn in full on every call.
///
/// Columns accrete across calls in first-seen order and are never removed.
pub struct AggregatePrinter<W> {
    out: W,
    columns: Vec<String>,
    seen: HashSet<String>,
}

impl<W: Write> AggregatePrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            columns: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn print(&mut self, result: &QueryResult) -> io::Result<()> {
        self.accrete_columns(result);

        if self.columns.is_empty() {
            return Ok(());
        }

        // Single column, single row: just the value.
        if let ([column], [event]) = (self.columns.as_slice(), result.events.as_slice()) {
            let value = event.get(column).map(|v| v.to_string()).unwrap_or_default();
            writeln!(self.out, "{value}")?;
            return self.out.flush();
        }

        let mut table = Table::new();
        table.load_preset(NOTHING).set_header(self.columns.clone());

        for row in self.rows(result) {
            table.add_row(row);
        }

        writeln!(self.out, "{table}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Cells in column order; a column the event lacks is an empty cell.
    pub(crate) fn rows(&self, result: &QueryResult) -> Vec<Vec<String>> {
        result
            .events
            .iter()
            .map(|event| {
                self.columns
                    .iter()
                    .map(|c| event.get(c).map(|v| v.to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    fn accrete_columns(&mut self, result: &QueryResult) {
        for event in &result.events {
            for field in event.fields() {
                if self.seen.insert(field.to_string()) {
                    self.columns.push(field.to_string());
                }
            }
        }
    }
}
