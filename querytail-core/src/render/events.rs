use crate::api::{Event, QueryResult};
use crate::format::{FieldInterpreters, FormatProgram};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::io::{self, Write};

/// Prints raw events one line each, never repeating an event it has already
/// printed (by `@id`). Events without an id are printed every time.
pub struct EventListPrinter<W> {
    out: W,
    program: FormatProgram,
    interpreters: FieldInterpreters,
    printed_ids: HashSet<String>,
}

impl<W: Write> EventListPrinter<W> {
    pub fn new(out: W, format: &str, interpreters: FieldInterpreters) -> Self {
        Self {
            out,
            program: FormatProgram::compile(format),
            interpreters,
            printed_ids: HashSet::new(),
        }
    }

    pub fn print(&mut self, result: &QueryResult) -> io::Result<()> {
        let mut events: Vec<&Event> = result.events.iter().collect();
        events.sort_by(|a, b| by_timestamp(a, b));

        for event in events {
            if let Some(id) = event.id() {
                if !self.printed_ids.insert(id.to_string()) {
                    continue;
                }
            }

            let line = self.program.render(event, &self.interpreters);
            writeln!(self.out, "{line}")?;
        }

        self.out.flush()
    }

    pub fn printed(&self) -> usize {
        self.printed_ids.len()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Ascending timestamp; events without one go last. Ties keep snapshot order
/// (`sort_by` is stable).
fn by_timestamp(a: &Event, b: &Event) -> Ordering {
    match (a.timestamp(), b.timestamp()) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
