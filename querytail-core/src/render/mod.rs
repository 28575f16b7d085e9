mod aggregate;
mod events;
#[cfg(test)]
mod tests;

pub use aggregate::*;
pub use events::*;

use crate::api::QueryResult;
use crate::format::FieldInterpreters;
use std::io::{self, Write};

/// The renderer for one search, chosen once from the shape of the result.
pub enum ResultPrinter<W> {
    Events(EventListPrinter<W>),
    Aggregate(AggregatePrinter<W>),
}

impl<W: Write> ResultPrinter<W> {
    pub fn for_result(
        result: &QueryResult,
        out: W,
        format: &str,
        interpreters: FieldInterpreters,
    ) -> Self {
        if result.meta_data.is_aggregate {
            ResultPrinter::Aggregate(AggregatePrinter::new(out))
        } else {
            ResultPrinter::Events(EventListPrinter::new(out, format, interpreters))
        }
    }

    pub fn print(&mut self, result: &QueryResult) -> io::Result<()> {
        match self {
            ResultPrinter::Events(p) => p.print(result),
            ResultPrinter::Aggregate(p) => p.print(result),
        }
    }

    pub fn into_inner(self) -> W {
        match self {
            ResultPrinter::Events(p) => p.into_inner(),
            ResultPrinter::Aggregate(p) => p.into_inner(),
        }
    }
}
