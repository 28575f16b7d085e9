
use crate::api::{Event, FieldValue, QueryResult, QueryResultMetadata};

pub(crate) fn snapshot(events: Vec<Event>) -> QueryResult {
    QueryResult {
        done: true,
        events,
        meta_data: QueryResultMetadata::default(),
    }
}

pub(crate) fn event(fields: &[(&str, FieldValue)]) -> Event {
    fields.iter().cloned().collect()
}

pub(crate) fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .lines()
        .map(str::to_string)
        .collect()
}
