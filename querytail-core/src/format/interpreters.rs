use crate::api::{FieldValue, TIMESTAMP_FIELD};
use chrono::{DateTime, SecondsFormat};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Renders a field value specially. `None` means "not applicable", and the
/// caller falls back to the value's default string form.
pub type FieldInterpreter = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Per-field rendering overrides, keyed by field name.
#[derive(Clone)]
pub struct FieldInterpreters {
    by_field: HashMap<String, FieldInterpreter>,
}

impl FieldInterpreters {
    pub fn empty() -> Self {
        Self {
            by_field: HashMap::new(),
        }
    }

    /// Adds or replaces the interpreter for `field`.
    pub fn register<F>(&mut self, field: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.by_field.insert(field.into(), Arc::new(f));
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldInterpreter> {
        self.by_field.get(field)
    }

    /// Renders `value` for `field`. Absent values render as the empty string.
    pub fn render(&self, field: &str, value: Option<&FieldValue>) -> String {
        let Some(value) = value else {
            return String::new();
        };

        self.get(field)
            .and_then(|interpret| interpret(value))
            .unwrap_or_else(|| value.to_string())
    }
}

impl Default for FieldInterpreters {
    fn default() -> Self {
        let mut interpreters = Self::empty();
        interpreters.register(TIMESTAMP_FIELD, epoch_millis_to_rfc3339);
        interpreters
    }
}

impl fmt::Debug for FieldInterpreters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.by_field.keys().collect();
        fields.sort();
        f.debug_struct("FieldInterpreters")
            .field("fields", &fields)
            .finish()
    }
}

/// Epoch milliseconds to RFC3339 (UTC) with sub-second digits only when needed.
pub fn epoch_millis_to_rfc3339(value: &FieldValue) -> Option<String> {
    let millis = value.as_f64().filter(|m| m.is_finite())?;
    let ts = DateTime::from_timestamp_millis(millis.trunc() as i64)?;
    Some(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
