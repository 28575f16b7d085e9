use crate::api::Event;
use crate::format::interpreters::FieldInterpreters;
use once_cell::sync::Lazy;
use regex::Regex;

/// `{field}` or `{field:modifier}`. No nesting, no escapes.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]+\}").unwrap());

/// `[-]width[.precision]`, both parts optional.
static MODIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-)?(\d*)(?:\.(\d+))?$").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Right,
}

/// Padding and truncation applied to one substituted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifier {
    pub raw: String,
    pub align: Align,
    pub width: Option<usize>,
    pub precision: Option<usize>,
}

impl Modifier {
    /// Unrecognised modifiers keep their raw text but apply no padding.
    pub fn parse(raw: &str) -> Self {
        let mut modifier = Modifier {
            raw: raw.to_string(),
            ..Default::default()
        };

        let Some(caps) = MODIFIER.captures(raw) else {
            return modifier;
        };

        if caps.get(1).is_some() {
            modifier.align = Align::Left;
        }
        modifier.width = caps.get(2).and_then(|m| m.as_str().parse().ok());
        modifier.precision = caps.get(3).and_then(|m| m.as_str().parse().ok());
        modifier
    }

    pub fn apply(&self, value: String) -> String {
        let value = match self.precision {
            Some(p) if value.chars().count() > p => value.chars().take(p).collect(),
            _ => value,
        };

        match (self.width, self.align) {
            (None, _) => value,
            (Some(width), Align::Left) => format!("{value:<width$}"),
            (Some(width), Align::Right) => format!("{value:>width$}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(Modifier),
}

/// A compiled format string: literal text interleaved with substitution
/// slots, one slot per entry in `fields()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProgram {
    segments: Vec<Segment>,
    fields: Vec<String>,
}

impl FormatProgram {
    /// Never fails: text that is not a complete `{...}` span is kept literally.
    pub fn compile(format: &str) -> Self {
        let mut segments = Vec::new();
        let mut fields = Vec::new();
        let mut literal_start = 0;

        for m in PLACEHOLDER.find_iter(format) {
            if m.start() > literal_start {
                segments.push(Segment::Literal(format[literal_start..m.start()].to_string()));
            }

            let inner = &format[m.start() + 1..m.end() - 1];
            let (field, modifier) = match inner.split_once(':') {
                Some((field, modifier)) => (field, Modifier::parse(modifier)),
                None => (inner, Modifier::default()),
            };

            fields.push(field.to_string());
            segments.push(Segment::Slot(modifier));
            literal_start = m.end();
        }

        if literal_start < format.len() {
            segments.push(Segment::Literal(format[literal_start..].to_string()));
        }

        Self { segments, fields }
    }

    /// Field names in placeholder order. Repeats are kept.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// printf-style view of the template, e.g. `%-40s %s`. Display only;
    /// `render` works from the segments.
    pub fn template(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(&text.replace('%', "%%")),
                Segment::Slot(modifier) => {
                    out.push('%');
                    out.push_str(&modifier.raw);
                    out.push('s');
                }
            }
        }
        out
    }

    /// Renders one event to a single line, without the line terminator.
    pub fn render(&self, event: &Event, interpreters: &FieldInterpreters) -> String {
        let mut out = String::new();
        let mut fields = self.fields.iter();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(modifier) => {
                    // One field per slot by construction.
                    let Some(field) = fields.next() else {
                        continue;
                    };
                    let value = interpreters.render(field, event.get(field));
                    out.push_str(&modifier.apply(value));
                }
            }
        }
        out
    }
}
