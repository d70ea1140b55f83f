//! Flat text wire format between generated scripts and the decoder.
//!
//! A response is rows joined by [`ROW_DELIMITER`]; a row is fields joined by
//! [`FIELD_DELIMITER`]. Each record kind has a [`Schema`] listing its fields in
//! order together with the AppleScript source of every field. The script
//! emitter and the decoder both walk the same schema, so field positions are
//! defined in exactly one place.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const WIRE_VERSION: &str = "things.wire.v1";
pub const FIELD_DELIMITER: &str = "|||";
pub const ROW_DELIMITER: &str = "~~~";

/// Text AppleScript produces when coercing `missing value` to a string.
pub const MISSING_VALUE: &str = "missing value";

/// Where a field's value comes from on the AppleScript side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `<property> of <record>`
    Property(&'static str),
    /// `name of <relation> of <record>`, or empty when the relation is unset.
    RelatedName(&'static str),
    /// `count of <elements> of <record>`
    Count(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: Source,
}

const fn prop(name: &'static str, property: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        source: Source::Property(property),
    }
}

const fn related(name: &'static str, relation: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        source: Source::RelatedName(relation),
    }
}

const fn count(name: &'static str, elements: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        source: Source::Count(elements),
    }
}

/// Ordered field list for one record kind.
#[derive(Debug)]
pub struct Schema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static TODO_ROW: Schema = Schema {
    kind: "todo",
    fields: &[
        prop("id", "id"),
        prop("name", "name"),
        prop("status", "status"),
        prop("tags", "tag names"),
        prop("deadline", "due date"),
        prop("start_date", "activation date"),
        prop("notes", "notes"),
        related("project", "project"),
        related("area", "area"),
    ],
};

pub static TODO_DETAIL: Schema = Schema {
    kind: "todo_detail",
    fields: &[
        prop("id", "id"),
        prop("name", "name"),
        prop("status", "status"),
        prop("tags", "tag names"),
        prop("deadline", "due date"),
        prop("start_date", "activation date"),
        prop("notes", "notes"),
        related("project", "project"),
        related("area", "area"),
        prop("created", "creation date"),
        prop("modified", "modification date"),
        prop("completed", "completion date"),
        prop("cancelled", "cancellation date"),
    ],
};

pub static PROJECT_ROW: Schema = Schema {
    kind: "project",
    fields: &[
        prop("id", "id"),
        prop("name", "name"),
        prop("status", "status"),
        related("area", "area"),
        count("todo_count", "to dos"),
    ],
};

pub static PROJECT_DETAIL: Schema = Schema {
    kind: "project_detail",
    fields: &[
        prop("id", "id"),
        prop("name", "name"),
        prop("status", "status"),
        related("area", "area"),
        prop("notes", "notes"),
        prop("tags", "tag names"),
        prop("deadline", "due date"),
        prop("created", "creation date"),
        prop("modified", "modification date"),
    ],
};

pub static PROJECT_TODO: Schema = Schema {
    kind: "project_todo",
    fields: &[
        prop("id", "id"),
        prop("name", "name"),
        prop("status", "status"),
        prop("tags", "tag names"),
        prop("deadline", "due date"),
    ],
};

pub static TAG_ROW: Schema = Schema {
    kind: "tag",
    fields: &[prop("name", "name")],
};

impl Schema {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Split one row into fields laid out by this schema.
    pub fn row<'a>(&'static self, raw: &'a str) -> Row<'a> {
        Row {
            schema: self,
            fields: split_fields(raw),
        }
    }
}

/// Split a whole response into rows. A blank response has no rows.
pub fn split_rows(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(ROW_DELIMITER).collect()
}

/// Split a row into fields, keeping empty trailing fields.
pub fn split_fields(row: &str) -> Vec<&str> {
    row.split(FIELD_DELIMITER).collect()
}

/// One decoded row. Lookups never fail: a field that is missing from the
/// row, or not part of the schema, reads as absent.
#[derive(Debug)]
pub struct Row<'a> {
    schema: &'static Schema,
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    pub fn raw(&self, name: &str) -> Option<&'a str> {
        let index = self.schema.position(name);
        debug_assert!(
            index.is_some(),
            "field {name} is not part of the {} schema",
            self.schema.kind
        );
        index.and_then(|index| self.fields.get(index).copied())
    }

    /// The row id, trimmed; `None` when blank.
    pub fn id(&self) -> Option<String> {
        blank(self.raw("id"))
    }

    /// The field verbatim, or empty when missing.
    pub fn text(&self, name: &str) -> String {
        self.raw(name).unwrap_or_default().to_string()
    }

    /// The field trimmed, or empty when missing.
    pub fn token(&self, name: &str) -> String {
        self.raw(name).unwrap_or_default().trim().to_string()
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        blank(self.raw(name))
    }

    pub fn date(&self, name: &str) -> Option<String> {
        clean_date(self.raw(name))
    }

    pub fn count(&self, name: &str) -> Option<u32> {
        self.raw(name)
            .and_then(|value| value.trim().parse::<u32>().ok())
    }
}

/// Blank-as-absent: empty or whitespace-only values decode to `None`.
pub fn blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%A, %B %d, %Y at %I:%M:%S %p",
    "%A, %B %d, %Y at %H:%M:%S",
    "%A, %d %B %Y at %H:%M:%S",
    "%A %d %B %Y at %H:%M:%S",
    "%A, %d %B %Y at %I:%M:%S %p",
    "%B %d, %Y at %I:%M:%S %p",
    "%B %d, %Y at %H:%M:%S",
    "%d %B %Y at %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%A, %B %d, %Y", "%A, %d %B %Y", "%B %d, %Y", "%Y-%m-%d"];

/// Decode an AppleScript date into ISO 8601.
///
/// `missing value` and blank decode to `None`. Midnight becomes `YYYY-MM-DD`,
/// any other time `YYYY-MM-DDTHH:MM:SS`. Text that does not parse is returned
/// trimmed but otherwise untouched.
pub fn clean_date(value: Option<&str>) -> Option<String> {
    let value = value?;
    if value.contains(MISSING_VALUE) {
        return None;
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    match parse_applescript_date(trimmed) {
        Some(parsed) if parsed.time() == NaiveTime::MIN => {
            Some(parsed.format("%Y-%m-%d").to_string())
        }
        Some(parsed) => Some(parsed.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => Some(trimmed.to_string()),
    }
}

fn parse_applescript_date(value: &str) -> Option<NaiveDateTime> {
    // macOS puts narrow no-break spaces before AM/PM in some locales.
    let normalized: String = value
        .chars()
        .map(|ch| match ch {
            '\u{202f}' | '\u{a0}' => ' ',
            other => other,
        })
        .collect();
    let normalized = normalized.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(normalized, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(normalized, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
