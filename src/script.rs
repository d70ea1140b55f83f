//! AppleScript generation.
//!
//! Every user-supplied value reaches a script through [`quoted`], which
//! escapes backslashes and then double quotes. Nothing else interpolates
//! text into a string literal.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::ListName;
use crate::wire::{Schema, Source, FIELD_DELIMITER, ROW_DELIMITER};

/// Sentinel that clears `deadline` or `project` on update.
pub const CLEAR: &str = "none";

/// Escape a value for use inside an AppleScript string literal.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A value rendered as a double-quoted, escaped AppleScript string literal.
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a>(&'a str);

pub fn quoted(value: &str) -> Quoted<'_> {
    Quoted(value)
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape(self.0))
    }
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"))
}

/// Convert `YYYY-MM-DD` into the long form AppleScript's `date "..."` accepts,
/// e.g. `February 26, 2026`. Anything else is passed through verbatim.
pub fn format_date(value: &str) -> Result<String> {
    if !iso_date_pattern().is_match(value) {
        return Ok(value.to_string());
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(format!("invalid date '{value}'")))?;
    Ok(date.format("%B %d, %Y").to_string())
}

/// Where a `--when` value puts a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    List(ListName),
    /// A literal start date, already formatted for AppleScript.
    StartDate(String),
}

impl Schedule {
    /// Parse a `when` value for a newly created record. `inbox` is rejected
    /// because new todos land in the Inbox when no schedule is given.
    pub fn for_create(value: &str) -> Result<Option<Self>> {
        let schedule = Self::parse(value)?;
        if schedule == Some(Schedule::List(ListName::Inbox)) {
            return Err(Error::InvalidArgument(
                "inbox is not a valid --when for new items; omit --when instead".to_string(),
            ));
        }
        Ok(schedule)
    }

    /// Parse a `when` value for an existing record.
    pub fn for_update(value: &str) -> Result<Option<Self>> {
        Self::parse(value)
    }

    fn parse(value: &str) -> Result<Option<Self>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let list = match trimmed.to_ascii_lowercase().as_str() {
            "today" => Some(ListName::Today),
            "tomorrow" => Some(ListName::Tomorrow),
            "someday" => Some(ListName::Someday),
            "anytime" => Some(ListName::Anytime),
            "inbox" => Some(ListName::Inbox),
            _ => None,
        };
        match list {
            Some(list) => Ok(Some(Schedule::List(list))),
            None => Ok(Some(Schedule::StartDate(format_date(trimmed)?))),
        }
    }
}

/// Line-oriented builder for one `tell application ... end tell` block.
#[derive(Debug, Clone)]
pub struct Script {
    lines: Vec<String>,
    depth: usize,
}

impl Script {
    pub fn tell(application: &str) -> Self {
        Self {
            lines: vec![format!("tell application {}", quoted(application))],
            depth: 1,
        }
    }

    pub fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{}", line.as_ref()));
        self
    }

    pub fn open(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.line(line);
        self.depth += 1;
        self
    }

    pub fn close(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(line);
        self
    }

    /// `try ... on error ... end try` where the error branch only runs when
    /// the first statement fails.
    pub fn try_or(&mut self, attempt: impl AsRef<str>, fallback: impl AsRef<str>) -> &mut Self {
        self.open("try").line(attempt).close("on error");
        self.depth += 1;
        self.line(fallback).close("end try")
    }

    /// Bind `var` to a project by id, falling back to the first project with
    /// that name only when the id lookup fails.
    pub fn resolve_project(&mut self, var: &str, identifier: &str) -> &mut Self {
        self.try_or(
            format!("set {var} to project id {}", quoted(identifier)),
            format!("set {var} to first project whose name is {}", quoted(identifier)),
        )
    }

    pub fn resolve_todo(&mut self, var: &str, id: &str) -> &mut Self {
        self.line(format!("set {var} to to do id {}", quoted(id)))
    }

    pub fn move_to(&mut self, var: &str, list: ListName) -> &mut Self {
        self.line(format!("move {var} to list {}", quoted(list.as_str())))
    }

    /// Emit the commands for a schedule. A start date needs both the move to
    /// Anytime and the explicit activation date.
    pub fn schedule(&mut self, var: &str, schedule: &Schedule) -> &mut Self {
        match schedule {
            Schedule::List(list) => self.move_to(var, *list),
            Schedule::StartDate(date) => self
                .line(format!("set startDate to date {}", quoted(date)))
                .move_to(var, ListName::Anytime)
                .line(format!("set activation date of {var} to startDate")),
        }
    }

    /// Append every field of `schema` for record `var` to `output`, joined by
    /// the field delimiter.
    pub fn emit_record(&mut self, schema: &Schema, var: &str) -> &mut Self {
        for (index, field) in schema.fields.iter().enumerate() {
            if index > 0 {
                self.line(format!("set output to output & {}", quoted(FIELD_DELIMITER)));
            }
            match field.source {
                Source::Property(property) => {
                    self.line(format!("set output to output & ({property} of {var})"));
                }
                Source::RelatedName(relation) => {
                    self.try_or(
                        format!("set output to output & (name of {relation} of {var})"),
                        "set output to output & \"\"",
                    );
                }
                Source::Count(elements) => {
                    self.line(format!(
                        "set output to output & (count of {elements} of {var})"
                    ));
                }
            }
        }
        self
    }

    /// Loop over `collection`, emitting one row per element, at most `limit`
    /// rows when given.
    pub fn emit_rows(
        &mut self,
        schema: &Schema,
        var: &str,
        collection: &str,
        limit: Option<usize>,
    ) -> &mut Self {
        self.line(format!("set rowSource to {collection}"));
        match limit {
            Some(limit) => self.line(format!("set maxItems to {limit}")),
            None => self.line("set maxItems to count of rowSource"),
        };
        self.line("set counter to 0")
            .open(format!("repeat with {var} in rowSource"))
            .line("set counter to counter + 1")
            .line("if counter > maxItems then exit repeat")
            .line(format!(
                "if counter > 1 then set output to output & {}",
                quoted(ROW_DELIMITER)
            ))
            .emit_record(schema, var)
            .close("end repeat")
    }

    pub fn finish(mut self) -> String {
        self.depth = 0;
        self.lines.push("end tell".to_string());
        self.lines.join("\n")
    }
}
