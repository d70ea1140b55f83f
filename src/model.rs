//! Typed records decoded from Things and typed intents sent to it.
//!
//! Records carry no identity of their own beyond the id Things assigns.
//! Project and area references on a todo are names, not ids.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// The fixed built-in lists of Things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListName {
    Inbox,
    Today,
    Tomorrow,
    Anytime,
    Upcoming,
    Someday,
    Logbook,
    Trash,
}

impl ListName {
    pub const ALL: [ListName; 8] = [
        ListName::Inbox,
        ListName::Today,
        ListName::Tomorrow,
        ListName::Anytime,
        ListName::Upcoming,
        ListName::Someday,
        ListName::Logbook,
        ListName::Trash,
    ];

    /// Canonical name as Things spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Inbox => "Inbox",
            ListName::Today => "Today",
            ListName::Tomorrow => "Tomorrow",
            ListName::Anytime => "Anytime",
            ListName::Upcoming => "Upcoming",
            ListName::Someday => "Someday",
            ListName::Logbook => "Logbook",
            ListName::Trash => "Trash",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        ListName::ALL
            .iter()
            .copied()
            .find(|list| list.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownList(s.to_string()))
    }
}

/// A todo as returned by list and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: String,
    pub name: String,
    pub status: String,
    pub tags: Option<String>,
    pub deadline: Option<String>,
    pub start_date: Option<String>,
    pub notes: Option<String>,
    pub project: Option<String>,
    pub area: Option<String>,
}

/// A single todo with its read-only timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoDetail {
    #[serde(flatten)]
    pub todo: Todo,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub completed: Option<String>,
    pub cancelled: Option<String>,
}

/// A project as returned by the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub area: Option<String>,
    pub todo_count: Option<u32>,
}

/// Reduced todo row nested inside a project detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTodo {
    pub id: String,
    pub name: String,
    pub status: String,
    pub tags: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetail {
    pub id: String,
    pub name: String,
    pub status: String,
    pub area: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub deadline: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub todos: Vec<ProjectTodo>,
}

/// What Things hands back after a create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: String,
    pub name: String,
}

/// Fields for a new todo. `None` means "not set".
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub notes: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<String>,
    pub project: Option<String>,
    pub checklist: Vec<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Changes to an existing todo. `None` leaves a field untouched; the literal
/// `"none"` on `deadline` or `project` clears it.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<String>,
    pub project: Option<String>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.notes.is_none()
            && self.when.is_none()
            && self.deadline.is_none()
            && self.tags.is_none()
            && self.project.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub notes: Option<String>,
    pub area: Option<String>,
    pub tags: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Changes to an existing project. `"none"` on `deadline` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub deadline: Option<String>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.notes.is_none() && self.tags.is_none() && self.deadline.is_none()
    }
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{field} cannot be empty")));
    }
    Ok(())
}
