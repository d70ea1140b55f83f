//! Response decoding into typed records.
//!
//! Decoding never fails. Odd field content degrades to a pass-through string
//! or an absent value so one bad field cannot void a whole response. Rows
//! without an id are dropped everywhere; rows without a name are kept here
//! and filtered by the callers that need it.

use crate::model::{ProjectDetail, ProjectSummary, ProjectTodo, Todo, TodoDetail};
use crate::wire::{
    split_rows, Row, PROJECT_DETAIL, PROJECT_ROW, PROJECT_TODO, TAG_ROW, TODO_DETAIL, TODO_ROW,
};

fn todo_from_row(row: &Row<'_>) -> Option<Todo> {
    Some(Todo {
        id: row.id()?,
        name: row.text("name"),
        status: row.token("status"),
        tags: row.optional("tags"),
        deadline: row.date("deadline"),
        start_date: row.date("start_date"),
        notes: row.optional("notes"),
        project: row.optional("project"),
        area: row.optional("area"),
    })
}

/// Decode list and search responses.
pub fn todo_rows(raw: &str) -> Vec<Todo> {
    split_rows(raw)
        .into_iter()
        .filter_map(|row| todo_from_row(&TODO_ROW.row(row)))
        .collect()
}

/// Decode a single todo. `None` when the response carries no id.
pub fn todo_detail(raw: &str) -> Option<TodoDetail> {
    let row = TODO_DETAIL.row(raw);
    let todo = todo_from_row(&row)?;
    Some(TodoDetail {
        todo,
        created: row.date("created"),
        modified: row.date("modified"),
        completed: row.date("completed"),
        cancelled: row.date("cancelled"),
    })
}

pub fn project_rows(raw: &str) -> Vec<ProjectSummary> {
    split_rows(raw)
        .into_iter()
        .filter_map(|raw_row| {
            let row = PROJECT_ROW.row(raw_row);
            Some(ProjectSummary {
                id: row.id()?,
                name: row.text("name"),
                status: row.token("status"),
                area: row.optional("area"),
                todo_count: row.count("todo_count"),
            })
        })
        .collect()
}

/// Decode a project followed by its todo rows. `None` when the project
/// segment carries no id.
pub fn project_detail(raw: &str) -> Option<ProjectDetail> {
    let mut segments = split_rows(raw).into_iter();
    let row = PROJECT_DETAIL.row(segments.next()?);

    let todos = segments
        .filter_map(|segment| {
            let row = PROJECT_TODO.row(segment);
            Some(ProjectTodo {
                id: row.id()?,
                name: row.text("name"),
                status: row.token("status"),
                tags: row.optional("tags"),
                deadline: row.date("deadline"),
            })
        })
        .collect();

    Some(ProjectDetail {
        id: row.id()?,
        name: row.text("name"),
        status: row.token("status"),
        area: row.optional("area"),
        notes: row.optional("notes"),
        tags: row.optional("tags"),
        deadline: row.date("deadline"),
        created: row.date("created"),
        modified: row.date("modified"),
        todos,
    })
}

pub fn tag_names(raw: &str) -> Vec<String> {
    split_rows(raw)
        .into_iter()
        .filter_map(|row| TAG_ROW.row(row).optional("name"))
        .collect()
}
