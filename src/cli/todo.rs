//! things todo command implementations.

use super::Action;
use crate::client::Things;
use crate::error::{Error, Result};
use crate::model::{ListName, NewTodo, Todo, TodoChanges};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AddOptions {
    pub title: String,
    pub notes: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<String>,
    pub project: Option<String>,
    pub checklist: Option<String>,
}

pub struct EditOptions {
    pub id: String,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
    pub tags: Option<String>,
    pub project: Option<String>,
}

#[derive(serde::Serialize)]
struct TodoListOutput {
    todos: Vec<Todo>,
    total: usize,
}

#[derive(serde::Serialize)]
struct TodoChangeOutput<'a> {
    #[serde(flatten)]
    action: Action,
    id: &'a str,
}

pub fn run_list(
    things: &Things,
    output: OutputOptions,
    list: ListName,
    limit: Option<usize>,
) -> Result<()> {
    let todos = things.list(list, limit)?;
    let human = todo_list_human(format!("{list}: {} todo(s)", todos.len()), &todos, limit);
    let command = list.as_str().to_ascii_lowercase();
    emit_list(output, &command, todos, &human)
}

pub fn run_search(
    things: &Things,
    output: OutputOptions,
    query: &str,
    limit: Option<usize>,
) -> Result<()> {
    let todos = things.search(query, limit)?;
    let human = todo_list_human(
        format!("search \"{query}\": {} todo(s)", todos.len()),
        &todos,
        Some(limit.unwrap_or(things.search_limit())),
    );
    emit_list(output, "search", todos, &human)
}

fn emit_list(
    output: OutputOptions,
    command: &str,
    todos: Vec<Todo>,
    human: &HumanOutput,
) -> Result<()> {
    let report = TodoListOutput {
        total: todos.len(),
        todos,
    };
    emit_success(output, command, &report, Some(human))
}

fn todo_list_human(header: String, todos: &[Todo], limit: Option<usize>) -> HumanOutput {
    let mut human = HumanOutput::new(header);
    for todo in todos {
        let mut line = format!("{}  {}", todo.id, todo.name);
        if let Some(deadline) = &todo.deadline {
            line.push_str(&format!("  (due {deadline})"));
        }
        if let Some(tags) = &todo.tags {
            line.push_str(&format!("  [{tags}]"));
        }
        human.push_detail(line);
    }
    if let Some(limit) = limit {
        if todos.len() >= limit {
            human.push_warning(format!("showing the first {limit}; use --limit to see more"));
        }
    }
    human
}

pub fn run_add(things: &Things, output: OutputOptions, options: AddOptions) -> Result<()> {
    let todo = NewTodo {
        title: options.title,
        notes: options.notes,
        when: options.when,
        deadline: options.deadline,
        tags: options.tags,
        project: options.project,
        checklist: options
            .checklist
            .as_deref()
            .map(parse_checklist)
            .unwrap_or_default(),
    };

    let created = things.create(&todo)?;

    let mut human = HumanOutput::new(format!("things add: {}", created.name));
    human.push_summary("id", created.id.clone());
    emit_success(output, "add", &created, Some(&human))
}

/// Split a comma-separated checklist. Empty items between commas are kept;
/// trailing empty items are dropped.
pub fn parse_checklist(raw: &str) -> Vec<String> {
    let mut items: Vec<&str> = raw.split(',').collect();
    while items.last().is_some_and(|item| item.is_empty()) {
        items.pop();
    }
    items.into_iter().map(|item| item.trim().to_string()).collect()
}

pub fn run_show(things: &Things, output: OutputOptions, id: &str) -> Result<()> {
    let detail = things.get(id)?;
    let todo = &detail.todo;

    let mut human = HumanOutput::new(todo.name.clone());
    human.push_summary("id", todo.id.clone());
    human.push_summary("status", todo.status.clone());
    human.push_optional("tags", todo.tags.as_deref());
    human.push_optional("when", todo.start_date.as_deref());
    human.push_optional("deadline", todo.deadline.as_deref());
    human.push_optional("project", todo.project.as_deref());
    human.push_optional("area", todo.area.as_deref());
    human.push_optional("created", detail.created.as_deref());
    human.push_optional("modified", detail.modified.as_deref());
    human.push_optional("completed", detail.completed.as_deref());
    human.push_optional("cancelled", detail.cancelled.as_deref());
    if let Some(notes) = &todo.notes {
        for line in notes.lines() {
            human.push_detail(line);
        }
    }

    emit_success(output, "show", &detail, Some(&human))
}

pub fn run_edit(things: &Things, output: OutputOptions, options: EditOptions) -> Result<()> {
    let changes = TodoChanges {
        name: options.name,
        notes: options.notes,
        when: options.when,
        deadline: options.deadline,
        tags: options.tags,
        project: options.project,
    };
    if changes.is_empty() {
        return Err(Error::InvalidArgument(
            "No changes specified. Use --name, --notes, --when, --deadline, --tags, or --project"
                .to_string(),
        ));
    }

    things.update(&options.id, &changes)?;

    let report = TodoChangeOutput {
        action: Action::Updated(true),
        id: &options.id,
    };
    let human = HumanOutput::new(format!("things edit: updated {}", options.id));
    emit_success(output, "edit", &report, Some(&human))
}

pub fn run_complete(things: &Things, output: OutputOptions, id: &str) -> Result<()> {
    things.complete(id)?;
    let report = TodoChangeOutput {
        action: Action::Completed(true),
        id,
    };
    let human = HumanOutput::new(format!("things complete: {id}"));
    emit_success(output, "complete", &report, Some(&human))
}

pub fn run_cancel(things: &Things, output: OutputOptions, id: &str) -> Result<()> {
    things.cancel(id)?;
    let report = TodoChangeOutput {
        action: Action::Cancelled(true),
        id,
    };
    let human = HumanOutput::new(format!("things cancel: {id}"));
    emit_success(output, "cancel", &report, Some(&human))
}

pub fn run_delete(things: &Things, output: OutputOptions, id: &str) -> Result<()> {
    things.delete(id)?;
    let report = TodoChangeOutput {
        action: Action::Deleted(true),
        id,
    };
    let human = HumanOutput::new(format!("things delete: {id} moved to Trash"));
    emit_success(output, "delete", &report, Some(&human))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_items_are_trimmed_and_kept_in_order() {
        assert_eq!(
            parse_checklist("eggs, milk ,,eggs"),
            vec!["eggs", "milk", "", "eggs"]
        );
    }

    #[test]
    fn trailing_empty_checklist_items_are_dropped() {
        assert_eq!(parse_checklist("a,b,"), vec!["a", "b"]);
        assert_eq!(parse_checklist("a,,b,,"), vec!["a", "", "b"]);
        assert!(parse_checklist("").is_empty());
        assert!(parse_checklist(",,").is_empty());
    }

    #[test]
    fn change_output_only_names_the_action() {
        let report = TodoChangeOutput {
            action: Action::Completed(true),
            id: "A1",
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, serde_json::json!({ "completed": true, "id": "A1" }));
    }
}
