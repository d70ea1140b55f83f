//! things project command implementations.

use super::Action;
use crate::client::Things;
use crate::error::{Error, Result};
use crate::model::{NewProject, ProjectChanges, ProjectSummary};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AddOptions {
    pub name: String,
    pub notes: Option<String>,
    pub area: Option<String>,
    pub tags: Option<String>,
    pub when: Option<String>,
    pub deadline: Option<String>,
}

pub struct EditOptions {
    pub identifier: String,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub deadline: Option<String>,
}

#[derive(serde::Serialize)]
struct ProjectListOutput {
    projects: Vec<ProjectSummary>,
    total: usize,
}

#[derive(serde::Serialize)]
struct ProjectChangeOutput<'a> {
    #[serde(flatten)]
    action: Action,
    identifier: &'a str,
}

pub fn run_list(things: &Things, output: OutputOptions) -> Result<()> {
    let projects = things.projects()?;

    let mut human = HumanOutput::new(format!("projects: {}", projects.len()));
    for project in &projects {
        let mut line = format!("{}  {}", project.id, project.name);
        if let Some(area) = &project.area {
            line.push_str(&format!("  ({area})"));
        }
        if let Some(count) = project.todo_count {
            line.push_str(&format!("  {count} todo(s)"));
        }
        human.push_detail(line);
    }

    let report = ProjectListOutput {
        total: projects.len(),
        projects,
    };
    emit_success(output, "projects", &report, Some(&human))
}

pub fn run_show(things: &Things, output: OutputOptions, identifier: &str) -> Result<()> {
    let detail = things.project_show(identifier)?;

    let mut human = HumanOutput::new(detail.name.clone());
    human.push_summary("id", detail.id.clone());
    human.push_summary("status", detail.status.clone());
    human.push_optional("area", detail.area.as_deref());
    human.push_optional("tags", detail.tags.as_deref());
    human.push_optional("deadline", detail.deadline.as_deref());
    human.push_optional("notes", detail.notes.as_deref());
    human.push_summary("todos", detail.todos.len().to_string());
    for todo in &detail.todos {
        let mut line = format!("{}  {}  [{}]", todo.id, todo.name, todo.status);
        if let Some(deadline) = &todo.deadline {
            line.push_str(&format!("  (due {deadline})"));
        }
        human.push_detail(line);
    }

    emit_success(output, "project show", &detail, Some(&human))
}

pub fn run_add(things: &Things, output: OutputOptions, options: AddOptions) -> Result<()> {
    let project = NewProject {
        name: options.name,
        notes: options.notes,
        area: options.area,
        tags: options.tags,
        when: options.when,
        deadline: options.deadline,
    };

    let created = things.create_project(&project)?;

    let mut human = HumanOutput::new(format!("things project add: {}", created.name));
    human.push_summary("id", created.id.clone());
    emit_success(output, "project add", &created, Some(&human))
}

pub fn run_edit(things: &Things, output: OutputOptions, options: EditOptions) -> Result<()> {
    let changes = ProjectChanges {
        name: options.name,
        notes: options.notes,
        tags: options.tags,
        deadline: options.deadline,
    };
    if changes.is_empty() {
        return Err(Error::InvalidArgument(
            "No changes specified. Use --name, --notes, --tags, or --deadline".to_string(),
        ));
    }

    things.update_project(&options.identifier, &changes)?;

    let report = ProjectChangeOutput {
        action: Action::Updated(true),
        identifier: &options.identifier,
    };
    let human = HumanOutput::new(format!("things project edit: updated {}", options.identifier));
    emit_success(output, "project edit", &report, Some(&human))
}

pub fn run_complete(things: &Things, output: OutputOptions, identifier: &str) -> Result<()> {
    things.complete_project(identifier)?;
    let report = ProjectChangeOutput {
        action: Action::Completed(true),
        identifier,
    };
    let human = HumanOutput::new(format!("things project complete: {identifier}"));
    emit_success(output, "project complete", &report, Some(&human))
}

pub fn run_delete(things: &Things, output: OutputOptions, identifier: &str) -> Result<()> {
    things.delete_project(identifier)?;
    let report = ProjectChangeOutput {
        action: Action::Deleted(true),
        identifier,
    };
    let human = HumanOutput::new(format!("things project delete: {identifier} moved to Trash"));
    emit_success(output, "project delete", &report, Some(&human))
}
