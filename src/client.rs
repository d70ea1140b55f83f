//! Typed operations against Things.
//!
//! Each public method validates its input, builds one script, runs it
//! through the executor exactly once, and decodes the response. Validation
//! errors are raised before anything is executed.

use crate::config::Config;
use crate::decode;
use crate::error::{Error, Result};
use crate::model::{
    require_non_empty, Created, ListName, NewProject, NewTodo, ProjectChanges, ProjectDetail,
    ProjectSummary, Todo, TodoChanges, TodoDetail,
};
use crate::script::{format_date, quoted, Schedule, Script, CLEAR};
use crate::transport::{self, Osascript, ScriptExecutor};
use crate::wire::{
    PROJECT_DETAIL, PROJECT_ROW, PROJECT_TODO, ROW_DELIMITER, TAG_ROW, TODO_DETAIL, TODO_ROW,
    WIRE_VERSION,
};

pub const DEFAULT_APPLICATION: &str = "Things3";
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Client for one Things installation.
#[derive(Debug, Clone)]
pub struct Things<E = Osascript> {
    executor: E,
    application: String,
    search_limit: usize,
}

impl Things<Osascript> {
    pub fn from_config(config: &Config) -> Self {
        Things::new(Osascript::new(config.osascript.clone()))
            .with_application(config.application.clone())
            .with_search_limit(config.search.default_limit)
    }
}

impl<E: ScriptExecutor> Things<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            application: DEFAULT_APPLICATION.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn script(&self) -> Script {
        Script::tell(&self.application)
    }

    fn run(&self, operation: &str, script: Script) -> Result<String> {
        tracing::debug!(
            operation,
            application = %self.application,
            wire = WIRE_VERSION,
            "running things operation"
        );
        transport::run(&self.executor, &script.finish())
    }

    // =========================================================================
    // Todos: read
    // =========================================================================

    /// Todos in one of the built-in lists. Rows with a blank name are
    /// placeholders (e.g. time blocks) and are dropped here.
    pub fn list(&self, list: ListName, limit: Option<usize>) -> Result<Vec<Todo>> {
        let mut script = self.script();
        script
            .line("set output to \"\"")
            .emit_rows(
                &TODO_ROW,
                "t",
                &format!("to dos of list {}", quoted(list.as_str())),
                limit,
            )
            .line("return output");

        let raw = self.run("list", script)?;
        Ok(drop_placeholders(decode::todo_rows(&raw)))
    }

    pub fn get(&self, id: &str) -> Result<TodoDetail> {
        require_non_empty(id, "id")?;
        let mut script = self.script();
        script
            .line("set output to \"\"")
            .resolve_todo("t", id)
            .emit_record(&TODO_DETAIL, "t")
            .line("return output");

        let raw = self.run("get", script)?;
        decode::todo_detail(&raw).ok_or(Error::TodoNotFound)
    }

    /// Open todos whose name contains `query`. Unlike [`Things::list`], rows
    /// with a blank name are kept.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<Todo>> {
        let mut script = self.script();
        script
            .line("set output to \"\"")
            .emit_rows(
                &TODO_ROW,
                "t",
                &format!("(to dos whose name contains {} and status is open)", quoted(query)),
                Some(limit.unwrap_or(self.search_limit)),
            )
            .line("return output");

        let raw = self.run("search", script)?;
        Ok(decode::todo_rows(&raw))
    }

    // =========================================================================
    // Todos: write
    // =========================================================================

    pub fn create(&self, todo: &NewTodo) -> Result<Created> {
        require_non_empty(&todo.title, "title")?;
        let schedule = match todo.when.as_deref() {
            Some(when) => Schedule::for_create(when)?,
            None => None,
        };

        let mut props = vec![format!("name:{}", quoted(&todo.title))];
        if let Some(notes) = &todo.notes {
            props.push(format!("notes:{}", quoted(notes)));
        }
        if let Some(deadline) = &todo.deadline {
            props.push(format!("due date:date {}", quoted(&format_date(deadline)?)));
        }
        if let Some(tags) = &todo.tags {
            props.push(format!("tag names:{}", quoted(tags)));
        }

        let mut script = self.script();
        script.line(format!(
            "set newTodo to make new to do with properties {{{}}}",
            props.join(", ")
        ));

        if let Some(project) = &todo.project {
            script
                .line(format!("set proj to first project whose name is {}", quoted(project)))
                .line("set project of newTodo to proj");
        }

        for item in &todo.checklist {
            script
                .open("tell newTodo")
                .line(format!(
                    "make new checklist item with properties {{name:{}}}",
                    quoted(item)
                ))
                .close("end tell");
        }

        if let Some(schedule) = &schedule {
            script.schedule("newTodo", schedule);
        }
        script.line("return id of newTodo");

        let id = self.run("create", script)?;
        created(id, &todo.title)
    }

    pub fn update(&self, id: &str, changes: &TodoChanges) -> Result<()> {
        require_non_empty(id, "id")?;
        if changes.is_empty() {
            return Err(Error::InvalidArgument("no changes specified".to_string()));
        }
        let schedule = match changes.when.as_deref() {
            Some(when) => Schedule::for_update(when)?,
            None => None,
        };

        let mut script = self.script();
        script.resolve_todo("t", id);

        if let Some(name) = &changes.name {
            script.line(format!("set name of t to {}", quoted(name)));
        }
        if let Some(notes) = &changes.notes {
            script.line(format!("set notes of t to {}", quoted(notes)));
        }
        if let Some(tags) = &changes.tags {
            script.line(format!("set tag names of t to {}", quoted(tags)));
        }
        set_deadline(&mut script, "t", changes.deadline.as_deref())?;

        match changes.project.as_deref() {
            Some(CLEAR) => {
                script.line("set project of t to missing value");
            }
            Some(project) => {
                script
                    .line(format!("set proj to first project whose name is {}", quoted(project)))
                    .line("set project of t to proj");
            }
            None => {}
        }

        if let Some(schedule) = &schedule {
            script.schedule("t", schedule);
        }
        script.line("return name of t");

        self.run("update", script)?;
        Ok(())
    }

    pub fn complete(&self, id: &str) -> Result<()> {
        self.set_todo_status("complete", id, "completed")
    }

    pub fn cancel(&self, id: &str) -> Result<()> {
        self.set_todo_status("cancel", id, "canceled")
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        require_non_empty(id, "id")?;
        let mut script = self.script();
        script.line(format!("delete to do id {}", quoted(id)));
        self.run("delete", script)?;
        Ok(())
    }

    fn set_todo_status(&self, operation: &str, id: &str, status: &str) -> Result<()> {
        require_non_empty(id, "id")?;
        let mut script = self.script();
        script.line(format!("set status of to do id {} to {status}", quoted(id)));
        self.run(operation, script)?;
        Ok(())
    }

    // =========================================================================
    // Projects
    // =========================================================================

    pub fn projects(&self) -> Result<Vec<ProjectSummary>> {
        let mut script = self.script();
        script
            .line("set output to \"\"")
            .emit_rows(&PROJECT_ROW, "p", "every project", None)
            .line("return output");

        let raw = self.run("projects", script)?;
        Ok(decode::project_rows(&raw))
    }

    /// A project and its todos, looked up by id or, failing that, by name.
    pub fn project_show(&self, identifier: &str) -> Result<ProjectDetail> {
        require_non_empty(identifier, "project")?;
        let mut script = self.script();
        script
            .line("set output to \"\"")
            .resolve_project("p", identifier)
            .emit_record(&PROJECT_DETAIL, "p")
            .line(format!("set output to output & {}", quoted(ROW_DELIMITER)))
            .emit_rows(&PROJECT_TODO, "t", "to dos of p", None)
            .line("return output");

        let raw = self.run("project show", script)?;
        decode::project_detail(&raw).ok_or(Error::ProjectNotFound)
    }

    pub fn create_project(&self, project: &NewProject) -> Result<Created> {
        require_non_empty(&project.name, "name")?;
        let schedule = match project.when.as_deref() {
            Some(when) => Schedule::for_create(when)?,
            None => None,
        };

        let mut props = vec![format!("name:{}", quoted(&project.name))];
        if let Some(notes) = &project.notes {
            props.push(format!("notes:{}", quoted(notes)));
        }
        if let Some(tags) = &project.tags {
            props.push(format!("tag names:{}", quoted(tags)));
        }
        if let Some(deadline) = &project.deadline {
            props.push(format!("due date:date {}", quoted(&format_date(deadline)?)));
        }

        let mut script = self.script();
        script.line(format!(
            "set newProj to make new project with properties {{{}}}",
            props.join(", ")
        ));

        if let Some(area) = &project.area {
            script
                .line(format!("set a to first area whose name is {}", quoted(area)))
                .line("set area of newProj to a");
        }

        if let Some(schedule) = &schedule {
            script.schedule("newProj", schedule);
        }
        script.line("return id of newProj");

        let id = self.run("project add", script)?;
        created(id, &project.name)
    }

    pub fn update_project(&self, identifier: &str, changes: &ProjectChanges) -> Result<()> {
        require_non_empty(identifier, "project")?;
        if changes.is_empty() {
            return Err(Error::InvalidArgument("no changes specified".to_string()));
        }

        let mut script = self.script();
        script.resolve_project("p", identifier);

        if let Some(name) = &changes.name {
            script.line(format!("set name of p to {}", quoted(name)));
        }
        if let Some(notes) = &changes.notes {
            script.line(format!("set notes of p to {}", quoted(notes)));
        }
        if let Some(tags) = &changes.tags {
            script.line(format!("set tag names of p to {}", quoted(tags)));
        }
        set_deadline(&mut script, "p", changes.deadline.as_deref())?;
        script.line("return name of p");

        self.run("project edit", script)?;
        Ok(())
    }

    pub fn complete_project(&self, identifier: &str) -> Result<()> {
        require_non_empty(identifier, "project")?;
        let mut script = self.script();
        script
            .resolve_project("p", identifier)
            .line("set status of p to completed");
        self.run("project complete", script)?;
        Ok(())
    }

    pub fn delete_project(&self, identifier: &str) -> Result<()> {
        require_non_empty(identifier, "project")?;
        let mut script = self.script();
        script.resolve_project("p", identifier).line("delete p");
        self.run("project delete", script)?;
        Ok(())
    }

    // =========================================================================
    // Tags
    // =========================================================================

    pub fn tags(&self) -> Result<Vec<String>> {
        let mut script = self.script();
        script
            .line("set output to \"\"")
            .emit_rows(&TAG_ROW, "t", "every tag", None)
            .line("return output");

        let raw = self.run("tags", script)?;
        Ok(decode::tag_names(&raw))
    }
}

/// `"none"` clears the deadline, anything else sets it.
fn set_deadline(script: &mut Script, var: &str, deadline: Option<&str>) -> Result<()> {
    match deadline {
        Some(CLEAR) => {
            script.line(format!("set due date of {var} to missing value"));
        }
        Some(deadline) => {
            script.line(format!(
                "set due date of {var} to date {}",
                quoted(&format_date(deadline)?)
            ));
        }
        None => {}
    }
    Ok(())
}

fn created(id: String, name: &str) -> Result<Created> {
    if id.is_empty() {
        return Err(Error::AppleScript(
            "Things did not return an id for the new item".to_string(),
        ));
    }
    Ok(Created {
        id,
        name: name.to_string(),
    })
}

/// Drop rows with a blank name.
pub fn drop_placeholders(todos: Vec<Todo>) -> Vec<Todo> {
    todos
        .into_iter()
        .filter(|todo| !todo.name.trim().is_empty())
        .collect()
}
