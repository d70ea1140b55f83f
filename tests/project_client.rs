mod support;

use support::{assert_in_order, client, row, rows, Recorder};
use things::error::Error;
use things::model::{NewProject, ProjectChanges};
use things::transport::ScriptOutput;

#[test]
fn show_resolves_by_id_then_name() {
    let recorder = Recorder::new();
    recorder.respond_with(&rows(&[
        row(&[
            "p-1",
            "Home",
            "open",
            "Personal",
            "",
            "errands",
            "Thursday, February 26, 2026 at 12:00:00 AM",
            "",
            "",
        ]),
        row(&["t-1", "Paint fence", "open", "", "missing value"]),
        row(&["t-2", "Fix sink", "completed", "urgent", ""]),
    ]));
    let things = client(&recorder);

    let detail = things.project_show("Home").expect("show");
    assert_eq!(detail.id, "p-1");
    assert_eq!(detail.area.as_deref(), Some("Personal"));
    assert_eq!(detail.tags.as_deref(), Some("errands"));
    assert_eq!(detail.deadline.as_deref(), Some("2026-02-26"));
    assert_eq!(detail.notes, None);
    assert_eq!(detail.todos.len(), 2);
    assert_eq!(detail.todos[1].status, "completed");
    assert_eq!(detail.todos[1].tags.as_deref(), Some("urgent"));

    assert_in_order(
        &recorder.last_script(),
        &[
            "try",
            "set p to project id \"Home\"",
            "on error",
            "set p to first project whose name is \"Home\"",
            "end try",
            "set rowSource to to dos of p",
        ],
    );
}

#[test]
fn show_missing_project_is_not_found() {
    let recorder = Recorder::new();
    recorder.respond(ScriptOutput::failure(
        "execution error: Things3 got an error: Can’t get project 1 whose name = \"Nope\". Invalid index. (-1719)",
    ));
    let things = client(&recorder);

    let err = things.project_show("Nope").expect_err("missing");
    assert!(matches!(err, Error::ProjectNotFound));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn blank_show_response_is_not_found() {
    let recorder = Recorder::new();
    recorder.respond_with("");
    let things = client(&recorder);

    assert!(matches!(
        things.project_show("p-1"),
        Err(Error::ProjectNotFound)
    ));
}

#[test]
fn projects_decode_area_and_count() {
    let recorder = Recorder::new();
    recorder.respond_with(&rows(&[
        row(&["p-1", "Home", "open", "Personal", "3"]),
        row(&["p-2", "Work", "open", "", "0"]),
    ]));
    let things = client(&recorder);

    let projects = things.projects().expect("projects");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].area.as_deref(), Some("Personal"));
    assert_eq!(projects[0].todo_count, Some(3));
    assert_eq!(projects[1].area, None);
    assert_eq!(projects[1].todo_count, Some(0));
    assert!(recorder
        .last_script()
        .contains("set output to output & (count of to dos of p)"));
}

#[test]
fn create_project_sets_area_and_schedule() {
    let recorder = Recorder::new();
    recorder.respond_with("p-9");
    let things = client(&recorder);

    let mut project = NewProject::new("Garden");
    project.area = Some("Personal".to_string());
    project.tags = Some("outdoor".to_string());
    project.deadline = Some("2026-06-01".to_string());
    project.when = Some("someday".to_string());
    let created = things.create_project(&project).expect("create");
    assert_eq!(created.id, "p-9");

    assert_in_order(
        &recorder.last_script(),
        &[
            "set newProj to make new project with properties {name:\"Garden\", tag names:\"outdoor\", due date:date \"June 01, 2026\"}",
            "set a to first area whose name is \"Personal\"",
            "set area of newProj to a",
            "move newProj to list \"Someday\"",
            "return id of newProj",
        ],
    );
}

#[test]
fn create_project_rejects_inbox_schedule() {
    let recorder = Recorder::new();
    let things = client(&recorder);

    let mut project = NewProject::new("Garden");
    project.when = Some("inbox".to_string());
    assert!(matches!(
        things.create_project(&project),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(recorder.calls(), 0);
}

#[test]
fn update_project_can_clear_deadline() {
    let recorder = Recorder::new();
    let things = client(&recorder);

    let changes = ProjectChanges {
        name: Some("Garden 2026".to_string()),
        deadline: Some("none".to_string()),
        ..ProjectChanges::default()
    };
    things.update_project("Garden", &changes).expect("update");

    assert_in_order(
        &recorder.last_script(),
        &[
            "set p to project id \"Garden\"",
            "set name of p to \"Garden 2026\"",
            "set due date of p to missing value",
            "return name of p",
        ],
    );

    assert!(matches!(
        things.update_project("Garden", &ProjectChanges::default()),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(recorder.calls(), 1);
}

#[test]
fn complete_and_delete_project_use_fallback_lookup() {
    let recorder = Recorder::new();
    let things = client(&recorder);

    things.complete_project("Home").expect("complete");
    things.delete_project("Home").expect("delete");

    let scripts = recorder.scripts();
    assert_in_order(
        &scripts[0],
        &["first project whose name is \"Home\"", "set status of p to completed"],
    );
    assert_in_order(
        &scripts[1],
        &["first project whose name is \"Home\"", "delete p"],
    );
}

#[test]
fn tags_skip_blank_names() {
    let recorder = Recorder::new();
    recorder.respond_with("errands~~~~~~urgent\n");
    let things = client(&recorder);

    assert_eq!(things.tags().expect("tags"), ["errands", "urgent"]);
}
