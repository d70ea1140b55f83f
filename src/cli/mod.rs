//! Command-line interface for things
//!
//! This module defines the CLI structure using clap derive macros.
//! Todo, project and tag commands live in their own submodules.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::Things;
use crate::config::Config;
use crate::error::Result;
use crate::model::ListName;
use crate::output::OutputOptions;

mod project;
mod tags;
mod todo;

/// What a write command did, rendered as `{"<action>": true}` next to the
/// target in JSON output.
#[derive(serde::Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Action {
    Updated(bool),
    Completed(bool),
    Cancelled(bool),
    Deleted(bool),
}

/// things - CRUD for Things 3
///
/// Lists, creates, edits, completes and deletes Things 3 todos and projects
/// through AppleScript. IDs are Things' own identifiers. Use `--deadline none`
/// or `--project none` on edit to clear those fields.
#[derive(Parser, Debug)]
#[command(name = "things")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true, env = "THINGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Program used to run AppleScript
    #[arg(long, global = true, env = "THINGS_OSASCRIPT")]
    pub osascript: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Optional cap on the number of todos returned
#[derive(Args, Debug, Clone, Copy)]
pub struct LimitArgs {
    /// Maximum number of todos to return
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show Inbox todos
    Inbox(LimitArgs),

    /// Show Today todos
    Today(LimitArgs),

    /// Show Tomorrow todos
    Tomorrow(LimitArgs),

    /// Show Upcoming todos
    Upcoming(LimitArgs),

    /// Show Anytime todos
    Anytime(LimitArgs),

    /// Show Someday todos
    Someday(LimitArgs),

    /// Show completed todos
    Logbook(LimitArgs),

    /// Show trashed todos
    Trash(LimitArgs),

    /// Show todos in any built-in list, by name
    List {
        /// Inbox, Today, Tomorrow, Upcoming, Anytime, Someday, Logbook or Trash
        name: String,

        #[command(flatten)]
        limit: LimitArgs,
    },

    /// Create a todo
    Add {
        /// Todo title
        title: String,

        /// Notes
        #[arg(long)]
        notes: Option<String>,

        /// today, tomorrow, someday, anytime, or a date (YYYY-MM-DD)
        #[arg(long)]
        when: Option<String>,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,

        /// Comma-separated tags, e.g. "Tag1,Tag2"
        #[arg(long)]
        tags: Option<String>,

        /// Project name
        #[arg(long)]
        project: Option<String>,

        /// Comma-separated checklist items, e.g. "item1,item2"
        #[arg(long)]
        checklist: Option<String>,
    },

    /// Show todo details
    Show {
        /// Todo ID
        id: String,
    },

    /// Update a todo
    Edit {
        /// Todo ID
        id: String,

        /// New title
        #[arg(long)]
        name: Option<String>,

        /// Replace notes
        #[arg(long)]
        notes: Option<String>,

        /// inbox, today, tomorrow, someday, anytime, or a date (YYYY-MM-DD)
        #[arg(long)]
        when: Option<String>,

        /// Deadline (YYYY-MM-DD), or "none" to clear it
        #[arg(long)]
        deadline: Option<String>,

        /// Replace tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Project name, or "none" to remove it from its project
        #[arg(long)]
        project: Option<String>,
    },

    /// Mark a todo complete
    Complete {
        /// Todo ID
        id: String,
    },

    /// Mark a todo cancelled
    Cancel {
        /// Todo ID
        id: String,
    },

    /// Move a todo to the Trash
    Delete {
        /// Todo ID
        id: String,
    },

    /// Search open todos by name
    Search {
        /// Text the todo name must contain
        query: String,

        #[command(flatten)]
        limit: LimitArgs,
    },

    /// List all projects
    Projects,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// List all tags
    Tags,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Show a project and its todos
    Show {
        /// Project name or ID
        identifier: String,
    },

    /// Create a project
    Add {
        /// Project name
        name: String,

        /// Notes
        #[arg(long)]
        notes: Option<String>,

        /// Area name
        #[arg(long)]
        area: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// today, tomorrow, someday, anytime, or a date (YYYY-MM-DD)
        #[arg(long)]
        when: Option<String>,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Update a project
    Edit {
        /// Project name or ID
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Replace notes
        #[arg(long)]
        notes: Option<String>,

        /// Replace tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Deadline (YYYY-MM-DD), or "none" to clear it
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Complete a project
    Complete {
        /// Project name or ID
        identifier: String,
    },

    /// Move a project to the Trash
    Delete {
        /// Project name or ID
        identifier: String,
    },
}

impl Cli {
    fn client(&self) -> Result<Things> {
        let mut config = Config::resolve(self.config.as_deref())?;
        if let Some(program) = &self.osascript {
            config.osascript = program.clone();
        }
        Ok(Things::from_config(&config))
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let things = self.client()?;
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Inbox(args) => todo::run_list(&things, output, ListName::Inbox, args.limit),
            Commands::Today(args) => todo::run_list(&things, output, ListName::Today, args.limit),
            Commands::Tomorrow(args) => {
                todo::run_list(&things, output, ListName::Tomorrow, args.limit)
            }
            Commands::Upcoming(args) => {
                todo::run_list(&things, output, ListName::Upcoming, args.limit)
            }
            Commands::Anytime(args) => {
                todo::run_list(&things, output, ListName::Anytime, args.limit)
            }
            Commands::Someday(args) => {
                todo::run_list(&things, output, ListName::Someday, args.limit)
            }
            Commands::Logbook(args) => {
                todo::run_list(&things, output, ListName::Logbook, args.limit)
            }
            Commands::Trash(args) => todo::run_list(&things, output, ListName::Trash, args.limit),
            Commands::List { name, limit } => {
                todo::run_list(&things, output, name.parse()?, limit.limit)
            }
            Commands::Add { title, notes, when, deadline, tags, project, checklist } => {
                todo::run_add(
                    &things,
                    output,
                    todo::AddOptions {
                        title,
                        notes,
                        when,
                        deadline,
                        tags,
                        project,
                        checklist,
                    },
                )
            }
            Commands::Show { id } => todo::run_show(&things, output, &id),
            Commands::Edit { id, name, notes, when, deadline, tags, project } => todo::run_edit(
                &things,
                output,
                todo::EditOptions {
                    id,
                    name,
                    notes,
                    when,
                    deadline,
                    tags,
                    project,
                },
            ),
            Commands::Complete { id } => todo::run_complete(&things, output, &id),
            Commands::Cancel { id } => todo::run_cancel(&things, output, &id),
            Commands::Delete { id } => todo::run_delete(&things, output, &id),
            Commands::Search { query, limit } => {
                todo::run_search(&things, output, &query, limit.limit)
            }
            Commands::Projects => project::run_list(&things, output),
            Commands::Project(cmd) => match cmd {
                ProjectCommands::Show { identifier } => {
                    project::run_show(&things, output, &identifier)
                }
                ProjectCommands::Add { name, notes, area, tags, when, deadline } => {
                    project::run_add(
                        &things,
                        output,
                        project::AddOptions {
                            name,
                            notes,
                            area,
                            tags,
                            when,
                            deadline,
                        },
                    )
                }
                ProjectCommands::Edit { identifier, name, notes, tags, deadline } => {
                    project::run_edit(
                        &things,
                        output,
                        project::EditOptions {
                            identifier,
                            name,
                            notes,
                            tags,
                            deadline,
                        },
                    )
                }
                ProjectCommands::Complete { identifier } => {
                    project::run_complete(&things, output, &identifier)
                }
                ProjectCommands::Delete { identifier } => {
                    project::run_delete(&things, output, &identifier)
                }
            },
            Commands::Tags => tags::run(&things, output),
        }
    }
}
