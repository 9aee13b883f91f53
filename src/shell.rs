//! Command-line surface
//!
//! `TaskCommand` is shared by the one-shot subcommands of the binary and by the
//! interactive shell, which reads one command per line until `exit` or end of
//! input.
//!
//! Priority and status values are typed loosely here (`high`, `in progress`)
//! and folded to their canonical spelling before reaching the service.

use crate::TaskService;
use crate::formatting;
use crate::task::{Priority, SortKey, Status};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long = "due")]
        due_date: String,
        /// Priority: Low, Medium, or High
        #[arg(short, long)]
        priority: String,
        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List tasks, optionally sorted
    List {
        /// Sort key: due_date, priority, or created_at
        #[arg(long)]
        sort: Option<String>,
        /// Reverse the sort order
        #[arg(long, requires = "sort")]
        reverse: bool,
    },
    /// Show every field of one task
    Show { id: String },
    /// Change one field of a task
    Update {
        id: String,
        /// Field: title, description, due_date, priority, or status
        field: String,
        value: String,
    },
    /// Mark a task as completed
    Complete { id: String },
    /// Delete a task
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show tasks whose priority, status, or due_date equals a value
    Filter {
        /// Criterion: priority, status, or due_date
        criterion: String,
        value: String,
    },
}

/// One line typed at the interactive prompt
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: TaskCommand,
}

const SHELL_HELP: &str = "\
Commands:
  add <title> --due <YYYY-MM-DD> --priority <Low|Medium|High> [--description <text>]
  list [--sort due_date|priority|created_at] [--reverse]
  show <id>
  update <id> <title|description|due_date|priority|status> <value>
  complete <id>
  delete <id> [--yes]
  filter <priority|status|due_date> <value>
  help
  exit";

pub struct Shell<'a, R, W> {
    service: &'a TaskService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(service: &'a TaskService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Execute one command, writing its result to the output
    pub fn execute(&mut self, command: TaskCommand) -> Result<()> {
        debug!(?command, "executing command");
        match command {
            TaskCommand::Add {
                title,
                due_date,
                priority,
                description,
            } => {
                let priority = canonical_value("priority", &priority);
                let task = self
                    .service
                    .add(&title, &description, &due_date, &priority)?;
                writeln!(self.output, "Task '{}' added with ID: {}", task.title, task.id)?;
            }
            TaskCommand::List { sort, reverse } => {
                let tasks = match sort {
                    Some(key) => self.service.list_sorted(key.parse::<SortKey>()?, reverse)?,
                    None => self.service.list(None)?,
                };
                writeln!(self.output, "{}", formatting::format_task_table(&tasks))?;
            }
            TaskCommand::Show { id } => {
                let task = self.service.get(&id)?;
                writeln!(self.output, "{}", formatting::format_task_detail(&task))?;
            }
            TaskCommand::Update { id, field, value } => {
                let value = canonical_value(&field, &value);
                let task = self.service.update(&id, &field, &value)?;
                writeln!(self.output, "Task {} updated", task.id)?;
                writeln!(self.output, "{}", formatting::format_task_line(&task))?;
            }
            TaskCommand::Complete { id } => {
                let task = self.service.complete(&id)?;
                writeln!(self.output, "Task {} marked as completed", task.id)?;
            }
            TaskCommand::Delete { id, yes } => {
                // Resolve first so an unknown id is reported before prompting
                let task = self.service.get(&id)?;
                if !yes && !self.confirm(&format!("Delete task '{}' ({})?", task.id, task.title))? {
                    writeln!(self.output, "Deletion cancelled.")?;
                    return Ok(());
                }
                let task = self.service.delete(&task.id)?;
                writeln!(self.output, "Task {} deleted", task.id)?;
            }
            TaskCommand::Filter { criterion, value } => {
                let value = canonical_value(&criterion, &value);
                let tasks = self.service.filter(&criterion, &value)?;
                writeln!(self.output, "{}", formatting::format_task_table(&tasks))?;
            }
        }
        Ok(())
    }

    /// Ask a yes/no question; anything but `y`/`yes` (or end of input) is a no
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{} (yes/no): ", question)?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Read and execute commands until `exit` or end of input
    ///
    /// Command failures are printed and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Task tracker. Type 'help' for commands, 'exit' to quit.")?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let line = line.trim();
            match line {
                "" => continue,
                "exit" | "quit" => break,
                "help" => {
                    writeln!(self.output, "{}", SHELL_HELP)?;
                    continue;
                }
                _ => {}
            }

            let words = match shlex::split(line) {
                Some(words) => words,
                None => {
                    writeln!(self.output, "Error: unbalanced quotes")?;
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    write!(self.output, "{}", e.render())?;
                    continue;
                }
            };

            if let Err(e) = self.execute(command) {
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }
}

/// Canonical spelling of a loosely typed priority (`high`, `HIGH`)
fn fold_priority(value: &str) -> Option<Priority> {
    let wanted = value.trim();
    Priority::ALL
        .into_iter()
        .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
}

/// Canonical spelling of a loosely typed status (`completed`, `in_progress`)
fn fold_status(value: &str) -> Option<Status> {
    match value.trim().to_lowercase().as_str() {
        "pending" => Some(Status::Pending),
        "in progress" | "inprogress" | "in_progress" | "in-progress" => Some(Status::InProgress),
        "completed" => Some(Status::Completed),
        _ => None,
    }
}

/// Fold a `priority` or `status` value to its canonical spelling
///
/// `field` is the update field or filter criterion the value belongs to.
/// Anything unrecognized is passed through untouched for the service to reject
/// (or, for a filter, to match nothing).
fn canonical_value(field: &str, value: &str) -> String {
    let folded = match field {
        "priority" => fold_priority(value).map(|p| p.as_str()),
        "status" => fold_status(value).map(|s| s.as_str()),
        _ => None,
    };
    folded.map_or_else(|| value.to_string(), str::to_string)
}
