use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskboard add "Write report" --priority high --due 2026-09-01T00:00:00Z
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// todo, in-progress or done
        #[arg(long, default_value = "todo")]
        status: String,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long, default_value = "")]
        due: String,
    },
    /// Edit fields of a task
    ///
    /// Example: taskboard edit task-1 --status in-progress
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a task as done
    ///
    /// Example: taskboard done task-1
    Done {
        id: String,
    },
    /// Delete a task
    ///
    /// Example: taskboard delete task-1
    Delete {
        id: String,
    },
    /// Show details of a task
    ///
    /// Example: taskboard show task-1
    Show {
        id: String,
    },
    /// List tasks, optionally filtered
    ///
    /// Example: taskboard list --status todo --search report
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
}
