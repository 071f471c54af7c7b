use clap::Parser;
use taskboard_cli::cli::{Cli, Command};
use taskboard_cli::filter::filter_tasks;
use taskboard_core::config;
use taskboard_core::error::{BackendError, StoreError};
use taskboard_core::model::{Task, TaskPatch, TaskPriority, TaskStatus};
use taskboard_core::normalize::{priority_from_raw, status_from_raw};
use taskboard_core::session::Session;
use taskboard_core::store::TaskStore;

fn print_task_plain(task: &Task) {
    let due_date = if task.due_date.is_empty() {
        "-"
    } else {
        task.due_date.as_str()
    };
    println!(
        "{} | {} | {} | {} | {} | {}",
        task.id,
        task.title,
        task.status.as_str(),
        task.priority.as_str(),
        due_date,
        task.created_at
    );
}

fn print_tasks_plain(tasks: &[Task]) {
    for task in tasks {
        print_task_plain(task);
    }
}

fn print_task_json(task: &Task) -> Result<(), StoreError> {
    let json =
        serde_json::to_string(task).map_err(|err| StoreError::invalid_input(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), StoreError> {
    let json =
        serde_json::to_string(tasks).map_err(|err| StoreError::invalid_input(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn parse_status(raw: &str) -> Result<TaskStatus, StoreError> {
    status_from_raw(raw)
        .ok_or_else(|| StoreError::invalid_input(format!("unknown status: {raw}")))
}

fn parse_priority(raw: &str) -> Result<TaskPriority, StoreError> {
    priority_from_raw(raw)
        .ok_or_else(|| StoreError::invalid_input(format!("unknown priority: {raw}")))
}

/// Session comes from the external auth collaborator; the CLI reads it
/// from the environment and falls back to a fixed local identity so the
/// local backend works out of the box.
fn session_from_env() -> Session {
    let user_id = std::env::var("TASKBOARD_USER_ID").unwrap_or_default();
    let token = std::env::var("TASKBOARD_TOKEN").unwrap_or_default();
    if !user_id.trim().is_empty() && !token.trim().is_empty() {
        Session::new(user_id, token)
    } else {
        Session::new("1", "local")
    }
}

async fn run_command(cli: Cli, store: &TaskStore) -> Result<(), StoreError> {
    match cli.command {
        Command::Add {
            title,
            description,
            status,
            priority,
            due,
        } => {
            let input = taskboard_core::model::TaskInput {
                title,
                description,
                status: parse_status(&status)?,
                priority: parse_priority(&priority)?,
                due_date: due,
            };
            let task = store.add_task(input).await?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Edit {
            id,
            title,
            description,
            status,
            priority,
            due,
        } => {
            let patch = TaskPatch {
                title,
                description,
                status: status.as_deref().map(parse_status).transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                due_date: due,
            };
            if patch == TaskPatch::default() {
                return Err(StoreError::invalid_input("nothing to update"));
            }
            let task = store.update_task(&id, patch).await?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Updated task: {} ({})", task.title, task.id);
            }
        }
        Command::Done { id } => {
            let patch = TaskPatch {
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            };
            let task = store.update_task(&id, patch).await?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Completed task: {} ({})", task.title, task.id);
            }
        }
        Command::Delete { id } => {
            store.delete_task(&id).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("Deleted task: {id}");
            }
        }
        Command::Show { id } => {
            let tasks = store.tasks();
            let task = tasks
                .iter()
                .find(|task| task.id == id)
                .ok_or_else(|| StoreError::invalid_input("task not found"))?;
            if cli.json {
                print_task_json(task)?;
            } else {
                print_task_plain(task);
                if !task.description.is_empty() {
                    println!("  {}", task.description);
                }
            }
        }
        Command::List {
            status,
            priority,
            search,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let tasks = store.tasks();
            let filtered = filter_tasks(&tasks, status, priority, search.as_deref());
            if cli.json {
                print_tasks_json(&filtered)?;
            } else {
                print_tasks_plain(&filtered);
            }
        }
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), StoreError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        eprintln!("WARNING: {err}");
    }

    let backend = config::backend_from_config(&loaded.config)?;
    let store = TaskStore::new(backend);
    store.set_session(Some(session_from_env())).await;

    // A fetch failure lands in the error slot; commands that only read
    // the collection should still surface it.
    if store.error().is_some() {
        return Err(StoreError::FetchFailed(BackendError::invalid_data(
            "initial fetch failed",
        )));
    }

    run_command(cli, &store).await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
