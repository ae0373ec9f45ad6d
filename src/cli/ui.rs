// SPDX-License-Identifier: MIT
// cli/ui.rs — `taskd ui` terminal client.
//
// Line-oriented REPL against a running taskd server. Holds its own view of
// the task list (client/view.rs), mutates it optimistically, and reconciles
// with the server after each successful call.
//
// Commands:
//   add <title>      create a task
//   done <id|#n>     toggle completed (local only, never sent to the server)
//   edit <id|#n>     enter edit mode, then type the replacement title
//   del <id|#n>      delete a task
//   list             re-fetch the server list and reconcile
//   quit

use anyhow::Result;
use std::io::{self, Write as IoWrite};
use tracing::warn;

use crate::client::api::{ApiClient, ApiReply};
use crate::client::view::{Effect, NetOutcome, TaskView};
use crate::config::ServerConfig;

/// Entry point for `taskd ui`.
pub async fn run_ui(config: &ServerConfig) -> Result<()> {
    let api = ApiClient::new(&config.base_url)?;
    let mut view = TaskView::new();

    match api.fetch_tasks().await {
        Ok(tasks) => view.reconcile(&tasks),
        Err(e) => {
            warn!(err = %e, "initial fetch failed");
            println!("Server unreachable at {} — starting with an empty list.", config.base_url);
        }
    }

    println!("taskd ui — connected to {}", config.base_url);
    println!("Commands: add <title>, done <n>, edit <n>, del <n>, list, quit");

    loop {
        if let Some(status) = view.take_status() {
            println!("* {status}");
        }
        render(&view);

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = read_line()? else { break };
        let line = line.trim_end_matches(['\r', '\n']);

        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r),
            None => (line, ""),
        };

        match cmd {
            "add" => submit(&mut view, &api, rest).await,
            "done" => {
                if let Some(id) = resolve(&view, rest) {
                    view.toggle_completed(id);
                }
            }
            "edit" => {
                if let Some(id) = resolve(&view, rest) {
                    edit(&mut view, &api, id).await?;
                }
            }
            "del" => {
                if let Some(id) = resolve(&view, rest) {
                    delete(&mut view, &api, id).await;
                }
            }
            "list" => match api.fetch_tasks().await {
                Ok(tasks) => view.reconcile(&tasks),
                Err(e) => println!("Could not fetch tasks: {e:#}"),
            },
            "quit" | "exit" | "q" => break,
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }

    Ok(())
}

fn render(view: &TaskView) {
    if view.tasks().is_empty() {
        println!("No tasks yet. Add some tasks to get started!");
        return;
    }
    for (i, t) in view.tasks().iter().enumerate() {
        let mark = if t.completed { "x" } else { " " };
        let edit = if t.editing { " (editing)" } else { "" };
        println!("  [{mark}] #{i} {}{edit}", t.title);
    }
}

/// Resolve a task argument: `#n` or a bare list index, else a raw id.
fn resolve(view: &TaskView, arg: &str) -> Option<i64> {
    let arg = arg.trim();
    if arg.is_empty() {
        println!("Which task? Give an index (#0) or id.");
        return None;
    }
    let by_index = |idx: usize| view.tasks().get(idx).map(|t| t.id);
    if let Some(stripped) = arg.strip_prefix('#') {
        return match stripped.parse::<usize>().ok().and_then(by_index) {
            Some(id) => Some(id),
            None => {
                println!("No task at index {arg}.");
                None
            }
        };
    }
    match arg.parse::<i64>() {
        Ok(n) => {
            // Small numbers are list indexes, anything else a raw id.
            if let Ok(idx) = usize::try_from(n) {
                if idx < view.tasks().len() {
                    return by_index(idx);
                }
            }
            Some(n)
        }
        Err(_) => {
            println!("Not a task index or id: {arg}");
            None
        }
    }
}

async fn submit(view: &mut TaskView, api: &ApiClient, title: &str) {
    view.set_input(title);
    let Some(task) = view.submit(chrono::Utc::now().timestamp_millis()) else {
        return;
    };
    match api.create_tasks(std::slice::from_ref(&task)).await {
        ApiReply::Ok(body) => {
            view.apply_create_outcome(Some(&body.message));
            // Server is the source of truth — pick up what it actually stored.
            if let Ok(tasks) = api.fetch_tasks().await {
                view.reconcile(&tasks);
            }
        }
        ApiReply::Err { message, .. } => view.apply_create_outcome(Some(&message)),
        ApiReply::Unavailable(e) => {
            warn!(err = %e, "create failed");
            view.apply_create_outcome(None);
        }
    }
}

async fn edit(view: &mut TaskView, api: &ApiClient, id: i64) -> Result<()> {
    let Some(Effect::FocusEdit(id)) = view.enter_edit(id) else {
        println!("No such task.");
        return Ok(());
    };

    // The focus effect: the next line of input goes to this task's title.
    let current = view
        .tasks()
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.title.clone())
        .unwrap_or_default();
    print!("edit [{current}]> ");
    io::stdout().flush()?;
    let Some(line) = read_line()? else {
        view.confirm_edit(id);
        return Ok(());
    };
    view.edit_text(id, line.trim_end_matches(['\r', '\n']));

    let Some((id, title)) = view.confirm_edit(id) else {
        // Empty title: save silently aborted, edit mode already exited.
        return Ok(());
    };
    match api.update_task(id, &title).await {
        ApiReply::Ok(body) => view.reconcile(&body.todos),
        ApiReply::Err { status, .. } => warn!(id, status, "update rejected"),
        ApiReply::Unavailable(e) => warn!(id, err = %e, "update failed"),
    }
    Ok(())
}

async fn delete(view: &mut TaskView, api: &ApiClient, id: i64) {
    match api.delete_task(id).await {
        ApiReply::Ok(body) => view.apply_delete_outcome(id, NetOutcome::Ok, Some(&body.todos)),
        ApiReply::Err { .. } => view.apply_delete_outcome(id, NetOutcome::Rejected, None),
        ApiReply::Unavailable(e) => {
            warn!(id, err = %e, "delete failed");
            view.apply_delete_outcome(id, NetOutcome::Failed, None);
        }
    }
}

/// Read one line from stdin; `None` on EOF.
fn read_line() -> Result<Option<String>> {
    let mut input = String::new();
    let n = io::stdin().read_line(&mut input)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(input))
}
