//! End-to-end client flow: the view state machine driving the real API
//! client against a live server, the way `taskd ui` wires them together.

use std::sync::Arc;

use taskd::client::api::{ApiClient, ApiReply};
use taskd::client::view::{NetOutcome, TaskView};
use taskd::{config::ServerConfig, store::Task, AppContext};
use tempfile::TempDir;

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn spawn_server(dir: &TempDir) -> (Arc<AppContext>, String) {
    let port = find_free_port();
    let config = ServerConfig::new(
        Some(port),
        Some(dir.path().to_path_buf()),
        Some("error".to_string()),
        None,
        None,
    );
    let ctx = Arc::new(AppContext::new(config));

    let ctx_clone = ctx.clone();
    tokio::spawn(async move {
        let _ = taskd::rest::start_rest_server(ctx_clone).await;
    });
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    (ctx, format!("http://127.0.0.1:{port}"))
}

fn sample_task() -> Task {
    Task {
        id: 343434,
        title: "Sample Task".to_string(),
        completed: false,
    }
}

#[tokio::test]
async fn submit_round_trip() {
    let dir = TempDir::new().unwrap();
    let (ctx, base) = spawn_server(&dir).await;
    ctx.store.create(vec![sample_task()]).await;

    let api = ApiClient::new(&base).unwrap();
    let mut view = TaskView::new();
    view.reconcile(&api.fetch_tasks().await.unwrap());
    assert_eq!(view.tasks().len(), 1);

    // Submit "Buy milk": optimistic append, then the server confirms.
    view.set_input("Buy milk");
    let task = view.submit(1700000000001).unwrap();
    assert_eq!(view.tasks().len(), 2);

    match api.create_tasks(std::slice::from_ref(&task)).await {
        ApiReply::Ok(body) => {
            assert_eq!(body.message, "Tasks received successfully");
            assert_eq!(body.tasks[0].title, "Buy milk");
            view.apply_create_outcome(Some(&body.message));
            view.reconcile(&api.fetch_tasks().await.unwrap());
        }
        other => panic!("create should succeed, got {other:?}"),
    }

    assert_eq!(view.tasks().len(), 2);
    assert_eq!(view.take_status().as_deref(), Some("Tasks received successfully"));
    assert_eq!(ctx.store.count().await, 2);
}

#[tokio::test]
async fn edit_round_trip_reconciles_title() {
    let dir = TempDir::new().unwrap();
    let (ctx, base) = spawn_server(&dir).await;
    ctx.store.create(vec![sample_task()]).await;

    let api = ApiClient::new(&base).unwrap();
    let mut view = TaskView::new();
    view.reconcile(&api.fetch_tasks().await.unwrap());
    view.toggle_completed(343434);

    view.enter_edit(343434);
    view.edit_text(343434, "Buy milk and eggs");
    let (id, title) = view.confirm_edit(343434).unwrap();

    match api.update_task(id, &title).await {
        ApiReply::Ok(body) => view.reconcile(&body.todos),
        other => panic!("update should succeed, got {other:?}"),
    }

    assert_eq!(view.tasks()[0].title, "Buy milk and eggs");
    assert!(view.tasks()[0].completed, "local completed flag survives");
    assert_eq!(ctx.store.list().await[0].title, "Buy milk and eggs");
}

#[tokio::test]
async fn delete_of_unknown_id_shows_failure_and_keeps_list() {
    let dir = TempDir::new().unwrap();
    let (_ctx, base) = spawn_server(&dir).await;

    let api = ApiClient::new(&base).unwrap();
    let mut view = TaskView::with_tasks(&[sample_task()]);

    // The server never heard of this task — delete is rejected with 404
    // and the local list stays as it was.
    match api.delete_task(343434).await {
        ApiReply::Err { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Task not found");
            view.apply_delete_outcome(343434, NetOutcome::Rejected, None);
        }
        other => panic!("delete should be rejected, got {other:?}"),
    }

    assert_eq!(view.tasks().len(), 1);
    assert_eq!(view.take_status().as_deref(), Some("Failed to delete the task."));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    // Nothing listens on this port.
    let port = find_free_port();
    let api = ApiClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let mut view = TaskView::with_tasks(&[sample_task()]);

    match api.delete_task(343434).await {
        ApiReply::Unavailable(_) => {
            view.apply_delete_outcome(343434, NetOutcome::Failed, None);
        }
        other => panic!("expected transport failure, got {other:?}"),
    }

    assert_eq!(view.tasks().len(), 1);
    assert_eq!(
        view.take_status().as_deref(),
        Some("An error occurred while deleting the task.")
    );
}
