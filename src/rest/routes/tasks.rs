// rest/routes/tasks.rs — Task CRUD routes.
//
// Field names (`tasks`, `todos`, `delId`, `editTaskID`, `textEdit`) and the
// 200/202/404 status choices are the wire contract existing clients expect.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::store::Task;
use crate::AppContext;

// ─── POST /tasks ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTasksRequest {
    pub tasks: Vec<Task>,
}

/// Append a batch of new tasks and echo it back.
pub async fn create_tasks(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateTasksRequest>,
) -> Json<Value> {
    ctx.metrics.inc_requests();
    ctx.store.create(body.tasks.clone()).await;
    ctx.metrics.inc_tasks_created(body.tasks.len() as u64);
    info!(count = body.tasks.len(), "tasks received");
    Json(json!({ "message": "Tasks received successfully", "tasks": body.tasks }))
}

// ─── GET /tasks/show ──────────────────────────────────────────────────────────

pub async fn show_tasks(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    ctx.metrics.inc_requests();
    let todos = ctx.store.list().await;
    Json(json!({ "todos": todos }))
}

// ─── PUT /tasks/show ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(rename = "editTaskID")]
    pub edit_task_id: i64,
    #[serde(rename = "textEdit")]
    pub text_edit: String,
}

/// Replace the title of one task. 202 on success, 404 for an unknown id.
pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    ctx.metrics.inc_requests();
    match ctx.store.update(body.edit_task_id, &body.text_edit).await {
        Ok(todos) => {
            ctx.metrics.inc_tasks_updated();
            info!(id = body.edit_task_id, "task updated");
            Ok((
                StatusCode::ACCEPTED,
                Json(json!({ "message": "Task updated successfully", "todos": todos })),
            ))
        }
        Err(e) => {
            ctx.metrics.inc_not_found();
            debug!(id = body.edit_task_id, err = %e, "update rejected");
            Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Task not found" })),
            ))
        }
    }
}

// ─── DELETE /tasks/delete ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeleteTaskRequest {
    #[serde(rename = "delId")]
    pub del_id: i64,
}

/// Remove one task by id. 200 with the remaining list, or 404.
pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<DeleteTaskRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ctx.metrics.inc_requests();
    match ctx.store.delete(body.del_id).await {
        Ok(todos) => {
            ctx.metrics.inc_tasks_deleted();
            info!(id = body.del_id, "task deleted");
            Ok(Json(
                json!({ "message": "Task deleted successfully", "todos": todos }),
            ))
        }
        Err(e) => {
            ctx.metrics.inc_not_found();
            debug!(id = body.del_id, err = %e, "delete rejected");
            Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Task not found" })),
            ))
        }
    }
}
