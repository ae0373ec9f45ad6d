// rest/routes/metrics.rs — GET /metrics in Prometheus text format.

use axum::extract::State;
use std::sync::Arc;

use crate::AppContext;

pub async fn metrics(State(ctx): State<Arc<AppContext>>) -> String {
    let task_count = ctx.store.count().await as u64;
    ctx.metrics.render_prometheus(task_count)
}
