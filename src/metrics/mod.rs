// SPDX-License-Identifier: MIT
//! Simple in-process counters exposed as `GET /metrics` in Prometheus text
//! format. No external library needed — all counters are `AtomicU64`
//! incremented inline in the route handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// In-process API counters shared across all requests.
#[derive(Debug)]
pub struct ApiMetrics {
    /// Total HTTP requests handled since start (task routes only).
    pub requests_total: AtomicU64,
    /// Total tasks created since start.
    pub tasks_created: AtomicU64,
    /// Total title updates applied since start.
    pub tasks_updated: AtomicU64,
    /// Total tasks deleted since start.
    pub tasks_deleted: AtomicU64,
    /// Total not-found responses (unknown id on update/delete) since start.
    pub not_found_total: AtomicU64,
    /// Server start time — used to calculate uptime in the metrics response.
    pub started_at: Instant,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            tasks_created: AtomicU64::new(0),
            tasks_updated: AtomicU64::new(0),
            tasks_deleted: AtomicU64::new(0),
            not_found_total: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tasks_created(&self, n: u64) {
        self.tasks_created.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_tasks_updated(&self) {
        self.tasks_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tasks_deleted(&self) {
        self.tasks_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_not_found(&self) {
        self.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Render counters in Prometheus text format.
    ///
    /// The live task count is passed in because it requires the store lock.
    pub fn render_prometheus(&self, task_count: u64) -> String {
        let uptime = self.started_at.elapsed().as_secs();
        let requests_total = self.requests_total.load(Ordering::Relaxed);
        let tasks_created = self.tasks_created.load(Ordering::Relaxed);
        let tasks_updated = self.tasks_updated.load(Ordering::Relaxed);
        let tasks_deleted = self.tasks_deleted.load(Ordering::Relaxed);
        let not_found_total = self.not_found_total.load(Ordering::Relaxed);

        format!(
            "# HELP taskd_uptime_seconds Server uptime in seconds.\n\
             # TYPE taskd_uptime_seconds gauge\n\
             taskd_uptime_seconds {uptime}\n\
             # HELP taskd_tasks Current number of tasks in the store.\n\
             # TYPE taskd_tasks gauge\n\
             taskd_tasks {task_count}\n\
             # HELP taskd_requests_total Total task API requests since start.\n\
             # TYPE taskd_requests_total counter\n\
             taskd_requests_total {requests_total}\n\
             # HELP taskd_tasks_created_total Total tasks created since start.\n\
             # TYPE taskd_tasks_created_total counter\n\
             taskd_tasks_created_total {tasks_created}\n\
             # HELP taskd_tasks_updated_total Total title updates since start.\n\
             # TYPE taskd_tasks_updated_total counter\n\
             taskd_tasks_updated_total {tasks_updated}\n\
             # HELP taskd_tasks_deleted_total Total tasks deleted since start.\n\
             # TYPE taskd_tasks_deleted_total counter\n\
             taskd_tasks_deleted_total {tasks_deleted}\n\
             # HELP taskd_not_found_total Not-found responses since start.\n\
             # TYPE taskd_not_found_total counter\n\
             taskd_not_found_total {not_found_total}\n"
        )
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}
