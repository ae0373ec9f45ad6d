// SPDX-License-Identifier: MIT

pub mod cli;
pub mod client;
pub mod config;
pub mod metrics;
pub mod rest;
pub mod store;

use std::sync::Arc;

use config::ServerConfig;
use metrics::ApiMetrics;
use store::TaskStore;

/// Shared application state passed to every REST handler.
///
/// The store is injected here rather than living as a module-level global,
/// so each test can construct its own context with a fresh store.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    /// The single authoritative in-memory task store.
    pub store: Arc<TaskStore>,
    /// In-process request counters exposed at `GET /metrics`.
    pub metrics: Arc<ApiMetrics>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(TaskStore::new()),
            metrics: Arc::new(ApiMetrics::new()),
            started_at: std::time::Instant::now(),
        }
    }
}
