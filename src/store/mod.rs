// store/mod.rs — In-memory task store.
//
// The authoritative server-side collection of tasks for the lifetime of the
// process. Nothing survives a restart. All mutation goes through the write
// lock, so the found/not-found decision and the mutation itself are atomic
// under concurrent handlers: two deletes of the same id cannot both succeed.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A task record as it travels over the wire.
///
/// `id` is generated client-side (milliseconds since epoch at creation).
/// `completed` belongs to the client — the server stores it untouched and
/// never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task {id} not found")]
    NotFound { id: i64 },
}

/// In-memory task store. Insertion order is preserved.
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
        }
    }

    /// Full ordered snapshot of the store.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Append a batch of new tasks.
    pub async fn create(&self, batch: Vec<Task>) {
        self.tasks.write().await.extend(batch);
    }

    /// Replace the title of the task with `id`, leaving its position and
    /// every other field untouched. Returns the full updated list.
    pub async fn update(&self, id: i64, new_title: &str) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = new_title.to_string();
                Ok(tasks.clone())
            }
            None => Err(StoreError::NotFound { id }),
        }
    }

    /// Remove the task with `id`. Returns the remaining list.
    pub async fn delete(&self, id: i64) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() < before {
            Ok(tasks.clone())
        } else {
            Err(StoreError::NotFound { id })
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn create_appends_in_order() {
        let store = TaskStore::new();
        store.create(vec![task(1, "one"), task(2, "two")]).await;
        store.create(vec![task(3, "three")]).await;

        let list = store.list().await;
        let ids: Vec<i64> = list.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3], "insertion order must be preserved");
    }

    #[tokio::test]
    async fn update_changes_only_the_title() {
        let store = TaskStore::new();
        store
            .create(vec![task(1, "one"), task(2, "two"), task(3, "three")])
            .await;

        let updated = store.update(2, "two, revised").await.unwrap();
        assert_eq!(updated[1].id, 2, "position must be preserved");
        assert_eq!(updated[1].title, "two, revised");
        assert!(!updated[1].completed, "other fields must be untouched");
        assert_eq!(updated[0].title, "one");
        assert_eq!(updated[2].title, "three");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_store_unchanged() {
        let store = TaskStore::new();
        store.create(vec![task(1, "one")]).await;

        let err = store.update(999999, "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 999999 }));
        assert_eq!(store.list().await, vec![task(1, "one")]);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = TaskStore::new();
        store.create(vec![task(1, "one"), task(2, "two")]).await;

        let remaining = store.delete(1).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
    }

    #[tokio::test]
    async fn second_delete_of_same_id_is_not_found() {
        let store = TaskStore::new();
        store.create(vec![task(1, "one")]).await;

        store.delete(1).await.unwrap();
        let err = store.delete(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 1 }));
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_unchanged() {
        let store = TaskStore::new();
        store.create(vec![task(1, "one")]).await;

        assert!(store.delete(42).await.is_err());
        assert_eq!(store.count().await, 1);
    }
}
