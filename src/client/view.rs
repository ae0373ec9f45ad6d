// client/view.rs — Task-list view state machine.
//
// Pure state, no I/O. Transitions that need the network return the request
// for the shell (cli/ui.rs) to carry out; outcomes are applied back through
// the apply_* methods. Invariant: at most one task is in edit mode at any
// time — entering edit on one task forces all others out.

use std::collections::HashMap;

use crate::store::Task;

/// A task as the client renders it. `editing` never leaves the process.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTask {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub editing: bool,
}

impl ViewTask {
    fn from_task(t: &Task) -> Self {
        Self {
            id: t.id,
            title: t.title.clone(),
            completed: t.completed,
            editing: false,
        }
    }
}

/// Side effect the shell must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Move input focus to the edit field of the task that just entered
    /// edit mode.
    FocusEdit(i64),
}

/// How a network call ended, from the view's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetOutcome {
    /// 2xx from the server.
    Ok,
    /// The server answered with an error status.
    Rejected,
    /// The call never completed.
    Failed,
}

#[derive(Default)]
pub struct TaskView {
    tasks: Vec<ViewTask>,
    input: String,
    status: Option<String>,
}

impl TaskView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.iter().map(ViewTask::from_task).collect(),
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> &[ViewTask] {
        &self.tasks
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Take the pending status line, clearing it.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    // ─── Create ──────────────────────────────────────────────────────────────

    /// Submit the add-task input.
    ///
    /// An input that trims to empty produces no task and sets the
    /// validation status line. Otherwise the task is appended locally
    /// (optimistic) and returned for the shell to POST. `now_ms` becomes
    /// the task id — callers pass the current wall clock; tests pass a
    /// fixed value.
    pub fn submit(&mut self, now_ms: i64) -> Option<Task> {
        if self.input.trim().is_empty() {
            self.status = Some("Please enter a task.".to_string());
            return None;
        }
        let task = Task {
            id: now_ms,
            title: self.input.clone(),
            completed: false,
        };
        self.tasks.push(ViewTask::from_task(&task));
        self.input.clear();
        Some(task)
    }

    /// Apply the server's answer to a create. `server_message` is the
    /// parsed `message` field when a response arrived at all; `None` means
    /// the call never completed. The optimistic append stays either way.
    pub fn apply_create_outcome(&mut self, server_message: Option<&str>) {
        self.status = Some(match server_message {
            Some(m) if !m.is_empty() => m.to_string(),
            Some(_) => "Task submitted successfully!".to_string(),
            None => "Failed to submit the task.".to_string(),
        });
    }

    // ─── Local-only transitions ──────────────────────────────────────────────

    /// Flip a task's completed flag. Never touches the network.
    pub fn toggle_completed(&mut self, id: i64) {
        if let Some(t) = self.tasks.iter_mut().find(|t| t.id == id) {
            t.completed = !t.completed;
        }
    }

    // ─── Edit mode ───────────────────────────────────────────────────────────

    /// Put one task into edit mode, taking every other task out of it.
    /// Returns the focus effect when the id exists.
    pub fn enter_edit(&mut self, id: i64) -> Option<Effect> {
        let mut found = false;
        for t in &mut self.tasks {
            if t.id == id {
                t.editing = true;
                found = true;
            } else {
                t.editing = false;
            }
        }
        found.then_some(Effect::FocusEdit(id))
    }

    /// Update the in-progress title. No network call.
    pub fn edit_text(&mut self, id: i64, text: impl Into<String>) {
        if let Some(t) = self.tasks.iter_mut().find(|t| t.id == id) {
            t.title = text.into();
        }
    }

    /// Confirm the in-progress edit (Enter while editing).
    ///
    /// Exits edit mode for that task regardless of validation or network
    /// outcome. Returns the `(id, title)` to PUT unless the edited title
    /// trims to empty, in which case the save is silently aborted.
    pub fn confirm_edit(&mut self, id: i64) -> Option<(i64, String)> {
        let mut title = None;
        for t in &mut self.tasks {
            if t.id == id {
                title = Some(t.title.clone());
                t.editing = false;
            }
        }
        let title = title?;
        if title.trim().is_empty() {
            return None;
        }
        Some((id, title))
    }

    // ─── Delete ──────────────────────────────────────────────────────────────

    /// Apply the outcome of a delete call. Nothing was changed locally
    /// before the call, so failure reverts nothing.
    pub fn apply_delete_outcome(&mut self, id: i64, outcome: NetOutcome, todos: Option<&[Task]>) {
        match outcome {
            NetOutcome::Ok => {
                self.tasks.retain(|t| t.id != id);
                if let Some(server) = todos {
                    self.reconcile(server);
                }
                self.status = Some("Task deleted successfully!".to_string());
            }
            NetOutcome::Rejected => {
                self.status = Some("Failed to delete the task.".to_string());
            }
            NetOutcome::Failed => {
                self.status = Some("An error occurred while deleting the task.".to_string());
            }
        }
    }

    // ─── Reconciliation ──────────────────────────────────────────────────────

    /// Adopt the server's list — membership, order, and titles — preserving
    /// the local-only `completed` and `editing` flags for surviving ids.
    /// The server is the source of truth; this runs after every successful
    /// mutation.
    pub fn reconcile(&mut self, server: &[Task]) {
        let local: HashMap<i64, (bool, bool)> = self
            .tasks
            .iter()
            .map(|t| (t.id, (t.completed, t.editing)))
            .collect();
        self.tasks = server
            .iter()
            .map(|t| {
                let (completed, editing) =
                    local.get(&t.id).copied().unwrap_or((t.completed, false));
                ViewTask {
                    id: t.id,
                    title: t.title.clone(),
                    completed,
                    editing,
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskView {
        TaskView::with_tasks(&[Task {
            id: 343434,
            title: "Sample Task".to_string(),
            completed: false,
        }])
    }

    #[test]
    fn empty_input_produces_no_task_and_validation_message() {
        let mut view = sample();
        view.set_input("   ");
        let sent = view.submit(1);
        assert!(sent.is_none());
        assert_eq!(view.tasks().len(), 1);
        assert_eq!(view.take_status().as_deref(), Some("Please enter a task."));
    }

    #[test]
    fn submit_appends_optimistically_and_clears_input() {
        let mut view = sample();
        view.set_input("Buy milk");
        let sent = view.submit(1700000000000).expect("task should be produced");

        assert_eq!(sent.id, 1700000000000);
        assert_eq!(sent.title, "Buy milk");
        assert!(!sent.completed);
        assert_eq!(view.tasks().len(), 2);
        assert_eq!(view.tasks()[1].title, "Buy milk");
        assert_eq!(view.input(), "");
    }

    #[test]
    fn create_outcome_prefers_server_message() {
        let mut view = sample();
        view.apply_create_outcome(Some("Tasks received successfully"));
        assert_eq!(
            view.take_status().as_deref(),
            Some("Tasks received successfully")
        );

        view.apply_create_outcome(None);
        assert_eq!(
            view.take_status().as_deref(),
            Some("Failed to submit the task.")
        );
    }

    #[test]
    fn toggle_completed_is_local_only() {
        let mut view = sample();
        view.toggle_completed(343434);
        assert!(view.tasks()[0].completed);
        view.toggle_completed(343434);
        assert!(!view.tasks()[0].completed);
    }

    #[test]
    fn edit_mode_is_exclusive() {
        let mut view = TaskView::with_tasks(&[
            Task {
                id: 1,
                title: "a".to_string(),
                completed: false,
            },
            Task {
                id: 2,
                title: "b".to_string(),
                completed: false,
            },
        ]);

        assert_eq!(view.enter_edit(1), Some(Effect::FocusEdit(1)));
        assert!(view.tasks()[0].editing);

        // Entering edit on B must force A back to viewing.
        assert_eq!(view.enter_edit(2), Some(Effect::FocusEdit(2)));
        assert!(!view.tasks()[0].editing);
        assert!(view.tasks()[1].editing);
    }

    #[test]
    fn enter_edit_unknown_id_has_no_effect() {
        let mut view = sample();
        assert_eq!(view.enter_edit(999999), None);
        assert!(!view.tasks()[0].editing);
    }

    #[test]
    fn confirm_edit_with_empty_title_aborts_but_exits_edit_mode() {
        let mut view = sample();
        view.enter_edit(343434);
        view.edit_text(343434, "  ");

        assert!(view.confirm_edit(343434).is_none());
        assert!(!view.tasks()[0].editing, "edit mode must still be exited");
        assert!(view.take_status().is_none(), "abort is silent");
    }

    #[test]
    fn confirm_edit_returns_update_and_exits_edit_mode() {
        let mut view = sample();
        view.enter_edit(343434);
        view.edit_text(343434, "Buy milk and eggs");

        let sent = view.confirm_edit(343434);
        assert_eq!(sent, Some((343434, "Buy milk and eggs".to_string())));
        assert!(!view.tasks()[0].editing);
    }

    #[test]
    fn delete_success_removes_locally() {
        let mut view = sample();
        view.apply_delete_outcome(343434, NetOutcome::Ok, Some(&[]));
        assert!(view.tasks().is_empty());
        assert_eq!(
            view.take_status().as_deref(),
            Some("Task deleted successfully!")
        );
    }

    #[test]
    fn delete_failure_leaves_list_unchanged() {
        let mut view = sample();
        view.apply_delete_outcome(343434, NetOutcome::Rejected, None);
        assert_eq!(view.tasks().len(), 1);
        assert_eq!(
            view.take_status().as_deref(),
            Some("Failed to delete the task.")
        );

        view.apply_delete_outcome(343434, NetOutcome::Failed, None);
        assert_eq!(view.tasks().len(), 1);
        assert_eq!(
            view.take_status().as_deref(),
            Some("An error occurred while deleting the task.")
        );
    }

    #[test]
    fn reconcile_preserves_local_flags_for_surviving_ids() {
        let mut view = TaskView::with_tasks(&[
            Task {
                id: 1,
                title: "a".to_string(),
                completed: false,
            },
            Task {
                id: 2,
                title: "b".to_string(),
                completed: false,
            },
        ]);
        view.toggle_completed(1);
        view.enter_edit(2);

        // Server dropped task 1, renamed 2, and added 3.
        view.reconcile(&[
            Task {
                id: 2,
                title: "b, renamed".to_string(),
                completed: false,
            },
            Task {
                id: 3,
                title: "c".to_string(),
                completed: false,
            },
        ]);

        assert_eq!(view.tasks().len(), 2);
        assert_eq!(view.tasks()[0].id, 2);
        assert_eq!(view.tasks()[0].title, "b, renamed");
        assert!(view.tasks()[0].editing, "editing flag survives reconcile");
        assert_eq!(view.tasks()[1].id, 3);
        assert!(!view.tasks()[1].completed);
    }
}
