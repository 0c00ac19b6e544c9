use uuid::Uuid;

use crate::error::ValidationError;
use crate::storage::Storage;
use crate::task::{Priority, Task};

/// Fields to merge into an existing task. `due: Some(None)` clears the
/// due date; a `None` field is left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub due: Option<Option<String>>,
    pub priority: Option<Priority>,
}

/// Owns the task list and its persistence lifecycle. The stored order is
/// always manual insertion order, newest first; every successful mutation
/// writes the whole collection back before returning. Validation failures
/// and no-ops leave both memory and disk untouched.
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Opens the store, restoring whatever the storage file holds. A
    /// corrupt or absent file yields an empty store.
    pub fn open(storage: Storage) -> Self {
        let tasks = storage.load();
        Self { storage, tasks }
    }

    /// The collection in stored (newest-first) order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Creates a task at the front of the collection and returns a
    /// snapshot of it. An empty due string counts as no due date.
    pub fn add(
        &mut self,
        title: &str,
        due: Option<String>,
        priority: Option<Priority>,
    ) -> Result<Task, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let task = Task::new(
            title.to_string(),
            due.filter(|d| !d.is_empty()),
            priority.unwrap_or_default(),
        );
        self.tasks.insert(0, task.clone());
        self.persist();
        Ok(task)
    }

    /// Flips completion on the matching task. An unknown id is a no-op.
    pub fn toggle_completed(&mut self, id: Uuid) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.persist();
        true
    }

    /// Merges the provided fields into the matching task. `id`,
    /// `created_at`, and `completed` are never modified here.
    pub fn edit(&mut self, id: Uuid, update: TaskUpdate) -> Result<bool, ValidationError> {
        // Validate before touching anything.
        let title = match update.title {
            Some(ref title) => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(ValidationError::EmptyTitle);
                }
                Some(title.to_string())
            }
            None => None,
        };

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(due) = update.due {
            task.due = due.filter(|d| !d.is_empty());
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        self.persist();
        Ok(true)
    }

    /// Deletes the matching task. Removing an absent id is not an error.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Removes every completed task, keeping survivors in order. Returns
    /// how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        self.storage.save(&self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("tasks.json"));
        (dir, TaskStore::open(storage))
    }

    #[test]
    fn add_rejects_empty_and_whitespace_titles() {
        let (dir, mut store) = test_store();

        assert_eq!(
            store.add("", None, None).unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            store.add("   ", None, None).unwrap_err(),
            ValidationError::EmptyTitle
        );

        assert!(store.tasks().is_empty());
        // Nothing was persisted either.
        assert!(!dir.path().join("tasks.json").exists());
    }

    #[test]
    fn add_trims_and_prepends() {
        let (_dir, mut store) = test_store();

        store.add("first", None, None).unwrap();
        let task = store.add("  Buy milk  ", None, None).unwrap();

        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.tasks()[0].title, "Buy milk");
        assert_eq!(store.tasks()[0].id, task.id);
        assert_eq!(store.tasks()[1].title, "first");
    }

    #[test]
    fn add_applies_defaults() {
        let (_dir, mut store) = test_store();

        let task = store.add("x", Some(String::new()), None).unwrap();
        assert_eq!(task.due, None);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
    }

    #[test]
    fn toggle_flips_and_ignores_unknown_ids() {
        let (_dir, mut store) = test_store();
        let id = store.add("x", None, None).unwrap().id;

        assert!(store.toggle_completed(id));
        assert!(store.tasks()[0].completed);
        assert!(store.toggle_completed(id));
        assert!(!store.tasks()[0].completed);

        assert!(!store.toggle_completed(Uuid::new_v4()));
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn edit_merges_fields_and_keeps_identity() {
        let (_dir, mut store) = test_store();
        let task = store
            .add("Buy milk", Some("2024-01-05".to_string()), Some(Priority::Low))
            .unwrap();
        store.toggle_completed(task.id);

        let changed = store
            .edit(
                task.id,
                TaskUpdate {
                    title: Some("  Buy oat milk  ".to_string()),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(changed);

        let edited = store.get(task.id).unwrap();
        assert_eq!(edited.title, "Buy oat milk");
        assert_eq!(edited.priority, Priority::High);
        // Untouched by the merge:
        assert_eq!(edited.due.as_deref(), Some("2024-01-05"));
        assert_eq!(edited.id, task.id);
        assert_eq!(edited.created_at, task.created_at);
        assert!(edited.completed);
    }

    #[test]
    fn edit_can_clear_the_due_date() {
        let (_dir, mut store) = test_store();
        let id = store
            .add("x", Some("2024-01-05".to_string()), None)
            .unwrap()
            .id;

        store
            .edit(
                id,
                TaskUpdate {
                    due: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.get(id).unwrap().due, None);
    }

    #[test]
    fn edit_rejects_empty_title_without_mutating() {
        let (_dir, mut store) = test_store();
        let id = store.add("keep me", None, None).unwrap().id;

        let result = store.edit(
            id,
            TaskUpdate {
                title: Some("   ".to_string()),
                priority: Some(Priority::High),
                ..Default::default()
            },
        );
        assert_eq!(result.unwrap_err(), ValidationError::EmptyTitle);

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "keep me");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn edit_unknown_id_is_a_no_op() {
        let (_dir, mut store) = test_store();
        store.add("x", None, None).unwrap();

        let changed = store
            .edit(
                Uuid::new_v4(),
                TaskUpdate {
                    title: Some("y".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!changed);
        assert_eq!(store.tasks()[0].title, "x");
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, mut store) = test_store();
        let id = store.add("x", None, None).unwrap().id;

        assert!(store.remove(id));
        assert!(store.tasks().is_empty());
        assert!(!store.remove(id));
        assert!(!store.remove(Uuid::new_v4()));
    }

    #[test]
    fn clear_completed_keeps_survivors_in_order() {
        let (_dir, mut store) = test_store();
        // Stored newest-first: done-b, open, done-a.
        let a = store.add("done-a", None, None).unwrap().id;
        store.add("open", None, None).unwrap();
        let b = store.add("done-b", None, None).unwrap().id;
        store.toggle_completed(a);
        store.toggle_completed(b);

        assert_eq!(store.clear_completed(), 2);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "open");

        // Nothing left to clear; no-op.
        assert_eq!(store.clear_completed(), 0);
    }

    #[test]
    fn reopening_restores_an_identical_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::open(Storage::new(&path));

        store
            .add("Buy milk", Some("2024-01-05".to_string()), Some(Priority::High))
            .unwrap();
        store.add("Call mom", None, None).unwrap();
        let id = store.tasks()[1].id;
        store.toggle_completed(id);

        let reopened = TaskStore::open(Storage::new(&path));
        assert_eq!(reopened.tasks(), store.tasks());
    }

    #[test]
    fn opening_a_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "[{\"id\": 42}]").unwrap();

        let store = TaskStore::open(Storage::new(&path));
        assert!(store.tasks().is_empty());
    }
}
