//! In-Memory Repository Implementations
//!
//! Thread-safe implementations of the task and user repositories, used by
//! the demo binary and by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::warn;

use taskflow_domain::{RepositoryError, Task, TaskId, TaskRepository, User, UserId, UserRepository};

fn read_lock_error() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire read lock".to_string(),
    }
}

fn write_lock_error() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire write lock".to_string(),
    }
}

/// In-memory Task Repository
///
/// Ids are handed out from a counter starting at 1. Saves are
/// version-checked against the stored copy.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored tasks
    pub fn count(&self) -> Result<usize, RepositoryError> {
        let tasks = self.tasks.read().map_err(|_| read_lock_error())?;
        Ok(tasks.len())
    }

    /// Version-checked save that runs `before_write` while the write lock is
    /// held. Nothing is stored when the check or `before_write` fails.
    pub(crate) fn save_with<E, F>(&self, task: &Task, before_write: F) -> Result<(), E>
    where
        E: From<RepositoryError>,
        F: FnOnce() -> Result<(), E>,
    {
        let mut tasks = self.tasks.write().map_err(|_| write_lock_error())?;

        let actual = tasks.get(&task.id()).map_or(0, Task::version);
        if actual != task.version() {
            return Err(RepositoryError::ConcurrencyError {
                id: task.id(),
                expected: task.version(),
                actual,
            }
            .into());
        }

        before_write()?;

        tasks.insert(task.id(), task.clone().into_saved());
        Ok(())
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn next_id(&self) -> Result<TaskId, RepositoryError> {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        TaskId::from_int(raw).map_err(|e| RepositoryError::PersistenceError {
            message: e.to_string(),
        })
    }

    fn find(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let tasks = self.tasks.read().map_err(|_| read_lock_error())?;
        Ok(tasks.get(&id).cloned())
    }

    fn save(&self, task: &Task) -> Result<(), RepositoryError> {
        self.save_with(task, || Ok::<(), RepositoryError>(()))
    }
}

/// In-memory User Repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a user
    ///
    /// Seeding never fails: a poisoned lock is recovered and logged.
    pub fn with_user(self, user: User) -> Self {
        let mut users = self.users.write().unwrap_or_else(|poisoned| {
            warn!(user_id = %user.id(), "User repository lock poisoned, recovering to seed");
            poisoned.into_inner()
        });
        users.insert(user.id(), user);
        drop(users);
        self
    }

    pub fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().map_err(|_| write_lock_error())?;
        users.insert(user.id(), user);
        Ok(())
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().map_err(|_| read_lock_error())?;
        Ok(users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskflow_domain::{NewTask, TaskPriority, TaskStatus, TaskTitle};

    fn uid(id: i64) -> UserId {
        UserId::from_int(id).unwrap()
    }

    fn new_task(repo: &InMemoryTaskRepository) -> Task {
        Task::create(
            repo.next_id().unwrap(),
            NewTask {
                title: TaskTitle::parse("Call supplier").unwrap(),
                description: None,
                priority: TaskPriority::Medium,
                creator: uid(1),
                assignee: uid(2),
                category: None,
                due_date: None,
                tags: vec![],
            },
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_ids_are_sequential() {
        let repo = InMemoryTaskRepository::new();
        assert_eq!(repo.next_id().unwrap().as_int(), 1);
        assert_eq!(repo.next_id().unwrap().as_int(), 2);
    }

    #[test]
    fn test_save_and_find() {
        let repo = InMemoryTaskRepository::new();
        let task = new_task(&repo);
        repo.save(&task).unwrap();

        let found = repo.find(task.id()).unwrap().unwrap();
        assert_eq!(found.title().as_str(), "Call supplier");
        assert_eq!(found.version(), 1);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.exists(task.id()).unwrap());
    }

    #[test]
    fn test_stale_save_is_rejected() {
        let repo = InMemoryTaskRepository::new();
        let task = new_task(&repo);
        repo.save(&task).unwrap();

        let mut first = repo.find(task.id()).unwrap().unwrap();
        let mut second = first.clone();

        first
            .change_status(TaskStatus::InProgress, Utc::now())
            .unwrap();
        repo.save(&first).unwrap();

        second.complete(Utc::now()).unwrap();
        let err = repo.save(&second).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::ConcurrencyError {
                id: task.id(),
                expected: 1,
                actual: 2,
            }
        );
        assert_eq!(
            repo.find(task.id()).unwrap().unwrap().status(),
            TaskStatus::InProgress
        );
    }

    #[test]
    fn test_failed_hook_leaves_store_untouched() {
        let repo = InMemoryTaskRepository::new();
        let task = new_task(&repo);

        let result = repo.save_with(&task, || {
            Err(RepositoryError::PersistenceError {
                message: "disk full".to_string(),
            })
        });

        assert!(result.is_err());
        assert!(repo.find(task.id()).unwrap().is_none());
    }

    #[test]
    fn test_user_repository() {
        let repo = InMemoryUserRepository::new().with_user(User::new(uid(1), "Alice"));
        repo.insert(User::new(uid(2), "Bob").with_email("bob@example.com"))
            .unwrap();

        assert_eq!(repo.find(uid(1)).unwrap().unwrap().name(), "Alice");
        assert_eq!(
            repo.find(uid(2)).unwrap().unwrap().email(),
            Some("bob@example.com")
        );
        assert!(repo.find(uid(3)).unwrap().is_none());
    }

    #[test]
    fn test_seeding_recovers_poisoned_lock() {
        let repo = InMemoryUserRepository::new();
        let holder = repo.clone();
        let poisoned = std::thread::spawn(move || {
            let _guard = holder.users.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(poisoned.is_err());

        let repo = repo.with_user(User::new(uid(1), "Alice"));

        let users = repo.users.read().unwrap_or_else(|p| p.into_inner());
        assert_eq!(users.get(&uid(1)).map(|u| u.name()), Some("Alice"));
        drop(users);
        // Regular reads still report the poisoned lock
        assert!(repo.find(uid(1)).is_err());
    }
}
