use async_trait::async_trait;
use bridge_core::model::{Email, ForumPost, PostId, Todo, TodoId, UserId, UserProfile, UserProgress};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Stored login secret for one account. The hash is an argon2 PHC string.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user_id: UserId,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

// ─── Contracts ───

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist a new profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id or email is already used.
    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// Fetch a profile by user id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, StorageError>;

    /// Overwrite an existing profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, `Conflict` if the new email is taken.
    async fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn get_progress(&self, user_id: UserId) -> Result<Option<UserProgress>, StorageError>;

    /// Insert the first progress row for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a row already exists.
    async fn insert_progress(&self, progress: &UserProgress) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be written.
    async fn upsert_progress(&self, progress: &UserProgress) -> Result<(), StorageError>;
}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Store a new profile together with its login secret. Either both rows
    /// are written or neither is.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email or user id is already registered.
    async fn register_account(
        &self,
        profile: &UserProfile,
        record: &CredentialRecord,
    ) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, StorageError>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a todo and return the id storage assigned to it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the todo cannot be stored.
    async fn insert_todo(&self, todo: &Todo) -> Result<TodoId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn get_todo(&self, user_id: UserId, id: TodoId) -> Result<Option<Todo>, StorageError>;

    /// All todos owned by `user_id`, ordered by due date then id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn list_todos_for_user(&self, user_id: UserId) -> Result<Vec<Todo>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no todo with this id belongs to the owner.
    async fn update_todo(&self, todo: &Todo) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no todo with this id belongs to `user_id`.
    async fn delete_todo(&self, user_id: UserId, id: TodoId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Insert a post with its tags and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the post cannot be stored.
    async fn insert_post(&self, post: &ForumPost) -> Result<PostId, StorageError>;

    /// Every stored post, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn list_recent_posts(&self) -> Result<Vec<ForumPost>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection failures.
    async fn count_posts(&self) -> Result<u64, StorageError>;

    /// Number of posts carrying `tag` exactly.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection failures.
    async fn count_posts_tagged(&self, tag: &str) -> Result<u64, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn get_post(&self, id: PostId) -> Result<Option<ForumPost>, StorageError>;

    /// Add one like and return the new count.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the post does not exist.
    async fn increment_likes(&self, id: PostId) -> Result<u32, StorageError>;
}

// ─── In-memory backend ───

struct Table<K, V> {
    rows: BTreeMap<K, V>,
    last_id: u64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<K, V> Table<K, V> {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    credentials: Arc<Mutex<HashMap<Email, CredentialRecord>>>,
    progress: Arc<Mutex<HashMap<UserId, UserProgress>>>,
    todos: Arc<Mutex<Table<TodoId, Todo>>>,
    posts: Arc<Mutex<Table<PostId, ForumPost>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut guard = self.profiles.lock().map_err(poisoned)?;
        if guard.contains_key(&profile.id())
            || guard.values().any(|p| p.email() == profile.email())
        {
            return Err(StorageError::Conflict);
        }
        guard.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let guard = self.profiles.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut guard = self.profiles.lock().map_err(poisoned)?;
        if guard
            .values()
            .any(|p| p.id() != profile.id() && p.email() == profile.email())
        {
            return Err(StorageError::Conflict);
        }
        let slot = guard.get_mut(&profile.id()).ok_or(StorageError::NotFound)?;
        *slot = profile.clone();

        // Keep the login email in step with the profile.
        let mut credentials = self.credentials.lock().map_err(poisoned)?;
        let old_email = credentials
            .iter()
            .find(|(_, c)| c.user_id == profile.id())
            .map(|(email, _)| email.clone());
        if let Some(old_email) = old_email
            && let Some(mut record) = credentials.remove(&old_email)
        {
            record.email = profile.email().clone();
            credentials.insert(record.email.clone(), record);
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self, user_id: UserId) -> Result<Option<UserProgress>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        Ok(guard.get(&user_id).cloned())
    }

    async fn insert_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(poisoned)?;
        if guard.contains_key(&progress.user_id) {
            return Err(StorageError::Conflict);
        }
        guard.insert(progress.user_id, progress.clone());
        Ok(())
    }

    async fn upsert_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(poisoned)?;
        guard.insert(progress.user_id, progress.clone());
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for InMemoryRepository {
    async fn register_account(
        &self,
        profile: &UserProfile,
        record: &CredentialRecord,
    ) -> Result<(), StorageError> {
        // Lock order: profiles, then credentials.
        let mut profiles = self.profiles.lock().map_err(poisoned)?;
        let mut credentials = self.credentials.lock().map_err(poisoned)?;
        if profiles.contains_key(&profile.id())
            || profiles.values().any(|p| p.email() == profile.email())
            || credentials.contains_key(&record.email)
            || credentials.values().any(|c| c.user_id == record.user_id)
        {
            return Err(StorageError::Conflict);
        }
        profiles.insert(profile.id(), profile.clone());
        credentials.insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, StorageError> {
        let guard = self.credentials.lock().map_err(poisoned)?;
        Ok(guard.get(email).cloned())
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn insert_todo(&self, todo: &Todo) -> Result<TodoId, StorageError> {
        let mut guard = self.todos.lock().map_err(poisoned)?;
        let id = TodoId::new(guard.next_id());
        guard.rows.insert(id, todo.clone().with_id(id));
        Ok(id)
    }

    async fn get_todo(&self, user_id: UserId, id: TodoId) -> Result<Option<Todo>, StorageError> {
        let guard = self.todos.lock().map_err(poisoned)?;
        Ok(guard
            .rows
            .get(&id)
            .filter(|t| t.user_id() == user_id)
            .cloned())
    }

    async fn list_todos_for_user(&self, user_id: UserId) -> Result<Vec<Todo>, StorageError> {
        let guard = self.todos.lock().map_err(poisoned)?;
        let mut todos: Vec<Todo> = guard
            .rows
            .values()
            .filter(|t| t.user_id() == user_id)
            .cloned()
            .collect();
        todos.sort_by_key(|t| (t.due_date(), t.id()));
        Ok(todos)
    }

    async fn update_todo(&self, todo: &Todo) -> Result<(), StorageError> {
        let mut guard = self.todos.lock().map_err(poisoned)?;
        match guard.rows.get_mut(&todo.id()) {
            Some(slot) if slot.user_id() == todo.user_id() => {
                *slot = todo.clone();
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    async fn delete_todo(&self, user_id: UserId, id: TodoId) -> Result<(), StorageError> {
        let mut guard = self.todos.lock().map_err(poisoned)?;
        match guard.rows.get(&id) {
            Some(todo) if todo.user_id() == user_id => {
                guard.rows.remove(&id);
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }
}

#[async_trait]
impl ForumRepository for InMemoryRepository {
    async fn insert_post(&self, post: &ForumPost) -> Result<PostId, StorageError> {
        let mut guard = self.posts.lock().map_err(poisoned)?;
        let id = PostId::new(guard.next_id());
        guard.rows.insert(id, post.clone().with_id(id));
        Ok(id)
    }

    async fn list_recent_posts(&self) -> Result<Vec<ForumPost>, StorageError> {
        let guard = self.posts.lock().map_err(poisoned)?;
        let mut posts: Vec<ForumPost> = guard.rows.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });
        Ok(posts)
    }

    async fn count_posts(&self) -> Result<u64, StorageError> {
        let guard = self.posts.lock().map_err(poisoned)?;
        Ok(guard.rows.len() as u64)
    }

    async fn count_posts_tagged(&self, tag: &str) -> Result<u64, StorageError> {
        let guard = self.posts.lock().map_err(poisoned)?;
        Ok(guard
            .rows
            .values()
            .filter(|post| post.tags().iter().any(|t| t == tag))
            .count() as u64)
    }

    async fn get_post(&self, id: PostId) -> Result<Option<ForumPost>, StorageError> {
        let guard = self.posts.lock().map_err(poisoned)?;
        Ok(guard.rows.get(&id).cloned())
    }

    async fn increment_likes(&self, id: PostId) -> Result<u32, StorageError> {
        let mut guard = self.posts.lock().map_err(poisoned)?;
        let post = guard.rows.get_mut(&id).ok_or(StorageError::NotFound)?;
        post.like();
        Ok(post.likes())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub forum: Arc<dyn ForumRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_backend(repo)
    }

    pub(crate) fn from_backend<R>(repo: R) -> Self
    where
        R: ProfileRepository
            + ProgressRepository
            + CredentialRepository
            + TodoRepository
            + ForumRepository
            + Clone
            + 'static,
    {
        Self {
            profiles: Arc::new(repo.clone()),
            progress: Arc::new(repo.clone()),
            credentials: Arc::new(repo.clone()),
            todos: Arc::new(repo.clone()),
            forum: Arc::new(repo),
        }
    }
}
