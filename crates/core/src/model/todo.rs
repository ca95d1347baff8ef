use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{TodoId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TodoError {
    #[error("task title cannot be empty")]
    EmptyTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    user_id: UserId,
    title: String,
    due_date: NaiveDate,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Todo {
    #[must_use]
    pub fn from_persisted(
        id: TodoId,
        user_id: UserId,
        title: String,
        due_date: NaiveDate,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            due_date,
            completed,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> TodoId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Replace the title, trimming it first.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::EmptyTitle` if the trimmed title is empty.
    pub fn rename(&mut self, title: &str) -> Result<(), TodoError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        self.title = title.to_owned();
        Ok(())
    }

    pub fn reschedule(&mut self, due_date: NaiveDate) {
        self.due_date = due_date;
    }

    /// Same todo with the id assigned by storage.
    #[must_use]
    pub fn with_id(mut self, id: TodoId) -> Self {
        self.id = id;
        self
    }
}

/// Unsaved task as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub due_date: Option<NaiveDate>,
}

impl TodoDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            due_date,
        }
    }

    /// Build a persistable todo with a placeholder id; repositories assign the real one.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::EmptyTitle` if the trimmed title is empty.
    pub fn validate(
        self,
        user_id: UserId,
        today: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Todo, TodoError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        Ok(Todo {
            id: TodoId::new(0),
            user_id,
            title: title.to_owned(),
            due_date: self.due_date.unwrap_or(today),
            completed: false,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn today() -> NaiveDate {
        fixed_now().date_naive()
    }

    #[test]
    fn draft_trims_and_defaults_due_date() {
        let user = UserId::generate();
        let todo = TodoDraft::new("  Read chapter 4  ", None)
            .validate(user, today(), fixed_now())
            .unwrap();
        assert_eq!(todo.title(), "Read chapter 4");
        assert_eq!(todo.due_date(), today());
        assert!(!todo.is_completed());
    }

    #[test]
    fn draft_rejects_blank_title() {
        let err = TodoDraft::new("   ", None)
            .validate(UserId::generate(), today(), fixed_now())
            .unwrap_err();
        assert_eq!(err, TodoError::EmptyTitle);
    }

    #[test]
    fn overdue_only_when_open_and_past_due() {
        let yesterday = today().pred_opt().unwrap();
        let mut todo = TodoDraft::new("Flashcards", Some(yesterday))
            .validate(UserId::generate(), today(), fixed_now())
            .unwrap();
        assert!(todo.is_overdue(today()));
        todo.toggle();
        assert!(!todo.is_overdue(today()));
        todo.toggle();
        todo.reschedule(today());
        assert!(!todo.is_overdue(today()));
    }

    #[test]
    fn rename_keeps_old_title_on_error() {
        let mut todo = TodoDraft::new("Old", None)
            .validate(UserId::generate(), today(), fixed_now())
            .unwrap();
        assert!(todo.rename(" ").is_err());
        assert_eq!(todo.title(), "Old");
        todo.rename(" New ").unwrap();
        assert_eq!(todo.title(), "New");
    }
}
