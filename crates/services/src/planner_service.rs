use std::sync::Arc;

use bridge_core::model::{Todo, TodoDraft, TodoId, UserId};
use chrono::NaiveDate;
use storage::repository::TodoRepository;

use crate::Clock;
use crate::error::PlannerError;

/// Fields a user may edit on an existing task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Per-user study planner backed by the todo repository.
#[derive(Clone)]
pub struct PlannerService {
    clock: Clock,
    todos: Arc<dyn TodoRepository>,
}

impl PlannerService {
    #[must_use]
    pub fn new(clock: Clock, todos: Arc<dyn TodoRepository>) -> Self {
        Self { clock, todos }
    }

    /// # Errors
    ///
    /// Returns `PlannerError::Todo` for a blank title, `Storage` on repository failures.
    pub async fn add(&self, user_id: UserId, draft: TodoDraft) -> Result<Todo, PlannerError> {
        let now = self.clock.now();
        let todo = draft.validate(user_id, self.clock.today(), now)?;
        let id = self.todos.insert_todo(&todo).await?;
        Ok(todo.with_id(id))
    }

    /// Tasks ordered by due date, then id.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Storage` on repository failures.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Todo>, PlannerError> {
        Ok(self.todos.list_todos_for_user(user_id).await?)
    }

    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` if the task does not belong to `user_id`.
    pub async fn toggle(&self, user_id: UserId, id: TodoId) -> Result<Todo, PlannerError> {
        let mut todo = self.load(user_id, id).await?;
        todo.toggle();
        self.todos.update_todo(&todo).await?;
        Ok(todo)
    }

    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` for foreign or missing tasks, `Todo` for a blank title.
    pub async fn update(
        &self,
        user_id: UserId,
        id: TodoId,
        update: TodoUpdate,
    ) -> Result<Todo, PlannerError> {
        let mut todo = self.load(user_id, id).await?;
        if let Some(title) = update.title.as_deref() {
            todo.rename(title)?;
        }
        if let Some(due) = update.due_date {
            todo.reschedule(due);
        }
        self.todos.update_todo(&todo).await?;
        Ok(todo)
    }

    /// # Errors
    ///
    /// Returns `PlannerError::NotFound` if the task does not belong to `user_id`.
    pub async fn delete(&self, user_id: UserId, id: TodoId) -> Result<(), PlannerError> {
        self.todos.delete_todo(user_id, id).await?;
        Ok(())
    }

    /// Open tasks whose due date has passed.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Storage` on repository failures.
    pub async fn overdue(&self, user_id: UserId) -> Result<Vec<Todo>, PlannerError> {
        let today = self.clock.today();
        let mut todos = self.list(user_id).await?;
        todos.retain(|t| t.is_overdue(today));
        Ok(todos)
    }

    async fn load(&self, user_id: UserId, id: TodoId) -> Result<Todo, PlannerError> {
        self.todos
            .get_todo(user_id, id)
            .await?
            .ok_or(PlannerError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::model::TodoError;
    use bridge_core::time::fixed_clock;
    use chrono::Duration;
    use storage::repository::InMemoryRepository;

    fn service() -> PlannerService {
        PlannerService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn add_defaults_due_date_to_today() {
        let planner = service();
        let user = UserId::generate();
        let todo = planner
            .add(user, TodoDraft::new("Revise enzymes", None))
            .await
            .unwrap();
        assert_eq!(todo.due_date(), fixed_clock().today());
        assert_ne!(todo.id(), TodoId::new(0));
    }

    #[tokio::test]
    async fn blank_titles_are_rejected() {
        let planner = service();
        let err = planner
            .add(UserId::generate(), TodoDraft::new(" ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Todo(TodoError::EmptyTitle)));
    }

    #[tokio::test]
    async fn other_users_todos_are_not_found() {
        let planner = service();
        let owner = UserId::generate();
        let intruder = UserId::generate();
        let todo = planner.add(owner, TodoDraft::new("Mine", None)).await.unwrap();

        assert!(matches!(
            planner.toggle(intruder, todo.id()).await,
            Err(PlannerError::NotFound)
        ));
        assert!(matches!(
            planner.delete(intruder, todo.id()).await,
            Err(PlannerError::NotFound)
        ));
        assert!(matches!(
            planner
                .update(intruder, todo.id(), TodoUpdate::default())
                .await,
            Err(PlannerError::NotFound)
        ));
        assert_eq!(planner.list(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_toggle_round_trip() {
        let planner = service();
        let user = UserId::generate();
        let today = fixed_clock().today();
        let todo = planner.add(user, TodoDraft::new("Draft", None)).await.unwrap();

        let updated = planner
            .update(
                user,
                todo.id(),
                TodoUpdate {
                    title: Some("Final".into()),
                    due_date: Some(today - Duration::days(1)),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title(), "Final");
        assert_eq!(planner.overdue(user).await.unwrap().len(), 1);

        let toggled = planner.toggle(user, todo.id()).await.unwrap();
        assert!(toggled.is_completed());
        assert!(planner.overdue(user).await.unwrap().is_empty());

        planner.delete(user, todo.id()).await.unwrap();
        assert!(planner.list(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_orders_by_due_date() {
        let planner = service();
        let user = UserId::generate();
        let today = fixed_clock().today();
        planner
            .add(user, TodoDraft::new("later", Some(today + Duration::days(5))))
            .await
            .unwrap();
        planner
            .add(user, TodoDraft::new("sooner", Some(today)))
            .await
            .unwrap();
        let titles: Vec<String> = planner
            .list(user)
            .await
            .unwrap()
            .iter()
            .map(|t| t.title().to_owned())
            .collect();
        assert_eq!(titles, ["sooner", "later"]);
    }
}
