use async_trait::async_trait;
use bridge_core::model::{Todo, TodoId, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{conn, ser, todo_id_from_i64, todo_id_to_i64, user_id_from_str, write_err};
use crate::repository::{StorageError, TodoRepository};

#[async_trait]
impl TodoRepository for SqliteRepository {
    async fn insert_todo(&self, todo: &Todo) -> Result<TodoId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO todos (user_id, title, due_date, completed, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(todo.user_id().to_string())
        .bind(todo.title())
        .bind(todo.due_date())
        .bind(i64::from(todo.is_completed()))
        .bind(todo.created_at())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        todo_id_from_i64(res.last_insert_rowid())
    }

    async fn get_todo(&self, user_id: UserId, id: TodoId) -> Result<Option<Todo>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, title, due_date, completed, created_at
            FROM todos WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(todo_id_to_i64(id)?)
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(todo_from_row).transpose()
    }

    async fn list_todos_for_user(&self, user_id: UserId) -> Result<Vec<Todo>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, due_date, completed, created_at
            FROM todos
            WHERE user_id = ?1
            ORDER BY due_date ASC, id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(todo_from_row).collect()
    }

    async fn update_todo(&self, todo: &Todo) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE todos
            SET title = ?3, due_date = ?4, completed = ?5
            WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(todo_id_to_i64(todo.id())?)
        .bind(todo.user_id().to_string())
        .bind(todo.title())
        .bind(todo.due_date())
        .bind(i64::from(todo.is_completed()))
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_todo(&self, user_id: UserId, id: TodoId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM todos WHERE id = ?1 AND user_id = ?2")
            .bind(todo_id_to_i64(id)?)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

fn todo_from_row(row: &SqliteRow) -> Result<Todo, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    Ok(Todo::from_persisted(
        todo_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id_from_str(&user_id)?,
        row.try_get("title").map_err(ser)?,
        row.try_get("due_date").map_err(ser)?,
        row.try_get::<i64, _>("completed").map_err(ser)? != 0,
        row.try_get("created_at").map_err(ser)?,
    ))
}
