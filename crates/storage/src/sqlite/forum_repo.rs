use std::collections::HashMap;

use async_trait::async_trait;
use bridge_core::model::{ForumPost, PostId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{
    conn, i64_to_u32, i64_to_u64, post_id_from_i64, post_id_to_i64, ser, user_id_from_str, write_err,
};
use crate::repository::{ForumRepository, StorageError};

#[async_trait]
impl ForumRepository for SqliteRepository {
    async fn insert_post(&self, post: &ForumPost) -> Result<PostId, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let res = sqlx::query(
            r"
            INSERT INTO forum_posts (author_id, author_name, author_email, title, content, created_at, likes, replies)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(post.author_id().map(|id| id.to_string()))
        .bind(post.author_name())
        .bind(post.author_email())
        .bind(post.title())
        .bind(post.content())
        .bind(post.created_at())
        .bind(i64::from(post.likes()))
        .bind(i64::from(post.replies()))
        .execute(&mut *tx)
        .await
        .map_err(write_err)?;
        let post_id = res.last_insert_rowid();

        for (position, tag) in post.tags().iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| StorageError::Serialization("tag position overflow".into()))?;
            sqlx::query(
                r"
                INSERT INTO forum_post_tags (post_id, position, tag)
                VALUES (?1, ?2, ?3)
                ",
            )
            .bind(post_id)
            .bind(position)
            .bind(tag)
            .execute(&mut *tx)
            .await
            .map_err(write_err)?;
        }

        tx.commit().await.map_err(conn)?;
        post_id_from_i64(post_id)
    }

    async fn list_recent_posts(&self) -> Result<Vec<ForumPost>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, author_name, author_email, title, content, created_at, likes, replies
            FROM forum_posts
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let tag_rows = sqlx::query(
            r"
            SELECT post_id, tag
            FROM forum_post_tags
            ORDER BY post_id, position
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &tag_rows {
            let post_id: i64 = row.try_get("post_id").map_err(ser)?;
            let tag: String = row.try_get("tag").map_err(ser)?;
            tags.entry(post_id).or_default().push(tag);
        }

        rows.iter()
            .map(|row| {
                let id: i64 = row.try_get("id").map_err(ser)?;
                post_from_row(row, tags.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn count_posts(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forum_posts")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        i64_to_u64("post_count", count)
    }

    async fn count_posts_tagged(&self, tag: &str) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT post_id) FROM forum_post_tags WHERE tag = ?1",
        )
        .bind(tag)
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;
        i64_to_u64("post_count", count)
    }

    async fn get_post(&self, id: PostId) -> Result<Option<ForumPost>, StorageError> {
        let raw_id = post_id_to_i64(id)?;
        let row = sqlx::query(
            r"
            SELECT id, author_id, author_name, author_email, title, content, created_at, likes, replies
            FROM forum_posts WHERE id = ?1
            ",
        )
        .bind(raw_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tags: Vec<String> = sqlx::query_scalar(
            "SELECT tag FROM forum_post_tags WHERE post_id = ?1 ORDER BY position",
        )
        .bind(raw_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        post_from_row(&row, tags).map(Some)
    }

    async fn increment_likes(&self, id: PostId) -> Result<u32, StorageError> {
        let likes: Option<i64> = sqlx::query_scalar(
            "UPDATE forum_posts SET likes = likes + 1 WHERE id = ?1 RETURNING likes",
        )
        .bind(post_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match likes {
            Some(likes) => i64_to_u32("likes", likes),
            None => Err(StorageError::NotFound),
        }
    }
}

fn post_from_row(row: &SqliteRow, tags: Vec<String>) -> Result<ForumPost, StorageError> {
    let author_id = row
        .try_get::<Option<String>, _>("author_id")
        .map_err(ser)?
        .as_deref()
        .map(user_id_from_str)
        .transpose()?;
    Ok(ForumPost::from_persisted(
        post_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        author_id,
        row.try_get("author_name").map_err(ser)?,
        row.try_get("author_email").map_err(ser)?,
        row.try_get("title").map_err(ser)?,
        row.try_get("content").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        i64_to_u32("likes", row.try_get::<i64, _>("likes").map_err(ser)?)?,
        i64_to_u32("replies", row.try_get::<i64, _>("replies").map_err(ser)?)?,
        tags,
    ))
}
