use async_trait::async_trait;
use bridge_core::model::{UserId, UserProfile};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{conn, ser, user_id_from_str, write_err};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait]
impl ProfileRepository for SqliteRepository {
    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, first_name, last_name, email)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(profile.id().to_string())
        .bind(profile.first_name())
        .bind(profile.last_name())
        .bind(profile.email().as_str())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;
        Ok(())
    }

    async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, first_name, last_name, email
            FROM profiles WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE profiles
            SET first_name = ?2, last_name = ?3, email = ?4
            WHERE id = ?1
            ",
        )
        .bind(profile.id().to_string())
        .bind(profile.first_name())
        .bind(profile.last_name())
        .bind(profile.email().as_str())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        // Keep the login email in step with the profile.
        sqlx::query("UPDATE credentials SET email = ?2 WHERE user_id = ?1")
            .bind(profile.id().to_string())
            .bind(profile.email().as_str())
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}

fn profile_from_row(row: &SqliteRow) -> Result<UserProfile, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    UserProfile::from_persisted(
        user_id_from_str(&id)?,
        row.try_get("first_name").map_err(ser)?,
        row.try_get("last_name").map_err(ser)?,
        row.try_get("email").map_err(ser)?,
    )
    .map_err(ser)
}
