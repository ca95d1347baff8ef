use async_trait::async_trait;
use bridge_core::model::{Email, UserProfile};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser, user_id_from_str, write_err};
use crate::repository::{CredentialRecord, CredentialRepository, StorageError};

#[async_trait]
impl CredentialRepository for SqliteRepository {
    async fn register_account(
        &self,
        profile: &UserProfile,
        record: &CredentialRecord,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

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
        .execute(&mut *tx)
        .await
        .map_err(write_err)?;

        sqlx::query(
            r"
            INSERT INTO credentials (user_id, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(record.user_id.to_string())
        .bind(record.email.as_str())
        .bind(&record.password_hash)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(write_err)?;

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, email, password_hash, created_at
            FROM credentials WHERE email = ?1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: String = row.try_get("user_id").map_err(ser)?;
        let stored_email: String = row.try_get("email").map_err(ser)?;
        Ok(Some(CredentialRecord {
            user_id: user_id_from_str(&user_id)?,
            email: Email::parse(stored_email).map_err(ser)?,
            password_hash: row.try_get("password_hash").map_err(ser)?,
            created_at: row.try_get("created_at").map_err(ser)?,
        }))
    }
}
