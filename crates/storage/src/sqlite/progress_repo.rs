use async_trait::async_trait;
use bridge_core::model::{UserId, UserProgress};
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{conn, course_from_code, i64_to_u32, iq_score_from_i64, ser, user_id_from_str, write_err};
use crate::repository::{ProgressRepository, StorageError};

const UPSERT_SQL: &str = r"
    INSERT INTO user_progress (
        user_id, total_courses, completed_courses, average_score,
        study_hours, quizzes_taken, iq_score, selected_course, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(user_id) DO UPDATE SET
        total_courses = excluded.total_courses,
        completed_courses = excluded.completed_courses,
        average_score = excluded.average_score,
        study_hours = excluded.study_hours,
        quizzes_taken = excluded.quizzes_taken,
        iq_score = excluded.iq_score,
        selected_course = excluded.selected_course,
        updated_at = excluded.updated_at
";

const INSERT_SQL: &str = r"
    INSERT INTO user_progress (
        user_id, total_courses, completed_courses, average_score,
        study_hours, quizzes_taken, iq_score, selected_course, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
";

impl SqliteRepository {
    async fn write_progress(&self, sql: &str, p: &UserProgress) -> Result<(), StorageError> {
        sqlx::query(sql)
            .bind(p.user_id.to_string())
            .bind(i64::from(p.total_courses))
            .bind(i64::from(p.completed_courses))
            .bind(i64::from(p.average_score))
            .bind(i64::from(p.study_hours))
            .bind(i64::from(p.quizzes_taken))
            .bind(p.iq_score.map(|s| i64::from(s.value())))
            .bind(p.selected_course.map(|c| c.code()))
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self, user_id: UserId) -> Result<Option<UserProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, total_courses, completed_courses, average_score,
                   study_hours, quizzes_taken, iq_score, selected_course
            FROM user_progress WHERE user_id = ?1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(progress_from_row).transpose()
    }

    async fn insert_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        self.write_progress(INSERT_SQL, progress).await
    }

    async fn upsert_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        self.write_progress(UPSERT_SQL, progress).await
    }
}

fn progress_from_row(row: &SqliteRow) -> Result<UserProgress, StorageError> {
    let counter = |field: &'static str| -> Result<u32, StorageError> {
        i64_to_u32(field, row.try_get::<i64, _>(field).map_err(ser)?)
    };
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    Ok(UserProgress {
        user_id: user_id_from_str(&user_id)?,
        total_courses: counter("total_courses")?,
        completed_courses: counter("completed_courses")?,
        average_score: counter("average_score")?,
        study_hours: counter("study_hours")?,
        quizzes_taken: counter("quizzes_taken")?,
        iq_score: iq_score_from_i64(row.try_get("iq_score").map_err(ser)?)?,
        selected_course: course_from_code(row.try_get("selected_course").map_err(ser)?)?,
    })
}
