use std::sync::Arc;

use bridge_core::gate::GateState;
use bridge_core::model::{Course, ProgressUpdate, UserId, UserProgress};
use bridge_core::scoring::IqScore;
use storage::repository::{ProgressRepository, StorageError};

use crate::error::ProgressError;

/// Reads and writes the per-user progress row, which also carries the onboarding gate.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }

    /// Load the row, inserting the default one on first access.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<UserProgress, ProgressError> {
        if let Some(existing) = self.progress.get_progress(user_id).await? {
            return Ok(existing);
        }
        let row = UserProgress::new_default(user_id);
        match self.progress.insert_progress(&row).await {
            Ok(()) => {
                tracing::debug!(%user_id, "created progress row");
                Ok(row)
            }
            // Another writer got there first.
            Err(StorageError::Conflict) => self
                .progress
                .get_progress(user_id)
                .await?
                .ok_or(ProgressError::Storage(StorageError::NotFound)),
            Err(err) => Err(err.into()),
        }
    }

    /// Merge `update` into the row, creating the row first if needed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn update(
        &self,
        user_id: UserId,
        update: ProgressUpdate,
    ) -> Result<UserProgress, ProgressError> {
        let mut row = self.get_or_create(user_id).await?;
        row.apply(update);
        self.save(&row).await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn save_iq_result(
        &self,
        user_id: UserId,
        score: IqScore,
    ) -> Result<UserProgress, ProgressError> {
        self.update(
            user_id,
            ProgressUpdate {
                iq_score: Some(score),
                ..ProgressUpdate::default()
            },
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `ProgressError::IqTestRequired` if no IQ score has been saved yet.
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn select_course(
        &self,
        user_id: UserId,
        course: Course,
    ) -> Result<UserProgress, ProgressError> {
        let mut row = self.get_or_create(user_id).await?;
        if row.iq_score.is_none() {
            return Err(ProgressError::IqTestRequired);
        }
        row.selected_course = Some(course);
        self.save(&row).await?;
        Ok(row)
    }

    /// Fold a finished quiz into the running counters.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn record_quiz_result(
        &self,
        user_id: UserId,
        score_percent: u32,
    ) -> Result<UserProgress, ProgressError> {
        let mut row = self.get_or_create(user_id).await?;
        row.record_quiz(score_percent);
        self.save(&row).await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn gate_state(&self, user_id: UserId) -> Result<GateState, ProgressError> {
        Ok(self.get_or_create(user_id).await?.gate_state())
    }

    async fn save(&self, row: &UserProgress) -> Result<(), ProgressError> {
        self.progress.upsert_progress(row).await?;
        tracing::info!(
            user_id = %row.user_id,
            iq_score = row.iq_score.map(IqScore::value),
            course = row.selected_course.map(Course::code),
            quizzes = row.quizzes_taken,
            "progress saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn service() -> ProgressService {
        ProgressService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn first_access_creates_default_row() {
        let svc = service();
        let user = UserId::generate();
        let row = svc.get_or_create(user).await.unwrap();
        assert_eq!(row, UserProgress::new_default(user));
        assert_eq!(svc.get_or_create(user).await.unwrap(), row);
    }

    #[tokio::test]
    async fn course_requires_iq_result() {
        let svc = service();
        let user = UserId::generate();
        let err = svc.select_course(user, Course::Neet).await.unwrap_err();
        assert!(matches!(err, ProgressError::IqTestRequired));

        svc.save_iq_result(user, IqScore::new(105)).await.unwrap();
        let row = svc.select_course(user, Course::Neet).await.unwrap();
        assert_eq!(row.selected_course, Some(Course::Neet));
        assert!(svc.gate_state(user).await.unwrap().is_fully_onboarded());
    }

    #[tokio::test]
    async fn quiz_results_update_running_average() {
        let svc = service();
        let user = UserId::generate();
        svc.record_quiz_result(user, 80).await.unwrap();
        let row = svc.record_quiz_result(user, 91).await.unwrap();
        assert_eq!(row.quizzes_taken, 2);
        assert_eq!(row.completed_courses, 2);
        assert_eq!(row.study_hours, 2);
        assert_eq!(row.average_score, 86);
    }

    #[tokio::test]
    async fn update_only_touches_given_fields() {
        let svc = service();
        let user = UserId::generate();
        let row = svc
            .update(
                user,
                ProgressUpdate {
                    study_hours: Some(7),
                    ..ProgressUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(row.study_hours, 7);
        assert_eq!(row.total_courses, 20);
        assert!(row.iq_score.is_none());
    }
}
