use bridge_core::model::UserId;
use bridge_core::scoring::IqScore;
use bridge_core::timetable::{SubjectScores, WeeklyTimetable};
use rand::Rng;

use crate::error::ProgressError;
use crate::progress_service::ProgressService;

/// Subject strengths and the week they produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlan {
    pub iq_score: IqScore,
    pub scores: SubjectScores,
    pub timetable: WeeklyTimetable,
}

impl StudyPlan {
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(iq_score: IqScore, rng: &mut R) -> Self {
        let scores = SubjectScores::from_iq(iq_score, rng);
        let timetable = WeeklyTimetable::generate(&scores);
        Self {
            iq_score,
            scores,
            timetable,
        }
    }
}

#[derive(Clone)]
pub struct StudyPlanService {
    progress: ProgressService,
}

impl StudyPlanService {
    #[must_use]
    pub fn new(progress: ProgressService) -> Self {
        Self { progress }
    }

    /// Plan biased by the user's IQ score (100 when the test was never taken).
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the progress row cannot be loaded.
    pub async fn timetable_for(&self, user_id: UserId) -> Result<StudyPlan, ProgressError> {
        let iq = self.iq_score_for(user_id).await?;
        Ok(StudyPlan::generate(iq, &mut rand::rng()))
    }

    /// Same as [`StudyPlanService::timetable_for`] with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the progress row cannot be loaded.
    pub async fn timetable_with_rng<R: Rng + ?Sized + Send>(
        &self,
        user_id: UserId,
        rng: &mut R,
    ) -> Result<StudyPlan, ProgressError> {
        let iq = self.iq_score_for(user_id).await?;
        Ok(StudyPlan::generate(iq, rng))
    }

    async fn iq_score_for(&self, user_id: UserId) -> Result<IqScore, ProgressError> {
        let row = self.progress.get_or_create(user_id).await?;
        Ok(row.iq_score.unwrap_or_default())
    }
}
