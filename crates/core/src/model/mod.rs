mod chat;
mod course;
mod forum;
mod ids;
mod profile;
mod progress;
mod quiz;
mod todo;

pub use ids::{ParseIdError, PostId, TodoId, UserId};

pub use chat::{ChatMessage, ChatRole, ChatTranscript};
pub use course::{Course, ParseCourseError};
pub use forum::{
    ForumCategory, ForumPost, PostDraft, PostError, filter_posts, relative_time, sample_posts,
};
pub use iq_test::{
    IQ_TEST_DURATION_SECS, IqQuestion, IqTestError, IqTestResult, IqTestSession, format_time,
    iq_questions,
};
pub use profile::{Email, ProfileDraft, ProfileError, ProfileUpdate, UserProfile};
pub use progress::{DEFAULT_TOTAL_COURSES, ProgressUpdate, UserProgress};
pub use quiz::{QuizAnswer, QuizQuestion, QuizSession, quiz_questions};
pub use todo::{Todo, TodoDraft, TodoError};
