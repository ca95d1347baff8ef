mod assessment_vm;
mod auth_vm;
mod chat_vm;
mod dashboard_vm;
mod forum_vm;
mod markdown_vm;
mod time_fmt;
mod timetable_vm;
mod todo_vm;

pub use assessment_vm::{IqResultVm, QuizSummaryVm, progress_percent, question_counter};
pub use auth_vm::{LoginForm, RegisterForm, RegisterFormErrors, auth_error_message};
pub use chat_vm::{ChatBubbleVm, map_chat};
pub use dashboard_vm::{DashboardVm, StatVm, SubjectStrengthVm, map_strengths};
pub use forum_vm::{PostCardVm, map_posts, parse_tags_input};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use time_fmt::{format_long_date, format_short_date};
pub use timetable_vm::{SessionRowVm, TimetableDayVm, map_timetable, weekly_study_label};
pub use todo_vm::{TodoCounts, TodoRowVm, count_todos, map_todos, parse_due_input};
