use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DashboardVm, TimetableDayVm, TodoRowVm, format_long_date, map_timetable, map_todos,
    weekly_study_label,
};

const UPCOMING_LIMIT: usize = 3;

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    summary: DashboardVm,
    days: Vec<TimetableDayVm>,
    weekly_study: String,
    today: String,
    upcoming: Vec<TodoRowVm>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        async move {
            let session = ctx.session().ok_or(ViewError::SignedOut)?;
            let snapshot = ctx
                .dashboard()
                .snapshot(&session.profile)
                .await
                .map_err(|err| {
                    tracing::warn!(error = %err, "dashboard snapshot failed");
                    ViewError::Unknown
                })?;
            let today = ctx.clock().today();
            let todos = ctx
                .planner()
                .list(session.user_id())
                .await
                .map_err(|_| ViewError::Unknown)?;
            let upcoming = map_todos(&todos, today)
                .into_iter()
                .filter(|row| !row.completed)
                .take(UPCOMING_LIMIT)
                .collect();

            Ok(DashboardData {
                summary: DashboardVm::from(&snapshot),
                days: map_timetable(&snapshot.plan.timetable),
                weekly_study: weekly_study_label(&snapshot.plan.timetable),
                today: format_long_date(today),
                upcoming,
            })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    DashboardBody { data }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "page-error", {err.message()} }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(data: DashboardData) -> Element {
    let summary = data.summary;

    rsx! {
        header { class: "dashboard-header",
            h2 { "{summary.greeting}" }
            p { class: "muted", "{data.today} | Your daily study digest" }
        }

        section { class: "cards",
            div { class: "card",
                p { class: "muted", "Course" }
                h3 { "{summary.course_label}" }
            }
            div { class: "card",
                p { class: "muted", "IQ score" }
                h3 { "{summary.iq_label}" }
            }
            div { class: "card",
                p { class: "muted", "Progress" }
                h3 { "{summary.completion_percent}%" }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {summary.completion_percent}%" }
                }
                p { class: "muted", "{summary.completion_label}" }
            }
            for stat in summary.stats {
                div { class: "card",
                    p { class: "muted", "{stat.label}" }
                    h3 { "{stat.value}" }
                }
            }
        }

        section { class: "strengths",
            h3 { "Subject strengths" }
            ul {
                for subject in summary.strengths {
                    li {
                        span { "{subject.name}" }
                        div { class: "progress-bar",
                            div { class: "progress-fill", style: "width: {subject.percent}%" }
                        }
                        span { "{subject.percent}%" }
                    }
                }
            }
        }

        section { class: "upcoming",
            h3 { "Upcoming tasks" }
            if data.upcoming.is_empty() {
                p { class: "muted", "Nothing planned. " Link { to: Route::Todo {}, "Add a task" } }
            } else {
                ul {
                    for row in data.upcoming {
                        li { class: if row.overdue { "overdue" } else { "" },
                            span { "{row.title}" }
                            span { class: "muted", "{row.due_label}" }
                        }
                    }
                }
            }
        }

        section { class: "timetable",
            h3 { "Weekly timetable" }
            p { class: "muted", "Planned study time: {data.weekly_study}" }
            div { class: "timetable-grid",
                for day in data.days {
                    div { class: "timetable-day",
                        h4 { "{day.day_label}" }
                        for slot in day.sessions {
                            div { class: slot.css_class,
                                span { class: "slot-time", "{slot.time_range}" }
                                strong { "{slot.subject}" }
                                span { class: "slot-kind", "{slot.kind_label}" }
                                if !slot.priority_label.is_empty() {
                                    span { class: "slot-priority", "{slot.priority_label}" }
                                }
                            }
                        }
                    }
                }
            }
        }

        nav { class: "quick-links",
            Link { class: "button secondary", to: Route::Quiz {}, "Take a quiz" }
            Link { class: "button secondary", to: Route::Chatbot {}, "Ask the assistant" }
            Link { class: "button secondary", to: Route::Forum {}, "Visit the forum" }
        }
    }
}
