use dioxus::prelude::*;
use dioxus_router::Link;

use bridge_core::model::QuizSession;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::use_toasts;
use crate::views::ViewError;
use crate::vm::{QuizSummaryVm, progress_percent, question_counter};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ReviewRow {
    text: &'static str,
    selected: String,
    correct_answer: &'static str,
    correct: bool,
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut toasts = use_toasts();
    let mut quiz = use_signal(QuizSession::standard);

    let report = use_callback(move |percent: u32| {
        let Some(current) = ctx.session() else {
            toasts.error(ViewError::SignedOut.message());
            return;
        };
        let progress = ctx.progress();
        spawn(async move {
            match progress.record_quiz_result(current.user_id(), percent).await {
                Ok(_) => toasts.success("Quiz result saved to your progress"),
                Err(err) => {
                    tracing::warn!(error = %err, "recording quiz result failed");
                    toasts.error(ViewError::Unknown.message());
                }
            }
        });
    });

    let snapshot = quiz.read().clone();

    if snapshot.is_complete() {
        let summary = QuizSummaryVm::new(snapshot.score(), snapshot.total(), snapshot.percent());
        let review: Vec<ReviewRow> = snapshot
            .review()
            .map(|(question, answer)| ReviewRow {
                text: question.text,
                selected: answer
                    .and_then(|a| a.selected.clone())
                    .unwrap_or_else(|| "No answer".to_owned()),
                correct_answer: question.correct_answer,
                correct: answer.is_some_and(|a| a.correct),
            })
            .collect();

        return rsx! {
            div { class: "page quiz-summary",
                h2 { "Quiz complete" }
                div { class: "result-card",
                    h3 { class: "score", "{summary.percent}%" }
                    p { "{summary.score_label}" }
                    p { class: "muted", "{summary.message}" }
                }
                ol { class: "review",
                    for row in review {
                        li { class: if row.correct { "correct" } else { "incorrect" },
                            p { "{row.text}" }
                            p { class: "muted", "Your answer: {row.selected}" }
                            if !row.correct {
                                p { class: "muted", "Correct answer: {row.correct_answer}" }
                            }
                        }
                    }
                }
                div { class: "actions",
                    button {
                        class: "button primary",
                        r#type: "button",
                        onclick: move |_| quiz.write().restart(),
                        "Retake quiz"
                    }
                    Link { class: "button secondary", to: Route::Dashboard {}, "Back to dashboard" }
                }
            }
        };
    }

    let Some(question) = snapshot.current_question().cloned() else {
        return rsx! { p { "No questions available." } };
    };
    let index = snapshot.current_index();
    let total = snapshot.review().count();
    let answered: Vec<bool> = snapshot.review().map(|(_, a)| a.is_some()).collect();
    let done = answered.iter().filter(|a| **a).count();
    let percent = progress_percent(done, total);
    let counter = question_counter(index, total);
    let pending = snapshot.pending().map(str::to_owned);
    let show_explanation = snapshot.explanation_visible();
    let is_last = index + 1 == total;
    let score = snapshot.score();

    rsx! {
        div { class: "page quiz",
            header { class: "test-header",
                h2 { "Biology Quiz" }
                span { class: "muted", "Score: {score}/{done}" }
            }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {percent}%" }
            }

            ol { class: "question-chips",
                for (chip, was_answered) in answered.into_iter().enumerate() {
                    li {
                        button {
                            r#type: "button",
                            class: match (chip == index, was_answered) {
                                (true, _) => "chip current",
                                (false, true) => "chip answered",
                                (false, false) => "chip",
                            },
                            onclick: move |_| quiz.write().revisit(chip),
                            "{chip + 1}"
                        }
                    }
                }
            }

            section { class: "question-card",
                p { class: "muted", "{counter}" }
                h3 { "{question.text}" }
                ul { class: "options",
                    for option in question.options.iter().copied() {
                        li {
                            button {
                                r#type: "button",
                                class: if pending.as_deref() == Some(option) { "option selected" } else { "option" },
                                onclick: move |_| quiz.write().select(option),
                                "{option}"
                            }
                        }
                    }
                }
                if show_explanation {
                    div { class: "explanation",
                        p { strong { "Answer: " } "{question.correct_answer}" }
                        p { "{question.explanation}" }
                    }
                }
            }

            div { class: "test-nav",
                button {
                    class: "button secondary",
                    r#type: "button",
                    onclick: move |_| quiz.write().toggle_explanation(),
                    if show_explanation { "Hide explanation" } else { "Show explanation" }
                }
                button {
                    class: "button primary",
                    r#type: "button",
                    onclick: move |_| {
                        let completed = quiz.write().next();
                        if completed {
                            let percent = quiz.peek().percent();
                            report.call(percent);
                        }
                    },
                    if is_last { "Finish" } else { "Next" }
                }
            }
        }
    }
}
