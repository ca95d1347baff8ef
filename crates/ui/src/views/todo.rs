use dioxus::prelude::*;

use bridge_core::model::{TodoDraft, TodoId};
use services::{PlannerError, TodoUpdate};

use crate::context::AppContext;
use crate::toast::use_toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TodoCounts, TodoRowVm, count_todos, map_todos, parse_due_input};

#[derive(Clone, Debug, PartialEq)]
enum TodoAction {
    Add { title: String, due: String },
    Toggle(TodoId),
    Save { id: TodoId, title: String, due: String },
    Delete(TodoId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TodoData {
    rows: Vec<TodoRowVm>,
    counts: TodoCounts,
}

#[component]
pub fn TodoView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut toasts = use_toasts();

    let list_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = list_ctx.clone();
        async move {
            let session = ctx.session().ok_or(ViewError::SignedOut)?;
            let todos = ctx
                .planner()
                .list(session.user_id())
                .await
                .map_err(|_| ViewError::Unknown)?;
            let rows = map_todos(&todos, ctx.clock().today());
            let counts = count_todos(&rows);
            Ok(TodoData { rows, counts })
        }
    });

    let run = use_callback(move |action: TodoAction| {
        let Some(session) = ctx.session() else {
            toasts.error(ViewError::SignedOut.message());
            return;
        };
        let user_id = session.user_id();
        let planner = ctx.planner();
        spawn(async move {
            let outcome = match action {
                TodoAction::Add { title, due } => planner
                    .add(user_id, TodoDraft::new(title, parse_due_input(&due)))
                    .await
                    .map(|_| Some("Task added")),
                TodoAction::Toggle(id) => planner.toggle(user_id, id).await.map(|_| None),
                TodoAction::Save { id, title, due } => planner
                    .update(
                        user_id,
                        id,
                        TodoUpdate {
                            title: Some(title),
                            due_date: parse_due_input(&due),
                        },
                    )
                    .await
                    .map(|_| Some("Task updated successfully")),
                TodoAction::Delete(id) => planner
                    .delete(user_id, id)
                    .await
                    .map(|()| Some("Task deleted")),
            };
            match outcome {
                Ok(Some(message)) => toasts.success(message),
                Ok(None) => {}
                Err(PlannerError::Todo(_)) => toasts.error("Please enter a task title"),
                Err(err) => {
                    tracing::warn!(error = %err, "planner action failed");
                    toasts.error(ViewError::Unknown.message());
                }
            }
            resource.restart();
        });
    });

    let mut new_title = use_signal(String::new);
    let mut new_due = use_signal(String::new);
    let editing = use_signal(|| None::<TodoId>);

    let add = move |evt: FormEvent| {
        evt.prevent_default();
        run.call(TodoAction::Add {
            title: new_title(),
            due: new_due(),
        });
        new_title.set(String::new());
        new_due.set(String::new());
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page todo",
            h2 { "Study Planner" }

            form { class: "todo-form", onsubmit: add,
                input {
                    r#type: "text",
                    placeholder: "What do you need to study?",
                    value: "{new_title}",
                    oninput: move |evt| new_title.set(evt.value()),
                }
                input {
                    r#type: "date",
                    value: "{new_due}",
                    oninput: move |evt| new_due.set(evt.value()),
                }
                button { class: "button primary", r#type: "submit", "Add task" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    p { class: "muted",
                        "{data.counts.done}/{data.counts.total} done"
                        if data.counts.overdue > 0 {
                            " · {data.counts.overdue} overdue"
                        }
                    }
                    if data.rows.is_empty() {
                        p { class: "muted", "No tasks yet. Add your first study task above." }
                    } else {
                        ul { class: "todo-list",
                            for (id, row) in data.rows.into_iter().map(|row| (row.id, row)) {
                                TodoItem { key: "{id}", row, editing, run }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "page-error", {err.message()} }
                },
            }
        }
    }
}

#[component]
fn TodoItem(row: TodoRowVm, editing: Signal<Option<TodoId>>, run: Callback<TodoAction>) -> Element {
    let mut editing = editing;
    let id = row.id;
    let mut title = use_signal(|| row.title.clone());
    let mut due = use_signal(|| row.due_input.clone());
    let is_editing = editing() == Some(id);

    let class = match (row.completed, row.overdue) {
        (true, _) => "todo-item done",
        (false, true) => "todo-item overdue",
        (false, false) => "todo-item",
    };

    if is_editing {
        return rsx! {
            li { class: "todo-item editing",
                input {
                    r#type: "text",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
                input {
                    r#type: "date",
                    value: "{due}",
                    oninput: move |evt| due.set(evt.value()),
                }
                button {
                    class: "button primary",
                    r#type: "button",
                    onclick: move |_| {
                        run.call(TodoAction::Save { id, title: title(), due: due() });
                        editing.set(None);
                    },
                    "Save"
                }
                button {
                    class: "button secondary",
                    r#type: "button",
                    onclick: move |_| editing.set(None),
                    "Cancel"
                }
            }
        };
    }

    rsx! {
        li { class: class,
            input {
                r#type: "checkbox",
                checked: row.completed,
                onchange: move |_| run.call(TodoAction::Toggle(id)),
            }
            span { class: "todo-title", "{row.title}" }
            span { class: "todo-due", "{row.due_label}" }
            button {
                class: "link-button",
                r#type: "button",
                onclick: move |_| editing.set(Some(id)),
                "Edit"
            }
            button {
                class: "link-button danger",
                r#type: "button",
                onclick: move |_| run.call(TodoAction::Delete(id)),
                "Delete"
            }
        }
    }
}
