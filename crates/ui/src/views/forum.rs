use dioxus::prelude::*;

use bridge_core::model::{ForumCategory, PostDraft, PostId};
use services::ForumError;

use crate::context::AppContext;
use crate::toast::use_toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PostCardVm, map_posts, parse_tags_input};

#[derive(Clone, Debug, PartialEq, Eq)]
struct CategoryRow {
    category: ForumCategory,
    post_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ForumData {
    categories: Vec<CategoryRow>,
    posts: Vec<PostCardVm>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct NewPostForm {
    title: String,
    content: String,
    tags: String,
}

#[component]
pub fn ForumView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut toasts = use_toasts();

    let mut category = use_signal(|| None::<ForumCategory>);
    let mut query = use_signal(String::new);
    let mut composing = use_signal(|| false);
    let mut form = use_signal(NewPostForm::default);

    let list_ctx = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = list_ctx.clone();
        let category = category();
        let query = query();
        async move {
            let forum = ctx.forum();
            let categories = forum
                .categories()
                .await
                .map_err(|_| ViewError::Unknown)?
                .into_iter()
                .map(|summary| CategoryRow {
                    category: summary.category,
                    post_count: summary.post_count,
                })
                .collect();
            let posts = forum
                .list(category, &query)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(ForumData {
                categories,
                posts: map_posts(&posts, ctx.clock().now()),
            })
        }
    });

    let like_ctx = ctx.clone();
    let like = use_callback(move |id: PostId| {
        let forum = like_ctx.forum();
        spawn(async move {
            match forum.like(id).await {
                Ok(_) => resource.restart(),
                Err(err) => {
                    tracing::warn!(error = %err, post_id = %id, "like failed");
                    toasts.error(ViewError::Unknown.message());
                }
            }
        });
    });

    let publish = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(session) = ctx.session() else {
            toasts.error(ViewError::SignedOut.message());
            return;
        };
        let current = form.read().clone();
        let draft = PostDraft {
            title: current.title,
            content: current.content,
            tags: parse_tags_input(&current.tags),
        };
        let forum = ctx.forum();
        spawn(async move {
            match forum.create_post(&session.profile, draft).await {
                Ok(_) => {
                    toasts.success("Post published");
                    form.set(NewPostForm::default());
                    composing.set(false);
                    resource.restart();
                }
                Err(ForumError::Post(err)) => toasts.error(format!("Could not publish: {err}")),
                Err(err) => {
                    tracing::warn!(error = %err, "publishing post failed");
                    toasts.error(ViewError::Unknown.message());
                }
            }
        });
    };

    let state = view_state_from_resource(resource);
    let active = category();
    let draft = form.read().clone();

    rsx! {
        div { class: "page forum",
            header { class: "forum-header",
                h2 { "Community Forum" }
                button {
                    class: "button primary",
                    r#type: "button",
                    onclick: move |_| composing.set(!composing()),
                    if composing() { "Cancel" } else { "New post" }
                }
            }

            if composing() {
                form { class: "post-form", onsubmit: publish,
                    input {
                        r#type: "text",
                        placeholder: "Title",
                        value: "{draft.title}",
                        oninput: move |evt| form.write().title = evt.value(),
                    }
                    textarea {
                        placeholder: "Share your question or notes...",
                        value: "{draft.content}",
                        oninput: move |evt| form.write().content = evt.value(),
                    }
                    input {
                        r#type: "text",
                        placeholder: "Tags, comma separated (e.g. biology, study-groups)",
                        value: "{draft.tags}",
                        oninput: move |evt| form.write().tags = evt.value(),
                    }
                    button { class: "button primary", r#type: "submit", "Publish" }
                }
            }

            input {
                class: "search",
                r#type: "search",
                placeholder: "Search discussions...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "forum-body",
                        aside { class: "categories",
                            button {
                                r#type: "button",
                                class: if active.is_none() { "category active" } else { "category" },
                                onclick: move |_| category.set(None),
                                "All posts"
                            }
                            for row in data.categories {
                                button {
                                    r#type: "button",
                                    class: if active == Some(row.category) { "category active" } else { "category" },
                                    title: row.category.description(),
                                    onclick: move |_| category.set(Some(row.category)),
                                    "{row.category.name()} ({row.post_count})"
                                }
                            }
                        }
                        section { class: "posts",
                            if data.posts.is_empty() {
                                p { class: "muted", "No discussions match your search." }
                            }
                            for (id, post) in data.posts.into_iter().map(|post| (post.id, post)) {
                                PostCard { key: "{id}", post, like }
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
fn PostCard(post: PostCardVm, like: Callback<PostId>) -> Element {
    let id = post.id;

    rsx! {
        article { class: "post-card",
            header {
                span { class: "avatar", "{post.author_initial}" }
                div {
                    strong { "{post.author}" }
                    span { class: "muted", " · {post.posted}" }
                }
            }
            h3 { "{post.title}" }
            p { "{post.excerpt}" }
            ul { class: "tags",
                for tag in post.tags {
                    li { class: "tag", "#{tag}" }
                }
            }
            footer {
                button {
                    class: "link-button",
                    r#type: "button",
                    onclick: move |_| like.call(id),
                    "♥ {post.likes}"
                }
                span { class: "muted", "{post.replies} replies" }
            }
        }
    }
}
