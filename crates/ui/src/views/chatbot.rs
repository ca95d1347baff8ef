use dioxus::prelude::*;

use bridge_core::model::{ChatMessage, ChatTranscript};

use crate::context::AppContext;
use crate::vm::map_chat;

#[component]
pub fn ChatbotView() -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let chat = ctx.chat();
    let enabled = chat.enabled();

    let mut transcript = use_signal(move || ChatTranscript::with_greeting(clock.now()));
    let mut draft = use_signal(String::new);
    let mut waiting = use_signal(|| false);

    let send = move |evt: FormEvent| {
        evt.prevent_default();
        let text = draft().trim().to_owned();
        if text.is_empty() || waiting() {
            return;
        }
        draft.set(String::new());
        transcript.write().push(ChatMessage::user(text.clone(), clock.now()));
        waiting.set(true);

        let chat = chat.clone();
        spawn(async move {
            let reply = chat.reply_or_fallback(&text).await;
            transcript
                .write()
                .push(ChatMessage::assistant(reply, clock.now()));
            waiting.set(false);
        });
    };

    let bubbles = map_chat(transcript.read().messages());

    rsx! {
        div { class: "page chatbot",
            header {
                h2 { "Study Assistant" }
                if !enabled {
                    p { class: "notice", "The assistant is offline. Set BRAIN_AI_API_KEY to enable it." }
                }
            }

            div { class: "chat-log",
                for (index, bubble) in bubbles.into_iter().enumerate() {
                    div {
                        key: "{index}",
                        class: if bubble.from_user { "bubble bubble-user" } else { "bubble bubble-bot" },
                        if let Some(html) = bubble.html {
                            div { class: "bubble-text", dangerous_inner_html: html }
                        } else {
                            p { class: "bubble-text", "{bubble.text}" }
                        }
                        span { class: "bubble-time", "{bubble.time}" }
                    }
                }
                if waiting() {
                    div { class: "bubble bubble-bot typing", "Thinking..." }
                }
            }

            form { class: "chat-input", onsubmit: send,
                input {
                    r#type: "text",
                    placeholder: "Ask a biology question...",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button { class: "button primary", r#type: "submit", disabled: waiting(), "Send" }
            }
        }
    }
}
