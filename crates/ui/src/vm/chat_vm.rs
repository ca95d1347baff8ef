use bridge_core::model::{ChatMessage, ChatRole};

use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::format_message_time;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatBubbleVm {
    pub from_user: bool,
    pub text: String,
    /// Sanitized HTML for assistant replies; user text is shown verbatim.
    pub html: Option<String>,
    pub time: String,
}

impl From<&ChatMessage> for ChatBubbleVm {
    fn from(message: &ChatMessage) -> Self {
        let from_user = message.role == ChatRole::User;
        Self {
            from_user,
            text: message.text.clone(),
            html: (!from_user).then(|| markdown_to_html(&message.text)),
            time: format_message_time(message.sent_at),
        }
    }
}

#[must_use]
pub fn map_chat(messages: &[ChatMessage]) -> Vec<ChatBubbleVm> {
    messages.iter().map(ChatBubbleVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::time::fixed_now;

    #[test]
    fn only_assistant_text_is_rendered_as_markdown() {
        let now = fixed_now();
        let bubbles = map_chat(&[
            ChatMessage::user("**why**?", now),
            ChatMessage::assistant("**because**", now),
        ]);
        assert!(bubbles[0].from_user);
        assert_eq!(bubbles[0].html, None);
        assert_eq!(bubbles[0].text, "**why**?");
        let html = bubbles[1].html.as_deref().expect("assistant html");
        assert!(html.contains("<strong>because</strong>"));
    }
}
