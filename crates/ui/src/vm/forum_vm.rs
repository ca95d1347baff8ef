use chrono::{DateTime, Utc};

use bridge_core::model::{ForumPost, PostId, relative_time};

const EXCERPT_CHARS: usize = 180;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostCardVm {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub author_initial: String,
    pub posted: String,
    pub likes: u32,
    pub replies: u32,
    pub tags: Vec<String>,
}

impl PostCardVm {
    #[must_use]
    pub fn from_post(post: &ForumPost, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id(),
            title: post.title().to_owned(),
            excerpt: excerpt(post.content()),
            author: post.author_name().to_owned(),
            author_initial: post
                .author_name()
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
            posted: relative_time(post.created_at(), now),
            likes: post.likes(),
            replies: post.replies(),
            tags: post.tags().to_vec(),
        }
    }
}

#[must_use]
pub fn map_posts(posts: &[ForumPost], now: DateTime<Utc>) -> Vec<PostCardVm> {
    posts.iter().map(|p| PostCardVm::from_post(p, now)).collect()
}

fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

/// Split the comma-separated tag field of the new-post form.
#[must_use]
pub fn parse_tags_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
