use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{PostId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PostError {
    #[error("post title cannot be empty")]
    EmptyTitle,

    #[error("post content cannot be empty")]
    EmptyContent,
}

// ─── Categories ───

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForumCategory {
    General,
    Biology,
    StudyGroups,
}

impl ForumCategory {
    pub const ALL: [Self; 3] = [Self::General, Self::Biology, Self::StudyGroups];

    /// Tag value a post must carry to fall in this category.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Biology => "biology",
            Self::StudyGroups => "study-groups",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::General => "General Discussion",
            Self::Biology => "Biology",
            Self::StudyGroups => "Study Groups",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::General => "General topics related to studying and academics",
            Self::Biology => "Discussions about biology topics",
            Self::StudyGroups => "Find and join study groups",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

// ─── Posts ───

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    id: PostId,
    author_id: Option<UserId>,
    author_name: String,
    author_email: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    likes: u32,
    replies: u32,
    tags: Vec<String>,
}

impl ForumPost {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_persisted(
        id: PostId,
        author_id: Option<UserId>,
        author_name: String,
        author_email: String,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
        likes: u32,
        replies: u32,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            author_id,
            author_name,
            author_email,
            title,
            content,
            created_at,
            likes,
            replies,
            tags,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> PostId {
        self.id
    }

    /// `None` for posts that were seeded rather than written by an account.
    #[must_use]
    pub fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    #[must_use]
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn likes(&self) -> u32 {
        self.likes
    }

    #[must_use]
    pub fn replies(&self) -> u32 {
        self.replies
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    fn matches(&self, category: Option<ForumCategory>, query: &str) -> bool {
        if let Some(category) = category
            && !self.tags.iter().any(|t| t == category.slug())
        {
            return false;
        }
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(query)
            || self.content.to_lowercase().contains(query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(query))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Validate into a post with a placeholder id.
    ///
    /// # Errors
    ///
    /// Returns `PostError` when the trimmed title or content is empty.
    pub fn validate(
        self,
        author_id: Option<UserId>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<ForumPost, PostError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PostError::EmptyTitle);
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(PostError::EmptyContent);
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.is_empty() {
            tags.push(ForumCategory::General.slug().to_owned());
        }

        Ok(ForumPost {
            id: PostId::new(0),
            author_id,
            author_name: author_name.into(),
            author_email: author_email.into(),
            title: title.to_owned(),
            content: content.to_owned(),
            created_at,
            likes: 0,
            replies: 0,
            tags,
        })
    }
}

/// Posts in `category` (if any) whose text or tags contain `query`, case-insensitively.
#[must_use]
pub fn filter_posts<'a>(
    posts: &'a [ForumPost],
    category: Option<ForumCategory>,
    query: &str,
) -> Vec<&'a ForumPost> {
    let query = query.trim().to_lowercase();
    posts
        .iter()
        .filter(|post| post.matches(category, &query))
        .collect()
}

#[must_use]
pub fn relative_time(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - created).num_hours();
    if hours < 1 {
        return "Just now".to_owned();
    }
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let days = hours / 24;
    format!("{days} day{} ago", plural(days))
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Starter threads shown on a fresh install.
#[must_use]
pub fn sample_posts(now: DateTime<Utc>) -> Vec<ForumPost> {
    let post = |id: u64,
                title: &str,
                content: &str,
                author: &str,
                email: &str,
                hours_ago: i64,
                likes: u32,
                replies: u32,
                tags: &[&str]| {
        ForumPost::from_persisted(
            PostId::new(id),
            None,
            author.to_owned(),
            email.to_owned(),
            title.to_owned(),
            content.to_owned(),
            now - Duration::hours(hours_ago),
            likes,
            replies,
            tags.iter().map(|t| (*t).to_owned()).collect(),
        )
    };
    vec![
        post(
            1,
            "Tips for memorizing cell structures?",
            "I'm struggling to remember all the organelles and their functions. Any advice?",
            "Emily Chen",
            "emily.chen@example.com",
            2,
            12,
            5,
            &["biology", "study-tips", "memorization"],
        ),
        post(
            2,
            "Looking for study partners for Organic Chemistry",
            "Anyone interested in forming a study group for Organic Chemistry? We can meet twice a week online.",
            "Marcus Johnson",
            "marcus.j@example.com",
            24,
            8,
            10,
            &["chemistry", "study-group", "organic-chemistry"],
        ),
        post(
            3,
            "Resources for Genetics exam preparation",
            "Can anyone recommend good resources for preparing for a genetics exam? Looking for practice questions and study guides.",
            "Alex Johnson",
            "alex.johnson@example.com",
            48,
            15,
            7,
            &["genetics", "resources", "exam-prep"],
        ),
        post(
            4,
            "How do you approach problem-based questions?",
            "I always struggle with problem-based questions in exams. What strategies do you use to break them down?",
            "Taylor Smith",
            "taylor.s@example.com",
            72,
            20,
            12,
            &["exam-strategies", "problem-solving", "study-tips"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft(title: &str, content: &str, tags: &[&str]) -> PostDraft {
        PostDraft {
            title: title.into(),
            content: content.into(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    #[test]
    fn tags_are_normalized_in_order() {
        let post = draft("Title", "Body", &[" Biology ", "", "exam", "BIOLOGY"])
            .validate(None, "Sam", "sam@example.com", fixed_now())
            .unwrap();
        assert_eq!(post.tags(), ["biology", "exam"]);
    }

    #[test]
    fn untagged_post_lands_in_general() {
        let post = draft("Title", "Body", &["  "])
            .validate(None, "Sam", "sam@example.com", fixed_now())
            .unwrap();
        assert_eq!(post.tags(), ["general"]);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let now = fixed_now();
        assert_eq!(
            draft(" ", "Body", &[]).validate(None, "a", "b", now),
            Err(PostError::EmptyTitle)
        );
        assert_eq!(
            draft("Title", "\n", &[]).validate(None, "a", "b", now),
            Err(PostError::EmptyContent)
        );
    }

    #[test]
    fn filter_by_category_and_query() {
        let posts = sample_posts(fixed_now());
        let biology = filter_posts(&posts, Some(ForumCategory::Biology), "");
        assert_eq!(biology.len(), 1);
        assert_eq!(biology[0].id(), PostId::new(1));

        let tips = filter_posts(&posts, None, "STUDY-TIPS");
        assert_eq!(tips.len(), 2);

        let chem = filter_posts(&posts, None, "organic");
        assert_eq!(chem.len(), 1);

        assert!(filter_posts(&posts, Some(ForumCategory::StudyGroups), "").is_empty());
        assert_eq!(filter_posts(&posts, None, "  ").len(), 4);
    }

    #[test]
    fn relative_time_buckets() {
        let now = fixed_now();
        assert_eq!(relative_time(now - Duration::minutes(59), now), "Just now");
        assert_eq!(relative_time(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_time(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(relative_time(now - Duration::hours(24), now), "1 day ago");
        assert_eq!(relative_time(now - Duration::hours(72), now), "3 days ago");
    }

    #[test]
    fn category_slug_round_trip() {
        for category in ForumCategory::ALL {
            assert_eq!(ForumCategory::from_slug(category.slug()), Some(category));
        }
        assert_eq!(ForumCategory::from_slug("chemistry"), None);
    }
}
