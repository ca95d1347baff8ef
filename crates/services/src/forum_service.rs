use std::sync::Arc;

use bridge_core::model::{
    ForumCategory, ForumPost, PostDraft, PostId, UserProfile, filter_posts, sample_posts,
};
use storage::repository::ForumRepository;

use crate::Clock;
use crate::error::ForumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: ForumCategory,
    pub post_count: u64,
}

#[derive(Clone)]
pub struct ForumService {
    clock: Clock,
    forum: Arc<dyn ForumRepository>,
}

impl ForumService {
    #[must_use]
    pub fn new(clock: Clock, forum: Arc<dyn ForumRepository>) -> Self {
        Self { clock, forum }
    }

    /// Publish a post under the author's display name.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::Post` for empty title or content, `Storage` on repository failures.
    pub async fn create_post(
        &self,
        author: &UserProfile,
        draft: PostDraft,
    ) -> Result<ForumPost, ForumError> {
        let post = draft.validate(
            Some(author.id()),
            author.display_name(),
            author.email().as_str(),
            self.clock.now(),
        )?;
        let id = self.forum.insert_post(&post).await?;
        tracing::info!(post_id = %id, author = %author.id(), "forum post created");
        Ok(post.with_id(id))
    }

    /// Newest first, narrowed by category tag and a case-insensitive search query.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::Storage` on repository failures.
    pub async fn list(
        &self,
        category: Option<ForumCategory>,
        query: &str,
    ) -> Result<Vec<ForumPost>, ForumError> {
        let posts = self.forum.list_recent_posts().await?;
        Ok(filter_posts(&posts, category, query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// # Errors
    ///
    /// Returns `ForumError::NotFound` for unknown posts.
    pub async fn like(&self, id: PostId) -> Result<u32, ForumError> {
        Ok(self.forum.increment_likes(id).await?)
    }

    /// Every category with the number of stored posts tagged with it.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::Storage` on repository failures.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, ForumError> {
        let mut summaries = Vec::with_capacity(ForumCategory::ALL.len());
        for category in ForumCategory::ALL {
            summaries.push(CategorySummary {
                category,
                post_count: self.forum.count_posts_tagged(category.slug()).await?,
            });
        }
        Ok(summaries)
    }

    /// Insert the starter threads when the board is empty. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::Storage` on repository failures.
    pub async fn seed_samples(&self) -> Result<usize, ForumError> {
        if self.forum.count_posts().await? > 0 {
            return Ok(0);
        }
        let samples = sample_posts(self.clock.now());
        for post in &samples {
            self.forum.insert_post(post).await?;
        }
        tracing::info!(count = samples.len(), "seeded sample forum posts");
        Ok(samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::model::{PostError, ProfileDraft, UserId};
    use bridge_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> ForumService {
        ForumService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn author() -> UserProfile {
        ProfileDraft {
            first_name: "Rosalind".into(),
            last_name: "Franklin".into(),
            email: "rosalind@example.com".into(),
        }
        .validate(UserId::generate())
        .unwrap()
    }

    #[tokio::test]
    async fn seeding_only_happens_once() {
        let forum = service();
        assert_eq!(forum.seed_samples().await.unwrap(), 4);
        assert_eq!(forum.seed_samples().await.unwrap(), 0);
        let posts = forum.list(None, "").await.unwrap();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].title(), "Tips for memorizing cell structures?");
    }

    #[tokio::test]
    async fn new_post_is_listed_first_with_author_name() {
        let forum = service();
        forum.seed_samples().await.unwrap();
        let post = forum
            .create_post(
                &author(),
                PostDraft {
                    title: "X-ray tips".into(),
                    content: "How do you read diffraction patterns?".into(),
                    tags: vec!["biology".into()],
                },
            )
            .await
            .unwrap();
        assert_eq!(post.author_name(), "Rosalind Franklin");

        let biology = forum
            .list(Some(ForumCategory::Biology), "")
            .await
            .unwrap();
        assert_eq!(biology.len(), 2);
        assert_eq!(biology[0].id(), post.id());
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let forum = service();
        let err = forum
            .create_post(
                &author(),
                PostDraft {
                    title: "Title".into(),
                    content: "  ".into(),
                    tags: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ForumError::Post(PostError::EmptyContent)));
    }

    #[tokio::test]
    async fn categories_count_tagged_posts() {
        let forum = service();
        forum.seed_samples().await.unwrap();
        let counts: Vec<(ForumCategory, u64)> = forum
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.category, s.post_count))
            .collect();
        assert_eq!(
            counts,
            [
                (ForumCategory::General, 0),
                (ForumCategory::Biology, 1),
                (ForumCategory::StudyGroups, 0)
            ]
        );
    }

    #[tokio::test]
    async fn large_boards_are_searched_and_counted_in_full() {
        let forum = service();
        forum.seed_samples().await.unwrap();
        for n in 0..250 {
            forum
                .create_post(
                    &author(),
                    PostDraft {
                        title: format!("Study group #{n}"),
                        content: "Meeting in the library.".into(),
                        tags: vec!["study-groups".into()],
                    },
                )
                .await
                .unwrap();
        }

        assert_eq!(forum.list(None, "").await.unwrap().len(), 254);
        let oldest = forum.list(None, "genetics").await.unwrap();
        assert_eq!(oldest.len(), 1);
        assert_eq!(
            forum
                .list(Some(ForumCategory::StudyGroups), "")
                .await
                .unwrap()
                .len(),
            250
        );

        let study_groups = forum
            .categories()
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.category == ForumCategory::StudyGroups)
            .unwrap();
        assert_eq!(study_groups.post_count, 250);
    }

    #[tokio::test]
    async fn likes_accumulate_and_unknown_posts_fail() {
        let forum = service();
        forum.seed_samples().await.unwrap();
        let first = forum.list(None, "genetics").await.unwrap()[0].id();
        assert_eq!(forum.like(first).await.unwrap(), 16);
        assert!(matches!(
            forum.like(PostId::new(404)).await,
            Err(ForumError::NotFound)
        ));
    }
}
