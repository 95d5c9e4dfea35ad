use crate::domain::article::{Article, ArticleFeed, ArticleId, CategoryFilter, Reactions};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Shared handle over the reader's feed; clones see the same state.
#[derive(Clone, Default)]
pub struct FeedService {
    feed: Arc<RwLock<ArticleFeed>>,
}

impl FeedService {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            feed: Arc::new(RwLock::new(ArticleFeed::new(articles))),
        }
    }

    /// Parses a JSON array of articles.
    pub fn from_json(json: &str) -> Result<Self> {
        let articles: Vec<Article> = serde_json::from_str(json)?;
        Ok(Self::new(articles))
    }

    #[instrument(skip(self))]
    pub async fn select_category(&self, label: &str) -> Vec<ArticleId> {
        let mut feed = self.feed.write().await;
        feed.set_category(CategoryFilter::from_label(label));
        let visible = feed.visible_ids();
        debug!(category = ?feed.category(), visible = visible.len(), "Category selected");
        visible
    }

    #[instrument(skip(self))]
    pub async fn apply_search(&self, term: &str) -> Vec<ArticleId> {
        let mut feed = self.feed.write().await;
        feed.set_search(term);
        let visible = feed.visible_ids();
        debug!(visible = visible.len(), "Search applied");
        visible
    }

    pub async fn visible_ids(&self) -> Vec<ArticleId> {
        self.feed.read().await.visible_ids()
    }

    pub async fn search_term(&self) -> String {
        self.feed.read().await.search_term().to_string()
    }

    pub async fn reactions(&self, id: &str) -> Reactions {
        self.feed.read().await.reactions(id)
    }

    #[instrument(skip(self))]
    pub async fn toggle_like(&self, id: &str) -> Result<bool> {
        let liked = self.feed.write().await.toggle_like(id)?;
        debug!(article_id = id, liked = liked, "Like toggled");
        Ok(liked)
    }

    #[instrument(skip(self))]
    pub async fn toggle_bookmark(&self, id: &str) -> Result<bool> {
        let bookmarked = self.feed.write().await.toggle_bookmark(id)?;
        debug!(article_id = id, bookmarked = bookmarked, "Bookmark toggled");
        Ok(bookmarked)
    }

    #[instrument(skip(self))]
    pub async fn toggle_follow(&self, author: &str) -> bool {
        let following = self.feed.write().await.toggle_follow(author);
        debug!(author = author, following = following, "Follow toggled");
        following
    }
}
