use crate::application::feed_service::FeedService;
use crate::domain::article::ArticleId;
use crate::infrastructure::debounce::Debouncer;
use crate::presentation::handlers::UiError;
use crate::presentation::view::{ViewEvent, ViewObserver};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{instrument, trace};

/// Binds category tabs, the search box and reaction buttons to the feed.
pub struct FeedController {
    feed: FeedService,
    observer: Arc<dyn ViewObserver>,
    search: Debouncer,
}

impl FeedController {
    /// Must be called inside a tokio runtime; debounced searches run on it.
    pub fn new(
        feed: FeedService,
        observer: Arc<dyn ViewObserver>,
        search_debounce: Duration,
    ) -> Result<Self> {
        let runtime =
            Handle::try_current().context("feed controller must be created inside a tokio runtime")?;
        Ok(Self {
            feed,
            observer,
            search: Debouncer::new(search_debounce, runtime),
        })
    }

    pub fn feed(&self) -> &FeedService {
        &self.feed
    }

    #[instrument(skip(self))]
    pub async fn select_category(&self, label: &str) -> Vec<ArticleId> {
        let visible = self.feed.select_category(label).await;
        self.observer.notify(ViewEvent::FeedChanged(visible.clone()));
        visible
    }

    /// Re-filters once typing pauses; a newer keystroke cancels the pending filter.
    pub fn search_input(&mut self, text: &str) {
        trace!(len = text.len(), "Search input");
        let feed = self.feed.clone();
        let observer = self.observer.clone();
        let term = text.to_string();
        self.search.schedule(async move {
            let visible = feed.apply_search(&term).await;
            observer.notify(ViewEvent::FeedChanged(visible));
        });
    }

    /// Clicking a topic tag searches for it.
    pub fn topic_selected(&mut self, topic: &str) {
        self.search_input(topic.trim());
    }

    /// Escape clears the search box.
    pub fn escape(&mut self) {
        self.search_input("");
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    #[instrument(skip(self))]
    pub async fn toggle_like(&self, article_id: &str) -> Result<bool, UiError> {
        let liked = self.feed.toggle_like(article_id).await.map_err(|e| {
            let err = UiError::from(e);
            err.log();
            err
        })?;
        self.observer.notify(ViewEvent::LikeChanged {
            article_id: article_id.to_string(),
            liked,
        });
        Ok(liked)
    }

    #[instrument(skip(self))]
    pub async fn toggle_bookmark(&self, article_id: &str) -> Result<bool, UiError> {
        let bookmarked = self.feed.toggle_bookmark(article_id).await.map_err(|e| {
            let err = UiError::from(e);
            err.log();
            err
        })?;
        self.observer.notify(ViewEvent::BookmarkChanged {
            article_id: article_id.to_string(),
            bookmarked,
        });
        Ok(bookmarked)
    }

    #[instrument(skip(self))]
    pub async fn toggle_follow(&self, author: &str) -> bool {
        let following = self.feed.toggle_follow(author).await;
        self.observer.notify(ViewEvent::FollowChanged {
            author: author.to_string(),
            following,
        });
        following
    }
}
