use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type ArticleId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    /// Topic tags; searching matches them like the text fields.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parses a tab label; `"All"` in any case selects everything.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label)
        }
    }

    fn matches(&self, article: &Article) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => article.category.to_lowercase() == *name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reactions {
    pub liked: bool,
    pub bookmarked: bool,
}

/// Articles plus the reader's filters and reactions.
#[derive(Debug, Clone, Default)]
pub struct ArticleFeed {
    articles: Vec<Article>,
    category: CategoryFilter,
    search: String,
    reactions: HashMap<ArticleId, Reactions>,
    following: HashSet<String>,
}

impl ArticleFeed {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Stores the lower-cased term; surrounding whitespace is kept as typed.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    fn matches_search(&self, article: &Article) -> bool {
        self.search.is_empty()
            || article.title.to_lowercase().contains(&self.search)
            || article.excerpt.to_lowercase().contains(&self.search)
            || article.category.to_lowercase().contains(&self.search)
            || article
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&self.search))
    }

    /// Articles passing both the category filter and the search term, in feed order.
    pub fn visible(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| self.category.matches(a) && self.matches_search(a))
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<ArticleId> {
        self.visible().into_iter().map(|a| a.id.clone()).collect()
    }

    fn ensure_known(&self, id: &str) -> Result<(), DomainError> {
        if self.articles.iter().any(|a| a.id == id) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Article not found: {}", id)))
        }
    }

    pub fn reactions(&self, id: &str) -> Reactions {
        self.reactions.get(id).copied().unwrap_or_default()
    }

    /// Flips the like flag and returns the new value.
    pub fn toggle_like(&mut self, id: &str) -> Result<bool, DomainError> {
        self.ensure_known(id)?;
        let entry = self.reactions.entry(id.to_string()).or_default();
        entry.liked = !entry.liked;
        Ok(entry.liked)
    }

    /// Flips the bookmark flag and returns the new value.
    pub fn toggle_bookmark(&mut self, id: &str) -> Result<bool, DomainError> {
        self.ensure_known(id)?;
        let entry = self.reactions.entry(id.to_string()).or_default();
        entry.bookmarked = !entry.bookmarked;
        Ok(entry.bookmarked)
    }

    pub fn is_following(&self, author: &str) -> bool {
        self.following.contains(author)
    }

    /// Follows or unfollows an author and returns whether they are now followed.
    pub fn toggle_follow(&mut self, author: &str) -> bool {
        if self.following.remove(author) {
            false
        } else {
            self.following.insert(author.to_string());
            true
        }
    }
}
