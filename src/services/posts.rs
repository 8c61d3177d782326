//! Content repository — in-memory post collection with simulated latency.
//!
//! DESIGN
//! ======
//! The collection is owned by the repository and reachable only through its
//! operations. Every operation first suspends for the configured delay
//! (modeling a network round-trip), then takes the lock, so concurrent reads
//! such as posts + categories interleave freely.
//!
//! TRADE-OFFS
//! ==========
//! Mutations are expected one at a time. Two racing updates to the same post
//! resolve last-writer-wins; there is no versioning.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Date;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::LatencyConfig;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PostError {
    #[error("post not found: {0}")]
    NotFound(String),
}

impl crate::error::ErrorCode for PostError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_POST_NOT_FOUND",
        }
    }
}

/// Numeric post identifier. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Lenient integer parse for ids arriving as text (route params, CLI args):
/// leading whitespace and a `+` sign are skipped and parsing stops at the
/// first non-digit, so `"12"`, `" 12"` and `"12-edit"` all yield 12.
/// Text with no leading digits cannot name any post.
impl FromStr for PostId {
    type Err = PostError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits_end = unsigned.find(|c: char| !c.is_ascii_digit()).unwrap_or(unsigned.len());
        unsigned[..digits_end]
            .parse::<u64>()
            .map(Self)
            .map_err(|_| PostError::NotFound(raw.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub published_at: Date,
    pub image: String,
    pub tags: Vec<String>,
}

impl Post {
    /// Case-insensitive free-text match over title, excerpt and tags.
    /// `needle` must already be lowercased.
    fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Fields for a new post. Unset fields default to empty; `published_at`
/// defaults to today's date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub image: String,
    pub tags: Vec<String>,
    pub published_at: Option<Date>,
}

/// Shallow patch: only `Some` fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published_at: Option<Date>,
}

/// Derive a slug: lowercase, each run of whitespace becomes one hyphen.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    slug
}

// =============================================================================
// REPOSITORY
// =============================================================================

struct Collection {
    posts: Vec<Post>,
    next_id: u64,
}

pub struct PostRepository {
    collection: RwLock<Collection>,
    clock: Arc<dyn Clock>,
    latency: LatencyConfig,
}

impl PostRepository {
    /// Build a repository over `posts`. New ids continue after the largest seeded id.
    pub fn new(posts: Vec<Post>, clock: Arc<dyn Clock>, latency: LatencyConfig) -> Self {
        let next_id = posts.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        Self { collection: RwLock::new(Collection { posts, next_id }), clock, latency }
    }

    /// Repository pre-loaded with the demo fixture.
    pub fn seeded(clock: Arc<dyn Clock>, latency: LatencyConfig) -> Self {
        Self::new(super::fixture::seed_posts(), clock, latency)
    }

    /// List posts, newest first.
    ///
    /// `category` filters by exact match; `search` is a case-insensitive
    /// substring over title, excerpt and tags. Empty strings mean "no filter".
    /// Posts published on the same date keep their collection order.
    pub async fn list_posts(&self, category: Option<&str>, search: Option<&str>) -> Vec<Post> {
        self.clock.sleep(self.latency.content).await;

        let category = category.filter(|c| !c.is_empty());
        let needle = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

        let collection = self.collection.read().await;
        let mut posts: Vec<Post> = collection
            .posts
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
            .cloned()
            .collect();
        drop(collection);

        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        debug!(?category, search = ?needle, count = posts.len(), "listed posts");
        posts
    }

    /// # Errors
    ///
    /// Returns [`PostError::NotFound`] if no post has exactly this slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Post, PostError> {
        self.clock.sleep(self.latency.content).await;
        let collection = self.collection.read().await;
        collection
            .posts
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| PostError::NotFound(slug.to_owned()))
    }

    /// # Errors
    ///
    /// Returns [`PostError::NotFound`] if no post has this id.
    pub async fn get_post_by_id(&self, id: PostId) -> Result<Post, PostError> {
        self.clock.sleep(self.latency.content).await;
        let collection = self.collection.read().await;
        collection
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PostError::NotFound(id.to_string()))
    }

    /// Append a post with a fresh id and a slug derived from its title.
    pub async fn create_post(&self, data: NewPost) -> Post {
        self.clock.sleep(self.latency.content).await;
        let today = self.clock.now().date();

        let mut collection = self.collection.write().await;
        let id = PostId(collection.next_id);
        collection.next_id += 1;

        let post = Post {
            id,
            slug: slugify(&data.title),
            title: data.title,
            excerpt: data.excerpt,
            content: data.content,
            category: data.category,
            author: data.author,
            published_at: data.published_at.unwrap_or(today),
            image: data.image,
            tags: data.tags,
        };
        collection.posts.push(post.clone());
        info!(post_id = %id, slug = %post.slug, "post created");
        post
    }

    /// Shallow-merge `data` onto an existing post. Supplying a title always
    /// recomputes the slug, even when the title is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::NotFound`] if no post has this id.
    pub async fn update_post(&self, id: PostId, data: PostPatch) -> Result<Post, PostError> {
        self.clock.sleep(self.latency.content).await;

        let mut collection = self.collection.write().await;
        let post = collection
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;

        if let Some(title) = data.title {
            post.slug = slugify(&title);
            post.title = title;
        }
        if let Some(excerpt) = data.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = data.content {
            post.content = content;
        }
        if let Some(category) = data.category {
            post.category = category;
        }
        if let Some(author) = data.author {
            post.author = author;
        }
        if let Some(image) = data.image {
            post.image = image;
        }
        if let Some(tags) = data.tags {
            post.tags = tags;
        }
        if let Some(published_at) = data.published_at {
            post.published_at = published_at;
        }

        info!(post_id = %id, slug = %post.slug, "post updated");
        Ok(post.clone())
    }

    /// Remove a post permanently. Its id is never reassigned.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::NotFound`] if no post has this id.
    pub async fn delete_post(&self, id: PostId) -> Result<(), PostError> {
        self.clock.sleep(self.latency.content).await;

        let mut collection = self.collection.write().await;
        let index = collection
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;
        collection.posts.remove(index);
        info!(post_id = %id, remaining = collection.posts.len(), "post deleted");
        Ok(())
    }

    /// Distinct categories across all posts, in first-seen order.
    pub async fn list_categories(&self) -> Vec<String> {
        self.clock.sleep(self.latency.categories).await;

        let collection = self.collection.read().await;
        let mut categories: Vec<String> = Vec::new();
        for post in &collection.posts {
            if !categories.contains(&post.category) {
                categories.push(post.category.clone());
            }
        }
        categories
    }
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
