//! Admin dashboard statistics.

use serde::Serialize;

use crate::services::posts::{Post, PostRepository};

/// How many posts the dashboard's "recent" list shows.
pub const RECENT_POST_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_posts: usize,
    pub categories: usize,
    pub recent_posts: Vec<Post>,
}

/// Load posts and categories concurrently and summarize them.
pub async fn dashboard_stats(repo: &PostRepository) -> DashboardStats {
    let (mut posts, categories) = tokio::join!(repo.list_posts(None, None), repo.list_categories());
    let total_posts = posts.len();
    posts.truncate(RECENT_POST_LIMIT);
    DashboardStats { total_posts, categories: categories.len(), recent_posts: posts }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
