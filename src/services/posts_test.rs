use super::*;
use crate::clock::SystemClock;
use crate::state::test_helpers;
use std::time::Duration;
use time::macros::date;

fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id.0).collect()
}

// =============================================================================
// slugify
// =============================================================================

#[test]
fn slugify_lowercases_and_hyphenates() {
    assert_eq!(slugify("Hello World Testing"), "hello-world-testing");
    assert_eq!(slugify("New Title Here"), "new-title-here");
}

#[test]
fn slugify_collapses_whitespace_runs() {
    assert_eq!(slugify("Tabs\tand   spaces\n\nmix"), "tabs-and-spaces-mix");
}

#[test]
fn slugify_keeps_punctuation_and_edge_whitespace() {
    assert_eq!(slugify("Modern JavaScript ES6+ Features"), "modern-javascript-es6+-features");
    assert_eq!(slugify(" padded "), "-padded-");
}

// =============================================================================
// PostId parsing
// =============================================================================

#[test]
fn post_id_parses_leading_integer() {
    assert_eq!("12".parse::<PostId>().unwrap(), PostId(12));
    assert_eq!("  7".parse::<PostId>().unwrap(), PostId(7));
    assert_eq!("+3".parse::<PostId>().unwrap(), PostId(3));
    assert_eq!("4-edit".parse::<PostId>().unwrap(), PostId(4));
}

#[test]
fn post_id_without_digits_is_not_found() {
    assert_eq!("abc".parse::<PostId>().unwrap_err(), PostError::NotFound("abc".into()));
    assert!("".parse::<PostId>().is_err());
    assert!("-1".parse::<PostId>().is_err());
}

// =============================================================================
// list_posts
// =============================================================================

#[tokio::test]
async fn list_all_sorted_newest_first() {
    let repo = test_helpers::repo();
    let posts = repo.list_posts(None, None).await;
    assert_eq!(ids(&posts), vec![6, 5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn list_by_category_is_exact_match() {
    let repo = test_helpers::repo();

    let react = repo.list_posts(Some("react"), None).await;
    assert_eq!(react.len(), 4);
    assert!(react.iter().all(|p| p.category == "react"));

    assert!(repo.list_posts(Some("React"), None).await.is_empty());
    assert!(repo.list_posts(Some("reac"), None).await.is_empty());
}

#[tokio::test]
async fn search_hooks_finds_one_post() {
    let repo = test_helpers::repo();
    let posts = repo.list_posts(None, Some("hooks")).await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Mastering React Hooks");
}

#[tokio::test]
async fn search_is_case_insensitive_over_title_excerpt_and_tags() {
    let repo = test_helpers::repo();

    // title
    assert_eq!(ids(&repo.list_posts(None, Some("ROUTER")).await), vec![3]);
    // excerpt only
    assert_eq!(ids(&repo.list_posts(None, Some("beautiful")).await), vec![5]);
    // tag substring only
    assert_eq!(ids(&repo.list_posts(None, Some("modern-j")).await), vec![6]);
}

#[tokio::test]
async fn search_ignores_content_and_author() {
    let repo = test_helpers::repo();
    assert!(repo.list_posts(None, Some("zustand")).await.is_empty());
    assert!(repo.list_posts(None, Some("Emma")).await.is_empty());
}

#[tokio::test]
async fn category_and_search_compose() {
    let repo = test_helpers::repo();
    assert_eq!(ids(&repo.list_posts(Some("react"), Some("state")).await), vec![4]);
    assert!(repo.list_posts(Some("css"), Some("hooks")).await.is_empty());
}

#[tokio::test]
async fn empty_filters_mean_no_filter() {
    let repo = test_helpers::repo();
    assert_eq!(repo.list_posts(Some(""), Some("")).await.len(), 6);
}

#[tokio::test]
async fn same_date_posts_are_both_returned() {
    let repo = test_helpers::repo();
    let a = repo
        .create_post(NewPost { title: "Alpha Post".into(), published_at: Some(date!(2030-01-01)), ..NewPost::default() })
        .await;
    let b = repo
        .create_post(NewPost { title: "Beta Post".into(), published_at: Some(date!(2030-01-01)), ..NewPost::default() })
        .await;

    let posts = repo.list_posts(None, None).await;
    let mut top: Vec<u64> = ids(&posts[..2]);
    top.sort_unstable();
    assert_eq!(top, vec![a.id.0, b.id.0]);
}

// =============================================================================
// get_post_by_slug / get_post_by_id
// =============================================================================

#[tokio::test]
async fn every_post_is_reachable_by_its_slug() {
    let repo = test_helpers::repo();
    for post in repo.list_posts(None, None).await {
        assert_eq!(repo.get_post_by_slug(&post.slug).await.unwrap().id, post.id);
    }
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let repo = test_helpers::repo();
    let err = repo.get_post_by_slug("no-such-post").await.unwrap_err();
    assert_eq!(err, PostError::NotFound("no-such-post".into()));
}

#[tokio::test]
async fn get_by_id_hits_and_misses() {
    let repo = test_helpers::repo();
    assert_eq!(repo.get_post_by_id(PostId(2)).await.unwrap().slug, "mastering-react-hooks");
    assert_eq!(repo.get_post_by_id(PostId(99)).await.unwrap_err(), PostError::NotFound("99".into()));
}

#[tokio::test]
async fn get_by_textual_id_coerces_to_number() {
    let repo = test_helpers::repo();
    let id: PostId = "3".parse().unwrap();
    assert_eq!(repo.get_post_by_id(id).await.unwrap().slug, "react-router-guide");
}

// =============================================================================
// create_post
// =============================================================================

#[tokio::test]
async fn create_then_get_round_trips_slug() {
    let repo = test_helpers::repo();
    let created = repo.create_post(NewPost { title: "Hello World Testing".into(), ..NewPost::default() }).await;

    let fetched = repo.get_post_by_id(created.id).await.unwrap();
    assert_eq!(fetched.slug, "hello-world-testing");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_assigns_next_id_and_todays_date() {
    let (repo, _clock) = test_helpers::repo_with_clock();
    let created = repo
        .create_post(NewPost {
            title: "Fresh Post Title".into(),
            category: "rust".into(),
            tags: vec!["async".into()],
            ..NewPost::default()
        })
        .await;

    assert_eq!(created.id, PostId(7));
    assert_eq!(created.published_at, test_helpers::NOW.date());
    assert_eq!(created.category, "rust");
    assert_eq!(created.tags, vec!["async".to_owned()]);
    assert_eq!(repo.list_posts(None, None).await.len(), 7);
}

#[tokio::test]
async fn ids_are_never_reused_after_delete() {
    let repo = test_helpers::repo();
    repo.delete_post(PostId(6)).await.unwrap();
    let created = repo.create_post(NewPost { title: "After Delete".into(), ..NewPost::default() }).await;
    assert_eq!(created.id, PostId(7));
    let next = repo.create_post(NewPost { title: "Next One".into(), ..NewPost::default() }).await;
    assert_eq!(next.id, PostId(8));
}

#[tokio::test]
async fn create_on_empty_repository_starts_at_one() {
    let (_, clock) = test_helpers::repo_with_clock();
    let repo = PostRepository::new(Vec::new(), clock, LatencyConfig::none());
    let created = repo.create_post(NewPost { title: "First".into(), ..NewPost::default() }).await;
    assert_eq!(created.id, PostId(1));
    assert_eq!(repo.list_categories().await, vec![String::new()]);
}

// =============================================================================
// update_post
// =============================================================================

#[tokio::test]
async fn update_title_recomputes_slug_and_keeps_other_fields() {
    let repo = test_helpers::repo();
    let before = repo.get_post_by_id(PostId(1)).await.unwrap();

    let updated = repo
        .update_post(PostId(1), PostPatch { title: Some("New Title Here".into()), ..PostPatch::default() })
        .await
        .unwrap();

    assert_eq!(updated.slug, "new-title-here");
    assert_eq!(updated.title, "New Title Here");
    assert_eq!(updated.content, before.content);
    assert_eq!(updated.author, before.author);
    assert_eq!(updated.published_at, before.published_at);
    assert_eq!(updated.id, before.id);
    assert_eq!(repo.get_post_by_slug("new-title-here").await.unwrap().id, PostId(1));
    assert!(repo.get_post_by_slug(&before.slug).await.is_err());
}

#[tokio::test]
async fn update_without_title_keeps_slug() {
    let repo = test_helpers::repo();
    let updated = repo
        .update_post(
            PostId(5),
            PostPatch { category: Some("design".into()), published_at: Some(date!(2025-01-01)), ..PostPatch::default() },
        )
        .await
        .unwrap();

    assert_eq!(updated.slug, "building-responsive-layouts");
    assert_eq!(updated.category, "design");
    assert_eq!(updated.published_at, date!(2025-01-01));
    assert_eq!(ids(&repo.list_posts(None, None).await)[0], 5);
}

#[tokio::test]
async fn update_with_same_title_still_recomputes_slug() {
    let repo = test_helpers::repo();
    // Post 3's stored slug does not match its title; resubmitting the title normalizes it.
    let updated = repo
        .update_post(PostId(3), PostPatch { title: Some("Complete React Router Guide".into()), ..PostPatch::default() })
        .await
        .unwrap();
    assert_eq!(updated.slug, "complete-react-router-guide");
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let repo = test_helpers::repo();
    let err = repo.update_post(PostId(42), PostPatch::default()).await.unwrap_err();
    assert_eq!(err, PostError::NotFound("42".into()));
}

// =============================================================================
// delete_post
// =============================================================================

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let repo = test_helpers::repo();
    repo.delete_post(PostId(2)).await.unwrap();

    assert_eq!(repo.get_post_by_id(PostId(2)).await.unwrap_err(), PostError::NotFound("2".into()));
    assert!(repo.list_posts(None, Some("hooks")).await.is_empty());
    assert_eq!(repo.list_posts(None, None).await.len(), 5);
}

#[tokio::test]
async fn delete_twice_fails_second_time() {
    let repo = test_helpers::repo();
    repo.delete_post(PostId(1)).await.unwrap();
    assert!(matches!(repo.delete_post(PostId(1)).await, Err(PostError::NotFound(_))));
}

// =============================================================================
// list_categories
// =============================================================================

#[tokio::test]
async fn categories_are_distinct() {
    let repo = test_helpers::repo();
    let mut categories = repo.list_categories().await;
    categories.sort();
    assert_eq!(categories, vec!["css", "javascript", "react"]);
}

#[tokio::test]
async fn categories_follow_mutations() {
    let repo = test_helpers::repo();
    repo.delete_post(PostId(5)).await.unwrap();
    repo.create_post(NewPost { title: "Ownership Explained".into(), category: "rust".into(), ..NewPost::default() })
        .await;

    let mut categories = repo.list_categories().await;
    categories.sort();
    assert_eq!(categories, vec!["javascript", "react", "rust"]);
}

// =============================================================================
// latency
// =============================================================================

#[tokio::test]
async fn operations_request_configured_delays() {
    let (repo, clock) = test_helpers::repo_with_latency(LatencyConfig::default());
    repo.list_posts(None, None).await;
    repo.list_categories().await;
    let _ = repo.get_post_by_slug("x").await;

    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_millis(500), Duration::from_millis(300), Duration::from_millis(500)]
    );
}

#[tokio::test(start_paused = true)]
async fn concurrent_reads_overlap_their_delays() {
    let repo = PostRepository::seeded(Arc::new(SystemClock), LatencyConfig::default());
    let start = tokio::time::Instant::now();

    let (posts, categories) = tokio::join!(repo.list_posts(None, None), repo.list_categories());

    assert_eq!(posts.len(), 6);
    assert_eq!(categories.len(), 3);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_millis(800), "delays should overlap, took {elapsed:?}");
}

#[test]
fn post_error_code() {
    use crate::error::ErrorCode;
    assert_eq!(PostError::NotFound("1".into()).error_code(), "E_POST_NOT_FOUND");
}

#[test]
fn post_serializes_with_camel_case_and_iso_date() {
    let post = crate::services::fixture::seed_posts().remove(0);
    let json = serde_json::to_value(&post).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["publishedAt"], "2024-01-15");
    assert_eq!(json["tags"], serde_json::json!(["react", "javascript", "frontend"]));
}
