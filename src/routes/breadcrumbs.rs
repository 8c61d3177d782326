//! Breadcrumb trail derived from a path.

use serde::Serialize;

use super::HOME_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    pub href: String,
    /// The page being viewed; rendered as text rather than a link.
    pub current: bool,
}

/// Home followed by one crumb per path segment. Empty on the home page.
///
/// `/admin/posts/new` → Home › Admin › Posts › New (current).
#[must_use]
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let mut crumbs = Vec::with_capacity(segments.len() + 1);
    crumbs.push(Crumb { label: "Home".to_owned(), href: HOME_PATH.to_owned(), current: false });

    let mut href = String::new();
    for (index, segment) in segments.iter().enumerate() {
        href.push('/');
        href.push_str(segment);
        crumbs.push(Crumb { label: title_case(segment), href: href.clone(), current: index + 1 == segments.len() });
    }
    crumbs
}

/// `mastering-react-hooks` → `Mastering React Hooks`.
fn title_case(segment: &str) -> String {
    segment
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
#[path = "breadcrumbs_test.rs"]
mod tests;
