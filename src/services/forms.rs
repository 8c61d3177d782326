//! Caller-side form validation for the login, register and post editors.
//!
//! The repository and session accept anything non-empty; these checks are
//! what the editors enforce before calling them. Validation reports every
//! failing field at once so a form can flag them all together.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::services::posts::{NewPost, Post, PostPatch};

const MIN_PASSWORD_CHARS: usize = 6;
const MIN_NAME_CHARS: usize = 2;
const MIN_TITLE_CHARS: usize = 10;
const MIN_EXCERPT_CHARS: usize = 20;
const MIN_CONTENT_CHARS: usize = 50;

/// Author recorded when no one is signed in.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Categories offered by the post editor as `(value, label)`.
pub const CATEGORY_OPTIONS: [(&str, &str); 5] = [
    ("react", "React"),
    ("javascript", "JavaScript"),
    ("css", "CSS"),
    ("web-development", "Web Development"),
    ("tutorial", "Tutorial"),
];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Excerpt,
    Content,
    Category,
    Image,
}

/// Failing fields mapped to their message. Empty means valid.
pub type FieldErrors = BTreeMap<Field, &'static str>;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.insert(Field::Email, "Email is invalid");
    }
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if char_len(password) < MIN_PASSWORD_CHARS {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    }
}

// =============================================================================
// LOGIN / REGISTER
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, "Name is required");
        } else if char_len(name) < MIN_NAME_CHARS {
            errors.insert(Field::Name, "Name must be at least 2 characters");
        }

        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        if self.confirm_password.is_empty() {
            errors.insert(Field::ConfirmPassword, "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }

        errors
    }
}

// =============================================================================
// POST EDITOR
// =============================================================================

/// Raw post editor input. `tags` is the comma-separated text box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub tags: String,
}

impl PostForm {
    /// Prefill the editor from an existing post.
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            image: post.image.clone(),
            tags: post.tags.join(", "),
        }
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.insert(Field::Title, "Title is required");
        } else if char_len(&self.title) < MIN_TITLE_CHARS {
            errors.insert(Field::Title, "Title must be at least 10 characters");
        }

        if self.excerpt.trim().is_empty() {
            errors.insert(Field::Excerpt, "Excerpt is required");
        } else if char_len(&self.excerpt) < MIN_EXCERPT_CHARS {
            errors.insert(Field::Excerpt, "Excerpt must be at least 20 characters");
        }

        if self.content.trim().is_empty() {
            errors.insert(Field::Content, "Content is required");
        } else if char_len(&self.content) < MIN_CONTENT_CHARS {
            errors.insert(Field::Content, "Content must be at least 50 characters");
        }

        if self.category.is_empty() {
            errors.insert(Field::Category, "Category is required");
        }

        if self.image.trim().is_empty() {
            errors.insert(Field::Image, "Image URL is required");
        }

        errors
    }

    /// Build a new post with trimmed fields. `author` is the signed-in user's name.
    #[must_use]
    pub fn into_new_post(self, author: Option<&str>) -> NewPost {
        let tags = parse_tags(&self.tags);
        NewPost {
            title: self.title.trim().to_owned(),
            excerpt: self.excerpt.trim().to_owned(),
            content: self.content.trim().to_owned(),
            category: self.category,
            author: author.unwrap_or(ANONYMOUS_AUTHOR).to_owned(),
            image: self.image.trim().to_owned(),
            tags,
            published_at: None,
        }
    }

    /// Build an edit patch. Author and publish date are left untouched.
    #[must_use]
    pub fn into_patch(self) -> PostPatch {
        let tags = parse_tags(&self.tags);
        PostPatch {
            title: Some(self.title.trim().to_owned()),
            excerpt: Some(self.excerpt.trim().to_owned()),
            content: Some(self.content.trim().to_owned()),
            category: Some(self.category),
            image: Some(self.image.trim().to_owned()),
            tags: Some(tags),
            ..PostPatch::default()
        }
    }

    /// Run the editor over an existing post: prefill, apply `edits`, validate.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the edited form is invalid.
    pub fn edit(post: &Post, edits: PostEdits) -> Result<PostPatch, FieldErrors> {
        let mut form = Self::from_post(post);
        form.apply(edits);
        let errors = form.validate();
        if errors.is_empty() { Ok(form.into_patch()) } else { Err(errors) }
    }

    fn apply(&mut self, edits: PostEdits) {
        let PostEdits { title, excerpt, content, category, image, tags } = edits;
        for (field, value) in [
            (&mut self.title, title),
            (&mut self.excerpt, excerpt),
            (&mut self.content, content),
            (&mut self.category, category),
            (&mut self.image, image),
            (&mut self.tags, tags),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Editor changes on top of a prefilled form. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostEdits {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub tags: Option<String>,
}

/// Split a comma-separated tag list, trimming each and dropping empties.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
