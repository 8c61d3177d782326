//! Demo posts loaded into a freshly seeded repository.

use time::macros::date;

use super::posts::{Post, PostId};

#[allow(clippy::too_many_arguments)]
fn post(
    id: u64,
    slug: &str,
    title: &str,
    excerpt: &str,
    content: &str,
    category: &str,
    author: &str,
    published_at: time::Date,
    image: &str,
    tags: &[&str],
) -> Post {
    Post {
        id: PostId(id),
        slug: slug.to_owned(),
        title: title.to_owned(),
        excerpt: excerpt.to_owned(),
        content: content.to_owned(),
        category: category.to_owned(),
        author: author.to_owned(),
        published_at,
        image: image.to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
    }
}

#[must_use]
#[allow(clippy::too_many_lines)]
pub fn seed_posts() -> Vec<Post> {
    vec![
        post(
            1,
            "getting-started-with-react",
            "Getting Started with React",
            "Learn the basics of React and start building modern web applications.",
            "React is a powerful JavaScript library for building user interfaces. In this comprehensive guide, \
             we will explore the fundamentals of React and how to get started with your first application...",
            "react",
            "John Doe",
            date!(2024-01-15),
            "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800",
            &["react", "javascript", "frontend"],
        ),
        post(
            2,
            "mastering-react-hooks",
            "Mastering React Hooks",
            "Deep dive into React Hooks and learn how to use them effectively.",
            "React Hooks revolutionized the way we write React components. This article explores useState, \
             useEffect, useContext, and other essential hooks...",
            "react",
            "Jane Smith",
            date!(2024-02-20),
            "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=800",
            &["react", "hooks", "advanced"],
        ),
        post(
            3,
            "react-router-guide",
            "Complete React Router Guide",
            "Everything you need to know about routing in React applications.",
            "React Router is the standard routing library for React. Learn how to implement navigation, \
             nested routes, and protected routes...",
            "react",
            "Mike Johnson",
            date!(2024-03-10),
            "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800",
            &["react", "routing", "spa"],
        ),
        post(
            4,
            "state-management-in-react",
            "State Management in React",
            "Compare different state management solutions for React applications.",
            "Managing state in React applications can be challenging. This article compares Context API, \
             Redux, Zustand, and other popular solutions...",
            "react",
            "Sarah Williams",
            date!(2024-03-25),
            "https://images.unsplash.com/photo-1516116216624-53e697fedbea?w=800",
            &["react", "state-management", "redux"],
        ),
        post(
            5,
            "building-responsive-layouts",
            "Building Responsive Layouts",
            "Create beautiful and responsive layouts with modern CSS.",
            "Responsive design is crucial for modern web applications. Learn CSS Grid, Flexbox, and media \
             queries to build layouts that work on all devices...",
            "css",
            "Tom Brown",
            date!(2024-04-05),
            "https://images.unsplash.com/photo-1507238691740-187a5b1d37b8?w=800",
            &["css", "responsive", "design"],
        ),
        post(
            6,
            "javascript-es6-features",
            "Modern JavaScript ES6+ Features",
            "Explore the latest JavaScript features and how to use them.",
            "ES6 and beyond introduced many powerful features to JavaScript. Learn about arrow functions, \
             destructuring, async/await, and more...",
            "javascript",
            "Emma Davis",
            date!(2024-04-18),
            "https://images.unsplash.com/photo-1579468118864-1b9ea3c0db4a?w=800",
            &["javascript", "es6", "modern-js"],
        ),
    ]
}
