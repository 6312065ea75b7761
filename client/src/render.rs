//! Terminal rendering of posts.

use colored::Colorize;
use tabled::{Table, Tabled};

use crate::browse::{CategoryFilter, PostBrowser};
use crate::comments::Comment;
use crate::normalize::DisplayPost;

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Excerpt")]
    excerpt: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Id")]
    id: String,
}

#[derive(Tabled)]
struct AdminRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Id")]
    id: String,
}

/// The current page of the home list, with a page indicator.
pub fn post_page(browser: &PostBrowser) -> String {
    let rows: Vec<CardRow> = browser
        .page()
        .into_iter()
        .map(|p| CardRow {
            title: p.title.clone(),
            excerpt: p.excerpt.clone(),
            categories: p.categories.join(", "),
            id: p.id.clone(),
        })
        .collect();

    if rows.is_empty() {
        return "No posts found.".to_string();
    }

    let mut out = Table::new(rows).to_string();
    let mut filters = Vec::new();
    if !browser.search().is_empty() {
        filters.push(format!("search \"{}\"", browser.search()));
    }
    if let CategoryFilter::Named(name) = browser.category() {
        filters.push(format!("category {name}"));
    }
    if !filters.is_empty() {
        out.push_str(&format!("\nFiltered by {}", filters.join(", ")));
    }

    let total = browser.total_pages();
    if total > 1 {
        out.push_str(&format!("\nPage {} of {}", browser.current_page(), total));
    }
    out
}

pub fn admin_table(posts: &[DisplayPost]) -> String {
    if posts.is_empty() {
        return "No posts available.".to_string();
    }

    let rows: Vec<AdminRow> = posts
        .iter()
        .map(|p| AdminRow {
            title: p.title.clone(),
            author: p.author.clone(),
            published: p.published.clone(),
            id: p.id.clone(),
        })
        .collect();
    Table::new(rows).to_string()
}

/// Full post view. Content is printed as-is, markup included.
pub fn post_detail(
    post: &DisplayPost,
    share_links: &[(&'static str, String)],
    comments: &[Comment],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", post.title.bold()));
    out.push_str(&format!("By {} • {}\n", post.author.bold(), post.published));
    if !post.categories.is_empty() {
        out.push_str(&format!("[{}]\n", post.categories.join("] [")));
    }
    if !post.image_url.is_empty() {
        out.push_str(&format!("Image: {}\n", post.image_url));
    }
    if !post.video_url.is_empty() {
        out.push_str(&format!("Video: {}\n", post.video_url));
    }
    out.push('\n');
    out.push_str(&post.content);
    out.push_str("\n\n");

    out.push_str(&format!("{}\n", "Share this article".bold()));
    for (network, url) in share_links {
        out.push_str(&format!("  {network}: {url}\n"));
    }

    out.push_str(&format!("\n{}\n", "Comments".bold()));
    if comments.is_empty() {
        out.push_str("  No comments yet.\n");
    }
    for c in comments {
        out.push_str(&format!("  {} ({})\n    {}\n", c.name.bold(), c.date.dimmed(), c.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_posts;
    use serde_json::json;

    #[test]
    fn empty_list_has_a_message() {
        let browser = PostBrowser::new(vec![]);
        assert_eq!(post_page(&browser), "No posts found.");
        assert_eq!(admin_table(&[]), "No posts available.");
    }

    #[test]
    fn page_indicator_only_with_several_pages() {
        let raw: Vec<_> = (0..7)
            .map(|i| json!({"id": i.to_string(), "title": {"en": format!("Post {i}")}}))
            .collect();
        let browser = PostBrowser::new(normalize_posts(&raw));
        assert!(post_page(&browser).ends_with("Page 1 of 2"));

        let browser = PostBrowser::new(normalize_posts(&raw[..3]));
        assert!(!post_page(&browser).contains("Page"));
    }

    #[test]
    fn active_filters_are_listed_under_the_table() {
        let raw: Vec<_> = (0..3)
            .map(|i| json!({"id": i.to_string(), "title": {"en": format!("Post {i}")}, "categories": ["Rust"]}))
            .collect();
        let mut browser = PostBrowser::new(normalize_posts(&raw));
        assert!(!post_page(&browser).contains("Filtered by"));

        browser.set_search("post");
        browser.set_category(CategoryFilter::parse("Rust"));
        assert!(post_page(&browser).ends_with("Filtered by search \"post\", category Rust"));
    }

    #[test]
    fn admin_table_shows_normalized_fields() {
        let posts = normalize_posts(&[json!({
            "_id": "x1",
            "title": {"es": "Hola"},
            "author": {"name": "Ada"},
            "publishDate": "2024-01-09"
        })]);
        let table = admin_table(&posts);
        assert!(table.contains("Hola"));
        assert!(table.contains("Ada"));
        assert!(table.contains("Jan 9, 2024"));
        assert!(table.contains("x1"));
    }
}
