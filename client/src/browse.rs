//! Search, category filter and pagination over normalized posts.
//!
//! All of it runs on the client; the API has no query parameters.

use crate::normalize::DisplayPost;

pub const POSTS_PER_PAGE: usize = 6;
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"All"` is the match-everything sentinel; anything else is an exact name.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(raw.to_owned())
        }
    }

    pub fn matches(&self, post: &DisplayPost) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => post.categories.iter().any(|c| c == name),
        }
    }
}

/// Browsing state of the post list: filters plus the current page (1-based).
#[derive(Debug, Clone)]
pub struct PostBrowser {
    posts: Vec<DisplayPost>,
    search: String,
    category: CategoryFilter,
    current_page: usize,
}

impl PostBrowser {
    pub fn new(posts: Vec<DisplayPost>) -> Self {
        Self {
            posts,
            search: String::new(),
            category: CategoryFilter::All,
            current_page: 1,
        }
    }

    pub fn posts(&self) -> &[DisplayPost] {
        &self.posts
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changing the search term sends the user back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.current_page = 1;
    }

    /// Changing the category sends the user back to page 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.current_page = 1;
    }

    pub fn filtered(&self) -> Vec<&DisplayPost> {
        let needle = self.search.to_lowercase();
        self.posts
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .filter(|p| self.category.matches(p))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(POSTS_PER_PAGE)
    }

    /// Posts on the current page.
    pub fn page(&self) -> Vec<&DisplayPost> {
        let start = (self.current_page - 1) * POSTS_PER_PAGE;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(POSTS_PER_PAGE)
            .collect()
    }

    /// Jumps to `page`, clamped to the existing pages (page 1 when there are none).
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        self.go_to(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.current_page.saturating_sub(1));
    }

    /// Category names of the loaded posts, first-seen order, no duplicates.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self.posts.iter().flat_map(|p| p.categories.iter()) {
            if !seen.contains(&name.as_str()) {
                seen.push(name);
            }
        }
        seen
    }
}
