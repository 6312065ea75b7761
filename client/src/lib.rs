//! Client side of the blog: normalization of loosely shaped post documents,
//! search/filter/pagination, post forms, the admin gate and local comments.
//!
//! The `blog` binary is a command-line front end over these pieces.

pub mod admin;
pub mod api;
pub mod browse;
pub mod categories;
pub mod comments;
pub mod config;
pub mod error;
pub mod form;
pub mod gate;
pub mod normalize;
pub mod render;
pub mod share;
pub mod storage;

#[cfg(test)]
mod testing;

pub use api::{HttpPostsApi, PostsApi};
pub use error::{ClientError, ClientResult};
pub use normalize::{DisplayPost, normalize_post, normalize_posts};

/// Prints an informational line with a blue bullet.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning line with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
