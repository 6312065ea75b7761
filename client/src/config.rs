//! Client settings from the environment (and `.env`).

use std::path::PathBuf;

use url::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_PAGE_URL: &str = "http://localhost:3000/post";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where the blog API lives.
    pub api_url: Url,
    /// Directory holding the local key/value file (admin flag, comments).
    pub home: PathBuf,
    /// Public page of a post, minus the id. Used for share links.
    pub page_url: String,
}

impl ClientConfig {
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();

        let raw_api = std::env::var("BLOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let api_url =
            Url::parse(&raw_api).map_err(|e| ClientError::InvalidBaseUrl(format!("{raw_api}: {e}")))?;

        let home = std::env::var("BLOG_CLIENT_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home());

        let page_url = std::env::var("BLOG_PAGE_URL").unwrap_or_else(|_| DEFAULT_PAGE_URL.into());

        Ok(Self {
            api_url,
            home,
            page_url,
        })
    }
}

fn default_home() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("blog-client");
    path
}
