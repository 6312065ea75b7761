//! Social share links for a post page.

use url::form_urlencoded::byte_serialize;

/// Percent-encodes a URL component. Spaces become `%20`, not `+`; a literal
/// `+` is already escaped as `%2B` by the serializer.
fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `(network, url)` pairs in display order.
pub fn share_links(page_url: &str, title: &str) -> Vec<(&'static str, String)> {
    let page = encode(page_url);
    let title = encode(title);

    vec![
        ("Facebook", format!("https://facebook.com/sharer/sharer.php?u={page}")),
        ("Twitter", format!("https://twitter.com/intent/tweet?text={title}&url={page}")),
        ("WhatsApp", format!("https://wa.me/?text={title}%20{page}")),
        (
            "LinkedIn",
            format!("https://www.linkedin.com/sharing/share-offsite/?url={page}"),
        ),
    ]
}

/// Page address of one post.
pub fn post_page_url(base: &str, post_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), encode(post_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_encode_page_and_title() {
        let links = share_links("http://localhost:3000/post/abc", "Rust & you");
        let names: Vec<&str> = links.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Facebook", "Twitter", "WhatsApp", "LinkedIn"]);

        assert_eq!(
            links[0].1,
            "https://facebook.com/sharer/sharer.php?u=http%3A%2F%2Flocalhost%3A3000%2Fpost%2Fabc"
        );
        assert!(links[1].1.contains("text=Rust%20%26%20you&url=http%3A%2F%2F"));
        assert!(links[2].1.starts_with("https://wa.me/?text=Rust%20%26%20you%20http"));
    }

    #[test]
    fn plus_signs_stay_distinct_from_spaces() {
        assert_eq!(encode("C++ and Rust"), "C%2B%2B%20and%20Rust");
    }

    #[test]
    fn page_url_joins_base_and_id() {
        assert_eq!(
            post_page_url("http://localhost:3000/post/", "abc"),
            "http://localhost:3000/post/abc"
        );
    }
}
