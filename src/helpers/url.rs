//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a slug is placed in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Decide the class of a navigation element
///
/// Returns `active_class` when the current location equals the target href
/// exactly, and an empty string otherwise. No trailing-slash, case or
/// prefix normalization is applied: `/posts` is not active on `/posts/hello`.
///
/// # Examples
/// ```ignore
/// resolve_active_class("/about", "/about", "active") // -> "active"
/// resolve_active_class("/posts/hello", "/posts", "active") // -> ""
/// ```
pub fn resolve_active_class<'a>(current_path: &str, target_href: &str, active_class: &'a str) -> &'a str {
    if current_path == target_href {
        active_class
    } else {
        ""
    }
}

/// URL of a single post page
///
/// # Examples
/// ```ignore
/// post_url("my first post") // -> "/posts/my%20first%20post"
/// ```
pub fn post_url(slug: &str) -> String {
    format!("/posts/{}", utf8_percent_encode(slug, SEGMENT))
}

/// URL of a listing page; page 1 is the bare listing route
pub fn listing_url(page: u32) -> String {
    if page <= 1 {
        "/posts".to_string()
    } else {
        format!("/posts?page={}", page)
    }
}
