//! HTML helper functions

use super::url::resolve_active_class;

/// Escape text for use in element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate a navigation anchor that carries `active_class` on its own route
///
/// # Examples
/// ```ignore
/// nav_link("/about", "/about", "About", "active") // -> <a href="/about" class="active">About</a>
/// nav_link("/", "/about", "About", "active")      // -> <a href="/about">About</a>
/// ```
pub fn nav_link(current_path: &str, href: &str, label: &str, active_class: &str) -> String {
    let class = resolve_active_class(current_path, href, active_class);
    if class.is_empty() {
        format!(r#"<a href="{}">{}</a>"#, escape_html(href), escape_html(label))
    } else {
        format!(
            r#"<a href="{}" class="{}">{}</a>"#,
            escape_html(href),
            escape_html(class),
            escape_html(label)
        )
    }
}

/// Generate an image tag, or nothing when there is no source
pub fn image_tag(src: &str, alt: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    format!(
        r#"<img src="{}" alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_nav_link_active() {
        assert_eq!(
            nav_link("/posts", "/posts", "Posts", "active"),
            r#"<a href="/posts" class="active">Posts</a>"#
        );
    }

    #[test]
    fn test_nav_link_inactive_on_child_route() {
        assert_eq!(
            nav_link("/posts/hello", "/posts", "Posts", "active"),
            r#"<a href="/posts">Posts</a>"#
        );
    }

    #[test]
    fn test_image_tag() {
        assert_eq!(image_tag("", "x"), "");
        assert_eq!(
            image_tag("https://cdn/x.png", "Cover"),
            r#"<img src="https://cdn/x.png" alt="Cover">"#
        );
    }
}
