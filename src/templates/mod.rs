//! Page templates
//!
//! Pages are assembled from the helper functions into a shared layout. The
//! markup is deliberately plain; styling is left to the stylesheet.

use crate::config::SiteConfig;
use crate::content::{AboutContent, ContentSummary, PostDetail};
use crate::helpers::{escape_html, image_tag, nav_link, pager, post_url};
use crate::listing::ListingPageState;

/// Wrap a page body in the site layout
///
/// `current_path` is the request path and query exactly as received; the
/// navigation entry equal to it is marked active.
pub fn layout(config: &SiteConfig, current_path: &str, title: &str, body: &str) -> String {
    let mut nav = String::new();
    for item in &config.nav {
        nav.push_str(&nav_link(
            current_path,
            &item.href,
            &item.label,
            &config.active_class,
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<header><nav>{nav}</nav></header>\n\
         {body}\n</body>\n</html>\n",
        lang = escape_html(&config.language),
        title = escape_html(title),
        nav = nav,
        body = body,
    )
}

/// Home page
pub fn home_page(config: &SiteConfig, current_path: &str) -> String {
    let body = format!(
        r#"<main class="container"><h1>{}</h1><a href="/posts">Conteúdos</a></main>"#,
        escape_html(&config.title)
    );
    layout(config, current_path, &config.title, &body)
}

/// Post listing with pager
pub fn posts_page(config: &SiteConfig, current_path: &str, listing: &ListingPageState) -> String {
    let mut body = r#"<main class="container"><div class="posts">"#.to_string();

    if listing.items.is_empty() {
        body.push_str(r#"<p class="posts-empty">Nenhum post encontrado.</p>"#);
    }

    for post in &listing.items {
        body.push_str(&summary_card(post));
    }

    body.push_str(&pager(&listing.affordances()));
    body.push_str("</div></main>");

    layout(config, current_path, &config.title, &body)
}

fn summary_card(post: &ContentSummary) -> String {
    format!(
        r#"<a class="post-card" href="{href}">{cover}<strong>{title}</strong><time>{date}</time><p>{description}</p></a>"#,
        href = post_url(&post.slug),
        cover = image_tag(&post.cover, &post.title),
        title = escape_html(&post.title),
        date = escape_html(&post.updated_at),
        description = escape_html(&post.description),
    )
}

/// A single post
pub fn post_page(config: &SiteConfig, current_path: &str, post: &PostDetail) -> String {
    let body = format!(
        r#"<main class="container"><article class="post">{cover}<h1>{title}</h1><time>{date}</time><div class="post-content">{content}</div></article></main>"#,
        cover = image_tag(&post.cover, &post.title),
        title = escape_html(&post.title),
        date = escape_html(&post.updated_at),
        content = post.description_html,
    );
    layout(config, current_path, &post.title, &body)
}

/// About page
pub fn about_page(config: &SiteConfig, current_path: &str, about: &AboutContent) -> String {
    let mut links = String::new();
    for (name, url) in [
        ("Instagram", &about.instagram),
        ("Facebook", &about.facebook),
        ("LinkedIn", &about.linkedin),
    ] {
        if !url.is_empty() {
            links.push_str(&format!(
                r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                escape_html(url),
                name
            ));
        }
    }

    let body = format!(
        r#"<main class="container"><div class="about"><section><h1>{title}</h1><p>{description}</p>{links}</section>{banner}</div></main>"#,
        title = escape_html(&about.title),
        description = escape_html(&about.description),
        links = links,
        banner = image_tag(&about.banner, &about.title),
    );
    layout(config, current_path, &about.title, &body)
}
