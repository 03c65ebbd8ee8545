//! HTTP server for the rendered site

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::helpers::listing_url;
use crate::source::SourceError;
use crate::templates;
use crate::{Blog, ListingPage};

/// Query string of the listing route
#[derive(Debug, Deserialize)]
struct ListingQuery {
    page: Option<u32>,
}

/// A content API failure while rendering a page
struct PageError(SourceError);

impl From<SourceError> for PageError {
    fn from(err: SourceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Content API error: {}", self.0);
        (StatusCode::BAD_GATEWAY, "Content is temporarily unavailable").into_response()
    }
}

/// Build the site router
pub fn router(blog: Arc<Blog>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/posts", get(posts_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/about", get(about_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(blog)
}

/// Start the server and run until it stops
pub async fn start(blog: Arc<Blog>, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(blog)).await?;

    Ok(())
}

/// Path and query exactly as requested, used for active link matching
fn current_path(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
}

async fn home_handler(State(blog): State<Arc<Blog>>, uri: Uri) -> Html<String> {
    Html(templates::home_page(&blog.config, current_path(&uri)))
}

async fn posts_handler(
    State(blog): State<Arc<Blog>>,
    Query(query): Query<ListingQuery>,
    uri: Uri,
) -> Result<Response, PageError> {
    let page = query.page.unwrap_or(1);
    match blog.listing_page(page).await? {
        ListingPage::Found(listing) => Ok(Html(templates::posts_page(
            &blog.config,
            current_path(&uri),
            &listing,
        ))
        .into_response()),
        ListingPage::PastEnd { last_page } => {
            tracing::debug!("Listing page {} past the end, redirecting to {}", page, last_page);
            Ok(Redirect::temporary(&listing_url(last_page)).into_response())
        }
    }
}

async fn post_handler(
    State(blog): State<Arc<Blog>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    match blog.post(&slug).await? {
        Some(post) => {
            Ok(Html(templates::post_page(&blog.config, current_path(&uri), &post)).into_response())
        }
        None => {
            tracing::debug!("No post {:?}, redirecting to the listing", slug);
            Ok(Redirect::temporary("/posts").into_response())
        }
    }
}

async fn about_handler(State(blog): State<Arc<Blog>>, uri: Uri) -> Result<Response, PageError> {
    match blog.about().await? {
        Some(about) => {
            Ok(Html(templates::about_page(&blog.config, current_path(&uri), &about)).into_response())
        }
        None => Ok(not_found_handler().await.into_response()),
    }
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
