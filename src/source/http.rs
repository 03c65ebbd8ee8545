//! Content source backed by a Prismic-style search API

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{ContentPage, ContentSource, SourceError};
use crate::config::{ApiConfig, ListingConfig};
use crate::content::RawDocument;

/// Response body of `GET {endpoint}/documents/search`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    results: Vec<RawDocument>,
}

fn first_page() -> u32 {
    1
}

/// HTTP client for the content API
pub struct HttpContentSource {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    ref_id: Option<String>,
    listing: ListingConfig,
}

impl HttpContentSource {
    /// Build a client from the site's API and listing settings
    pub fn new(api: &ApiConfig, listing: &ListingConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: api.endpoint.trim_end_matches('/').to_string(),
            access_token: api.access_token.clone(),
            ref_id: api.ref_id.clone(),
            listing: listing.clone(),
        })
    }

    /// Run a search query; extra parameters are appended after the predicate
    async fn search(
        &self,
        predicate: String,
        extra: &[(&str, String)],
    ) -> Result<SearchResponse, SourceError> {
        let url = format!("{}/documents/search", self.endpoint);

        let mut params: Vec<(&str, String)> = vec![("q", predicate)];
        params.extend(extra.iter().cloned());
        if let Some(ref_id) = &self.ref_id {
            params.push(("ref", ref_id.clone()));
        }
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        tracing::debug!("GET {} {:?}", url, params.iter().map(|(k, _)| *k).collect::<Vec<_>>());

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_content_page(&self, page: u32) -> Result<ContentPage, SourceError> {
        let mut extra = vec![
            ("orderings", self.listing.ordering.clone()),
            ("pageSize", self.listing.page_size.to_string()),
            ("page", page.to_string()),
        ];
        if !self.listing.fetch.is_empty() {
            extra.push(("fetch", self.listing.fetch.join(",")));
        }

        let response = self
            .search(type_predicate(&self.listing.post_type), &extra)
            .await?;

        tracing::debug!(
            "Fetched listing page {} of {} ({} documents)",
            response.page,
            response.total_pages,
            response.results.len()
        );

        Ok(ContentPage {
            items: response.results,
            page: response.page,
            // An empty repository still has one (empty) page
            total_pages: response.total_pages.max(1),
        })
    }

    async fn fetch_by_uid(&self, doc_type: &str, uid: &str) -> Result<Option<RawDocument>, SourceError> {
        let predicate = format!(
            r#"[[at(my.{}.uid,"{}")]]"#,
            doc_type,
            escape_literal(uid)
        );
        let response = self.search(predicate, &[("pageSize", "1".to_string())]).await?;
        Ok(response.results.into_iter().next())
    }

    async fn fetch_single(&self, doc_type: &str) -> Result<Option<RawDocument>, SourceError> {
        let response = self
            .search(type_predicate(doc_type), &[("pageSize", "1".to_string())])
            .await?;
        Ok(response.results.into_iter().next())
    }
}

fn type_predicate(doc_type: &str) -> String {
    format!(r#"[[at(document.type,"{}")]]"#, escape_literal(doc_type))
}

/// Escape a value placed inside a quoted predicate literal
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
