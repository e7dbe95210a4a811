//! Google Play catalog client
//!
//! Fetches the store details page for a package id and pulls title, developer
//! and summary out of the page's `application/ld+json` block. There is no
//! public metadata API, so this scrapes the same structured data search
//! engines consume, which has been the stable part of the page across
//! redesigns.

use super::{CatalogEntry, CatalogLookup, LookupError};
use async_trait::async_trait;
use serde_json::Value;

const DETAILS_URL: &str = "https://play.google.com/store/apps/details";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) adbsweep";

pub struct PlayCatalog {
    http: reqwest::Client,
}

impl PlayCatalog {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { http }
    }
}

impl Default for PlayCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogLookup for PlayCatalog {
    async fn lookup(&self, id: &str) -> Result<CatalogEntry, LookupError> {
        let response = self
            .http
            .get(DETAILS_URL)
            .query(&[("id", id), ("hl", "en"), ("gl", "us")])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !response.status().is_success() {
            return Err(LookupError::Request(format!(
                "status {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        extract_entry(&html).ok_or(LookupError::Malformed)
    }
}

/// Pull the first `application/ld+json` script body out of the page
fn find_ld_json(html: &str) -> Option<&str> {
    let marker = "application/ld+json";
    let at = html.find(marker)?;
    let rest = &html[at..];
    let start = rest.find('>')? + 1;
    let end = rest.find("</script>")?;
    if start >= end {
        return None;
    }
    Some(rest[start..end].trim())
}

/// Extract a complete entry; any missing field fails the whole lookup so a
/// record is either fully enriched or bare, never in between.
pub fn extract_entry(html: &str) -> Option<CatalogEntry> {
    let data: Value = serde_json::from_str(find_ld_json(html)?).ok()?;
    let title = data.get("name")?.as_str()?;
    let developer = data.get("author")?.get("name")?.as_str()?;
    let summary = data.get("description")?.as_str()?;
    Some(CatalogEntry {
        title: title.to_string(),
        developer: developer.to_string(),
        summary: summary.to_string(),
    })
}
