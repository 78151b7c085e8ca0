use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::info;

pub const CATALOG_URL: &str = "https://books.toscrape.com/";

const USER_AGENT: &str = "EduCrawler/1.0 (+contact: you@example.com; purpose=study; respect-robots)";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
const LANGUAGES: &str = "vi,en;q=0.9";
const TIMEOUT: Duration = Duration::from_secs(15);

fn client() -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANGUAGES));

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// GET one catalog page and return its body. Any transport error or non-2xx
/// status is returned as an error; there is no retry.
pub async fn fetch_page(url: &str) -> Result<String> {
    let client = client()?;

    info!("Fetching catalog page: {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Bad status from {}", url))?;

    let body = response
        .text()
        .await
        .context("Failed to read catalog page body")?;
    info!("Fetched {} bytes", body.len());
    Ok(body)
}
