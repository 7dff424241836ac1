use crate::error::{IngestError, Result};
use crate::html::extract_html;
use phrase_core::{Document, Source};
use reqwest::{header, Client};
use url::Url;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches web pages and turns their paragraph text into documents.
#[derive(Debug, Clone)]
pub struct WebFetcher {
    client: Client,
}

impl WebFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("phrase-search/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<Document> {
        let url = parse_url(raw_url)?;
        let resp = self.client.get(url.clone()).header(header::ACCEPT, "text/html,*/*;q=0.8").send().await?;
        if !resp.status().is_success() {
            return Err(IngestError::HttpStatus { url: url.to_string(), status: resp.status().as_u16() });
        }
        let body = resp.text().await?;
        let page = extract_html(&body)?;
        let url = url.to_string();
        let title = page.title.unwrap_or_else(|| url.clone());
        let doc = Document::from_text(title, page.text, Source::Web { url: url.clone() });
        if doc.is_empty() {
            return Err(IngestError::NoText(url));
        }
        tracing::debug!(%url, title = doc.title(), sentences = doc.len(), "fetched page");
        Ok(doc)
    }
}

/// Accept full URLs, or bare hosts which are assumed to be https.
pub fn parse_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw).or_else(|_| Url::parse(&format!("https://{raw}"))).map_err(|e| IngestError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !url.scheme().starts_with("http") || url.host_str().is_none() {
        return Err(IngestError::InvalidUrl { url: raw.to_string(), reason: "not an http(s) url".into() });
    }
    Ok(url)
}
