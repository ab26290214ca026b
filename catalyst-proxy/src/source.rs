use std::panic;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{Html, Selector};
use tokio::task;

use crate::cache::DocumentCache;
use crate::error::{Error, Result};

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

/// Downloads catalyst documents and turns them into plain text.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    cache: Arc<DocumentCache>,
}

impl Fetcher {
    pub fn new(client: Client, cache: Arc<DocumentCache>) -> Self {
        Self { client, cache }
    }

    pub async fn fetch_text(&self, url: &str) -> Result<Arc<String>> {
        if let Some(text) = self.cache.get(url).await {
            debug!("Serving {url} from cache");
            return Ok(text);
        }

        let text = fetch_document(&self.client, url).await?;
        Ok(self.cache.insert(url, text).await)
    }
}

pub async fn fetch_document(client: &Client, url: &str) -> Result<String> {
    debug!("Sending HTTP request to {url}");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    debug!("Reading response body");
    let body = response.bytes().await?;

    // PDF extraction is CPU-bound
    task::spawn_blocking(move || decode_body(content_type.as_deref(), &body)).await?
}

enum Kind {
    Pdf,
    Html,
    Text,
}

fn sniff(content_type: Option<&str>, body: &[u8]) -> Kind {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase());

    match mime.as_deref() {
        Some("application/pdf") => Kind::Pdf,
        Some("text/html") | Some("application/xhtml+xml") => Kind::Html,
        _ if body.starts_with(b"%PDF") => Kind::Pdf,
        _ => Kind::Text,
    }
}

pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<String> {
    match sniff(content_type, body) {
        Kind::Pdf => pdf_text(body),
        Kind::Html => Ok(html_text(&String::from_utf8_lossy(body))),
        Kind::Text => Ok(String::from_utf8_lossy(body).into_owned()),
    }
}

/// Page texts, concatenated without a separator.
fn pdf_text(body: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed documents
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(body))
        .map_err(|_| Error::PdfText("PDF parser panicked".to_string()))?
        .map_err(|err| Error::PdfText(err.to_string()))?;

    debug!("Extracted text from {} PDF pages", pages.len());
    Ok(pages.concat())
}

fn html_text(html: &str) -> String {
    let html = Html::parse_document(html);

    html.select(selector!("body"))
        .flat_map(|body| body.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
