use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

struct Entry {
    text: Arc<String>,
    expires: Instant,
}

/// Extracted document text by URL, kept for `ttl` so repeated renders of
/// the calendar do not hit the upstream server every time.
pub struct DocumentCache {
    enabled: bool,
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl DocumentCache {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            entries: Default::default(),
        })
    }

    pub async fn insert(&self, url: &str, text: String) -> Arc<String> {
        let text = Arc::new(text);
        if !self.enabled {
            return text;
        }

        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| entry.expires > now);
        entries.insert(
            url.to_owned(),
            Entry {
                text: Arc::clone(&text),
                expires: now + self.ttl,
            },
        );

        text
    }

    pub async fn get(&self, url: &str) -> Option<Arc<String>> {
        if !self.enabled {
            return None;
        }

        self.entries
            .read()
            .await
            .get(url)
            .filter(|entry| entry.expires > Instant::now())
            .map(|entry| Arc::clone(&entry.text))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
