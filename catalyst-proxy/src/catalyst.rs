use catalyst_parser::{extract_expiry, Event};
use chrono::NaiveDate;
use log::{info, warn};

use crate::source::Fetcher;

/// A document expected to name one catalyst date in `expected_year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalystSource {
    pub url: String,
    pub expected_year: i32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Event),
    NotFound,
    FetchFailed(String),
}

impl Lookup {
    pub fn notice(&self, source: &CatalystSource) -> Option<String> {
        match self {
            Lookup::Found(_) => None,
            Lookup::NotFound => Some(format!(
                "No {} date in {} found in {}",
                source.label, source.expected_year, source.url
            )),
            Lookup::FetchFailed(reason) => Some(format!(
                "Could not fetch {}: {reason}",
                source.url
            )),
        }
    }
}

/// Events and user-facing notices of one render cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub events: Vec<Event>,
    pub notices: Vec<String>,
}

impl Resolution {
    pub fn collect(
        sources: &[CatalystSource],
        lookups: Vec<Lookup>,
        static_events: &[Event],
    ) -> Self {
        let mut resolution = Resolution::default();

        for (source, lookup) in sources.iter().zip(lookups) {
            if let Some(notice) = lookup.notice(source) {
                resolution.notices.push(notice);
            }

            if let Lookup::Found(event) = lookup {
                resolution.events.push(event);
            }
        }

        resolution.events.extend_from_slice(static_events);
        resolution
    }
}

/// `IMP321: Patent Expiry` on 2036-01-08 becomes
/// `IMP321: Patent Expiry\n8 January 2036`.
pub fn format_label(label: &str, date: NaiveDate) -> String {
    format!("{label}\n{}", date.format("%-d %B %Y"))
}

pub fn lookup_in_text(source: &CatalystSource, text: &str) -> Lookup {
    match extract_expiry(text, source.expected_year) {
        Some(date) => Lookup::Found(Event::new(date, format_label(&source.label, date))),
        None => Lookup::NotFound,
    }
}

pub async fn lookup(fetcher: &Fetcher, source: &CatalystSource) -> Lookup {
    let text = match fetcher.fetch_text(&source.url).await {
        Ok(text) => text,
        Err(err) => {
            warn!("Fetching {} failed: {err}", source.url);
            return Lookup::FetchFailed(err.to_string());
        }
    };

    let lookup = lookup_in_text(source, &text);
    match &lookup {
        Lookup::Found(event) => info!("Found {} on {} in {}", source.label, event.date, source.url),
        _ => warn!("No {} date in {} in {}", source.label, source.expected_year, source.url),
    }

    lookup
}

/// Fetches and scans every source in turn, then appends the static events.
pub async fn resolve(
    fetcher: &Fetcher,
    sources: &[CatalystSource],
    static_events: &[Event],
) -> Resolution {
    let mut lookups = Vec::with_capacity(sources.len());
    for source in sources {
        lookups.push(lookup(fetcher, source).await);
    }

    Resolution::collect(sources, lookups, static_events)
}
