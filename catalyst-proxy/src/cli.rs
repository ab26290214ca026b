use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use catalyst_parser::Event;
use chrono::NaiveDate;
use getopts::{Matches, Options};
use tokio::time::Duration;

use crate::catalyst::{format_label, CatalystSource};

const DEFAULT_LABEL: &str = "Patent Expiry";

pub struct Args {
    pub address: SocketAddr,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub sources: Vec<CatalystSource>,
    pub events: Vec<Event>,
    pub data_dir: Option<PathBuf>,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of fetched documents [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached documents [Default: 3600]",
        "SECONDS",
    );
    opts.optopt(
        "",
        "fetch-timeout",
        "Timeout for fetching a document [Default: 30]",
        "SECONDS",
    );
    opts.optmulti(
        "d",
        "document",
        "URL of a PDF, HTML or text document naming a catalyst date",
        "URL",
    );
    opts.optmulti(
        "y",
        "expected-year",
        "Year the date of the document at the same position must fall into",
        "YEAR",
    );
    opts.optmulti(
        "l",
        "label",
        "Label of the document at the same position [Default: Patent Expiry]",
        "LABEL",
    );
    opts.optmulti(
        "e",
        "event",
        "Catalyst known up front, e.g. '2027-06-01=DrugX: FDA Decision'",
        "DATE=LABEL",
    );
    opts.optopt(
        "",
        "data-dir",
        "Directory holding the watchlist [Default: kept in memory]",
        "PATH",
    );
    opts
}

fn parse_event(raw: &str) -> Result<Event, String> {
    let Some((date, label)) = raw.split_once('=') else {
        return Err(format!("'{raw}' is not of the form DATE=LABEL"));
    };

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|err| format!("'{date}' is not a YYYY-MM-DD date: {err}"))?;

    Ok(Event::new(date, format_label(label.trim(), date)))
}

fn parse_sources(matches: &Matches) -> Result<Vec<CatalystSource>, String> {
    let urls = matches.opt_strs("document");
    let years = matches.opt_strs("expected-year");
    let labels = matches.opt_strs("label");

    if urls.len() != years.len() {
        return Err(format!(
            "Every document needs an expected year ({} documents, {} years)",
            urls.len(),
            years.len()
        ));
    }

    if labels.len() > urls.len() {
        return Err("More labels than documents".to_string());
    }

    urls.into_iter()
        .zip(years)
        .enumerate()
        .map(|(idx, (url, year))| -> Result<CatalystSource, String> {
            let expected_year = year
                .parse::<i32>()
                .map_err(|err| format!("Provided value for option 'expected-year' is invalid: {err}"))?;

            let label = labels
                .get(idx)
                .cloned()
                .unwrap_or_else(|| DEFAULT_LABEL.to_string());

            Ok(CatalystSource {
                url,
                expected_year,
                label,
            })
        })
        .collect()
}

fn build(matches: &Matches) -> Result<Args, String> {
    let address = matches
        .opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
        .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?;

    let enable_cache = matches.opt_present("enable-cache");

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 3600)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    let fetch_timeout = matches
        .opt_get_default("fetch-timeout", 30)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'fetch-timeout' is invalid: {err}"))?;

    let sources = parse_sources(matches)?;

    let events = matches
        .opt_strs("event")
        .iter()
        .map(|raw| parse_event(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let data_dir = matches.opt_str("data-dir").map(PathBuf::from);

    Ok(Args {
        address,
        enable_cache,
        cache_ttl,
        fetch_timeout,
        sources,
        events,
        data_dir,
    })
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match build(&matches) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
