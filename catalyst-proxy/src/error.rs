use std::io;

use reqwest::StatusCode;
use thiserror::Error;
use tokio::task;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("upstream answered with status {0}")]
    Status(StatusCode),

    #[error("could not extract text from PDF: {0}")]
    PdfText(String),

    #[error("decoding task failed: {0}")]
    Decode(#[from] task::JoinError),

    #[error("storage failure: {0}")]
    Storage(#[from] io::Error),

    #[error("could not render SVG: {0}")]
    Render(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
