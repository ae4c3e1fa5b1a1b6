//! Error types for the page image collector and PDF export

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// The page itself could not be fetched (network error or non-success status)
    #[error("Error fetching page {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A single image could not be downloaded
    #[error("Failed to download image {url}: {source}")]
    ImageFetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A single image was downloaded but is not a decodable picture
    #[error("Failed to decode image {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// Save attempted with every image unchecked
    #[error("No image selected, nothing to save")]
    EmptySelection,

    /// The page contained no usable images
    #[error("No images found")]
    NoImagesFound,

    /// Page address could not be parsed
    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Selection window failed to start or crashed
    #[error("Window error: {0}")]
    Gui(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// True for failures that only affect one image and should not stop the batch
    pub fn is_per_image(&self) -> bool {
        matches!(self, Error::ImageFetch { .. } | Error::Decode { .. })
    }
}
