//! Page Images PDF Library
//!
//! Turn the illustrations of a webpage into a single PDF.
//! This library provides functionality to:
//! - Fetch a page and collect its `<img>` images (lazy-load sources first)
//! - Filter candidates by file extension and decode them to RGB bitmaps
//! - Track which images the user selected
//! - Write the selected images as one PDF, one full page per image
//! - Show a desktop window for picking images
//!
//! # Example
//!
//! ```no_run
//! use page_images_pdf::collect::{collect_images, parse_page_url, CollectOptions, FetchOptions, HttpFetcher};
//! use page_images_pdf::naming::default_output_name;
//! use page_images_pdf::session::Session;
//!
//! let fetcher = HttpFetcher::new(&FetchOptions::default()).expect("Failed to build client");
//! let page = parse_page_url("https://www.example.com/article.html").expect("Bad URL");
//! let collection = collect_images(&fetcher, &page, &CollectOptions::default()).expect("Failed to fetch page");
//!
//! let output = default_output_name(&collection.title);
//! let session = Session::new(collection, output);
//! session.save(&session.select_all()).expect("Failed to save PDF");
//! ```

pub mod error;
pub mod collect;
pub mod selection;
pub mod session;
pub mod prompt;
pub mod naming;
pub mod layout;
pub mod pdf;
pub mod shell;
pub mod logging;
pub mod progress_bar;

// Re-export commonly used items
pub use error::{Error, Result};
