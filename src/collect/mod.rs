//! Image collection: fetch a page, find its images, download and decode them

pub mod charset;
pub mod extensions;
pub mod fetch;
pub mod html;

use image::RgbImage;
use indicatif::ProgressBar;
use url::Url;

use crate::error::{Error, Result};
use crate::progress_bar::progress_bar_style;

pub use charset::decode_page;
pub use extensions::{extension_of, Extensions, DEFAULT_EXTENSIONS};
pub use fetch::{FetchOptions, Fetched, Fetcher, HttpFetcher, MemoryFetcher};
pub use html::{resolve_candidates, scan_page, PageScan, UNTITLED};

/// A downloaded image, normalized to opaque RGB
#[derive(Debug, Clone)]
pub struct DecodedImage {
    url: Url,
    bitmap: RgbImage,
}

impl DecodedImage {
    pub fn new(url: Url, bitmap: RgbImage) -> Self {
        Self { url, bitmap }
    }

    /// Address the image was downloaded from
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn bitmap(&self) -> &RgbImage {
        &self.bitmap
    }

    /// Pixel size as `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }
}

/// Options for collecting images from a page
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Extensions an image URL must have to be downloaded
    pub extensions: Extensions,
    /// Draw a progress bar on stderr while downloading
    pub show_progress: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            extensions: Extensions::default(),
            show_progress: true,
        }
    }
}

/// Everything gathered from one page
#[derive(Debug, Clone)]
pub struct Collection {
    /// Page title, or [`UNTITLED`]
    pub title: String,
    /// Successfully decoded images in document order
    pub images: Vec<DecodedImage>,
    /// Number of `<img>` elements seen on the page
    pub element_count: usize,
}

impl Collection {
    /// Pass the collection on only if it holds at least one image
    ///
    /// An empty page is reported as [`Error::NoImagesFound`] so callers stop
    /// before asking for an output name or opening the selection window.
    pub fn require_images(self) -> Result<Self> {
        if self.images.is_empty() {
            Err(Error::NoImagesFound)
        } else {
            Ok(self)
        }
    }
}

/// Parse the address typed by the user
pub fn parse_page_url(input: &str) -> Result<Url> {
    let input = input.trim();
    Url::parse(input).map_err(|source| Error::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

/// Collect every accepted image from a webpage
///
/// Only the page fetch is fatal. Each image that fails to download or decode
/// is logged and skipped, so the result may be shorter than the candidate
/// list, or empty. Downloads run one at a time in document order.
///
/// # Example
///
/// ```no_run
/// use page_images_pdf::collect::{collect_images, parse_page_url, CollectOptions, FetchOptions, HttpFetcher};
///
/// let fetcher = HttpFetcher::new(&FetchOptions::default()).expect("client");
/// let page = parse_page_url("https://www.example.com/article.html").expect("url");
/// let collection = collect_images(&fetcher, &page, &CollectOptions::default()).expect("page");
/// println!("{}: {} images", collection.title, collection.images.len());
/// ```
pub fn collect_images<F>(fetcher: &F, page_url: &Url, options: &CollectOptions) -> Result<Collection>
where
    F: Fetcher + ?Sized,
{
    let page = fetcher.fetch(page_url).map_err(|source| Error::Fetch {
        url: page_url.to_string(),
        source,
    })?;

    let scan = scan_page(&decode_page(&page))?;
    tracing::info!("Found {} images. Downloading...", scan.element_count);

    let candidates = resolve_candidates(page_url, &scan.sources, &options.extensions);
    tracing::debug!(
        "{} of {} sources have an accepted extension ({})",
        candidates.len(),
        scan.sources.len(),
        options.extensions
    );

    let pb = if options.show_progress {
        ProgressBar::new(candidates.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(progress_bar_style());
    pb.set_message("Downloading images");

    let mut images = Vec::with_capacity(candidates.len());
    for url in candidates {
        match download_image(fetcher, &url) {
            Ok(image) => images.push(image),
            Err(e) if e.is_per_image() => pb.suspend(|| tracing::warn!("{}", e)),
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Downloaded");

    Ok(Collection {
        title: scan.title,
        images,
        element_count: scan.element_count,
    })
}

/// Download one image and decode it to RGB
///
/// Fails with [`Error::ImageFetch`] or [`Error::Decode`].
pub fn download_image<F>(fetcher: &F, url: &Url) -> Result<DecodedImage>
where
    F: Fetcher + ?Sized,
{
    let fetched = fetcher.fetch(url).map_err(|source| Error::ImageFetch {
        url: url.to_string(),
        source,
    })?;
    let decoded = image::load_from_memory(&fetched.body).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })?;
    Ok(DecodedImage::new(url.clone(), decoded.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_rgba(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 0]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    fn quiet() -> CollectOptions {
        CollectOptions {
            show_progress: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_page_url() {
        assert!(parse_page_url("  https://x.test/a/b.html ").is_ok());
        let err = parse_page_url("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_download_normalizes_alpha_away() {
        let fetcher = MemoryFetcher::new().with("https://x.test/t.png", png_rgba(3, 2));
        let url = Url::parse("https://x.test/t.png").unwrap();
        let image = download_image(&fetcher, &url).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.bitmap().get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(image.url(), &url);
    }

    #[test]
    fn test_download_garbage_is_decode_error() {
        let fetcher = MemoryFetcher::new().with("https://x.test/bad.png", b"not an image".to_vec());
        let url = Url::parse("https://x.test/bad.png").unwrap();
        let err = download_image(&fetcher, &url).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.is_per_image());
    }

    #[test]
    fn test_page_fetch_failure_is_fatal() {
        let fetcher = MemoryFetcher::new();
        let page = Url::parse("https://x.test/missing.html").unwrap();
        let err = collect_images(&fetcher, &page, &quiet()).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn test_latin1_title_decoded() {
        let html = b"<html><head><meta charset=\"iso-8859-1\"><title>Caf\xE9 Notes</title></head></html>";
        let fetcher = MemoryFetcher::new().with("https://x.test/p.html", html.to_vec());
        let page = Url::parse("https://x.test/p.html").unwrap();

        let collection = collect_images(&fetcher, &page, &quiet()).unwrap();
        assert_eq!(collection.title, "Caf\u{e9} Notes");
    }

    #[test]
    fn test_header_charset_decodes_title() {
        let response = Fetched::new(b"<title>Stra\xDFe</title>".to_vec())
            .with_content_type("text/html; charset=windows-1252");
        let fetcher = MemoryFetcher::new().with_response("https://x.test/p.html", response);
        let page = Url::parse("https://x.test/p.html").unwrap();

        let collection = collect_images(&fetcher, &page, &quiet()).unwrap();
        assert_eq!(collection.title, "Stra\u{df}e");
    }

    #[test]
    fn test_require_images() {
        let empty = Collection {
            title: "Empty".to_string(),
            images: Vec::new(),
            element_count: 2,
        };
        assert!(matches!(empty.require_images(), Err(Error::NoImagesFound)));

        let url = Url::parse("https://x.test/a.png").unwrap();
        let one = Collection {
            title: "One".to_string(),
            images: vec![DecodedImage::new(url, RgbImage::new(1, 1))],
            element_count: 1,
        };
        assert_eq!(one.require_images().unwrap().images.len(), 1);
    }

    #[test]
    fn test_sourceless_images_make_no_requests() {
        let html = r#"<html><head><title>Empty</title></head>
            <body><img alt="a"><img data-src="" src=""><img></body></html>"#;
        let fetcher = MemoryFetcher::new().with("https://x.test/p.html", html);
        let page = Url::parse("https://x.test/p.html").unwrap();

        let collection = collect_images(&fetcher, &page, &quiet()).unwrap();
        assert!(collection.images.is_empty());
        assert_eq!(collection.element_count, 3);
        assert_eq!(collection.title, "Empty");
        assert_eq!(fetcher.requests(), vec!["https://x.test/p.html"]);
    }
}
