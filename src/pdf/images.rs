//! Writing bitmaps as a multi-page PDF using lopdf

use std::path::PathBuf;

use chrono::Local;
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, StringFormat, Stream};

use crate::error::{Error, Result};
use crate::layout::{PageSize, DEFAULT_DPI};

/// Name the image XObject is registered under in each page's resources
const IMAGE_NAME: &str = "Im0";

/// Options for writing images to a PDF
#[derive(Debug, Clone)]
pub struct ImagePdfOptions {
    /// Output PDF file path
    pub output_path: PathBuf,
    /// Document title stored in the Info dictionary
    pub title: Option<String>,
    /// Resolution used to turn pixels into page size
    pub dpi: f64,
}

impl ImagePdfOptions {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            title: None,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Write each image as one full page of a new PDF
///
/// Pages follow the order of `images`; each MediaBox is the image's own pixel
/// size at `options.dpi` (one pixel per point by default). Returns the number
/// of pages written.
///
/// # Example
///
/// ```no_run
/// use image::RgbImage;
/// use page_images_pdf::pdf::{write_images_pdf, ImagePdfOptions};
///
/// let page = RgbImage::new(600, 800);
/// write_images_pdf(&[&page], &ImagePdfOptions::new("out.pdf")).expect("Failed to write PDF");
/// ```
pub fn write_images_pdf(images: &[&RgbImage], options: &ImagePdfOptions) -> Result<usize> {
    if images.is_empty() {
        return Err(Error::General("No images provided".to_string()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(images.len());
    for bitmap in images {
        let (width, height) = bitmap.dimensions();
        let size = PageSize::for_pixels(width, height, options.dpi);

        let image_id = doc.add_object(image_xobject(bitmap));

        // Scale the unit square the image occupies up to the full page
        let content = format!(
            "q\n{} 0 0 {} 0 0 cm\n/{} Do\nQ\n",
            size.width.pt(),
            size.height.pt(),
            IMAGE_NAME
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set(IMAGE_NAME, Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let media_box: Vec<Object> = size.media_box().iter().map(|v| number(*v)).collect();

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("MediaBox", Object::Array(media_box));
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        kids.push(Object::Reference(doc.add_object(page)));
    }

    let page_count = kids.len();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_count as i64));
    pages_object.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages_object));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(info_dictionary(options.title.as_deref()));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();
    doc.save(&options.output_path)?;

    tracing::debug!("Wrote {} pages to {}", page_count, options.output_path.display());

    Ok(page_count)
}

/// Uncompressed RGB image XObject; `Document::compress` deflates it on save
fn image_xobject(bitmap: &RgbImage) -> Stream {
    let (width, height) = bitmap.dimensions();

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    Stream::new(dict, bitmap.as_raw().clone())
}

fn info_dictionary(title: Option<&str>) -> Dictionary {
    let mut info = Dictionary::new();
    if let Some(title) = title {
        info.set("Title", text_string(title));
    }
    info.set("Producer", text_string(concat!("page-images-pdf ", env!("CARGO_PKG_VERSION"))));
    let created = Local::now().format("D:%Y%m%d%H%M%S").to_string();
    info.set("CreationDate", Object::String(created.into_bytes(), StringFormat::Literal));
    info
}

/// PDF text string: literal for ASCII, UTF-16BE with byte order mark otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Integer when whole, real otherwise
fn number(value: f64) -> Object {
    if value.fract() == 0.0 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_input_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("none.pdf");
        let result = write_images_pdf(&[], &ImagePdfOptions::new(&output));
        assert!(matches!(result, Err(Error::General(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_text_string_encoding() {
        match text_string("Notes") {
            Object::String(bytes, StringFormat::Literal) => assert_eq!(bytes, b"Notes"),
            _ => panic!("expected a literal string"),
        }
        match text_string("Zellbiologie \u{e9}") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(bytes.len(), 2 + 2 * 14);
            }
            _ => panic!("expected a UTF-16 string"),
        }
    }

    #[test]
    fn test_number_prefers_integers() {
        assert!(matches!(number(600.0), Object::Integer(600)));
        assert!(matches!(number(300.5), Object::Real(v) if (v - 300.5).abs() < 0.001));
    }

    #[test]
    fn test_single_page_written() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("one.pdf");
        let bitmap = RgbImage::new(40, 30);

        let options = ImagePdfOptions {
            title: Some("One".to_string()),
            ..ImagePdfOptions::new(&output)
        };
        let pages = write_images_pdf(&[&bitmap], &options).unwrap();
        assert_eq!(pages, 1);

        let doc = Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
