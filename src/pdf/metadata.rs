//! Reading back what a produced PDF contains

use std::path::Path;
use lopdf::{Document, Object, ObjectId};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = reference(doc.trailer.get(b"Root").ok(), "Root in trailer")?;
    let catalog = doc.get_dictionary(catalog_id)?;

    let pages_id = reference(catalog.get(b"Pages").ok(), "Pages in catalog")?;
    let pages = doc.get_dictionary(pages_id)?;

    match pages.get(b"Count") {
        Ok(Object::Integer(n)) => Ok(*n as usize),
        Ok(_) => Err(Error::General("Count is not an integer".to_string())),
        Err(_) => Err(Error::General("No Count in Pages".to_string())),
    }
}

fn reference(object: Option<&Object>, what: &str) -> Result<ObjectId> {
    match object {
        Some(Object::Reference(id)) => Ok(*id),
        Some(_) => Err(Error::General(format!("{} is not a reference", what))),
        None => Err(Error::General(format!("No {}", what))),
    }
}

/// PDF metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// MediaBox width and height of each page, in page order
    pub page_sizes: Vec<(f32, f32)>,
}

/// Extract page count, title and page sizes from a PDF file
pub fn inspect_pdf(path: &Path) -> Result<PdfMetadata> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;

    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    let mut page_sizes = Vec::with_capacity(page_count);
    for page_id in doc.get_pages().into_values() {
        page_sizes.push(media_box_size(&doc, page_id)?);
    }

    Ok(PdfMetadata {
        page_count,
        title: info_title(&doc),
        page_sizes,
    })
}

fn media_box_size(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page = doc.get_dictionary(page_id)?;
    let rect = page.get(b"MediaBox")?.as_array()?;
    if rect.len() != 4 {
        return Err(Error::General(format!("Malformed MediaBox on page {:?}", page_id)));
    }
    let x0 = rect[0].as_float()?;
    let y0 = rect[1].as_float()?;
    let x1 = rect[2].as_float()?;
    let y1 = rect[3].as_float()?;
    Ok(((x1 - x0).abs(), (y1 - y0).abs()))
}

fn info_title(doc: &Document) -> Option<String> {
    let info_id = reference(doc.trailer.get(b"Info").ok(), "Info").ok()?;
    let info = doc.get_dictionary(info_id).ok()?;
    let bytes = info.get(b"Title").ok()?.as_str().ok()?;
    Some(decode_text_string(bytes))
}

/// Inverse of the writer's text string encoding
fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}
