//! PDF output module

pub mod images;
pub mod metadata;

// Re-export commonly used items
pub use images::{write_images_pdf, ImagePdfOptions};
pub use metadata::{inspect_pdf, PdfMetadata};
